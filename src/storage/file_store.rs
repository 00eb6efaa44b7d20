use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::models::PoolData;

use super::AwardStore;

/// JSON 文件存储：每个奖池一个 `<data_dir>/<pool_id>.json`
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// 奖池 id 只允许字母数字与 - _，保证拼出的路径不会越出 data_dir
    fn pool_path(&self, pool_id: &str) -> AppResult<PathBuf> {
        if pool_id.is_empty()
            || !pool_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AppError::ValidationError(format!(
                "Invalid pool id: {pool_id}"
            )));
        }
        Ok(self.data_dir.join(format!("{pool_id}.json")))
    }
}

impl AwardStore for FileStore {
    async fn load(&self, pool_id: &str) -> AppResult<PoolData> {
        let path = self.pool_path(pool_id)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("Pool not found: {pool_id}")));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, pool_id: &str, pool: &PoolData) -> AppResult<()> {
        let path = self.pool_path(pool_id)?;
        let raw = serde_json::to_string_pretty(pool)?;
        tokio::fs::write(&path, raw).await?;
        Ok(())
    }
}
