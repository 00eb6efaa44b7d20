use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::PoolData;

use super::AwardStore;

/// 内存存储：测试与内嵌场景用，进程内读写一致
#[derive(Debug, Default)]
pub struct MemoryStore {
    pools: Mutex<HashMap<String, PoolData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个奖池
    pub async fn insert(&self, pool_id: impl Into<String>, pool: PoolData) {
        self.pools.lock().await.insert(pool_id.into(), pool);
    }
}

impl AwardStore for MemoryStore {
    async fn load(&self, pool_id: &str) -> AppResult<PoolData> {
        self.pools
            .lock()
            .await
            .get(pool_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Pool not found: {pool_id}")))
    }

    async fn save(&self, pool_id: &str, pool: &PoolData) -> AppResult<()> {
        self.pools
            .lock()
            .await
            .insert(pool_id.to_string(), pool.clone());
        Ok(())
    }
}
