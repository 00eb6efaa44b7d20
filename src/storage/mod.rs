use std::future::Future;

use crate::error::AppResult;
use crate::models::PoolData;

pub mod file_store;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

/// 奖池存储能力：按奖池 id 读出 / 整体写回一个奖池
///
/// 约定:
/// - 未知奖池返回 `AppError::NotFound`
/// - save 为全量改写；同进程内 save 之后的 load 必须读到新数据
pub trait AwardStore: Send + Sync {
    fn load(&self, pool_id: &str) -> impl Future<Output = AppResult<PoolData>> + Send;

    fn save(&self, pool_id: &str, pool: &PoolData) -> impl Future<Output = AppResult<()>> + Send;
}
