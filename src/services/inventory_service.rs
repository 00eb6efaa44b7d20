use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{AwardRecord, PoolData};
use crate::storage::AwardStore;

/// 库存台账：stock 的唯一改写入口
///
/// 互斥锁覆盖完整的 读取 -> 判断 -> 改写 -> 落盘 区间，
/// 同一存储实例上的扣减严格串行，并发抽奖不可能把库存扣成负数。
pub struct InventoryService<S> {
    store: Arc<Mutex<S>>,
}

impl<S> Clone for InventoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: AwardStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// 读取整个奖池（只读快照）
    pub async fn load_pool(&self, pool_id: &str) -> AppResult<PoolData> {
        let store = self.store.lock().await;
        store.load(pool_id).await
    }

    /// 读取当前权威奖品记录（只读快照）
    pub async fn list(&self, pool_id: &str) -> AppResult<Vec<AwardRecord>> {
        Ok(self.load_pool(pool_id).await?.awards)
    }

    /// 条件扣减：奖品存在且 stock > 0 时扣 1 并整池落盘，返回 true；
    /// 否则返回 false，不产生任何写入。
    ///
    /// 落盘失败重试一次，仍失败则视为未扣减并返回 PersistenceFailure。
    pub async fn decrement_if_positive(&self, pool_id: &str, prize_id: i64) -> AppResult<bool> {
        let store = self.store.lock().await;
        let mut pool = store.load(pool_id).await?;

        let Some(record) = pool.awards.iter_mut().find(|r| r.id == prize_id) else {
            return Ok(false);
        };
        if record.stock <= 0 {
            return Ok(false);
        }
        record.stock -= 1;

        if let Err(first) = store.save(pool_id, &pool).await {
            log::warn!("Persisting pool {pool_id} failed, retrying once: {first}");
            if let Err(second) = store.save(pool_id, &pool).await {
                log::error!("Persisting pool {pool_id} failed after retry: {second}");
                return Err(AppError::PersistenceFailure(second.to_string()));
            }
        }

        Ok(true)
    }
}
