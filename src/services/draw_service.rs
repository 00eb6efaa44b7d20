use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{DrawMode, DrawOutcome, DrawSession, Slot};
use crate::services::InventoryService;
use crate::storage::AwardStore;
use crate::utils::{build_slots, display_order, eligible_slots, pick_direct, pick_rejection};

/// 抽奖协调器：对账 -> 选取 -> 条件扣减 -> 返回结果
///
/// 快照来源不可信（前端持有的洗牌状态），可用性一律以台账为准；
/// 选中后扣减失败（并发竞争输掉）降级为未中奖，绝不返回未落盘的中奖。
pub struct DrawService<S> {
    inventory: InventoryService<S>,
    max_redraws: u32,
}

impl<S> Clone for DrawService<S> {
    fn clone(&self) -> Self {
        Self {
            inventory: self.inventory.clone(),
            max_redraws: self.max_redraws,
        }
    }
}

impl<S: AwardStore> DrawService<S> {
    pub fn new(inventory: InventoryService<S>, max_redraws: u32) -> Self {
        Self {
            inventory,
            max_redraws,
        }
    }

    /// 会话初始化：派生槽位、检测模式、生成转盘展示顺序
    pub async fn create_session(&self, pool_id: &str) -> AppResult<DrawSession> {
        let pool = self.inventory.load_pool(pool_id).await?;
        let slots = build_slots(&pool.awards, pool.count);
        let mode = DrawMode::detect(&pool.awards);
        let order = display_order(&mut rand::thread_rng(), pool.count);
        Ok(DrawSession {
            slots,
            display_order: order,
            mode,
        })
    }

    /// 服务端状态抽奖：槽位直接从台账真值派生，可抽集合上直选
    pub async fn spin(&self, pool_id: &str) -> AppResult<DrawOutcome> {
        let pool = self.inventory.load_pool(pool_id).await?;
        let slots = build_slots(&pool.awards, pool.count);
        let eligible = eligible_slots(&slots);
        if eligible.is_empty() {
            log::error!("Pool {pool_id} has no eligible slots");
            return Err(AppError::NoEligibleSlots(pool_id.to_string()));
        }

        let chosen = {
            let mut rng = rand::thread_rng();
            pick_direct(&mut rng, &eligible).cloned()
        };
        let chosen = chosen.ok_or_else(|| {
            AppError::InternalError(format!("Draw selection failed for pool {pool_id}"))
        })?;

        self.commit(pool_id, &chosen).await
    }

    /// 快照抽奖：调用方持有的槽位快照可能过期，
    /// 先用台账真值覆盖每个真实槽位的可用性，再拒绝采样选取。
    pub async fn draw_from_snapshot(
        &self,
        pool_id: &str,
        mut slots: Vec<Slot>,
    ) -> AppResult<DrawOutcome> {
        if slots.is_empty() {
            return Err(AppError::NoEligibleSlots(pool_id.to_string()));
        }

        // 对账：台账现值覆盖快照声称的可用性，未知 id 视为不可用
        let records = self.inventory.list(pool_id).await?;
        let stock_by_id: HashMap<i64, i64> = records.iter().map(|r| (r.id, r.stock)).collect();
        for slot in &mut slots {
            if !slot.is_dummy {
                slot.is_available = stock_by_id.get(&slot.id).is_some_and(|stock| *stock > 0);
            }
        }

        if eligible_slots(&slots).is_empty() {
            log::error!("Pool {pool_id} has no eligible slots after reconciliation");
            return Err(AppError::NoEligibleSlots(pool_id.to_string()));
        }

        let chosen = {
            let mut rng = rand::thread_rng();
            pick_rejection(&mut rng, &slots, self.max_redraws).cloned()
        };
        let chosen = chosen.ok_or_else(|| {
            log::error!(
                "Rejection sampling exhausted {} redraws for pool {pool_id}",
                self.max_redraws
            );
            AppError::InternalError(format!(
                "No candidate accepted after {} redraws for pool {pool_id}",
                self.max_redraws
            ))
        })?;

        self.commit(pool_id, &chosen).await
    }

    /// 中奖判定与库存扣减绑定：dummy 必输；
    /// 真实奖品只有扣减落盘成功才算中奖。
    async fn commit(&self, pool_id: &str, slot: &Slot) -> AppResult<DrawOutcome> {
        let is_win = if slot.is_dummy {
            false
        } else {
            let committed = self
                .inventory
                .decrement_if_positive(pool_id, slot.id)
                .await?;
            if !committed {
                // 选中后输掉扣减竞争：按未中奖返回
                log::warn!("Prize {} in pool {pool_id} lost the decrement race", slot.id);
            }
            committed
        };

        Ok(DrawOutcome {
            slot_id: slot.id,
            is_win,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AwardRecord, PoolData};
    use crate::storage::MemoryStore;
    use futures_util::future::join_all;

    const MAX_REDRAWS: u32 = 10_000;

    async fn draw_service(pool: PoolData) -> DrawService<MemoryStore> {
        let store = MemoryStore::new();
        store.insert("pool", pool).await;
        DrawService::new(InventoryService::new(store), MAX_REDRAWS)
    }

    fn named_pool(tv_stock: i64, watch_stock: i64) -> PoolData {
        PoolData {
            count: 2,
            awards: vec![
                AwardRecord {
                    id: 1,
                    label: Some("TV".to_string()),
                    stock: tv_stock,
                },
                AwardRecord {
                    id: 2,
                    label: Some("Watch".to_string()),
                    stock: watch_stock,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_spin_named_pool_only_eligible_prize_wins() {
        // TV 库存 1，Watch 无库存：唯一可抽的是 TV，必中
        let service = draw_service(named_pool(1, 0)).await;

        let outcome = service.spin("pool").await.unwrap();
        assert_eq!(outcome.slot_id, 1);
        assert!(outcome.is_win);

        let records = service.inventory.list("pool").await.unwrap();
        assert_eq!(records[0].stock, 0);

        // 两个奖品都已无库存且没有 dummy：致命配置错误
        let err = service.spin("pool").await.unwrap_err();
        assert!(matches!(err, AppError::NoEligibleSlots(_)));
    }

    #[tokio::test]
    async fn test_spin_numbered_pool_wins_once_then_only_loses() {
        let service = draw_service(PoolData {
            count: 4,
            awards: vec![AwardRecord {
                id: 1,
                label: None,
                stock: 1,
            }],
        })
        .await;

        let mut won = false;
        for _ in 0..500 {
            let outcome = service.spin("pool").await.unwrap();
            if outcome.is_win {
                assert_eq!(outcome.slot_id, 1);
                won = true;
                break;
            }
            // 未中奖时只可能落在 dummy 上
            assert!(outcome.slot_id < 0);
        }
        assert!(won, "slot 1 should win within 500 spins");
        assert_eq!(service.inventory.list("pool").await.unwrap()[0].stock, 0);

        // 库存耗尽后所有后续抽奖都只能落在 dummy 上
        for _ in 0..50 {
            let outcome = service.spin("pool").await.unwrap();
            assert!(!outcome.is_win);
            assert!(outcome.slot_id < 0);
        }
    }

    #[tokio::test]
    async fn test_snapshot_draw_overrides_stale_availability() {
        // 台账里 TV 已无库存，但快照仍声称可用
        let service = draw_service(PoolData {
            count: 2,
            awards: vec![AwardRecord {
                id: 1,
                label: Some("TV".to_string()),
                stock: 0,
            }],
        })
        .await;

        let snapshot = vec![
            Slot {
                id: 1,
                text: "TV".to_string(),
                is_available: true,
                is_dummy: false,
            },
            Slot {
                id: -2,
                text: "X".to_string(),
                is_available: false,
                is_dummy: true,
            },
        ];

        for _ in 0..50 {
            let outcome = service
                .draw_from_snapshot("pool", snapshot.clone())
                .await
                .unwrap();
            assert_eq!(outcome.slot_id, -2);
            assert!(!outcome.is_win);
        }
        assert_eq!(service.inventory.list("pool").await.unwrap()[0].stock, 0);
    }

    #[tokio::test]
    async fn test_snapshot_draw_unknown_id_is_unavailable() {
        let service = draw_service(named_pool(1, 0)).await;

        let snapshot = vec![
            Slot {
                id: 99,
                text: "Forged".to_string(),
                is_available: true,
                is_dummy: false,
            },
            Slot {
                id: -1,
                text: "X".to_string(),
                is_available: false,
                is_dummy: true,
            },
        ];

        let outcome = service.draw_from_snapshot("pool", snapshot).await.unwrap();
        assert_eq!(outcome.slot_id, -1);
        assert!(!outcome.is_win);
    }

    #[tokio::test]
    async fn test_snapshot_draw_empty_snapshot_is_rejected() {
        let service = draw_service(named_pool(1, 0)).await;
        let err = service.draw_from_snapshot("pool", vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::NoEligibleSlots(_)));
    }

    #[tokio::test]
    async fn test_unknown_pool_surfaces_not_found() {
        let service = draw_service(named_pool(1, 0)).await;
        assert!(matches!(
            service.spin("ghost").await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            service.create_session("ghost").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_snapshot_draws_yield_single_winner() {
        // 最后一件库存被两个并发请求争抢：恰好一边中奖
        let service = draw_service(named_pool(1, 0)).await;

        let snapshot = vec![
            Slot {
                id: 1,
                text: "TV".to_string(),
                is_available: true,
                is_dummy: false,
            },
            Slot {
                id: 2,
                text: "Watch".to_string(),
                is_available: true,
                is_dummy: false,
            },
        ];

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let service = service.clone();
                let snapshot = snapshot.clone();
                tokio::spawn(
                    async move { service.draw_from_snapshot("pool", snapshot).await.unwrap() },
                )
            })
            .collect();

        let outcomes: Vec<DrawOutcome> = join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        // Watch 对账后不可抽，两边都只能选 TV，扣减竞争只有一个赢家
        let wins = outcomes.iter().filter(|o| o.is_win).count();
        assert_eq!(wins, 1);
        assert!(outcomes.iter().all(|o| o.slot_id == 1));

        let records = service.inventory.list("pool").await.unwrap();
        assert_eq!(records[0].stock, 0);
    }

    #[tokio::test]
    async fn test_create_session_shape() {
        let service = draw_service(named_pool(1, 0)).await;
        let session = service.create_session("pool").await.unwrap();

        assert_eq!(session.mode, DrawMode::Named);
        assert_eq!(session.slots.len(), 2);
        assert_eq!(session.slots[0].text, "TV");

        let mut order = session.display_order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1]);
    }
}
