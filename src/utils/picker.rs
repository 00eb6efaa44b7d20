use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Slot;

/// 在已过滤的可抽集合上等概率直选
pub fn pick_direct<'a, R: Rng>(rng: &mut R, eligible: &'a [Slot]) -> Option<&'a Slot> {
    if eligible.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..eligible.len());
    eligible.get(index)
}

/// 拒绝采样：在完整槽位列表上等概率取下标，dummy 直接接受，
/// 真实奖品仅在（已与台账对账后的）可用时接受，否则重抽。
/// 超过 max_redraws 仍未命中说明数据不一致，返回 None 由调用方升级处理。
pub fn pick_rejection<'a, R: Rng>(
    rng: &mut R,
    slots: &'a [Slot],
    max_redraws: u32,
) -> Option<&'a Slot> {
    if slots.is_empty() {
        return None;
    }
    for _ in 0..max_redraws {
        let candidate = &slots[rng.gen_range(0..slots.len())];
        if candidate.is_eligible() {
            return Some(candidate);
        }
    }
    None
}

/// 0..count 的均匀随机排列（转盘展示顺序）
pub fn display_order<R: Rng>(rng: &mut R, count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    order.shuffle(rng);
    order
}
