use crate::models::{AwardKind, AwardRecord, DrawMode, Slot};

/// 从原始奖品记录派生固定长度的槽位列表
///
/// 规则:
/// - 模式由首条记录决定：无记录或首条无名称 = 编号模式，否则具名模式
/// - 编号模式：展示位置编号，只有位置 0 是真实奖品，其余为 dummy
/// - 具名模式：有名称的记录为真实奖品；记录缺失或无名称的位置补 "X" dummy
/// - 缺失记录的合成 id 取 -(index+1)，与真实 id（正数）不冲突
///
/// 永远恰好返回 count 个槽位；输入异常降级为 dummy，不报错。
pub fn build_slots(records: &[AwardRecord], count: usize) -> Vec<Slot> {
    let mode = DrawMode::detect(records);

    (0..count)
        .map(|index| {
            let record = records.get(index);
            match mode {
                DrawMode::Numbered => {
                    let is_dummy = index != 0;
                    let stock = record.map_or(0, |r| r.stock);
                    Slot {
                        id: record.map_or(synthesized_id(index), |r| r.id),
                        text: (index + 1).to_string(),
                        is_available: !is_dummy && stock > 0,
                        is_dummy,
                    }
                }
                DrawMode::Named => match record {
                    Some(r) => match r.kind() {
                        AwardKind::Named(label) => Slot {
                            id: r.id,
                            text: label.to_string(),
                            is_available: r.stock > 0,
                            is_dummy: false,
                        },
                        AwardKind::Numbered => Slot {
                            id: r.id,
                            text: "X".to_string(),
                            is_available: false,
                            is_dummy: true,
                        },
                    },
                    None => Slot {
                        id: synthesized_id(index),
                        text: "X".to_string(),
                        is_available: false,
                        is_dummy: true,
                    },
                },
            }
        })
        .collect()
}

/// 当前合法可抽的子集：dummy 或有库存的真实奖品
pub fn eligible_slots(slots: &[Slot]) -> Vec<Slot> {
    slots.iter().filter(|s| s.is_eligible()).cloned().collect()
}

fn synthesized_id(index: usize) -> i64 {
    -(index as i64 + 1)
}
