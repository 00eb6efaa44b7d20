use serde::{Deserialize, Serialize};

use super::DrawMode;

/// 单个可抽取槽位（每次会话派生，不落盘）
/// 前端快照沿用 camelCase 字段名
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// 真实奖品沿用记录 id；补位 dummy 使用负数合成 id，与真实 id 空间不重叠
    pub id: i64,
    /// 展示文本（奖品名 / 位置编号 / "X"）
    pub text: String,
    /// 非 dummy 且库存 > 0
    pub is_available: bool,
    /// dummy 槽位：不携带库存语义，永远不中奖
    pub is_dummy: bool,
}

impl Slot {
    /// 当前是否允许被抽中（dummy 永远可抽，真实奖品需有库存）
    pub fn is_eligible(&self) -> bool {
        self.is_dummy || self.is_available
    }
}

/// 单次抽奖结果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    /// 被抽中的槽位 id
    pub slot_id: i64,
    /// 是否中奖：非 dummy 且库存扣减已落盘
    pub is_win: bool,
}

/// 会话初始化数据：派生槽位、转盘展示顺序与会话模式
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSession {
    pub slots: Vec<Slot>,
    /// 0..count 的均匀随机排列，供转盘布局使用
    pub display_order: Vec<usize>,
    pub mode: DrawMode,
}
