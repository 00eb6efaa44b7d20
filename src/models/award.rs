use serde::{Deserialize, Serialize};

/// 奖品记录（持久化，库存的唯一权威来源）
/// 概念说明:
/// - label: 奖品名称；有名称 = "具名模式" 条目，无名称 = "编号模式" 条目
/// - stock: 剩余库存，只能通过 InventoryService 的条件扣减变化
///
/// 磁盘/接口上沿用历史字段名 `item` / `inventory`。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRecord {
    pub id: i64,
    /// 奖品名称（空缺表示编号模式条目）
    #[serde(rename = "item", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// 剩余库存
    #[serde(rename = "inventory", default)]
    pub stock: i64,
}

impl AwardRecord {
    /// 是否还有库存
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// 把可选的 label 字段收敛成穷举的变体视图
    /// 空字符串按无名称处理
    pub fn kind(&self) -> AwardKind<'_> {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => AwardKind::Named(label),
            _ => AwardKind::Numbered,
        }
    }
}

/// 单条奖品记录的形态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwardKind<'a> {
    /// 无名称，按位置编号展示
    Numbered,
    /// 有名称
    Named(&'a str),
}

/// 一个奖池：请求的槽位数量 + 权威奖品记录
/// 对应存储层中单个奖池文件的完整内容
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolData {
    pub count: usize,
    pub awards: Vec<AwardRecord>,
}

/// 抽奖会话模式，由首条记录是否具名决定，整个会话共用
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    Named,
    Numbered,
}

impl DrawMode {
    pub fn detect(records: &[AwardRecord]) -> Self {
        match records.first().map(AwardRecord::kind) {
            Some(AwardKind::Named(_)) => DrawMode::Named,
            _ => DrawMode::Numbered,
        }
    }
}
