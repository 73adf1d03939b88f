// ==========================================
// 药品目录提取工具 - 查找结果模型
// ==========================================
// 职责: 定义名称解析结果、回退记录、统计信息
// ==========================================

use crate::domain::types::LookupKind;

// ==========================================
// LookupOutcome - 名称解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// 命中内存映射，未访问数据库
    Cached(i64),
    /// 插入（或忽略已存在）后重新查询得到
    Stored(i64),
    /// 名称为空（静默，不记错误日志）
    Empty,
    /// 数据库错误或插入后查询不到
    Unavailable(String),
}

impl LookupOutcome {
    /// 解析得到的 ID（Empty / Unavailable 为 None）
    pub fn id(&self) -> Option<i64> {
        match self {
            LookupOutcome::Cached(id) | LookupOutcome::Stored(id) => Some(*id),
            LookupOutcome::Empty | LookupOutcome::Unavailable(_) => None,
        }
    }

    /// 回退原因（用于告警）
    pub fn fallback_reason(&self) -> Option<String> {
        match self {
            LookupOutcome::Cached(_) | LookupOutcome::Stored(_) => None,
            LookupOutcome::Empty => Some("empty name".to_string()),
            LookupOutcome::Unavailable(reason) => Some(reason.clone()),
        }
    }
}

// ==========================================
// LookupFallback - 使用默认 ID 的告警记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFallback {
    pub kind: LookupKind,
    pub name: String,
    pub reason: String,
    pub fallback_id: i64,
}

// ==========================================
// LookupStats - 单个查找表的运行统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupStats {
    /// 启动时加载的条目数
    pub loaded: usize,
    /// 发出的 INSERT 次数
    pub inserts_issued: usize,
    /// 插入后成功取得 ID 的次数
    pub stored: usize,
    /// 失败次数
    pub failures: usize,
}
