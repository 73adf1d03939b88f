// ==========================================
// 药品目录提取工具 - 领域类型定义
// ==========================================
// 职责: 查找表种类（剂型 / 厂家）
// ==========================================

use std::fmt;

// ==========================================
// 查找表种类 (Lookup Kind)
// ==========================================
// 两套互相独立的 name → id 映射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Form,         // 剂型 (forms 表)
    Manufacturer, // 厂家 (manufacturers 表)
}

impl LookupKind {
    /// 全部种类（加载映射时按此顺序）
    pub const ALL: [LookupKind; 2] = [LookupKind::Form, LookupKind::Manufacturer];

    /// 对应的数据库表名
    ///
    /// 说明: 表名为固定常量，可安全拼接进 SQL
    pub fn table(&self) -> &'static str {
        match self {
            LookupKind::Form => "forms",
            LookupKind::Manufacturer => "manufacturers",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Form => write!(f, "form"),
            LookupKind::Manufacturer => write!(f, "manufacturer"),
        }
    }
}
