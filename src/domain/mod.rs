// ==========================================
// 药品目录提取工具 - 领域模型层
// ==========================================
// 职责: 定义输出记录、查找表类型、查找结果
// 红线: 不含数据访问逻辑,不含映射逻辑
// ==========================================

pub mod lookup;
pub mod product;
pub mod types;

// 重导出核心类型
pub use lookup::{LookupFallback, LookupOutcome, LookupStats};
pub use product::{ExtractOutcome, ExtractSummary, MappedRecord, ProductRecord, ProductTranslation};
pub use types::LookupKind;
