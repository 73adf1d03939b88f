// ==========================================
// 药品目录提取工具 - 核心库
// ==========================================
// 职责: 表格文件 → 剂型/厂家查找解析 → JSON 药品记录
// 技术栈: Rust + tokio + rusqlite/sqlx + calamine
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输出记录与查找类型
pub mod domain;

// 数据仓储层 - 查找表访问
pub mod repository;

// 导入层 - 表格解析与记录映射
pub mod importer;

// 配置层 - 连接配置与固定参数
pub mod config;

// 数据库基础设施（SQLite 连接初始化）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 命令行与运行流程
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConnectionConfig, StoreKind};
pub use domain::{ExtractOutcome, ExtractSummary, LookupKind, ProductRecord, ProductTranslation};
pub use importer::{ImportError, ImportResult, ProductExtractor};
pub use repository::{LookupResolver, LookupStore};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Pharmaceutical Data Extractor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
