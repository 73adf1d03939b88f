// ==========================================
// 药品目录提取工具 - 配置层
// ==========================================
// 职责: 数据库连接配置解析 + 提取固定参数
// 来源: 命令行参数 / 环境变量 / 固定默认值
// ==========================================

pub mod connection_config;
pub mod extract_defaults;

// 重导出核心配置类型
pub use connection_config::{
    parse_connection_string, resolve_connection_config, select_connection_string,
    try_parse_connection_string, ConnectionConfig, ConnectionStringError, NetworkConfig,
    StoreKind, DB_URL_ENV,
};
