// ==========================================
// 药品目录提取工具 - 数据仓储层
// ==========================================
// 职责: 提供查找表（forms / manufacturers）访问,屏蔽数据库差异
// 约束: 所有名称参数化绑定,表名仅来自固定常量
// ==========================================

pub mod error;
pub mod lookup_backend;
pub mod lookup_store;
pub mod mysql_lookup_backend;
pub mod postgres_lookup_backend;
pub mod sqlite_lookup_backend;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use lookup_backend::{LookupBackend, LookupRow};
pub use lookup_store::{LookupResolver, LookupStore};
pub use mysql_lookup_backend::MySqlLookupBackend;
pub use postgres_lookup_backend::PostgresLookupBackend;
pub use sqlite_lookup_backend::SqliteLookupBackend;
