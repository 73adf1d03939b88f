// ==========================================
// 药品目录提取工具 - 查找表后端 Trait
// ==========================================
// 职责: 定义每种数据库需要提供的原始 SQL 能力（不包含缓存逻辑）
// 实现者: SqliteLookupBackend / PostgresLookupBackend / MySqlLookupBackend
// 红线: 后端只做数据 CRUD，缓存与回退策略在 LookupStore
// ==========================================

use crate::config::StoreKind;
use crate::domain::LookupKind;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// 查找表原始行: (id, name)，name 可能为 NULL
pub type LookupRow = (i64, Option<String>);

#[async_trait]
pub trait LookupBackend: Send {
    /// 后端数据库类型
    fn kind(&self) -> StoreKind;

    /// 读取查找表全部 (id, name)
    ///
    /// # 参数
    /// - kind: 查找表种类（决定表名）
    async fn fetch_lookup_rows(&mut self, kind: LookupKind) -> RepositoryResult<Vec<LookupRow>>;

    /// 幂等插入名称并重新查询 ID
    ///
    /// # 规则
    /// - 名称已存在时插入被忽略（各数据库各自的 ignore-on-conflict 语法）
    /// - 插入后按名称查询 ID
    ///
    /// # 返回
    /// - Ok(Some(id)): 查询到 ID
    /// - Ok(None): 插入后仍查询不到
    /// - Err: 数据库错误
    async fn insert_and_fetch_id(
        &mut self,
        kind: LookupKind,
        name: &str,
    ) -> RepositoryResult<Option<i64>>;

    /// 关闭连接（重复调用无副作用）
    async fn close(&mut self) -> RepositoryResult<()>;
}
