// ==========================================
// 药品目录提取工具 - PostgreSQL 查找表后端
// ==========================================
// 职责: 使用 sqlx 实现 LookupBackend
// 插入语义: INSERT ... ON CONFLICT (name) DO NOTHING
// 说明: 连接为自动提交模式，插入立即可见
// ==========================================

use crate::config::{NetworkConfig, StoreKind};
use crate::domain::LookupKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::lookup_backend::{LookupBackend, LookupRow};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

// ==========================================
// PostgresLookupBackend
// ==========================================
pub struct PostgresLookupBackend {
    conn: Option<PgConnection>,
}

impl PostgresLookupBackend {
    /// 建立单连接
    pub async fn connect(net: &NetworkConfig) -> RepositoryResult<Self> {
        let options = PgConnectOptions::new()
            .host(&net.host)
            .port(net.port)
            .username(&net.user)
            .password(&net.password)
            .database(&net.database);

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self { conn: Some(conn) })
    }

    fn conn(&mut self) -> RepositoryResult<&mut PgConnection> {
        self.conn.as_mut().ok_or(RepositoryError::ConnectionClosed)
    }
}

#[async_trait]
impl LookupBackend for PostgresLookupBackend {
    fn kind(&self) -> StoreKind {
        StoreKind::Postgresql
    }

    async fn fetch_lookup_rows(&mut self, kind: LookupKind) -> RepositoryResult<Vec<LookupRow>> {
        let sql = format!("SELECT id::bigint, name FROM {}", kind.table());
        let rows = sqlx::query_as::<_, (i64, Option<String>)>(&sql)
            .fetch_all(self.conn()?)
            .await?;
        Ok(rows)
    }

    async fn insert_and_fetch_id(
        &mut self,
        kind: LookupKind,
        name: &str,
    ) -> RepositoryResult<Option<i64>> {
        let insert_sql = format!(
            "INSERT INTO {} (name) VALUES ($1) ON CONFLICT (name) DO NOTHING",
            kind.table()
        );
        sqlx::query(&insert_sql)
            .bind(name)
            .execute(self.conn()?)
            .await?;

        let select_sql = format!("SELECT id::bigint FROM {} WHERE name = $1", kind.table());
        let id = sqlx::query_scalar::<_, i64>(&select_sql)
            .bind(name)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(id)
    }

    async fn close(&mut self) -> RepositoryResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await?;
        }
        Ok(())
    }
}
