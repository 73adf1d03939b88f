// ==========================================
// 药品目录提取工具 - MySQL 查找表后端
// ==========================================
// 职责: 使用 sqlx 实现 LookupBackend
// 插入语义: INSERT IGNORE
// 字符集: utf8mb4（阿拉伯语名称）
// ==========================================

use crate::config::{NetworkConfig, StoreKind};
use crate::domain::LookupKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::lookup_backend::{LookupBackend, LookupRow};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

// ==========================================
// MySqlLookupBackend
// ==========================================
pub struct MySqlLookupBackend {
    conn: Option<MySqlConnection>,
}

impl MySqlLookupBackend {
    /// 建立单连接
    pub async fn connect(net: &NetworkConfig) -> RepositoryResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&net.host)
            .port(net.port)
            .username(&net.user)
            .password(&net.password)
            .database(&net.database)
            .charset("utf8mb4");

        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self { conn: Some(conn) })
    }

    fn conn(&mut self) -> RepositoryResult<&mut MySqlConnection> {
        self.conn.as_mut().ok_or(RepositoryError::ConnectionClosed)
    }
}

#[async_trait]
impl LookupBackend for MySqlLookupBackend {
    fn kind(&self) -> StoreKind {
        StoreKind::Mysql
    }

    async fn fetch_lookup_rows(&mut self, kind: LookupKind) -> RepositoryResult<Vec<LookupRow>> {
        let sql = format!("SELECT CAST(id AS SIGNED), name FROM {}", kind.table());
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
        let insert_sql = format!("INSERT IGNORE INTO {} (name) VALUES (?)", kind.table());
        sqlx::query(&insert_sql)
            .bind(name)
            .execute(self.conn()?)
            .await?;

        let select_sql = format!(
            "SELECT CAST(id AS SIGNED) FROM {} WHERE name = ?",
            kind.table()
        );
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
