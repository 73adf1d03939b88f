// ==========================================
// 药品目录提取工具 - SQLite 查找表后端
// ==========================================
// 职责: 使用 rusqlite 实现 LookupBackend
// 插入语义: INSERT OR IGNORE
// ==========================================

use crate::config::StoreKind;
use crate::db::{open_sqlite_connection, table_exists};
use crate::domain::LookupKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::lookup_backend::{LookupBackend, LookupRow};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

// ==========================================
// SqliteLookupBackend
// ==========================================
pub struct SqliteLookupBackend {
    conn: Option<Connection>,
}

impl SqliteLookupBackend {
    /// 打开数据库文件
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时 SQLite 会新建）
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// 从已有连接创建（测试使用内存库）
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn: Some(conn) }
    }

    fn conn(&self) -> RepositoryResult<&Connection> {
        self.conn.as_ref().ok_or(RepositoryError::ConnectionClosed)
    }
}

#[async_trait]
impl LookupBackend for SqliteLookupBackend {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    async fn fetch_lookup_rows(&mut self, kind: LookupKind) -> RepositoryResult<Vec<LookupRow>> {
        let conn = self.conn()?;
        if !table_exists(conn, kind.table())? {
            return Err(RepositoryError::TableNotFound(kind.table().to_string()));
        }

        let sql = format!("SELECT id, name FROM {}", kind.table());
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    async fn insert_and_fetch_id(
        &mut self,
        kind: LookupKind,
        name: &str,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.conn()?;
        conn.execute(
            &format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", kind.table()),
            params![name],
        )?;

        let id = conn
            .query_row(
                &format!("SELECT id FROM {} WHERE name = ?1", kind.table()),
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(id)
    }

    async fn close(&mut self) -> RepositoryResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .map_err(|(_, e)| RepositoryError::DatabaseQueryError(e.to_string()))?;
        }
        Ok(())
    }
}
