// ==========================================
// 药品目录提取工具 - 查找表仓储
// ==========================================
// 职责: 持有数据库连接与两套 name → id 内存映射
//       名称解析: 命中缓存直接返回，否则幂等插入后重新查询
// 红线: 每种查找表只有一份权威映射，同一名称在一次运行内最多插入一次
// ==========================================

use crate::config::{ConnectionConfig, StoreKind};
use crate::domain::{LookupKind, LookupOutcome, LookupStats};
use crate::i18n::bilingual_with_args;
use crate::repository::error::RepositoryResult;
use crate::repository::lookup_backend::LookupBackend;
use crate::repository::mysql_lookup_backend::MySqlLookupBackend;
use crate::repository::postgres_lookup_backend::PostgresLookupBackend;
use crate::repository::sqlite_lookup_backend::SqliteLookupBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

// ==========================================
// LookupResolver Trait
// ==========================================
// 用途: 记录映射器只依赖名称解析能力，便于测试替换
// 实现者: LookupStore
#[async_trait]
pub trait LookupResolver: Send {
    /// 解析名称为 ID（必要时创建）
    async fn resolve(&mut self, kind: LookupKind, name: &str) -> LookupOutcome;
}

// ==========================================
// LookupTable - 单个查找表的内存映射与统计
// ==========================================
#[derive(Debug, Default)]
struct LookupTable {
    ids: HashMap<String, i64>,
    stats: LookupStats,
}

// ==========================================
// LookupStore
// ==========================================
pub struct LookupStore {
    backend: Box<dyn LookupBackend>,
    forms: LookupTable,
    manufacturers: LookupTable,
    closed: bool,
}

impl LookupStore {
    /// 使用指定后端创建
    pub fn new(backend: Box<dyn LookupBackend>) -> Self {
        Self {
            backend,
            forms: LookupTable::default(),
            manufacturers: LookupTable::default(),
            closed: false,
        }
    }

    /// 按配置建立连接
    ///
    /// # 返回
    /// - Ok(LookupStore): 连接成功
    /// - Err: 底层连接失败（调用方决定是否终止运行）
    pub async fn connect(config: &ConnectionConfig) -> RepositoryResult<Self> {
        let backend: Box<dyn LookupBackend> = match config {
            ConnectionConfig::Postgresql(net) => Box::new(PostgresLookupBackend::connect(net).await?),
            ConnectionConfig::Mysql(net) => Box::new(MySqlLookupBackend::connect(net).await?),
            ConnectionConfig::Sqlite { path } => Box::new(SqliteLookupBackend::open(path)?),
        };
        Ok(Self::new(backend))
    }

    pub fn kind(&self) -> StoreKind {
        self.backend.kind()
    }

    fn table(&self, kind: LookupKind) -> &LookupTable {
        match kind {
            LookupKind::Form => &self.forms,
            LookupKind::Manufacturer => &self.manufacturers,
        }
    }

    fn table_mut(&mut self, kind: LookupKind) -> &mut LookupTable {
        match kind {
            LookupKind::Form => &mut self.forms,
            LookupKind::Manufacturer => &mut self.manufacturers,
        }
    }

    /// 从数据库加载映射（替换当前映射）
    ///
    /// # 规则
    /// - 名称 TRIM 后作为键
    /// - 空名称 / NULL 跳过
    /// - 失败时映射置空并返回错误
    ///
    /// # 返回
    /// - Ok(usize): 映射条目数
    pub async fn load_mapping(&mut self, kind: LookupKind) -> RepositoryResult<usize> {
        let rows = match self.backend.fetch_lookup_rows(kind).await {
            Ok(rows) => rows,
            Err(e) => {
                let table = self.table_mut(kind);
                table.ids.clear();
                table.stats.loaded = 0;
                return Err(e);
            }
        };

        let ids: HashMap<String, i64> = rows
            .into_iter()
            .filter_map(|(id, name)| {
                let name = name?.trim().to_string();
                if name.is_empty() {
                    None
                } else {
                    Some((name, id))
                }
            })
            .collect();

        let count = ids.len();
        let table = self.table_mut(kind);
        table.ids = ids;
        table.stats.loaded = count;
        debug!(kind = %kind, count, "lookup mapping loaded");
        Ok(count)
    }

    /// 查询内存映射（不访问数据库）
    pub fn cached_id(&self, kind: LookupKind, name: &str) -> Option<i64> {
        self.table(kind).ids.get(name.trim()).copied()
    }

    /// 内存映射条目数
    pub fn mapping_len(&self, kind: LookupKind) -> usize {
        self.table(kind).ids.len()
    }

    /// 运行统计
    pub fn stats(&self, kind: LookupKind) -> LookupStats {
        self.table(kind).stats
    }

    /// 解析名称
    ///
    /// # 返回
    /// - Cached(id): 命中内存映射
    /// - Stored(id): 插入/查询后得到，已写回映射
    /// - Empty: 名称为空
    /// - Unavailable: 数据库错误或插入后查询不到（已记录错误日志）
    pub async fn resolve_name(&mut self, kind: LookupKind, name: &str) -> LookupOutcome {
        let name = name.trim();
        if name.is_empty() {
            return LookupOutcome::Empty;
        }

        if let Some(id) = self.cached_id(kind, name) {
            return LookupOutcome::Cached(id);
        }

        self.table_mut(kind).stats.inserts_issued += 1;
        let result = self.backend.insert_and_fetch_id(kind, name).await;

        let outcome = match result {
            Ok(Some(id)) => {
                let table = self.table_mut(kind);
                table.ids.insert(name.to_string(), id);
                table.stats.stored += 1;
                info!(
                    kind = %kind,
                    id,
                    "{}",
                    bilingual_with_args(
                        created_key(kind),
                        &[("name", name), ("id", &id.to_string())]
                    )
                );
                return LookupOutcome::Stored(id);
            }
            Ok(None) => LookupOutcome::Unavailable(format!(
                "no row in {} after insert",
                kind.table()
            )),
            Err(e) => LookupOutcome::Unavailable(e.to_string()),
        };

        self.table_mut(kind).stats.failures += 1;
        if let LookupOutcome::Unavailable(reason) = &outcome {
            error!(
                kind = %kind,
                "{}",
                bilingual_with_args(create_failed_key(kind), &[("name", name), ("error", reason)])
            );
        }
        outcome
    }

    /// 释放连接（幂等）
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        match self.backend.close().await {
            Ok(()) => info!("{}", crate::i18n::bilingual("db.closed")),
            Err(e) => warn!(error = %e, "error while closing database connection"),
        }
    }
}

#[async_trait]
impl LookupResolver for LookupStore {
    async fn resolve(&mut self, kind: LookupKind, name: &str) -> LookupOutcome {
        self.resolve_name(kind, name).await
    }
}

fn created_key(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Form => "lookup.created_form",
        LookupKind::Manufacturer => "lookup.created_manufacturer",
    }
}

fn create_failed_key(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Form => "lookup.create_failed_form",
        LookupKind::Manufacturer => "lookup.create_failed_manufacturer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::RepositoryError;
    use crate::repository::lookup_backend::LookupRow;
    use rusqlite::Connection;
    use std::sync::{Arc, Mutex};

    fn sqlite_store() -> LookupStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE forms (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE);
             CREATE TABLE manufacturers (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE);
             INSERT INTO forms (name) VALUES ('  Tablet  '), (''), (NULL), ('Syrup');
             INSERT INTO manufacturers (name) VALUES ('Pfizer');",
        )
        .unwrap();
        LookupStore::new(Box::new(SqliteLookupBackend::from_connection(conn)))
    }

    /// 记录调用次数的后端（可配置为失败）
    struct CountingBackend {
        inserts: Arc<Mutex<usize>>,
        fail_inserts: bool,
        next_id: i64,
    }

    #[async_trait]
    impl LookupBackend for CountingBackend {
        fn kind(&self) -> StoreKind {
            StoreKind::Sqlite
        }

        async fn fetch_lookup_rows(&mut self, _kind: LookupKind) -> RepositoryResult<Vec<LookupRow>> {
            Err(RepositoryError::TableNotFound("forms".to_string()))
        }

        async fn insert_and_fetch_id(
            &mut self,
            _kind: LookupKind,
            _name: &str,
        ) -> RepositoryResult<Option<i64>> {
            *self.inserts.lock().unwrap() += 1;
            if self.fail_inserts {
                return Err(RepositoryError::DatabaseQueryError("disk I/O error".to_string()));
            }
            self.next_id += 1;
            Ok(Some(self.next_id))
        }

        async fn close(&mut self) -> RepositoryResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_mapping_trims_and_skips_empty() {
        let mut store = sqlite_store();
        let count = store.load_mapping(LookupKind::Form).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.cached_id(LookupKind::Form, "Tablet"), Some(1));
        assert_eq!(store.cached_id(LookupKind::Form, "Syrup"), Some(4));
        assert_eq!(store.stats(LookupKind::Form).loaded, 2);
    }

    #[tokio::test]
    async fn test_resolve_cached_does_not_insert() {
        let mut store = sqlite_store();
        store.load_mapping(LookupKind::Manufacturer).await.unwrap();

        let outcome = store.resolve_name(LookupKind::Manufacturer, " Pfizer ").await;
        assert_eq!(outcome, LookupOutcome::Cached(1));
        assert_eq!(store.stats(LookupKind::Manufacturer).inserts_issued, 0);
    }

    #[tokio::test]
    async fn test_resolve_creates_and_caches() {
        let mut store = sqlite_store();
        store.load_mapping(LookupKind::Form).await.unwrap();

        let first = store.resolve_name(LookupKind::Form, "Capsule").await;
        let id = first.id().unwrap();
        assert_eq!(first, LookupOutcome::Stored(id));

        let second = store.resolve_name(LookupKind::Form, "Capsule").await;
        assert_eq!(second, LookupOutcome::Cached(id));

        let stats = store.stats(LookupKind::Form);
        assert_eq!(stats.inserts_issued, 1);
        assert_eq!(stats.stored, 1);
        assert_eq!(store.mapping_len(LookupKind::Form), 3);
    }

    #[tokio::test]
    async fn test_resolve_same_name_twice_inserts_once() {
        let inserts = Arc::new(Mutex::new(0));
        let mut store = LookupStore::new(Box::new(CountingBackend {
            inserts: inserts.clone(),
            fail_inserts: false,
            next_id: 10,
        }));

        let a = store.resolve_name(LookupKind::Manufacturer, "Hikma").await;
        let b = store.resolve_name(LookupKind::Manufacturer, "Hikma").await;
        assert_eq!(a.id(), Some(11));
        assert_eq!(b, LookupOutcome::Cached(11));
        assert_eq!(*inserts.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_empty_name_is_silent() {
        let inserts = Arc::new(Mutex::new(0));
        let mut store = LookupStore::new(Box::new(CountingBackend {
            inserts: inserts.clone(),
            fail_inserts: false,
            next_id: 0,
        }));

        assert_eq!(store.resolve_name(LookupKind::Form, "   ").await, LookupOutcome::Empty);
        assert_eq!(*inserts.lock().unwrap(), 0);
        assert_eq!(store.stats(LookupKind::Form).failures, 0);
    }

    #[tokio::test]
    async fn test_resolve_database_error_is_unavailable() {
        let inserts = Arc::new(Mutex::new(0));
        let mut store = LookupStore::new(Box::new(CountingBackend {
            inserts: inserts.clone(),
            fail_inserts: true,
            next_id: 0,
        }));

        let outcome = store.resolve_name(LookupKind::Form, "Drops").await;
        assert!(matches!(outcome, LookupOutcome::Unavailable(_)));
        assert_eq!(outcome.id(), None);
        assert_eq!(store.stats(LookupKind::Form).failures, 1);
        assert_eq!(store.cached_id(LookupKind::Form, "Drops"), None);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_mapping_empty() {
        let mut store = LookupStore::new(Box::new(CountingBackend {
            inserts: Arc::new(Mutex::new(0)),
            fail_inserts: false,
            next_id: 0,
        }));

        assert!(store.load_mapping(LookupKind::Form).await.is_err());
        assert_eq!(store.mapping_len(LookupKind::Form), 0);
    }

    #[tokio::test]
    async fn test_close_twice() {
        let mut store = sqlite_store();
        store.close().await;
        store.close().await;
    }
}
