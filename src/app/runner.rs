// ==========================================
// 药品目录提取工具 - 运行流程
// ==========================================
// 流程: 检查文件 → 解析连接配置 → 连接 → 加载剂型/厂家映射
//       → 提取 → 关闭连接（无论成功与否）→ 序列化 JSON
// 红线: stdout 只输出 JSON；所有诊断信息走日志（stderr）
// ==========================================

use crate::app::cli::Cli;
use crate::config::{resolve_connection_config, ConnectionConfig};
use crate::domain::{ExtractOutcome, LookupKind, ProductRecord};
use crate::i18n::{bilingual, bilingual_with_args};
use crate::importer::{ImportError, ImportResult, ProductExtractor};
use crate::repository::LookupStore;
use std::path::Path;
use tracing::{error, info};

/// 执行一次完整运行
///
/// # 返回
/// - Ok(String): 紧凑 JSON 数组（不含换行）
/// - Err: 致命错误（调用方以退出码 1 结束）
pub async fn run(cli: Cli) -> ImportResult<String> {
    info!("{}", bilingual("run.start"));

    let path = cli.excel_file_path.as_path();
    if !path.exists() {
        let path_text = path.display().to_string();
        error!(
            "{}",
            bilingual_with_args("import.file_not_found", &[("path", &path_text)])
        );
        return Err(ImportError::FileNotFound(path_text));
    }

    let config = resolve_connection_config(cli.database_config);
    let outcome = run_extraction(path, &config).await?;
    render_json(&outcome.records)
}

/// 连接数据库并提取记录
///
/// # 参数
/// - path: 表格文件路径
/// - config: 连接配置
pub async fn run_extraction(path: &Path, config: &ConnectionConfig) -> ImportResult<ExtractOutcome> {
    info!(
        database = %config.redacted(),
        "{}",
        bilingual_with_args("config.using_database", &[("kind", config.kind().as_str())])
    );

    let mut store = LookupStore::connect(config).await.map_err(|e| {
        error!(
            "{}",
            bilingual_with_args("db.connect_failed", &[("error", &e.to_string())])
        );
        ImportError::DatabaseConnectionError(e.to_string())
    })?;
    info!(kind = %store.kind(), "{}", bilingual("db.connected"));

    let result = extract_with_store(path, &mut store).await;
    store.close().await;
    result
}

/// 加载映射并执行提取（连接由调用方负责关闭）
pub async fn extract_with_store(path: &Path, store: &mut LookupStore) -> ImportResult<ExtractOutcome> {
    for kind in LookupKind::ALL {
        match store.load_mapping(kind).await {
            Ok(count) => info!(
                "{}",
                bilingual_with_args(loaded_key(kind), &[("count", &count.to_string())])
            ),
            Err(e) => error!(
                "{}",
                bilingual_with_args(
                    "lookup.load_failed",
                    &[("table", kind.table()), ("error", &e.to_string())]
                )
            ),
        }
    }

    ProductExtractor::with_defaults()
        .extract_file(path, store)
        .await
}

/// 序列化为紧凑 JSON（非 ASCII 字符原样输出）
pub fn render_json(records: &[ProductRecord]) -> ImportResult<String> {
    serde_json::to_string(records).map_err(|e| {
        error!(
            "{}",
            bilingual_with_args("output.json_failed", &[("error", &e.to_string())])
        );
        ImportError::from(e)
    })
}

fn loaded_key(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Form => "lookup.loaded_forms",
        LookupKind::Manufacturer => "lookup.loaded_manufacturers",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::field_mapper::REQUIRED_COLUMNS;
    use rusqlite::Connection;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{Builder, NamedTempFile};

    fn lookup_db() -> NamedTempFile {
        let file = Builder::new().suffix(".db").tempfile().unwrap();
        let conn = Connection::open(file.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE forms (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE);
             CREATE TABLE manufacturers (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE);
             INSERT INTO forms (name) VALUES ('أقراص');",
        )
        .unwrap();
        file
    }

    fn csv_sheet(lines: &[String]) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[tokio::test]
    async fn test_run_extraction_sqlite() {
        let db = lookup_db();
        let sheet = csv_sheet(&[
            REQUIRED_COLUMNS.join(","),
            "PANADOL,PARACETAMOL,500 mg,20,GSK,أقراص,10,".to_string(),
            ",,,,,,,".to_string(),
            "BRUFEN,IBUPROFEN,400 mg,30,Abbott,كبسولات,12,9".to_string(),
        ]);
        let config = ConnectionConfig::Sqlite {
            path: db.path().display().to_string(),
        };

        let outcome = run_extraction(sheet.path(), &config).await.unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].form_id, 1);
        assert_eq!(outcome.records[0].ref_purchase_price, 8.5);
        assert_eq!(outcome.records[0].translations[0].scientific_name, "باراسيتامول");
        assert_eq!(outcome.records[1].form_id, 2);
        assert_eq!(outcome.records[1].ref_purchase_price, 9.0);
        assert_eq!(outcome.summary.skipped_empty, 1);

        let conn = Connection::open(db.path()).unwrap();
        let manufacturers: i64 = conn
            .query_row("SELECT COUNT(*) FROM manufacturers", [], |r| r.get(0))
            .unwrap();
        assert_eq!(manufacturers, 2);
    }

    #[tokio::test]
    async fn test_run_missing_file() {
        let cli = Cli {
            excel_file_path: PathBuf::from("/nonexistent/products.xlsx"),
            database_config: None,
        };
        let result = run(cli).await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_run_renders_compact_json() {
        let db = lookup_db();
        let sheet = csv_sheet(&[
            REQUIRED_COLUMNS.join(","),
            "PANADOL,PARACETAMOL,500 mg,20,GSK,أقراص,10,8".to_string(),
        ]);
        let cli = Cli {
            excel_file_path: sheet.path().to_path_buf(),
            database_config: Some(format!("sqlite://{}", db.path().display())),
        };

        let json = run(cli).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["tradeName"], "PANADOL");
        assert_eq!(value[0]["refPurchasePrice"], 8.0);
        assert!(json.contains("أقراص"));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
