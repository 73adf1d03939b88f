// ==========================================
// 端到端测试 - 命令行程序
// ==========================================
// 测试目标: 退出码 / stdout 只含 JSON / 日志走 stderr
// ==========================================


use std::process::{Command, Output};
use test_helpers::*;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pharma-extract"))
        .args(args)
        .env_remove("PHARMA_EXTRACT_DB_URL")
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to launch pharma-extract")
}

#[test]
fn test_cli_success_prints_json_array() {
    let (_db, db_path) = create_lookup_db(&["أقراص"], &["GSK"]).unwrap();
    let sheet = write_xlsx(
        &SOURCE_HEADERS,
        &[
            product_row("PARACETAMOL", "PARACETAMOL", "GSK", "أقراص", Cell::Number(10.0), Cell::Empty),
            vec![Cell::Empty; 8],
            product_row("ZANTAC", "RANITIDINE", "GSK", "أقراص", Cell::Text("25"), Cell::Text("20")),
        ],
    )
    .unwrap();
    let sheet_path = sheet.path().display().to_string();
    let db_url = format!("sqlite://{}", db_path);

    let output = run_cli(&[&sheet_path, &db_url]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with('\n'));
    assert_eq!(stdout.trim_end().lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["translations"][0]["tradeName"], "باراسيتامول");
    assert_eq!(records[0]["refPurchasePrice"], 8.5);
    assert_eq!(records[0]["tax"], 15.0);
    assert_eq!(records[0]["categoryIds"], serde_json::json!([1]));
    assert_eq!(records[1]["tradeName"], "ZANTAC");
    assert_eq!(records[1]["refPurchasePrice"], 20.0);
    assert!(stdout.contains("أقراص"));

    // 日志只写 stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Database connection closed"));
}

#[test]
fn test_cli_missing_form_column_exits_one() {
    let (_db, db_path) = create_lookup_db(&[], &[]).unwrap();
    let headers: Vec<&str> = SOURCE_HEADERS
        .iter()
        .copied()
        .filter(|h| h.trim() != "الشكل الصيدلاني")
        .collect();
    let sheet = write_csv(&[
        headers.join(","),
        "PANADOL,PARACETAMOL,500 mg,20,GSK,10,".to_string(),
    ])
    .unwrap();
    let sheet_path = sheet.path().display().to_string();

    let output = run_cli(&[&sheet_path, &db_path]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required columns"));
    // 失败路径同样释放连接
    assert!(stderr.contains("Database connection closed"));
}

#[test]
fn test_cli_missing_file_exits_one() {
    let output = run_cli(&["/nonexistent/products.xlsx"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("الملف غير موجود"));
}

#[test]
fn test_cli_without_arguments_exits_one() {
    let output = run_cli(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_help_exits_zero() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pharma-extract"));
}
