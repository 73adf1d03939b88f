// ==========================================
// 药品目录提取工具 - 应用层
// ==========================================
// 职责: 命令行参数 + 运行流程编排
// ==========================================

pub mod cli;
pub mod runner;

// 重导出
pub use cli::Cli;
pub use runner::{extract_with_store, render_json, run, run_extraction};
