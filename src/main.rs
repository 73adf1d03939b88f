// ==========================================
// 药品目录提取工具 - 命令行主入口
// ==========================================
// 用法: pharma-extract <excel_file_path> [database_config]
// 输出: stdout 为 JSON 数组；日志写入 stderr
// 退出码: 0 成功；1 参数错误或致命错误
// ==========================================

use clap::error::ErrorKind;
use clap::Parser;
use pharma_extract::app::{self, Cli};
use pharma_extract::i18n::bilingual;
use pharma_extract::logging;
use std::io::Write;
use std::process::ExitCode;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("{}", bilingual("run.usage"));
            error!("{}", bilingual("run.usage_examples"));
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(version = pharma_extract::VERSION, "{}", pharma_extract::APP_NAME);

    match app::run(cli).await {
        Ok(json) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{}", json).and_then(|_| stdout.flush()) {
                error!(error = %e, "failed to write JSON to stdout");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "{}", bilingual("run.failed"));
            ExitCode::FAILURE
        }
    }
}
