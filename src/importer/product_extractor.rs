// ==========================================
// 药品目录提取工具 - 批量提取器
// ==========================================
// 职责: 整合提取流程，从表格文件到记录列表
// 流程: 解析 → 列校验 → 截取前 MAX_ROWS 行 → 逐行映射 → 汇总
// 红线: 行级错误只跳过该行；缺列为致命错误
// ==========================================

use crate::config::extract_defaults::{MAX_ROWS, PROGRESS_EVERY};
use crate::domain::{ExtractOutcome, ExtractSummary, LookupKind};
use crate::i18n::bilingual_with_args;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::missing_required_columns;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::product_importer_trait::{FileParser, RawSheet};
use crate::importer::record_mapper::RecordMapper;
use crate::repository::LookupResolver;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductExtractor
// ==========================================
pub struct ProductExtractor {
    // 导入组件
    file_parser: Box<dyn FileParser>,
    record_mapper: RecordMapper,
}

impl ProductExtractor {
    /// 创建提取器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - record_mapper: 记录映射器
    pub fn new(file_parser: Box<dyn FileParser>, record_mapper: RecordMapper) -> Self {
        Self {
            file_parser,
            record_mapper,
        }
    }

    /// 按扩展名自动选择解析器 + 默认映射器
    pub fn with_defaults() -> Self {
        Self::new(Box::new(UniversalFileParser), RecordMapper::with_defaults())
    }

    /// 从表格文件提取记录
    ///
    /// # 参数
    /// - file_path: 表格文件路径
    /// - resolver: 剂型/厂家名称解析器
    ///
    /// # 返回
    /// - Ok(ExtractOutcome): 记录（按输入顺序）+ 汇总
    /// - Err: 文件不可读、格式不支持、缺少必需列
    pub async fn extract_file<R>(
        &self,
        file_path: &Path,
        resolver: &mut R,
    ) -> ImportResult<ExtractOutcome>
    where
        R: LookupResolver + ?Sized,
    {
        info!(
            "{}",
            bilingual_with_args(
                "import.processing_file",
                &[("path", &file_path.display().to_string())]
            )
        );

        let sheet = self.file_parser.parse_sheet(file_path).map_err(|e| {
            error!(
                "{}",
                bilingual_with_args("import.file_failed", &[("error", &e.to_string())])
            );
            e
        })?;

        self.extract_sheet(sheet, resolver).await
    }

    /// 从已解析的工作表提取记录
    #[instrument(skip_all, fields(batch_id))]
    pub async fn extract_sheet<R>(
        &self,
        sheet: RawSheet,
        resolver: &mut R,
    ) -> ImportResult<ExtractOutcome>
    where
        R: LookupResolver + ?Sized,
    {
        let start_time = Instant::now();
        let started_at = Utc::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        // === 步骤 1: 列校验 ===
        let missing = missing_required_columns(&sheet);
        if !missing.is_empty() {
            error!(
                "{}",
                bilingual_with_args("import.missing_columns", &[("columns", &missing.join(", "))])
            );
            return Err(ImportError::MissingColumns(missing));
        }

        // === 步骤 2: 截取前 MAX_ROWS 行 ===
        let total_rows = sheet.rows.len();
        let considered_rows = total_rows.min(MAX_ROWS);
        if total_rows > MAX_ROWS {
            info!(
                "{}",
                bilingual_with_args(
                    "import.row_cap",
                    &[("max", &MAX_ROWS.to_string()), ("total", &total_rows.to_string())]
                )
            );
        }
        info!(
            "{}",
            bilingual_with_args(
                "import.processing_records",
                &[("count", &considered_rows.to_string())]
            )
        );

        // === 步骤 3: 逐行映射 ===
        let mut records = Vec::with_capacity(considered_rows);
        let mut skipped_empty = 0;
        let mut failed = 0;
        let mut form_fallbacks = 0;
        let mut manufacturer_fallbacks = 0;

        for (idx, row) in sheet.rows.iter().take(MAX_ROWS).enumerate() {
            let row_number = idx + 1;
            match self.record_mapper.map_row(row, row_number, resolver).await {
                Ok(Some(mapped)) => {
                    for fallback in &mapped.fallbacks {
                        match fallback.kind {
                            LookupKind::Form => form_fallbacks += 1,
                            LookupKind::Manufacturer => manufacturer_fallbacks += 1,
                        }
                    }
                    records.push(mapped.record);
                }
                Ok(None) => {
                    debug!(row_number, "blank row skipped");
                    skipped_empty += 1;
                }
                Err(e) => {
                    warn!(
                        row_number,
                        "{}",
                        bilingual_with_args(
                            "import.row_failed",
                            &[("row", &row_number.to_string()), ("error", &e.to_string())]
                        )
                    );
                    failed += 1;
                }
            }

            if row_number % PROGRESS_EVERY == 0 {
                info!(
                    "{}",
                    bilingual_with_args(
                        "import.progress",
                        &[
                            ("done", &row_number.to_string()),
                            ("max", &considered_rows.to_string())
                        ]
                    )
                );
            }
        }

        let summary = ExtractSummary {
            batch_id,
            started_at,
            total_rows,
            considered_rows,
            emitted: records.len(),
            skipped_empty,
            failed,
            form_fallbacks,
            manufacturer_fallbacks,
            elapsed: start_time.elapsed(),
        };

        info!(
            "{}",
            bilingual_with_args("import.extracted", &[("count", &records.len().to_string())])
        );
        info!(
            total_rows = summary.total_rows,
            emitted = summary.emitted,
            skipped_empty = summary.skipped_empty,
            failed = summary.failed,
            form_fallbacks = summary.form_fallbacks,
            manufacturer_fallbacks = summary.manufacturer_fallbacks,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "extraction summary"
        );

        Ok(ExtractOutcome { records, summary })
    }
}
