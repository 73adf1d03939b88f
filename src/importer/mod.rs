// ==========================================
// 药品目录提取工具 - 导入层
// ==========================================
// 职责: 表格文件 → 药品记录
// 支持: Excel (.xlsx/.xls/.xlsm/.xlsb/.ods), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod product_extractor;
pub mod product_importer_trait;
pub mod record_mapper;
pub mod translation;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use derivation::RandomBarcodeGenerator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, RawProductRow, REQUIRED_COLUMNS};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use product_extractor::ProductExtractor;
pub use record_mapper::RecordMapper;
pub use translation::TranslationTable;

// 重导出 Trait 接口
pub use product_importer_trait::{BarcodeGenerator, FileParser, RawRow, RawSheet};
