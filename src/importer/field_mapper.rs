// ==========================================
// 药品目录提取工具 - 字段映射器实现
// ==========================================
// 职责: 阿拉伯语源列名 → 标准字段 + 类型转换
// 说明: 源文件部分表头带首尾空格，解析时已统一 TRIM，这里使用 TRIM 后的列名
// ==========================================

use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::{RawRow, RawSheet};

// ===== 源列名 =====
pub const COL_TRADE_NAME: &str = "الاسم التجاري"; // 商品名
pub const COL_COMPOSITION: &str = "التركيب"; // 成分（学名）
pub const COL_STRENGTH: &str = "العيار"; // 规格/浓度
pub const COL_PACKAGE_SIZE: &str = "العبوة"; // 包装
pub const COL_MANUFACTURER: &str = "المعمل"; // 厂家
pub const COL_FORM: &str = "الشكل الصيدلاني"; // 剂型
pub const COL_PUBLIC_PRICE: &str = "السعر للعموم"; // 零售价
pub const COL_PHARMACIST_PRICE: &str = "السعر للصيدلاني"; // 药师价（采购价）

/// 必需列（缺任何一列即终止运行）
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_TRADE_NAME,
    COL_COMPOSITION,
    COL_STRENGTH,
    COL_PACKAGE_SIZE,
    COL_MANUFACTURER,
    COL_FORM,
    COL_PUBLIC_PRICE,
    COL_PHARMACIST_PRICE,
];

/// 返回表中缺失的必需列（按 REQUIRED_COLUMNS 顺序）
pub fn missing_required_columns(sheet: &RawSheet) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !sheet.has_column(col))
        .map(|col| col.to_string())
        .collect()
}

// ==========================================
// RawProductRow - 映射后的中间结构体
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProductRow {
    pub trade_name: String,
    pub scientific_name: String,
    pub concentration: String,
    pub size: String,
    pub manufacturer: String,
    pub form: String,
    pub selling_price: Option<f64>,
    pub purchase_price: Option<f64>,
}

impl RawProductRow {
    /// 商品名与成分均为空 → 整行跳过
    pub fn is_blank(&self) -> bool {
        self.trade_name.is_empty() && self.scientific_name.is_empty()
    }
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl FieldMapper {
    /// 将原始行映射为 RawProductRow
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 数据行号（从 1 开始，用于日志）
    ///
    /// # 返回
    /// - Err: 价格列存在非数字文本
    pub fn map_to_raw_product(&self, row: &RawRow, row_number: usize) -> ImportResult<RawProductRow> {
        Ok(RawProductRow {
            trade_name: self.get_text(row, COL_TRADE_NAME),
            scientific_name: self.get_text(row, COL_COMPOSITION),
            concentration: self.get_text(row, COL_STRENGTH),
            size: self.get_text(row, COL_PACKAGE_SIZE),
            manufacturer: self.get_text(row, COL_MANUFACTURER),
            form: self.get_text(row, COL_FORM),
            selling_price: self.parse_price(row, COL_PUBLIC_PRICE, row_number)?,
            purchase_price: self.parse_price(row, COL_PHARMACIST_PRICE, row_number)?,
        })
    }

    fn get_text(&self, row: &RawRow, key: &str) -> String {
        self.cleaner.clean_text(row.get(key).map(String::as_str))
    }

    fn parse_price(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        self.cleaner
            .parse_price(row.get(key).map(String::as_str))
            .map_err(|message| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message,
            })
    }
}
