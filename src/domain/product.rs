// ==========================================
// 药品目录提取工具 - 药品记录模型
// ==========================================
// 职责: 定义输出记录（JSON 结构）及批处理汇总
// 红线: 输出字段名固定为 camelCase，下游导入接口依赖此结构
// ==========================================

use crate::domain::lookup::LookupFallback;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ==========================================
// ProductTranslation - 药品名称翻译
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTranslation {
    pub trade_name: String,
    pub scientific_name: String,
    pub lang: String,
}

// ==========================================
// ProductRecord - 单条药品输出记录
// ==========================================
// 生命周期: 每个有效输入行构造一次，构造后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    // 基础信息
    pub trade_name: String,
    pub scientific_name: String,
    pub concentration: String,
    pub size: String,

    // 价格
    pub ref_purchase_price: f64,
    pub ref_selling_price: f64,

    pub notes: String,
    pub tax: f64,
    pub barcode: String,
    pub requires_prescription: bool,

    // 外键
    pub type_id: i64,
    pub form_id: i64,
    pub manufacturer_id: i64,
    pub category_ids: Vec<i64>,

    pub translations: Vec<ProductTranslation>,
}

// ==========================================
// MappedRecord - 行映射结果（记录 + 查找回退告警）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub record: ProductRecord,
    pub fallbacks: Vec<LookupFallback>,
}

// ==========================================
// ExtractSummary - 批处理汇总（仅写日志，不进入 stdout）
// ==========================================
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    /// 文件中的数据行总数
    pub total_rows: usize,
    /// 实际处理的行数（受 MAX_ROWS 限制）
    pub considered_rows: usize,
    /// 成功输出的记录数
    pub emitted: usize,
    /// 商品名与成分均为空而跳过的行
    pub skipped_empty: usize,
    /// 行级错误而跳过的行
    pub failed: usize,
    /// 剂型使用默认 ID 的次数
    pub form_fallbacks: usize,
    /// 厂家使用默认 ID 的次数
    pub manufacturer_fallbacks: usize,
    pub elapsed: Duration,
}

// ==========================================
// ExtractOutcome - 批处理结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    /// 按输入行顺序排列的记录
    pub records: Vec<ProductRecord>,
    pub summary: ExtractSummary,
}
