// ==========================================
// 药品目录提取工具 - 提取固定参数
// ==========================================
// 职责: 记录映射与批处理使用的固定常量
// 红线: 这些值不可通过命令行修改
// ==========================================

/// 每次运行最多处理的数据行数
pub const MAX_ROWS: usize = 100;

/// 税率（百分比），用于由销售价推算采购价
pub const TAX_RATE: f64 = 15.0;

/// 查找失败时使用的默认 ID（剂型 / 厂家）
pub const DEFAULT_LOOKUP_ID: i64 = 1;

/// 默认产品类型 ID
pub const DEFAULT_TYPE_ID: i64 = 1;

/// 默认产品分类 ID
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// 翻译语言代码
pub const TRANSLATION_LANG: &str = "ar";

/// 条码位数
pub const BARCODE_LEN: usize = 13;

/// 进度日志间隔（行）
pub const PROGRESS_EVERY: usize = 10;
