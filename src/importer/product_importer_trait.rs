// ==========================================
// 药品目录提取工具 - 导入组件 Trait
// ==========================================
// 职责: 定义可替换的导入组件接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行: 列名（已 TRIM）→ 单元格文本
pub type RawRow = HashMap<String, String>;

// ==========================================
// RawSheet - 第一张工作表的原始内容
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    /// 表头（已 TRIM，保持原顺序）
    pub headers: Vec<String>,
    /// 数据行（保持原顺序，空白行保留）
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawSheet): 解析结果
    /// - Err: 文件读取错误、格式错误
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// BarcodeGenerator Trait
// ==========================================
// 用途: 条码生成接口（测试可替换为固定值）
// 实现者: RandomBarcodeGenerator
pub trait BarcodeGenerator: Send + Sync {
    /// 生成条码（固定位数的纯数字字符串）
    fn generate(&self) -> String;
}
