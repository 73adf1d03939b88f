// ==========================================
// 药品目录提取工具 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 价格文本解析
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM，缺失视为空字符串）
    pub fn clean_text(&self, value: Option<&str>) -> String {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析价格文本
    ///
    /// # 返回
    /// - Ok(None): 缺失 / 空 / NaN
    /// - Ok(Some(v)): 数值
    /// - Err(message): 非数字文本 / 无穷大
    pub fn parse_price(&self, value: Option<&str>) -> Result<Option<f64>, String> {
        let Some(text) = self.normalize_null(value) else {
            return Ok(None);
        };

        let parsed = text
            .parse::<f64>()
            .map_err(|_| format!("not a number: {}", text))?;

        if parsed.is_nan() {
            Ok(None)
        } else if parsed.is_infinite() {
            Err(format!("not a finite number: {}", text))
        } else {
            Ok(Some(parsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text(Some("  PANADOL  ")), "PANADOL");
        assert_eq!(cleaner.clean_text(Some("")), "");
        assert_eq!(cleaner.clean_text(None), "");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ")), None);
        assert_eq!(cleaner.normalize_null(Some("")), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ")),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_parse_price() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price(Some(" 12.5 ")), Ok(Some(12.5)));
        assert_eq!(cleaner.parse_price(Some("3000")), Ok(Some(3000.0)));
        assert_eq!(cleaner.parse_price(Some("")), Ok(None));
        assert_eq!(cleaner.parse_price(None), Ok(None));
        assert_eq!(cleaner.parse_price(Some("NaN")), Ok(None));
        assert!(cleaner.parse_price(Some("twelve")).is_err());
        assert!(cleaner.parse_price(Some("inf")).is_err());
        assert!(cleaner.parse_price(Some("-Infinity")).is_err());
    }
}
