// ==========================================
// 药品目录提取工具 - 字段派生实现
// ==========================================
// 职责: 采购价推算 / 条码生成 / 备注拼接
// ==========================================

use crate::config::extract_defaults::{BARCODE_LEN, TAX_RATE};
use crate::importer::product_importer_trait::BarcodeGenerator;
use rand::Rng;

/// 四舍五入到两位小数
///
/// 按浮点数的精确十进制值取舍（与 "{:.2}" 格式化结果一致），
/// 避免先乘 100 再取整带来的偏差（如 1.105 → 1.11）
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse::<f64>().unwrap_or(value)
}

/// 由销售价推算采购价
///
/// # 规则
/// - purchase = round(selling × (1 - TAX_RATE / 100), 2)
/// - 销售价为 0 时采购价为 0
pub fn derive_purchase_price(selling: f64) -> f64 {
    if selling == 0.0 {
        return 0.0;
    }
    round2(selling * (1.0 - TAX_RATE / 100.0))
}

/// 拼接备注: "دواء من إنتاج {厂家} - {剂型}"
///
/// 厂家或剂型为空时原样拼接（保留分隔符）
pub fn build_notes(manufacturer: &str, form: &str) -> String {
    format!("دواء من إنتاج {} - {}", manufacturer, form)
}

// ==========================================
// RandomBarcodeGenerator - 随机数字条码
// ==========================================
// 不保证全局唯一；下游导入时按需去重
pub struct RandomBarcodeGenerator {
    len: usize,
}

impl Default for RandomBarcodeGenerator {
    fn default() -> Self {
        Self { len: BARCODE_LEN }
    }
}

impl BarcodeGenerator for RandomBarcodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.len)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_purchase_price() {
        assert_eq!(derive_purchase_price(10.0), 8.5);
        assert_eq!(derive_purchase_price(3000.0), 2550.0);
        assert_eq!(derive_purchase_price(20.0), 17.0);
        assert_eq!(derive_purchase_price(0.0), 0.0);

        // 分位价格: 按精确十进制值取舍
        assert_eq!(derive_purchase_price(1.3), 1.1);
        assert_eq!(derive_purchase_price(0.5), 0.42);
        assert_eq!(derive_purchase_price(2.1), 1.78);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_build_notes() {
        assert_eq!(build_notes("GSK", "أقراص"), "دواء من إنتاج GSK - أقراص");
        assert_eq!(build_notes("", ""), "دواء من إنتاج  - ");
    }

    #[test]
    fn test_random_barcode() {
        let generator = RandomBarcodeGenerator::default();
        for _ in 0..20 {
            let code = generator.generate();
            assert_eq!(code.len(), 13);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
