// ==========================================
// 药品目录提取工具 - 名称翻译表
// ==========================================
// 职责: 英文通用名 → 阿拉伯语名称（固定表，不可在运行时修改）
// 规则: 键不区分大小写，查询前 TRIM；未收录的名称原样返回
// ==========================================

use std::collections::HashMap;

/// 内置翻译条目
const BUILTIN_ENTRIES: [(&str, &str); 16] = [
    ("OMEPRAZOLE", "أوميبرازول"),
    ("ACETAZOLAMIDE", "أسيتازولاميد"),
    ("AMOXICILLIN", "أموكسيسيلين"),
    ("PARACETAMOL", "باراسيتامول"),
    ("IBUPROFEN", "إيبوبروفين"),
    ("ASPIRIN", "أسبرين"),
    ("METFORMIN", "ميتفورمين"),
    ("INSULIN", "إنسولين"),
    ("WARFARIN", "وارفارين"),
    ("DIGOXIN", "ديجوكسين"),
    ("SODIUM VALPROATE", "فالبروات الصوديوم"),
    ("ERYTHROMYCIN", "إريثروميسين"),
    ("ASCORBIC ACID", "حمض الأسكوربيك"),
    ("CEFUROXIME", "سيفوروكسيم"),
    ("ORLISTAT", "أورليستات"),
    ("DILTIAZEM HYDROCHLORIDE", "ديلتيازيم هيدروكلوريد"),
];

// ==========================================
// TranslationTable
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// 由任意条目构造（键统一转大写）
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_uppercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// 内置翻译表
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ENTRIES)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 翻译名称
    ///
    /// # 返回
    /// - 命中: 阿拉伯语名称
    /// - 未命中: 原值
    pub fn translate(&self, name: &str) -> String {
        self.entries
            .get(&name.trim().to_uppercase())
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}
