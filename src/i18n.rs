// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持阿拉伯语（ar）和英文（en，默认）
// 对外日志统一输出 "阿拉伯语 / 英文" 双语格式
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 阿拉伯语 locale
pub const LOCALE_AR: &str = "ar";

/// 英文 locale
pub const LOCALE_EN: &str = "en";

/// 按指定语言翻译消息（无参数）
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 按指定语言翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use pharma_extract::i18n::t_in_with_args;
/// let msg = t_in_with_args("en", "import.file_not_found", &[("path", "/tmp/a.xlsx")]);
/// ```
pub fn t_in_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_in(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 双语消息（无参数）: "阿拉伯语 / 英文"
///
/// 与当前 locale 无关，日志始终同时输出两种语言。
pub fn bilingual(key: &str) -> String {
    format!("{} / {}", t_in(LOCALE_AR, key), t_in(LOCALE_EN, key))
}

/// 双语消息（带参数）
///
/// # 示例
/// ```no_run
/// use pharma_extract::i18n::bilingual_with_args;
/// let msg = bilingual_with_args("import.row_failed", &[("row", "3"), ("error", "bad price")]);
/// ```
pub fn bilingual_with_args(key: &str, args: &[(&str, &str)]) -> String {
    format!(
        "{} / {}",
        t_in_with_args(LOCALE_AR, key, args),
        t_in_with_args(LOCALE_EN, key, args)
    )
}
