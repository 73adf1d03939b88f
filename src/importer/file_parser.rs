// ==========================================
// 药品目录提取工具 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.xlsb/.ods，仅第一张工作表) / CSV (.csv)
// 约定: 第一行为表头；表头与单元格均 TRIM；空单元格/错误单元格视为空字符串
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::{FileParser, RawRow, RawSheet};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// 文件扩展名（小写）
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装一行（同名列保留第一次出现的值）
fn build_row<I>(headers: &[String], cells: I) -> RawRow
where
    I: IntoIterator<Item = String>,
{
    let mut row_map = RawRow::new();
    for (col_idx, value) in cells.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            if header.is_empty() {
                continue;
            }
            row_map.entry(header.clone()).or_insert(value);
        }
    }
    row_map
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（去掉 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(build_row(
                &headers,
                record.iter().map(|value| value.trim().to_string()),
            ));
        }

        Ok(RawSheet { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → 文本
    ///
    /// # 规则
    /// - Empty / Error（如 #N/A）→ ""
    /// - NaN → ""
    /// - 其他 → Display 结果 TRIM（整数值浮点显示为 "500" 而非 "500.0"）
    pub fn cell_to_text(cell: &Data) -> String {
        match cell {
            Data::Empty | Data::Error(_) => String::new(),
            Data::Float(f) if f.is_nan() => String::new(),
            Data::String(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（按扩展名自动识别格式）
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row.iter().map(Self::cell_to_text).collect(),
            None => return Ok(RawSheet::default()),
        };

        // 读取数据行
        let rows = rows_iter
            .map(|data_row| build_row(&headers, data_row.iter().map(Self::cell_to_text)))
            .collect();

        Ok(RawSheet { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        let ext = extension_of(file_path);
        match ext.as_str() {
            "csv" => CsvParser.parse_sheet(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_sheet(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            "الاسم التجاري,التركيب ,العيار",
            "PANADOL, PARACETAMOL ,500 mg",
            "BRUFEN,IBUPROFEN,400 mg",
        ]);

        let sheet = CsvParser.parse_sheet(temp_file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["الاسم التجاري", "التركيب", "العيار"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("التركيب"), Some(&"PARACETAMOL".to_string()));
        assert_eq!(sheet.rows[1].get("الاسم التجاري"), Some(&"BRUFEN".to_string()));
    }

    #[test]
    fn test_csv_parser_keeps_blank_rows() {
        let temp_file = csv_file(&["a,b", "1,2", ",", "3,4"]);

        let sheet = CsvParser.parse_sheet(temp_file.path()).unwrap();

        // 空白行计入行数，由映射规则跳过
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[1].get("a"), Some(&String::new()));
    }

    #[test]
    fn test_csv_parser_short_row() {
        let temp_file = csv_file(&["a,b,c", "1"]);
        let sheet = CsvParser.parse_sheet(temp_file.path()).unwrap();
        assert_eq!(sheet.rows[0].get("a"), Some(&"1".to_string()));
        assert_eq!(sheet.rows[0].get("c"), None);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_sheet(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse_sheet(Path::new("products.txt"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_cell_to_text() {
        assert_eq!(ExcelParser::cell_to_text(&Data::Empty), "");
        assert_eq!(ExcelParser::cell_to_text(&Data::Float(f64::NAN)), "");
        assert_eq!(ExcelParser::cell_to_text(&Data::Float(500.0)), "500");
        assert_eq!(ExcelParser::cell_to_text(&Data::Float(12.75)), "12.75");
        assert_eq!(ExcelParser::cell_to_text(&Data::Int(20)), "20");
        assert_eq!(
            ExcelParser::cell_to_text(&Data::String("  أقراص ".to_string())),
            "أقراص"
        );
    }
}
