//! CSV 解码服务 - 业务能力层
//!
//! 只负责把完整的 CSV 文本转换成 [`RawTable`]，不关心数据来自文件还是网络。

use crate::error::{AppResult, TransportError};
use crate::models::table::RawTable;
use csv::ReaderBuilder;
use tracing::debug;

/// 候选分隔符（法语区表格软件常导出分号分隔）
const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// 解析 CSV 文本
///
/// # 参数
/// - `content`: 完整的 CSV 文本
/// - `location`: 数据来源（用于错误信息）
pub fn parse_csv(content: &str, location: &str) -> AppResult<RawTable> {
    let content = content.trim_start_matches('\u{feff}');

    if content.trim().is_empty() {
        return Err(TransportError::EmptyPayload {
            location: location.to_string(),
        }
        .into());
    }

    let delimiter = sniff_delimiter(content);
    debug!(
        "解析 CSV {} (分隔符: {:?})",
        location,
        char::from(delimiter)
    );

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TransportError::CsvParse {
            location: location.to_string(),
            source,
        })?;

        // 只有一个空字段的行视为空行
        if record.len() == 1 && record.get(0).map_or(true, |cell| cell.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(String::from).collect());
    }

    debug!("CSV {} 共 {} 行", location, rows.len());
    Ok(RawTable::new(rows))
}

/// 根据第一行（引号外）出现次数最多的候选字符确定分隔符
pub fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in first_line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(pos) = CANDIDATE_DELIMITERS.iter().position(|d| *d == byte) {
            counts[pos] += 1;
        }
    }

    // 并列时取靠前的候选（逗号优先）
    let mut best = 0;
    for pos in 1..counts.len() {
        if counts[pos] > counts[best] {
            best = pos;
        }
    }
    CANDIDATE_DELIMITERS[best]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_comma_csv() {
        let table = parse_csv("#,NOM,FIQH\n,,20\n1,Ali,\"12,5\"\n", "test.csv").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[2], vec!["1", "Ali", "12,5"]);
    }

    #[test]
    fn test_parse_semicolon_csv_with_bom() {
        let table = parse_csv("\u{feff}#;NOM;FIQH\r\n;;20\r\n1;Ali;12,5\r\n", "test.csv").unwrap();
        assert_eq!(table.headers()[0], "#");
        assert_eq!(table.rows[2][2], "12,5");
    }

    #[test]
    fn test_blank_lines_are_skipped_and_rows_may_be_ragged() {
        let table = parse_csv("#,NOM,FIQH\n\n,,20\n1,Ali\n", "test.csv").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[2].len(), 2);
    }

    #[test]
    fn test_empty_payload() {
        let err = parse_csv("  \n", "vide.csv").unwrap_err();
        assert!(matches!(
            err,
            AppError::Transport(TransportError::EmptyPayload { ref location }) if location == "vide.csv"
        ));
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("a;b;c"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("\"x,y\";b;c"), b';');
        assert_eq!(sniff_delimiter("single"), b',');
    }
}
