//! 单元格值
//!
//! 表格里的成绩单元格是人工编辑的：逗号小数、空白、"ABS"、公式错误
//! `#DIV/0!`、文字备注都会混在一起。所有"嗅探字符串"的逻辑集中在
//! [`CellValue::parse`]，统计和指标计算都只消费解析后的结果。

use regex::Regex;
use std::sync::OnceLock;

/// 表格公式除零错误
pub const DIV_ZERO_TOKEN: &str = "#DIV/0!";

/// "不可用"占位符
pub const NOT_AVAILABLE: &str = "-";

/// 解析后的单元格
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 合法数字（逗号或点作小数分隔符）
    Numeric(f64),
    /// 缺考标记（包含 "abs"，不区分大小写）
    Absent,
    /// `-` 占位符或 `#DIV/0!` 等公式错误
    ErrorToken,
    /// 其他文字
    TextRemark(String),
    /// 空单元格
    Empty,
}

fn numeric_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            // 可选符号、数字、至多一个分隔符、可选小数位
            Regex::new(r"^[+-]?\d+(?:[.,]\d*)?$").ok()
        })
        .as_ref()
}

impl CellValue {
    /// 解析单元格文本
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        if text.is_empty() {
            return CellValue::Empty;
        }
        if text.to_lowercase().contains("abs") {
            return CellValue::Absent;
        }
        if text == NOT_AVAILABLE || text.contains(DIV_ZERO_TOKEN) {
            return CellValue::ErrorToken;
        }

        match parse_number(text) {
            Some(value) => CellValue::Numeric(value),
            None => CellValue::TextRemark(text.to_string()),
        }
    }

    /// 数值（仅 `Numeric` 有值）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    /// 单元格是否可以作为"权威值"使用（非空、非 `-`、非公式错误）
    pub fn is_usable(&self) -> bool {
        !matches!(self, CellValue::Empty | CellValue::ErrorToken)
    }
}

/// 按数字文法解析，逗号视同小数点
///
/// 不符合文法或结果非有限数时返回 `None`。
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !numeric_pattern().is_some_and(|re| re.is_match(text)) {
        return None;
    }
    text.replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// 读取某一行某一列的单元格，越界视为空
pub fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
