/// 数字显示格式化
///
/// 四舍五入到 `decimals` 位，去掉末尾的 0，小数点显示为逗号；
/// 没有值时返回 `-`。
pub fn format_num(value: Option<f64>, decimals: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "-".to_string(),
    };

    // 先按"逢五进一"取整，避免格式化时的银行家舍入（13.125 → 13,13）
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    let fixed = format!("{:.*}", decimals, rounded);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    // -0,001 之类四舍五入后为 "-0"
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    trimmed.replace('.', ",")
}

/// 两位小数的常用形式
pub fn format_score(value: Option<f64>) -> String {
    format_num(value, 2)
}

/// 原始文本中的第一个小数点显示为逗号
pub fn comma_decimal(raw: &str) -> String {
    raw.replacen('.', ",", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_num_trims_zeros() {
        assert_eq!(format_score(Some(15.0)), "15");
        assert_eq!(format_score(Some(12.5)), "12,5");
        assert_eq!(format_score(Some(13.456)), "13,46");
        assert_eq!(format_score(Some(10.10)), "10,1");
        assert_eq!(format_score(Some(0.0)), "0");
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(format_score(Some(13.125)), "13,13");
        assert_eq!(format_score(Some(0.125)), "0,13");
        assert_eq!(format_score(Some(2.375)), "2,38");
        assert_eq!(format_score(Some((13.0 + 13.25) / 2.0)), "13,13");
    }

    #[test]
    fn test_format_num_missing() {
        assert_eq!(format_score(None), "-");
        assert_eq!(format_score(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_score(Some(-0.001)), "0");
        assert_eq!(format_score(Some(-2.5)), "-2,5");
    }

    #[test]
    fn test_comma_decimal() {
        assert_eq!(comma_decimal("14.5"), "14,5");
        assert_eq!(comma_decimal("14,5"), "14,5");
        assert_eq!(comma_decimal("Très bien"), "Très bien");
    }
}
