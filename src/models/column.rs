use serde::{Deserialize, Serialize};

/// 指标列类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    /// 总平均分
    Average,
    /// 排名
    Rank,
    /// 评语等级（Mention）
    Mention,
    /// 教师评语（Appréciation）
    Appreciation,
}

/// 列的角色
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    /// 元数据列，不参与统计
    Ignored,
    /// 科目列，值为归一化后的表头
    Subject(String),
    /// 指标列
    Indicator(IndicatorKind),
}

impl ColumnRole {
    pub fn subject_key(&self) -> Option<&str> {
        match self {
            ColumnRole::Subject(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_subject(&self) -> bool {
        matches!(self, ColumnRole::Subject(_))
    }
}

/// 表头归一化：去首尾空白并转大写
pub fn normalize_header(header: &str) -> String {
    header.trim().to_uppercase()
}

/// 去掉法语常见重音（用于不区分重音的匹配），输入应已大写
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Î' | 'Ï' => 'I',
            'Ô' | 'Ö' => 'O',
            'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Qur'an "), "QUR'AN");
        assert_eq!(normalize_header("prénom"), "PRÉNOM");
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("APPRÉCIATIONS GÉNÉRALES"), "APPRECIATIONS GENERALES");
        assert_eq!(fold_accents("FÉLICITATIONS"), "FELICITATIONS");
    }
}
