use crate::models::column::{fold_accents, ColumnRole, IndicatorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 单科班级统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectStat {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    /// 满分（barème）
    pub max_score: f64,
}

/// 一列的分类记录，每次加载构建一次，之后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub column_index: usize,
    /// 原始表头文本
    pub header: String,
    pub role: ColumnRole,
    /// 只有至少一个有效分数的科目列才有统计
    pub stat: Option<SubjectStat>,
}

/// 一次加载的完整结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeTable {
    pub headers: Vec<String>,
    /// 过滤后的学生行（姓名非空），保持原始顺序
    pub students: Vec<Vec<String>>,
    pub columns: Vec<ColumnRecord>,
    /// 原始列索引 -> 统计
    pub stats: BTreeMap<usize, SubjectStat>,
}

impl GradeTable {
    /// 所有科目列（按表头顺序）
    pub fn subject_columns(&self) -> impl Iterator<Item = &ColumnRecord> {
        self.columns.iter().filter(|column| column.role.is_subject())
    }

    /// 指定类型的第一个指标列
    pub fn indicator_index(&self, kind: IndicatorKind) -> Option<usize> {
        self.columns
            .iter()
            .find(|column| column.role == ColumnRole::Indicator(kind))
            .map(|column| column.column_index)
    }

    /// 所有有统计的科目的满分之和
    pub fn total_max_score(&self) -> f64 {
        self.stats.values().map(|stat| stat.max_score).sum()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }
}

/// Mention 对应的四个勾选框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentionCategory {
    Felicitations,
    Encouragements,
    /// 学习态度
    Travail,
    /// 行为
    Comportement,
}

impl MentionCategory {
    /// 匹配顺序即优先级
    const ORDERED: [(MentionCategory, &'static str); 4] = [
        (MentionCategory::Felicitations, "FELICITATIONS"),
        (MentionCategory::Encouragements, "ENCOURAGEMENTS"),
        (MentionCategory::Travail, "TRAVAIL"),
        (MentionCategory::Comportement, "COMPORTEMENT"),
    ];

    /// 不区分大小写和重音的子串匹配，第一个命中者胜出
    pub fn classify(mention: &str) -> Option<Self> {
        let folded = fold_accents(&mention.to_uppercase());
        Self::ORDERED
            .iter()
            .find(|(_, needle)| folded.contains(needle))
            .map(|(category, _)| *category)
    }

    pub fn label(self) -> &'static str {
        match self {
            MentionCategory::Felicitations => "Félicitations",
            MentionCategory::Encouragements => "Encouragements",
            MentionCategory::Travail => "Travail",
            MentionCategory::Comportement => "Comportement",
        }
    }
}

impl fmt::Display for MentionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 单个学生的综合指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentMetrics {
    /// 显示的平均分（表格提供的权威值或计算值）
    pub displayed_average: String,
    /// 按满分加权折算到 20 分制的计算值
    pub computed_average: Option<f64>,
    /// 排名显示（含上标）
    pub rank: String,
    pub mention: String,
    pub mention_category: Option<MentionCategory>,
    pub appreciation: String,
}

/// 单科成绩显示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreDisplay {
    /// 缺考
    Absent,
    /// 原始分数文本与满分
    Score { text: String, max_score: String },
}

impl fmt::Display for ScoreDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreDisplay::Absent => write!(f, "ABS"),
            ScoreDisplay::Score { text, max_score } => write!(f, "{} / {}", text, max_score),
        }
    }
}
