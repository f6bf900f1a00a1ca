use crate::models::grade::{ScoreDisplay, StudentMetrics};
use crate::models::subject::SubjectLabel;
use serde::{Deserialize, Serialize};

/// 成绩单中的一行（一个科目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectLine {
    pub column_index: usize,
    pub subject_key: String,
    pub label: SubjectLabel,
    /// "阿拉伯文 - 转写"
    pub label_ar_trans: String,
    /// 法文名称或 "Non Défini"
    pub label_fr: String,
    pub score: ScoreDisplay,
    pub class_avg: String,
    pub class_min: String,
    pub class_max: String,
    /// 第一个行为类科目行，渲染时在其上方加分隔
    pub discipline_start: bool,
}

/// 一个学生的成绩单，交给外部渲染器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    pub last_name: String,
    pub first_name: String,
    pub class_name: String,
    pub teacher: String,
    /// "BULLETIN DU 1ER SEMESTRE 2025/2026"
    pub title: String,
    /// "1ER SEM."
    pub semester_header: String,
    /// "(24 ÉLÈVES)"
    pub student_count_label: String,
    /// dd/mm/yyyy
    pub issue_date: String,
    pub metrics: StudentMetrics,
    pub subjects: Vec<SubjectLine>,
}

/// 一个班级的全部成绩单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub class_name: String,
    pub year: String,
    pub semester: String,
    pub source: String,
    pub cards: Vec<ReportCard>,
}

impl ClassReport {
    pub fn student_count(&self) -> usize {
        self.cards.len()
    }
}
