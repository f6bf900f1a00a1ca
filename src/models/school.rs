//! 学校字典配置
//!
//! 科目表、班级-教师表、忽略列表、默认满分。构造后只读，
//! 显式传入列分类器和指标计算器，不读取任何全局状态。

use crate::models::subject::{builtin_subjects, SubjectLabel};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 内置班级-教师表
static BUILTIN_CLASSES: phf::Map<&'static str, &'static str> = phf_map! {
    "M01" => "Mawlana Djafar",
    "M02" => "Mawlana Zubair",
    "M03" => "Mawlana Haja",
    "M04" => "Mawlana Fayçal",
    "M05" => "Mawlana Ismaïl",
    "M06" => "Mawlana Djafar",
    "M07" => "Mawlana Haja",
    "M08" => "Mawlana Ismaïl",
    "M09" => "Mawlana M09",
    "M10A" => "Mawlana Zubair",
    "M10B" => "Mawlana Fayçal",
};

/// 内置忽略列（非科目的元数据列）
const BUILTIN_IGNORED_COLUMNS: [&str; 20] = [
    "#",
    "NOM",
    "PRÉNOM",
    "PRENOM",
    "TOTAL",
    "RANG",
    "MENTION",
    "MOYENNE",
    "MOYENNE GÉNÉRALE",
    "MOYENNE GENERALE",
    "MOY",
    "APPRÉCIATIONS GÉNÉRALES",
    "APPRECIATIONS GENERALES",
    "APPRÉCIATION GÉNÉRALE",
    "OBSERVATIONS",
    "DATE_NAISSANCE",
    "M01",
    "M10",
    "CLASSE",
    "ELEVE_ID",
];

/// 未找到班级时显示的教师称呼
pub const DEFAULT_TEACHER: &str = "Professeur";

/// 班级信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub teacher: String,
}

/// 学校字典配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    /// 学校代码（出现在 CSV 文件名中，如 "[AMI] NOTES - ..."）
    pub school_code: String,
    /// 满分行缺失或无法解析时使用的满分
    pub default_max_score: f64,
    /// 班级 -> 教师
    pub classes: BTreeMap<String, ClassInfo>,
    /// 科目表头（大写） -> 显示名称
    pub subjects: BTreeMap<String, SubjectLabel>,
    /// 忽略列（大写）
    pub ignored_columns: BTreeSet<String>,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            school_code: "AMI".to_string(),
            default_max_score: 20.0,
            classes: BUILTIN_CLASSES
                .entries()
                .map(|(name, teacher)| {
                    (
                        name.to_string(),
                        ClassInfo {
                            teacher: teacher.to_string(),
                        },
                    )
                })
                .collect(),
            subjects: builtin_subjects()
                .map(|(key, label)| (key.to_string(), label))
                .collect(),
            ignored_columns: BUILTIN_IGNORED_COLUMNS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl SchoolConfig {
    /// 班级教师，未配置时返回 "Professeur"
    pub fn teacher_for(&self, class_name: &str) -> &str {
        self.classes
            .get(class_name)
            .map(|info| info.teacher.as_str())
            .unwrap_or(DEFAULT_TEACHER)
    }

    /// 科目显示名称，未知科目回退到原始表头
    pub fn subject_label(&self, subject_key: &str, raw_header: &str) -> SubjectLabel {
        self.subjects
            .get(subject_key)
            .cloned()
            .unwrap_or_else(|| SubjectLabel::fallback(raw_header))
    }

    /// 所有已配置班级（有序）
    pub fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// 统一为大写键，保证查表与表头归一化规则一致
    pub(crate) fn normalized(mut self) -> Self {
        self.subjects = self
            .subjects
            .into_iter()
            .map(|(key, label)| (key.trim().to_uppercase(), label))
            .collect();
        self.ignored_columns = self
            .ignored_columns
            .into_iter()
            .map(|name| name.trim().to_uppercase())
            .collect();
        self
    }
}
