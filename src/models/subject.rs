use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 内置科目表（表头 -> (阿拉伯文, 转写, 法文)）
static BUILTIN_SUBJECTS: phf::Map<&'static str, (&'static str, &'static str, &'static str)> = phf_map! {
    "QA'IDAH" => ("قاعدة", "QĀ'IDAH", "BASES"),
    "QUR'AN" => ("القرآن", "QUR'ĀN", "SAINT-CORAN"),
    "KALIMAH" => ("كلمة", "KALIMAH", "PAROLES DE FOI"),
    "DOU'A" => ("دعاء", "DOU'Ā", "INVOCATIONS"),
    "SURAH" => ("سورة", "SŪRAH", "SOURATES"),
    "FIQH" => ("فقه", "FIQH", "JURISPRUDENCE"),
    "SIRAH" => ("سيرة", "SĪRAH", "BIOGRAPHIE"),
    "ARABIC" => ("لغة عربية", "", "LANGUE ARABE"),
    "TAJWID" => ("تجويد", "TAJWĪD", "INTONATIONS"),
    "AQIDAH" => ("عقيدة", "AQIDAH", "CROYANCES"),
    "HADITH" => ("حديث", "HADĪTH", "HADITH"),
    "HIFZ" => ("حفظ", "HIFZ", "MÉMORISATION"),
    "AKHLAQ" => ("أخلاق", "AKHLĀQ", "COMPORTEMENT"),
    "HUDUR" => ("حضور", "HUDHŪR", "ASSIDUITÉ"),
};

/// 行为类科目（纪律、出勤），在成绩单中单独分隔
const BEHAVIOR_SUBJECTS: [&str; 2] = ["AKHLAQ", "HUDUR"];

/// 科目显示名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectLabel {
    /// 阿拉伯文名称
    pub ar: String,
    /// 拉丁转写
    #[serde(default)]
    pub trans: String,
    /// 法文名称
    #[serde(default)]
    pub fr: String,
}

impl SubjectLabel {
    pub fn new(ar: impl Into<String>, trans: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            trans: trans.into(),
            fr: fr.into(),
        }
    }

    /// 未知科目：三个位置都显示原始表头
    pub fn fallback(raw_header: &str) -> Self {
        let raw = raw_header.trim();
        Self::new(raw, raw, raw)
    }

    /// "阿拉伯文 - 转写"，没有转写时只显示阿拉伯文
    pub fn ar_trans(&self) -> String {
        if self.trans.is_empty() {
            self.ar.clone()
        } else {
            format!("{} - {}", self.ar, self.trans)
        }
    }

    /// 法文名称，为空时显示 "Non Défini"
    pub fn fr_or_undefined(&self) -> &str {
        if self.fr.is_empty() {
            "Non Défini"
        } else {
            &self.fr
        }
    }
}

/// 内置科目表
pub fn builtin_subjects() -> impl Iterator<Item = (&'static str, SubjectLabel)> {
    BUILTIN_SUBJECTS
        .entries()
        .map(|(key, (ar, trans, fr))| (*key, SubjectLabel::new(*ar, *trans, *fr)))
}

/// 是否为行为类科目
pub fn is_behavior_subject(subject_key: &str) -> bool {
    BEHAVIOR_SUBJECTS.contains(&subject_key)
}
