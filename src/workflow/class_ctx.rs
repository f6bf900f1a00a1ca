//! 班级处理上下文
//!
//! 封装"我正在处理哪一学年、哪一学期、哪个班级"这一信息

use std::fmt::Display;

/// 班级处理上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCtx {
    /// 学年，如 "2025-2026"
    pub year: String,

    /// 学期，"1" 或 "2"
    pub semester: String,

    /// 班级代码，如 "M06"
    pub class_name: String,
}

impl ClassCtx {
    /// 创建新的班级上下文
    pub fn new(
        year: impl Into<String>,
        semester: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            semester: semester.into(),
            class_name: class_name.into(),
        }
    }

    /// 自动模式下的 CSV 相对路径
    ///
    /// `{year}/SEMESTRE {sem}/[{school}] NOTES - {year 下划线形式} - SEMESTRE {sem} - {class}.csv`
    pub fn csv_relative_path(&self, school_code: &str) -> String {
        let year_underscore = self.year.replacen('-', "_", 1);
        format!(
            "{year}/SEMESTRE {sem}/[{school}] NOTES - {year_underscore} - SEMESTRE {sem} - {class}.csv",
            year = self.year,
            sem = self.semester,
            school = school_code,
            year_underscore = year_underscore,
            class = self.class_name,
        )
    }

    /// 学期标签："1ER" 或 "2ND"
    pub fn semester_label(&self) -> &'static str {
        if self.semester.trim() == "1" {
            "1ER"
        } else {
            "2ND"
        }
    }

    /// 学年显示形式，如 "2025/2026"
    pub fn year_display(&self) -> String {
        self.year.replacen('-', "/", 1)
    }

    /// 成绩单标题
    pub fn bulletin_title(&self) -> String {
        format!(
            "BULLETIN DU {} SEMESTRE {}",
            self.semester_label(),
            self.year_display()
        )
    }

    /// 表头中的学期列标题
    pub fn semester_header(&self) -> String {
        format!("{} SEM.", self.semester_label())
    }

    /// 输出文件名
    pub fn output_file_name(&self) -> String {
        format!("{}_S{}_{}.json", self.year, self.semester, self.class_name)
    }
}

impl Display for ClassCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[班级 {} | {} | 学期 {}]",
            self.class_name, self.year, self.semester
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_relative_path() {
        let ctx = ClassCtx::new("2025-2026", "1", "M06");
        assert_eq!(
            ctx.csv_relative_path("AMI"),
            "2025-2026/SEMESTRE 1/[AMI] NOTES - 2025_2026 - SEMESTRE 1 - M06.csv"
        );
    }

    #[test]
    fn test_labels() {
        let first = ClassCtx::new("2025-2026", "1", "M06");
        assert_eq!(first.bulletin_title(), "BULLETIN DU 1ER SEMESTRE 2025/2026");
        assert_eq!(first.semester_header(), "1ER SEM.");

        let second = ClassCtx::new("2024-2025", "2", "M10A");
        assert_eq!(second.bulletin_title(), "BULLETIN DU 2ND SEMESTRE 2024/2025");
        assert_eq!(second.output_file_name(), "2024-2025_S2_M10A.json");
    }
}
