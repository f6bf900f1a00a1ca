//! 学生指标服务 - 业务能力层
//!
//! 针对单个学生行计算显示用的平均分、排名、评语等级和各科成绩显示。
//! 表格中提供的平均分和排名是权威值；平均分缺失时才用满分加权折算。

use crate::models::cell::{cell_at, CellValue, NOT_AVAILABLE};
use crate::models::column::IndicatorKind;
use crate::models::grade::{GradeTable, MentionCategory, ScoreDisplay, StudentMetrics};
use crate::models::report::SubjectLine;
use crate::models::school::SchoolConfig;
use crate::models::subject::is_behavior_subject;
use crate::utils::format::{comma_decimal, format_score};

/// 折算的目标分制
const TARGET_SCALE: f64 = 20.0;

/// 学生指标计算器
///
/// 持有一次加载的只读结果和学校配置，可对任意学生行重复计算。
pub struct StudentMetricsCalculator<'a> {
    table: &'a GradeTable,
    config: &'a SchoolConfig,
}

impl<'a> StudentMetricsCalculator<'a> {
    pub fn new(table: &'a GradeTable, config: &'a SchoolConfig) -> Self {
        Self { table, config }
    }

    /// 计算单个学生的综合指标
    pub fn compute(&self, student: &[String]) -> StudentMetrics {
        let computed_average = self.computed_average(student);

        let displayed_average = match self.indicator_cell(student, IndicatorKind::Average) {
            Some(raw) if CellValue::parse(raw).is_usable() => comma_decimal(raw.trim()),
            _ => format_score(computed_average),
        };

        let rank = format_rank(self.indicator_cell(student, IndicatorKind::Rank));

        let mention = self
            .indicator_cell(student, IndicatorKind::Mention)
            .unwrap_or("")
            .to_string();
        let mention_category = MentionCategory::classify(&mention);

        let appreciation = self
            .indicator_cell(student, IndicatorKind::Appreciation)
            .unwrap_or("")
            .to_string();

        StudentMetrics {
            displayed_average,
            computed_average,
            rank,
            mention,
            mention_category,
            appreciation,
        }
    }

    /// 满分加权平均分（折算到 20 分制）
    ///
    /// 只累加有班级统计的科目列；没有任何分数或满分总和为 0 时返回 `None`。
    pub fn computed_average(&self, student: &[String]) -> Option<f64> {
        let total_max_score = self.table.total_max_score();

        let mut student_sum = 0.0;
        let mut has_any_note = false;
        for column in self.table.subject_columns().filter(|c| c.stat.is_some()) {
            if let Some(value) = CellValue::parse(cell_at(student, column.column_index)).as_number()
            {
                student_sum += value;
                has_any_note = true;
            }
        }

        if has_any_note && total_max_score > 0.0 {
            Some(student_sum / total_max_score * TARGET_SCALE)
        } else {
            None
        }
    }

    /// 各科成绩行（按表头顺序）
    pub fn subject_lines(&self, student: &[String]) -> Vec<SubjectLine> {
        let mut discipline_seen = false;

        self.table
            .subject_columns()
            .filter_map(|column| {
                let key = column.role.subject_key()?;
                let label = self.config.subject_label(key, &column.header);

                let discipline_start = !discipline_seen && is_behavior_subject(key);
                if discipline_start {
                    discipline_seen = true;
                }

                Some(SubjectLine {
                    column_index: column.column_index,
                    subject_key: key.to_string(),
                    label_ar_trans: label.ar_trans(),
                    label_fr: label.fr_or_undefined().to_string(),
                    label,
                    score: self.score_display(student, column.column_index),
                    class_avg: format_score(column.stat.map(|s| s.avg)),
                    class_min: format_score(column.stat.map(|s| s.min)),
                    class_max: format_score(column.stat.map(|s| s.max)),
                    discipline_start,
                })
            })
            .collect()
    }

    /// 单科成绩显示
    ///
    /// 含 "abs" 的单元格一律显示为缺考；否则显示原始文本（不解析），
    /// 满分取该列统计，没有统计时取默认满分。
    pub fn score_display(&self, student: &[String], column_index: usize) -> ScoreDisplay {
        let raw = cell_at(student, column_index).trim();

        if CellValue::parse(raw) == CellValue::Absent {
            return ScoreDisplay::Absent;
        }

        let max_score = self
            .table
            .stats
            .get(&column_index)
            .map(|stat| stat.max_score)
            .unwrap_or(self.config.default_max_score);

        ScoreDisplay::Score {
            text: if raw.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                comma_decimal(raw)
            },
            max_score: format_score(Some(max_score)),
        }
    }

    fn indicator_cell<'s>(&self, student: &'s [String], kind: IndicatorKind) -> Option<&'s str> {
        self.table
            .indicator_index(kind)
            .map(|index| cell_at(student, index))
    }
}

/// 排名显示
///
/// 排名从不重新计算，只使用表格提供的值：`1` 显示为 `1<sup>er</sup>`，
/// 其他值 `N` 显示为 `N<sup>ème</sup>`；缺失、`-` 或公式错误显示 `-`。
pub fn format_rank(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(raw) if CellValue::parse(raw).is_usable() => raw,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if raw == "1" {
        "1<sup>er</sup>".to_string()
    } else {
        format!("{}<sup>ème</sup>", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::RawTable;
    use crate::workflow::grade_pipeline::GradePipeline;

    fn load(rows: Vec<Vec<&str>>) -> (GradeTable, SchoolConfig) {
        let config = SchoolConfig::default();
        let table = GradePipeline::new(&config)
            .run(&RawTable::from_rows(rows), "TEST")
            .unwrap();
        (table, config)
    }

    #[test]
    fn test_weighted_average_on_twenty_scale() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "SIRAH"],
            vec!["", "", "", "10", "10"],
            vec!["1", "Ali", "Omar", "8", "7"],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);
        let metrics = calc.compute(&table.students[0]);
        assert_eq!(metrics.computed_average, Some(15.0));
        assert_eq!(metrics.displayed_average, "15");
    }

    #[test]
    fn test_missing_score_still_counts_full_bareme() {
        // 缺考不计分，但满分总和仍按所有有统计的科目计算
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "SIRAH"],
            vec!["", "", "", "10", "10"],
            vec!["1", "Ali", "Omar", "8", "ABS"],
            vec!["2", "Sara", "Lina", "9", "6"],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);
        assert_eq!(calc.computed_average(&table.students[0]), Some(8.0));
    }

    #[test]
    fn test_authoritative_average_override() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "MOYENNE"],
            vec!["", "", "", "20", ""],
            vec!["1", "Ali", "Omar", "10", "14,5"],
            vec!["2", "Sara", "Lina", "10", "14.5"],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);
        assert_eq!(calc.compute(&table.students[0]).displayed_average, "14,5");
        assert_eq!(calc.compute(&table.students[1]).displayed_average, "14,5");
    }

    #[test]
    fn test_error_token_average_falls_back_to_computed() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "MOY G."],
            vec!["", "", "", "20", ""],
            vec!["1", "Ali", "Omar", "13,5", "#DIV/0!"],
            vec!["2", "Sara", "Lina", "12", "-"],
            vec!["3", "Yanis", "Adam", "ABS", ""],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);
        assert_eq!(calc.compute(&table.students[0]).displayed_average, "13,5");
        assert_eq!(calc.compute(&table.students[1]).displayed_average, "12");
        assert_eq!(calc.compute(&table.students[2]).displayed_average, "-");
    }

    #[test]
    fn test_rank_formatting() {
        assert_eq!(format_rank(Some("1")), "1<sup>er</sup>");
        assert_eq!(format_rank(Some("3")), "3<sup>ème</sup>");
        assert_eq!(format_rank(Some("-")), "-");
        assert_eq!(format_rank(Some("#DIV/0!")), "-");
        assert_eq!(format_rank(Some("")), "-");
        assert_eq!(format_rank(None), "-");
        assert_eq!(format_rank(Some(" 2 ")), "2<sup>ème</sup>");
        assert_eq!(format_rank(Some("=#DIV/0!")), "-");
        assert_eq!(format_rank(Some("   ")), "-");
    }

    #[test]
    fn test_zero_bareme_bonus_column_adds_nothing_to_total() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "BONUS"],
            vec!["", "", "", "20", "0"],
            vec!["1", "Ali", "Omar", "10", "2"],
        ]);
        assert_eq!(table.total_max_score(), 20.0);
        let metrics = StudentMetricsCalculator::new(&table, &config).compute(&table.students[0]);
        assert_eq!(metrics.computed_average, Some(12.0));
        assert_eq!(metrics.displayed_average, "12");
    }

    #[test]
    fn test_mention_and_appreciation_pass_through() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "MENTION", "APPRÉCIATIONS GÉNÉRALES"],
            vec!["", "", "", "20", "", ""],
            vec!["1", "Ali", "Omar", "18", "Félicitations", "Excellent trimestre"],
            vec!["2", "Sara", "Lina", "9", "", ""],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);

        let ali = calc.compute(&table.students[0]);
        assert_eq!(ali.mention, "Félicitations");
        assert_eq!(ali.mention_category, Some(MentionCategory::Felicitations));
        assert_eq!(ali.appreciation, "Excellent trimestre");

        let sara = calc.compute(&table.students[1]);
        assert_eq!(sara.mention, "");
        assert_eq!(sara.mention_category, None);
        assert_eq!(sara.rank, "-");
    }

    #[test]
    fn test_score_display() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "FIQH", "SIRAH", "DESSIN"],
            vec!["", "", "", "10", "15", ""],
            vec!["1", "Ali", "Omar", "8.5", "abs 12", "bien"],
            vec!["2", "Sara", "Lina", "", "12", ""],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);

        assert_eq!(calc.score_display(&table.students[0], 3).to_string(), "8,5 / 10");
        assert_eq!(calc.score_display(&table.students[0], 4), ScoreDisplay::Absent);
        // DESSIN 没有统计，使用默认满分
        assert_eq!(calc.score_display(&table.students[0], 5).to_string(), "bien / 20");
        assert_eq!(calc.score_display(&table.students[1], 3).to_string(), "- / 10");
    }

    #[test]
    fn test_subject_lines_labels_and_discipline() {
        let (table, config) = load(vec![
            vec!["#", "NOM", "PRÉNOM", "QUR'AN", "Dessin", "AKHLAQ", "HUDUR"],
            vec!["", "", "", "20", "10", "10", "10"],
            vec!["1", "Ali", "Omar", "18", "", "9", "10"],
        ]);
        let calc = StudentMetricsCalculator::new(&table, &config);
        let lines = calc.subject_lines(&table.students[0]);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].label_ar_trans, "القرآن - QUR'ĀN");
        assert_eq!(lines[0].label_fr, "SAINT-CORAN");
        assert_eq!(lines[0].class_avg, "18");

        assert_eq!(lines[1].label_fr, "Dessin");
        assert_eq!(lines[1].class_avg, "-");
        assert_eq!(lines[1].class_min, "-");

        assert!(lines[2].discipline_start);
        assert!(!lines[3].discipline_start);
        assert!(!lines[0].discipline_start);
    }
}
