//! 成绩计算流水线 - 流程层
//!
//! 原始表格 → 表头分类 → 科目统计 → 学生行过滤，产出只读的 [`GradeTable`]。
//! 学生指标在渲染时按需计算（见 [`GradePipeline::metrics`]）。
//! 无状态、幂等：同一表格多次运行得到完全相同的结果。

use crate::error::{AppResult, FormatError};
use crate::models::cell::cell_at;
use crate::models::grade::{GradeTable, StudentMetrics};
use crate::models::school::SchoolConfig;
use crate::models::table::RawTable;
use crate::services::column_classifier::ColumnClassifier;
use crate::services::student_metrics::StudentMetricsCalculator;
use crate::services::subject_stats::{stats_map, SubjectStatsBuilder};
use tracing::debug;

/// 学生行中姓氏所在的列
pub const LAST_NAME_COLUMN: usize = 1;
/// 学生行中名字所在的列
pub const FIRST_NAME_COLUMN: usize = 2;

/// 表格至少需要的行数：表头、满分、至少一名学生
const MIN_ROWS: usize = 3;

/// 成绩计算流水线
pub struct GradePipeline<'a> {
    config: &'a SchoolConfig,
    classifier: ColumnClassifier,
}

impl<'a> GradePipeline<'a> {
    pub fn new(config: &'a SchoolConfig) -> Self {
        Self {
            config,
            classifier: ColumnClassifier::new(config),
        }
    }

    /// 运行流水线
    ///
    /// # 参数
    /// - `raw`: 完整的原始表格
    /// - `class_name`: 班级名称（仅用于错误信息）
    ///
    /// # 返回
    /// 行数不足或没有有效学生时返回格式错误，不产生任何部分结果
    pub fn run(&self, raw: &RawTable, class_name: &str) -> AppResult<GradeTable> {
        if raw.len() < MIN_ROWS {
            return Err(FormatError::TooFewRows {
                class_name: class_name.to_string(),
                rows: raw.len(),
            }
            .into());
        }

        let headers = raw.headers().to_vec();
        let students = filter_students(raw.student_rows());

        if students.is_empty() {
            return Err(FormatError::NoStudents {
                class_name: class_name.to_string(),
            }
            .into());
        }

        let builder = SubjectStatsBuilder::new(&self.classifier, self.config.default_max_score);
        let columns = builder.build_columns(&headers, raw.bareme(), &students);
        let stats = stats_map(&columns);

        debug!(
            "班级 {}: {} 列, {} 个科目有统计, {} 名学生",
            class_name,
            columns.len(),
            stats.len(),
            students.len()
        );

        Ok(GradeTable {
            headers,
            students,
            columns,
            stats,
        })
    }

    /// 按需计算单个学生的指标
    pub fn metrics(&self, table: &GradeTable, student: &[String]) -> StudentMetrics {
        StudentMetricsCalculator::new(table, self.config).compute(student)
    }
}

/// 过滤掉姓氏为空的行（唯一的行级过滤）
pub fn filter_students(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    rows.iter()
        .filter(|row| !cell_at(row, LAST_NAME_COLUMN).trim().is_empty())
        .cloned()
        .collect()
}
