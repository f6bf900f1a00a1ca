//! 成绩单组装 - 流程层
//!
//! 把只读的 [`GradeTable`] 和班级上下文组合成交给外部渲染器的成绩单。
//! 同一份 GradeTable 可以用不同的学年/学期上下文重复组装，无需重新解析。

use crate::models::cell::cell_at;
use crate::models::grade::GradeTable;
use crate::models::report::{ClassReport, ReportCard};
use crate::models::school::SchoolConfig;
use crate::services::student_metrics::StudentMetricsCalculator;
use crate::workflow::class_ctx::ClassCtx;
use crate::workflow::grade_pipeline::{FIRST_NAME_COLUMN, LAST_NAME_COLUMN};

/// 组装整个班级的成绩单
///
/// # 参数
/// - `table`: 流水线结果
/// - `ctx`: 班级上下文
/// - `config`: 学校配置
/// - `source`: 数据来源（写入结果便于追溯）
/// - `issue_date`: 签发日期（dd/mm/yyyy）
pub fn build_class_report(
    table: &GradeTable,
    ctx: &ClassCtx,
    config: &SchoolConfig,
    source: &str,
    issue_date: &str,
) -> ClassReport {
    let calculator = StudentMetricsCalculator::new(table, config);
    let teacher = config.teacher_for(&ctx.class_name).to_string();
    let title = ctx.bulletin_title();
    let semester_header = ctx.semester_header();
    let student_count_label = format!("({} ÉLÈVES)", table.student_count());

    let cards = table
        .students
        .iter()
        .map(|student| ReportCard {
            last_name: cell_at(student, LAST_NAME_COLUMN).to_string(),
            first_name: cell_at(student, FIRST_NAME_COLUMN).to_string(),
            class_name: ctx.class_name.clone(),
            teacher: teacher.clone(),
            title: title.clone(),
            semester_header: semester_header.clone(),
            student_count_label: student_count_label.clone(),
            issue_date: issue_date.to_string(),
            metrics: calculator.compute(student),
            subjects: calculator.subject_lines(student),
        })
        .collect();

    ClassReport {
        class_name: ctx.class_name.clone(),
        year: ctx.year.clone(),
        semester: ctx.semester.clone(),
        source: source.to_string(),
        cards,
    }
}

/// 今天的日期（法国格式）
pub fn today_fr() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}
