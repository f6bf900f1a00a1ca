//! 班级处理流程 - 流程层
//!
//! 核心职责：定义"一个班级"的完整处理流程
//!
//! 流程顺序：
//! 1. 从数据源取回表格（唯一的异步步骤）
//! 2. 运行成绩计算流水线
//! 3. 组装成绩单

use crate::clients::TabularSource;
use crate::error::AppResult;
use crate::models::grade::GradeTable;
use crate::models::report::ClassReport;
use crate::models::school::SchoolConfig;
use crate::workflow::class_ctx::ClassCtx;
use crate::workflow::grade_pipeline::GradePipeline;
use crate::workflow::report_builder::{build_class_report, today_fr};
use tracing::{info, warn};

/// 班级处理流程
///
/// - 编排 取数 → 计算 → 组装
/// - 不持有任何数据源，只借用学校配置
pub struct ClassFlow<'a> {
    config: &'a SchoolConfig,
}

impl<'a> ClassFlow<'a> {
    pub fn new(config: &'a SchoolConfig) -> Self {
        Self { config }
    }

    /// 取回并计算，返回只读的 GradeTable
    pub async fn load<S: TabularSource>(&self, source: &S, ctx: &ClassCtx) -> AppResult<GradeTable> {
        info!("{} 📥 加载: {}", ctx, source.location());

        let raw = source.fetch().await.map_err(|e| {
            warn!("{} ❌ 文件无法加载: {}", ctx, e);
            e
        })?;

        let table = GradePipeline::new(self.config)
            .run(&raw, &ctx.class_name)
            .map_err(|e| {
                warn!("{} ❌ CSV 格式无效: {}", ctx, e);
                e
            })?;

        info!(
            "{} ✓ 解析完成: {} 名学生, {} 个科目有统计",
            ctx,
            table.student_count(),
            table.stats.len()
        );
        Ok(table)
    }

    /// 完整流程：取回、计算并组装成绩单
    pub async fn run<S: TabularSource>(&self, source: &S, ctx: &ClassCtx) -> AppResult<ClassReport> {
        let table = self.load(source, ctx).await?;
        Ok(self.render(&table, ctx, &source.location()))
    }

    /// 用已有的 GradeTable 组装成绩单（切换学年/学期时无需重新解析）
    pub fn render(&self, table: &GradeTable, ctx: &ClassCtx, source: &str) -> ClassReport {
        let report = build_class_report(table, ctx, self.config, source, &today_fr());
        info!("{} ✓ 成绩单已生成 ({} 名学生)", ctx, report.student_count());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InlineSource;
    use crate::models::table::RawTable;

    #[tokio::test]
    async fn test_run_inline_table() {
        let config = SchoolConfig::default();
        let flow = ClassFlow::new(&config);
        let source = InlineSource::new(
            "inline",
            RawTable::from_rows([
                vec!["#", "NOM", "PRÉNOM", "QUR'AN", "RANG"],
                vec!["", "", "", "20", ""],
                vec!["1", "Ali", "Omar", "18", "1"],
            ]),
        );
        let ctx = ClassCtx::new("2025-2026", "1", "M06");

        let report = flow.run(&source, &ctx).await.unwrap();
        assert_eq!(report.source, "inline");
        assert_eq!(report.cards.len(), 1);
        assert_eq!(report.cards[0].metrics.displayed_average, "18");
    }

    #[tokio::test]
    async fn test_invalid_table_produces_no_report() {
        let config = SchoolConfig::default();
        let flow = ClassFlow::new(&config);
        let source = InlineSource::new("inline", RawTable::from_rows([vec!["#", "NOM"]]));
        let ctx = ClassCtx::new("2025-2026", "1", "M06");

        let err = flow.run(&source, &ctx).await.unwrap_err();
        assert!(err.is_invalid_format());
    }
}
