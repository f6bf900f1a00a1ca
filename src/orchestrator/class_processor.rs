//! 单个班级处理器 - 编排层
//!
//! ## 职责
//!
//! 处理单个班级：选择数据源 → 运行 ClassFlow → 写出 JSON 成绩单。
//! 失败只影响当前班级，由 batch_processor 汇总统计。

use crate::clients::TabularSource;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::report::ClassReport;
use crate::models::school::SchoolConfig;
use crate::workflow::{ClassCtx, ClassFlow};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// 处理单个班级
///
/// # 参数
/// - `config`: 运行配置
/// - `school`: 学校配置
/// - `client`: 共享的 HTTP 客户端
/// - `ctx`: 班级上下文
///
/// # 返回
/// 成功时返回写出的文件路径
pub async fn process_class(
    config: &Config,
    school: &SchoolConfig,
    client: &reqwest::Client,
    ctx: &ClassCtx,
) -> AppResult<PathBuf> {
    let source = config.source_for(ctx, school, client)?;
    let report = ClassFlow::new(school).run(&source, ctx).await?;

    let path = config.output_path(ctx);
    write_report(&report, &path).await?;

    info!(
        "{} 💾 已写出 {} 份成绩单 → {} (来源: {})",
        ctx,
        report.student_count(),
        path.display(),
        source.location()
    );
    Ok(path)
}

/// 以格式化 JSON 写出班级成绩单，必要时创建目录
pub async fn write_report(report: &ClassReport, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::write_failed(parent.display().to_string(), e))?;
        }
    }

    let json = serde_json::to_string_pretty(report).map_err(crate::error::OutputError::from)?;
    fs::write(path, json)
        .await
        .map_err(|e| AppError::write_failed(path.display().to_string(), e))?;
    Ok(())
}
