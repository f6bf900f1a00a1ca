/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则 `verbose` 为真时输出 debug 级别。
/// 给出 `log_file` 时先写入文件头，之后的日志同时追加到该文件。
/// 重复调用（例如测试中）不会报错。
pub fn init(verbose: bool, log_file: Option<&str>) -> Result<()> {
    if let Some(path) = log_file {
        init_log_file(path)?;
    }
    let _ = subscriber(verbose, log_file)?.try_init();
    Ok(())
}

/// 构建订阅者：终端输出 + 可选的日志文件（无颜色码）
pub fn subscriber(
    verbose: bool,
    log_file: Option<&str>,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("无法打开日志文件: {}", path))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer))
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n成绩单生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `year`: 学年
/// - `semester`: 学期
/// - `max_concurrent`: 最大并发班级数
pub fn log_startup(year: &str, semester: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 成绩单生成");
    info!("📅 学年: {} | 学期: {}", year, semester);
    info!("📊 最大并发班级数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录班级加载信息
pub fn log_classes_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 共 {} 个待处理的班级", total);
    info!("📋 同时处理不超过 {} 个班级\n", max_concurrent);
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `output_dir`: 输出目录
pub fn print_final_stats(success: usize, failed: usize, total: usize, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n成绩单已保存至: {}", output_dir);
}
