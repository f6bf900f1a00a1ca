//! 批量班级处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量班级的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、校验配置、加载学校配置
//! 2. **班级解析**：根据配置得到 `Vec<ClassCtx>`
//! 3. **并发控制**：使用 Semaphore 限制同时处理的班级数
//! 4. **失败隔离**：单个班级失败不会中止其他班级
//! 5. **全局统计**：汇总所有班级的处理结果

use crate::config::Config;
use crate::models::load_school_config_or_default;
use crate::models::school::SchoolConfig;
use crate::orchestrator::class_processor;
use crate::utils::logging;
use crate::workflow::ClassCtx;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Arc<Config>,
    school: Arc<SchoolConfig>,
    client: reqwest::Client,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志（终端 + 日志文件）
        logging::init(config.verbose_logging, Some(&config.output_log_file))
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;
        config.validate()?;

        logging::log_startup(
            &config.school_year,
            &config.semester,
            config.max_concurrent_classes,
        );

        let school = load_school_config_or_default(Path::new(&config.school_config)).await?;

        Ok(Self::with_school(config, school))
    }

    /// 使用已加载的学校配置创建应用（不初始化日志）
    pub fn with_school(config: Config, school: SchoolConfig) -> Self {
        Self {
            config: Arc::new(config),
            school: Arc::new(school),
            client: reqwest::Client::new(),
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let classes = self.class_contexts();

        if classes.is_empty() {
            warn!("⚠️ 没有需要处理的班级，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_classes_loaded(classes.len(), self.config.max_concurrent_classes);

        let stats = self.process_all_classes(classes).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_dir,
        );

        Ok(stats)
    }

    fn class_contexts(&self) -> Vec<ClassCtx> {
        self.config
            .class_list(&self.school)
            .into_iter()
            .map(|class_name| {
                ClassCtx::new(
                    self.config.school_year.trim(),
                    self.config.semester.trim(),
                    class_name,
                )
            })
            .collect()
    }

    /// 并发处理所有班级
    async fn process_all_classes(&self, classes: Vec<ClassCtx>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_classes));
        let mut handles = Vec::new();

        for ctx in classes.iter().cloned() {
            let permit = semaphore.clone().acquire_owned().await?;
            let config = self.config.clone();
            let school = self.school.clone();
            let client = self.client.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match class_processor::process_class(&config, &school, &client, &ctx).await {
                    Ok(_) => true,
                    Err(e) => {
                        error!("{} ❌ 处理失败: {}", ctx, e);
                        false
                    }
                }
            });
            handles.push(handle);
        }

        let mut stats = ProcessingStats {
            total: classes.len(),
            ..Default::default()
        };

        for (ctx, handle) in classes.iter().zip(handles) {
            match handle.await {
                Ok(true) => stats.success += 1,
                Ok(false) => stats.failed += 1,
                Err(e) => {
                    error!("{} 任务执行失败: {}", ctx, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_failing_class_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ClassCtx::new("2025-2026", "1", "M06");
        let csv_path = dir.path().join(ctx.csv_relative_path("AMI"));
        std::fs::create_dir_all(csv_path.parent().unwrap()).unwrap();
        std::fs::write(&csv_path, "#,NOM,FIQH\n,,20\n1,Ali,14\n").unwrap();

        let config = Config {
            data_root: dir.path().display().to_string(),
            output_dir: dir.path().join("out").display().to_string(),
            classes: "M06,M07".to_string(),
            max_concurrent_classes: 1,
            ..Config::default()
        };
        let app = App::with_school(config, SchoolConfig::default());

        let stats = app.run().await.unwrap();
        assert_eq!(
            stats,
            ProcessingStats {
                success: 1,
                failed: 1,
                total: 2
            }
        );
        assert!(dir.path().join("out/2025-2026_S1_M06.json").exists());
        assert!(!dir.path().join("out/2025-2026_S1_M07.json").exists());
    }
}
