use crate::clients::{DataSource, FileSource, HttpSource};
use crate::error::{AppResult, ConfigError};
use crate::models::school::SchoolConfig;
use crate::workflow::class_ctx::ClassCtx;
use std::path::PathBuf;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 本地数据根目录（自动模式）
    pub data_root: String,
    /// 远程数据根地址，设置后优先于本地目录
    pub data_base_url: Option<String>,
    /// 学年，如 "2025-2026"
    pub school_year: String,
    /// 学期，"1" 或 "2"
    pub semester: String,
    /// 要处理的班级，逗号分隔；"all" 表示学校配置中的全部班级
    pub classes: String,
    /// 手动模式：直接指定 CSV 文件（只处理一个班级）
    pub csv_file: Option<String>,
    /// 学校配置 TOML 文件
    pub school_config: String,
    /// 输出目录
    pub output_dir: String,
    /// 同时处理的班级数量
    pub max_concurrent_classes: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            data_base_url: None,
            school_year: "2025-2026".to_string(),
            semester: "1".to_string(),
            classes: "all".to_string(),
            csv_file: None,
            school_config: "config/school.toml".to_string(),
            output_dir: "output".to_string(),
            max_concurrent_classes: 4,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_root: std::env::var("DATA_ROOT").unwrap_or(default.data_root),
            data_base_url: std::env::var("DATA_BASE_URL").ok().filter(|v| !v.trim().is_empty()),
            school_year: std::env::var("SCHOOL_YEAR").unwrap_or(default.school_year),
            semester: std::env::var("SEMESTER").unwrap_or(default.semester),
            classes: std::env::var("CLASSES").unwrap_or(default.classes),
            csv_file: std::env::var("CSV_FILE").ok().filter(|v| !v.trim().is_empty()),
            school_config: std::env::var("SCHOOL_CONFIG").unwrap_or(default.school_config),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            max_concurrent_classes: std::env::var("MAX_CONCURRENT_CLASSES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_classes),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 校验取值，避免在处理中途才发现配置错误
    pub fn validate(&self) -> AppResult<()> {
        let semester = self.semester.trim();
        if semester != "1" && semester != "2" {
            return Err(ConfigError::InvalidValue {
                name: "SEMESTER".to_string(),
                value: self.semester.clone(),
                reason: "只能是 1 或 2".to_string(),
            }
            .into());
        }
        if self.max_concurrent_classes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENT_CLASSES".to_string(),
                value: "0".to_string(),
                reason: "至少为 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 解析要处理的班级列表
    ///
    /// 手动模式只处理一个班级：取 CLASSES 的第一个值，"all" 时用文件名代替。
    pub fn class_list(&self, school: &SchoolConfig) -> Vec<String> {
        let requested: Vec<String> = self
            .classes
            .split(',')
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        let wants_all = requested.is_empty() || requested.iter().any(|c| c == "ALL");

        if let Some(csv_file) = &self.csv_file {
            let name = match requested.first() {
                Some(first) if !wants_all => first.clone(),
                _ => PathBuf::from(csv_file)
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "MANUEL".to_string()),
            };
            return vec![name];
        }

        if wants_all {
            school.class_names()
        } else {
            requested
        }
    }

    /// 为某个班级选择数据源
    ///
    /// 优先级：手动文件 > 远程地址 > 本地数据根目录
    pub fn source_for(
        &self,
        ctx: &ClassCtx,
        school: &SchoolConfig,
        client: &reqwest::Client,
    ) -> AppResult<DataSource> {
        if let Some(csv_file) = &self.csv_file {
            return Ok(DataSource::File(FileSource::new(csv_file)));
        }

        let relative = ctx.csv_relative_path(&school.school_code);
        match &self.data_base_url {
            Some(base_url) => Ok(DataSource::Http(HttpSource::join(
                client.clone(),
                base_url,
                &relative,
            )?)),
            None => Ok(DataSource::File(FileSource::new(
                PathBuf::from(&self.data_root).join(relative),
            ))),
        }
    }

    /// 某个班级的输出文件路径
    pub fn output_path(&self, ctx: &ClassCtx) -> PathBuf {
        PathBuf::from(&self.output_dir).join(ctx.output_file_name())
    }
}
