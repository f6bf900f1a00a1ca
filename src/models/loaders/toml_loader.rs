use crate::error::{AppResult, ConfigError};
use crate::models::school::SchoolConfig;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载学校字典配置
///
/// 文件中未出现的字段使用内置默认值。
pub async fn load_school_config(toml_file_path: &Path) -> AppResult<SchoolConfig> {
    let path_str = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| ConfigError::ReadFailed {
            path: path_str.clone(),
            source,
        })?;

    parse_school_config(&content, &path_str)
}

/// 加载学校字典配置，文件不存在时使用内置默认值
pub async fn load_school_config_or_default(toml_file_path: &Path) -> AppResult<SchoolConfig> {
    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        tracing::info!(
            "未找到配置文件 {}，使用内置字典",
            toml_file_path.display()
        );
        return Ok(SchoolConfig::default());
    }

    let config = load_school_config(toml_file_path).await?;
    tracing::info!(
        "已加载配置 {}: {} 个班级, {} 个科目",
        toml_file_path.display(),
        config.classes.len(),
        config.subjects.len()
    );
    Ok(config)
}

/// 解析 TOML 文本
pub fn parse_school_config(content: &str, path: &str) -> AppResult<SchoolConfig> {
    let config: SchoolConfig =
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })?;

    if !config.default_max_score.is_finite() || config.default_max_score <= 0.0 {
        return Err(ConfigError::InvalidValue {
            name: "default_max_score".to_string(),
            value: config.default_max_score.to_string(),
            reason: "满分必须为正数".to_string(),
        }
        .into());
    }

    Ok(config.normalized())
}
