/// 表格数据源客户端
///
/// 唯一的异步边界：一次性取回完整的 CSV 文本并解码为 [`RawTable`]，
/// 要么成功，要么返回数据源错误。成绩计算本身从不等待 IO。
use crate::error::{AppError, AppResult, TransportError};
use crate::models::table::RawTable;
use crate::services::csv_reader::parse_csv;
use reqwest::Url;
use std::future::Future;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// 表格数据源
pub trait TabularSource {
    /// 数据源位置（路径或 URL），用于日志和错误信息
    fn location(&self) -> String;

    /// 取回并解码完整表格
    fn fetch(&self) -> impl Future<Output = AppResult<RawTable>> + Send;
}

/// 本地文件数据源
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabularSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> AppResult<RawTable> {
        let location = self.location();
        debug!("读取文件: {}", location);

        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| AppError::file_read_failed(location.clone(), source))?;

        // 表格软件偶尔导出非 UTF-8 字符，按有损方式解码
        let content = String::from_utf8_lossy(&bytes);
        parse_csv(&content, &location)
    }
}

/// HTTP 数据源
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// 将相对路径拼接到基础 URL 上
    pub fn join(client: reqwest::Client, base_url: &str, relative_path: &str) -> AppResult<Self> {
        let invalid = || TransportError::InvalidLocation {
            location: format!("{}{}", base_url, relative_path),
        };

        let base = if base_url.ends_with('/') {
            Url::parse(base_url)
        } else {
            Url::parse(&format!("{}/", base_url))
        }
        .map_err(|_| invalid())?;

        let url = base.join(relative_path).map_err(|_| invalid())?;
        Ok(Self::new(client, url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl TabularSource for HttpSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> AppResult<RawTable> {
        let location = self.location();
        debug!("下载: {}", location);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| AppError::request_failed(location.clone(), source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::BadStatus {
                url: location,
                status: status.as_u16(),
            }
            .into());
        }

        let content = response
            .text()
            .await
            .map_err(|source| AppError::request_failed(location.clone(), source))?;

        parse_csv(&content, &location)
    }
}

/// 具体数据源（自动模式下按配置选择文件或 HTTP）
#[derive(Debug, Clone)]
pub enum DataSource {
    File(FileSource),
    Http(HttpSource),
}

impl TabularSource for DataSource {
    fn location(&self) -> String {
        match self {
            DataSource::File(source) => source.location(),
            DataSource::Http(source) => source.location(),
        }
    }

    async fn fetch(&self) -> AppResult<RawTable> {
        match self {
            DataSource::File(source) => source.fetch().await,
            DataSource::Http(source) => source.fetch().await,
        }
    }
}

/// 内存数据源，主要用于测试和已解析的数据
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    table: RawTable,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, table: RawTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl TabularSource for InlineSource {
    fn location(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> AppResult<RawTable> {
        Ok(self.table.clone())
    }
}
