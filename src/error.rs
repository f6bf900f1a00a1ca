use thiserror::Error;

/// 应用程序错误类型
///
/// 只有"整次加载失败"的情况才会成为错误；单元格解析失败、未知科目等
/// 都在统计/指标计算内部就地降级处理，不会走到这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源错误（文件不存在、网络失败、内容为空）
    #[error("数据源错误: {0}")]
    Transport(#[from] TransportError),
    /// 表格格式错误
    #[error("格式错误: {0}")]
    Format(#[from] FormatError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 输出写入错误
    #[error("输出错误: {0}")]
    Output(#[from] OutputError),
}

/// 数据源错误
#[derive(Debug, Error)]
pub enum TransportError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非成功状态码
    #[error("服务器返回状态码 {status} ({url})")]
    BadStatus { url: String, status: u16 },
    /// 数据源没有返回任何数据
    #[error("数据为空: {location}")]
    EmptyPayload { location: String },
    /// CSV 解码失败
    #[error("CSV 解析失败 ({location}): {source}")]
    CsvParse {
        location: String,
        #[source]
        source: csv::Error,
    },
    /// 数据源地址无效
    #[error("无效地址: {location}")]
    InvalidLocation { location: String },
}

/// 表格格式错误（"Format CSV invalide"）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// 行数不足（缺少表头或满分行）
    #[error("班级 {class_name} 的表格只有 {rows} 行，至少需要 3 行（表头、满分、学生）")]
    TooFewRows { class_name: String, rows: usize },
    /// 没有任何姓名非空的学生行
    #[error("班级 {class_name} 的表格中没有有效的学生行")]
    NoStudents { class_name: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {name} 的值 '{value}' 不合法: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// 输出写入错误
#[derive(Debug, Error)]
pub enum OutputError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AppError::Transport(TransportError::NotFound { path })
        } else {
            AppError::Transport(TransportError::ReadFailed { path, source })
        }
    }

    /// 创建网络请求失败错误
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Transport(TransportError::RequestFailed {
            url: url.into(),
            source,
        })
    }

    /// 创建输出写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Output(OutputError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为"格式无效"类错误
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, AppError::Format(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
