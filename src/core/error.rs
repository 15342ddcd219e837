//! 错误处理模块
//!
//! 定义了查看器中使用的统一错误类型，使用 `thiserror` 提供友好的错误消息。
//!
//! # 设计原则
//!
//! - 网格加载错误都是致命的：一次加载要么得到完整的 `MeshBuffer`，要么得到错误
//! - 解析类错误携带行号和原始行内容，便于定位模型文件中的问题
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// 查看器统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, ViewerError>;

/// 网格加载专用的 Result 类型
pub type MeshResult<T> = std::result::Result<T, MeshLoadError>;

/// 查看器的错误类型
#[derive(Debug, Error)]
pub enum ViewerError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 网格加载错误
    #[error("Mesh loading error: {0}")]
    MeshLoading(#[from] MeshLoadError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 日志系统错误
    #[error("Log error: {0}")]
    Log(String),

    /// 渲染后端错误
    #[error("Render error: {0}")]
    Render(String),
}

/// 配置相关的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件未找到
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// 配置文件解析失败
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// 配置值无效
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 面记录引用的属性种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Position => write!(f, "position"),
            AttributeKind::Normal => write!(f, "normal"),
        }
    }
}

/// 网格加载相关的错误
#[derive(Debug, Error)]
pub enum MeshLoadError {
    /// 某一行无法按其记录类型拆分成期望数量/类型的字段
    #[error("line {line}: malformed `{kind}` record `{content}`: {reason}")]
    MalformedRecord {
        line: usize,
        kind: String,
        content: String,
        reason: String,
    },

    /// 面记录引用了尚未解析到的顶点或法线（索引为源文件中的 1 基索引）
    #[error("line {line}: {attribute} index {index} out of range (1..={available}) in `{content}`")]
    IndexOutOfRange {
        line: usize,
        content: String,
        attribute: AttributeKind,
        index: usize,
        available: usize,
    },

    /// 旧版逐顶点模式下位置与法线数量不一致
    #[error("position count {positions} does not match normal count {normals}")]
    AttributeCountMismatch { positions: usize, normals: usize },

    /// 文件不存在
    #[error("Mesh file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// 读取输入流失败
    #[error("Failed to read mesh source: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshLoadError {
    /// 出错的行号（仅解析类错误）
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshLoadError::MalformedRecord { line, .. }
            | MeshLoadError::IndexOutOfRange { line, .. } => Some(*line),
            _ => None,
        }
    }
}
