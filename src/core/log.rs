//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 特性
//!
//! - 结构化日志：支持键值对
//! - 灵活输出：支持控制台和文件输出
//! - 日志级别：trace, debug, info, warn, error
//!
//! 注意：网格解析核心（parser / dedup / normals）不记录日志，
//! 只通过返回值报告错误；日志由加载入口和查看器层输出。

use std::path::Path;

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use super::config::LogLevel;
use super::error::{Result, ViewerError};

/// 初始化日志系统
///
/// 必须在程序开始时调用一次。重复初始化会返回 `ViewerError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "mesh_viewer.log"）
///
/// # 示例
///
/// ```no_run
/// use mesh_viewer::core::config::LogLevel;
/// use mesh_viewer::core::log;
///
/// // 仅控制台输出
/// log::init_logger(LogLevel::Info, false, None).unwrap();
/// ```
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::new(level.as_filter());

    if file_output {
        let log_path = log_file_path.unwrap_or("mesh_viewer.log");
        let path = Path::new(log_path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh_viewer.log");

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| ViewerError::Log(e.to_string()))
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| ViewerError::Log(e.to_string()))
    }
}

/// 网格加载日志 - Info 级别
#[macro_export]
macro_rules! loader_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "mesh_viewer::loader", $($arg)*)
    };
}

/// 网格加载日志 - Warn 级别
#[macro_export]
macro_rules! loader_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "mesh_viewer::loader", $($arg)*)
    };
}

/// 查看器日志 - Debug 级别
#[macro_export]
macro_rules! viewer_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "mesh_viewer::viewer", $($arg)*)
    };
}

impl LogLevel {
    /// `EnvFilter` 使用的指令字符串
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
