//! 配置管理模块
//!
//! 提供查看器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! log_file = "mesh_viewer.log"
//!
//! [loader]
//! mode = "deduplicated"   # 或 "legacy"
//! synthesize_normals = true
//! color = [0.0, 1.0, 0.0, 1.0]   # 可选，覆盖默认顶点颜色
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::geometry::loaders::{LoadMode, LoadOptions};

/// 查看器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 网格加载配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 命令行指定的模型路径（优先于场景配置）
    #[serde(skip)]
    pub model_override: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// 网格加载配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 加载模式
    #[serde(default)]
    pub mode: LoadMode,

    /// 源文件缺少法线时是否合成平滑法线
    #[serde(default = "default_synthesize_normals")]
    pub synthesize_normals: bool,

    /// 顶点颜色覆盖（RGBA）
    #[serde(default)]
    pub color: Option<[f32; 4]>,
}

// 默认值函数
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "mesh_viewer.log".to_string() }
fn default_synthesize_normals() -> bool { true }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            mode: LoadMode::default(),
            synthesize_normals: default_synthesize_normals(),
            color: None,
        }
    }
}

impl LoaderConfig {
    /// 转换为加载器选项
    pub fn to_options(&self) -> LoadOptions {
        LoadOptions {
            mode: self.mode,
            synthesize_normals: self.synthesize_normals,
            color: self.color,
        }
    }
}

impl LogLevel {
    /// 从命令行字符串解析日志级别
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    ///
    /// 此时日志系统尚未初始化，所以失败时静默回退。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--legacy`: 使用旧版逐顶点加载模式
    /// - `--no-synth-normals`: 不合成缺失的法线
    /// - `--model <path>`: 指定模型文件
    /// - `--log-level <level>`: 设置日志级别
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--legacy") {
            self.loader.mode = LoadMode::Legacy;
        }

        if args.iter().any(|a| a == "--no-synth-normals") {
            self.loader.synthesize_normals = false;
        }

        if let Some(idx) = args.iter().position(|a| a == "--model") {
            if let Some(path) = args.get(idx + 1) {
                self.model_override = Some(path.clone());
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|s| LogLevel::parse(s)) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if let Some(color) = self.loader.color {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::InvalidValue {
                    field: "loader.color".to_string(),
                    reason: "Color components must be within [0, 1]".to_string(),
                }
                .into());
            }
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
