//! 核心功能模块
//!
//! 错误类型、日志、配置和场景描述。这些模块与具体渲染后端无关。
//!
//! # 模块组织
//!
//! - `error`：统一的错误类型
//! - `log`：基于 tracing 的日志系统
//! - `config`：查看器配置（config.toml + 命令行参数）
//! - `scene`：场景配置（scene.toml）

pub mod log;
pub mod config;
pub mod error;
pub mod scene;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use error::{ConfigError, MeshLoadError, Result, ViewerError};
pub use scene::SceneConfig;
