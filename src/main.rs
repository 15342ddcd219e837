//! mesh_viewer 命令行入口
//!
//! 加载配置和场景，读取模型文件，用无窗口后端渲染一帧并输出统计信息。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 指定模型并使用旧版加载模式
//! cargo run -- --model bunny.obj --legacy
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use mesh_viewer::core::{log, Config, SceneConfig};
use mesh_viewer::renderer::{HeadlessBackend, Viewer};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载查看器配置文件（config.toml）并应用命令行参数
/// 2. 初始化日志系统
/// 3. 加载场景配置文件（scene.toml）
/// 4. 加载模型和参考立方体
/// 5. 渲染一帧
///
/// # 命令行参数
///
/// - `--legacy`: 旧版逐位置加载模式
/// - `--no-synth-normals`: 不合成缺失的法线
/// - `--model <path>`: 模型文件路径（覆盖 scene.toml）
/// - `--log-level <level>`: 日志级别
fn main() -> Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args().skip(1));
    config.validate().context("Invalid configuration")?;

    // 2. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("Failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "mesh_viewer starting");

    // 3. 加载场景配置
    let scene = SceneConfig::from_file_or_default("scene.toml");
    let model_path = config
        .model_override
        .clone()
        .unwrap_or_else(|| scene.model.path.clone());

    info!(
        model = %model_path,
        mode = ?config.loader.mode,
        synthesize_normals = config.loader.synthesize_normals,
        "Loader configuration"
    );

    // 4. 加载模型
    let mut viewer = Viewer::with_scene(HeadlessBackend::new(), &scene);
    let options = config.loader.to_options();

    if let Err(e) = viewer.load_model(Path::new(&model_path), &options, scene.model.transform.to_matrix()) {
        error!(model = %model_path, error = %e, "Failed to load model");
        return Err(e).with_context(|| format!("Failed to load model '{}'", model_path));
    }

    if scene.cube.show {
        viewer
            .add_cube(scene.cube.transform.to_matrix())
            .context("Failed to add reference cube")?;
    }

    // 5. 渲染一帧
    let drawn = viewer.render_frame().context("Failed to render frame")?;
    let triangles: usize = viewer
        .backend()
        .draw_calls()
        .iter()
        .map(|draw| draw.triangles)
        .sum();

    info!(
        objects = drawn,
        triangles,
        shininess = viewer.lighting().shininess(),
        "Frame rendered"
    );

    for name in viewer.object_names() {
        info!(object = name, "Scene object");
    }

    Ok(())
}
