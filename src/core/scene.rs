//! 场景配置模块
//!
//! 描述查看器启动时的场景：相机、投影、要加载的模型、参考立方体和光照。
//!
//! # 配置文件格式 (scene.toml)
//!
//! ```toml
//! [camera]
//! distance = 1.0
//!
//! [projection]
//! fov = 90.0
//!
//! [model]
//! path = "teapot.obj"
//! transform = { scale = [0.01, 0.01, 0.01] }
//!
//! [light]
//! shininess = 40.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result, ViewerError};
use crate::math::{utils::deg_to_rad, Matrix4, Vector3};

/// 3D 变换数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// 位置 (x, y, z)
    #[serde(default = "default_position")]
    pub position: [f32; 3],

    /// 旋转（欧拉角，度数）(pitch, yaw, roll)
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 3],

    /// 缩放 (x, y, z)
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_rotation() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

impl Transform {
    /// 均匀缩放
    pub fn scaled(scale: f32) -> Self {
        Self {
            scale: [scale; 3],
            ..Self::default()
        }
    }

    /// 平移
    pub fn translated(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            ..Self::default()
        }
    }

    /// 模型矩阵，变换顺序：缩放 -> 旋转 -> 平移
    pub fn to_matrix(&self) -> Matrix4 {
        let [pitch, yaw, roll] = self.rotation.map(deg_to_rad);

        let translation = Matrix4::new_translation(&Vector3::from(self.position));

        let rotation_x = Matrix4::from_axis_angle(&Vector3::x_axis(), pitch);
        let rotation_y = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        let rotation_z = Matrix4::from_axis_angle(&Vector3::z_axis(), roll);
        let rotation = rotation_z * rotation_y * rotation_x;

        let scale = Matrix4::new_nonuniform_scaling(&Vector3::from(self.scale));

        translation * rotation * scale
    }
}

/// 轨道相机配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 到目标点的初始距离
    #[serde(default = "default_distance")]
    pub distance: f32,

    /// 每次缩放的倍率
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f32,

    /// 每次旋转的角度（度数）
    #[serde(default = "default_angle_step")]
    pub angle_step: f32,

    /// 每次平移的距离
    #[serde(default = "default_pan_step")]
    pub pan_step: f32,
}

fn default_distance() -> f32 {
    1.0
}

fn default_zoom_factor() -> f32 {
    1.1
}

fn default_angle_step() -> f32 {
    5.0
}

fn default_pan_step() -> f32 {
    0.5
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            zoom_factor: default_zoom_factor(),
            angle_step: default_angle_step(),
            pan_step: default_pan_step(),
        }
    }
}

/// 透视投影配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 垂直视野角度（度数）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 宽高比
    #[serde(default = "default_aspect")]
    pub aspect: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near_clip")]
    pub near_clip: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far_clip")]
    pub far_clip: f32,
}

fn default_fov() -> f32 {
    90.0
}

fn default_aspect() -> f32 {
    1024.0 / 768.0
}

fn default_near_clip() -> f32 {
    0.1
}

fn default_far_clip() -> f32 {
    100.0
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            aspect: default_aspect(),
            near_clip: default_near_clip(),
            far_clip: default_far_clip(),
        }
    }
}

impl ProjectionConfig {
    /// 创建透视投影矩阵
    pub fn matrix(&self) -> Matrix4 {
        crate::math::matrix::perspective(deg_to_rad(self.fov), self.aspect, self.near_clip, self.far_clip)
    }
}

/// 模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型文件路径
    #[serde(default = "default_model_path")]
    pub path: String,

    /// 模型变换
    #[serde(default = "default_model_transform")]
    pub transform: Transform,
}

fn default_model_path() -> String {
    "teapot.obj".to_string()
}

fn default_model_transform() -> Transform {
    Transform::scaled(0.01)
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            transform: default_model_transform(),
        }
    }
}

/// 参考立方体配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    /// 是否显示
    #[serde(default = "default_show_cube")]
    pub show: bool,

    #[serde(default = "default_cube_transform")]
    pub transform: Transform,
}

fn default_show_cube() -> bool {
    true
}

fn default_cube_transform() -> Transform {
    Transform::translated(5.0, 0.0, 0.0)
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            show: default_show_cube(),
            transform: default_cube_transform(),
        }
    }
}

/// 光照配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    /// 光源颜色 (RGB)
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],

    /// 高光指数
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_shininess() -> f32 {
    40.0
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: default_light_color(),
            shininess: default_shininess(),
        }
    }
}

/// 场景配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub cube: CubeConfig,

    #[serde(default)]
    pub light: LightConfig,
}

impl SceneConfig {
    /// 从文件加载场景配置
    ///
    /// # 参数
    ///
    /// - `path`: 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ViewerError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            )))
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| {
            ViewerError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            )))
        })
    }

    /// 从文件加载，如果文件不存在则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self).map_err(|e| {
            ViewerError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            )))
        })?;

        fs::write(path, contents)?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }
}
