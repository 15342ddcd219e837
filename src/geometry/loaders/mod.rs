/// 模型加载器模块
///
/// 提供统一的模型加载接口和 OBJ 格式的具体实现。
///
/// # 加载流程
///
/// ```text
/// OBJ 文本
///     ↓
/// obj_parser (位置 / 法线 / 面)
///     ↓
/// normals (缺少法线时合成)
///     ↓
/// dedup (去重 或 旧版逐位置构建)
///     ↓
/// MeshBuffer
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_viewer::geometry::loaders::{load_mesh, LoadOptions};
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("teapot.obj"), &LoadOptions::default())?;
/// println!("{} 个顶点", mesh.vertex_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MeshLoadError, MeshResult};
use crate::geometry::mesh::MeshBuffer;
use crate::math::Color;
use crate::{loader_info, loader_warn};

pub mod dedup;
pub mod obj_loader;
pub mod obj_parser;

pub use obj_loader::ObjLoader;

/// 加载模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// 按 (位置, 法线) 组合去重，允许位置与法线数量不同
    #[default]
    Deduplicated,
    /// 每个位置顶点一个输出顶点，显式法线必须与位置一一对应
    Legacy,
}

impl LoadMode {
    /// 各模式的默认顶点颜色
    pub fn default_color(&self) -> Color {
        match self {
            LoadMode::Deduplicated => Color::GREEN,
            LoadMode::Legacy => Color::RED,
        }
    }
}

/// 加载选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    pub mode: LoadMode,
    /// 面角缺少法线时是否合成平滑法线；关闭时这些顶点的法线为零向量
    pub synthesize_normals: bool,
    /// 覆盖模式默认的顶点颜色
    pub color: Option<[f32; 4]>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mode: LoadMode::Deduplicated,
            synthesize_normals: true,
            color: None,
        }
    }
}

impl LoadOptions {
    pub fn legacy() -> Self {
        Self {
            mode: LoadMode::Legacy,
            ..Self::default()
        }
    }

    /// 实际使用的顶点颜色
    pub fn color(&self) -> [f32; 4] {
        self.color.unwrap_or_else(|| self.mode.default_color().to_array())
    }
}

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait。加载器是无状态的（静态方法），
/// 每次调用各自拥有解析状态、去重表和输出缓冲区，可以在多个线程上并发调用。
pub trait MeshLoader {
    /// 从任意文本流加载
    fn load_from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> MeshResult<MeshBuffer>;

    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 记录格式错误、索引越界、属性数量不匹配
    fn load_from_file(path: &Path, options: &LoadOptions) -> MeshResult<MeshBuffer>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8], options: &LoadOptions) -> MeshResult<MeshBuffer> {
        Self::load_from_reader(data, options)
    }

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh(path: &Path, options: &LoadOptions) -> MeshResult<MeshBuffer> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshLoadError::UnsupportedFormat(format!(
                "cannot determine file extension of {}",
                path.display()
            ))
        })?;

    let result = if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_from_file(path, options)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!(".{}", extension)))
    };

    match &result {
        Ok(mesh) => loader_info!(
            path = %path.display(),
            mode = ?options.mode,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Mesh loaded"
        ),
        Err(e) => loader_warn!(path = %path.display(), error = %e, "Mesh load failed"),
    }

    result
}
