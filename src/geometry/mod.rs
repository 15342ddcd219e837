/// 几何体模块
///
/// 把 OBJ 文本转换成可直接上传 GPU 的网格缓冲区。
///
/// # 模块结构
///
/// - `vertex`: 交错顶点记录和属性布局
/// - `mesh`: 网格缓冲区（顶点、颜色、索引）
/// - `normals`: 平滑法线合成
/// - `primitives`: 内置几何体
/// - `loaders`: 模型加载器
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ)
///     ↓
/// Loader (ObjLoader)
///     ↓
/// MeshBuffer (CPU侧数据)
///     ↓
/// RenderBackend (上传到GPU)
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_viewer::geometry::loaders::{LoadOptions, MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"), &LoadOptions::default())?;
///
/// println!("顶点数: {}", mesh.vertex_count());
/// println!("三角形数: {}", mesh.triangle_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod mesh;
pub mod normals;
pub mod primitives;
pub mod loaders;

// 重新导出常用类型
pub use vertex::{MeshVertex, VertexLayout};
pub use mesh::MeshBuffer;
