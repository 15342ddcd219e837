//! mesh_viewer - OBJ 网格加载与查看
//!
//! 读取 Wavefront OBJ 文本，生成按 (位置, 法线) 去重的交错顶点缓冲区和索引缓冲区，
//! 并通过可替换的渲染后端绘制。
//!
//! # 模块结构
//!
//! - `core`: 错误、日志、配置、场景
//! - `math`: nalgebra 类型别名和矩阵辅助函数
//! - `geometry`: 顶点、网格、法线合成、OBJ 加载器
//! - `component`: 轨道相机
//! - `renderer`: 渲染后端接口和查看器
//!
//! # 使用示例
//!
//! ```
//! use mesh_viewer::geometry::loaders::{LoadOptions, MeshLoader, ObjLoader};
//!
//! let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
//! let mesh = ObjLoader::load_from_memory(obj.as_bytes(), &LoadOptions::default())?;
//!
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
//! # Ok::<(), mesh_viewer::core::MeshLoadError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod component;
pub mod renderer;
