/// OBJ 文件加载器
///
/// 把解析、法线合成和顶点构建三个阶段串起来。
/// 任何阶段出错都直接返回错误，不会产出部分结果。
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::dedup::{build_per_position, deduplicate};
use super::obj_parser::{parse_obj, ObjDocument};
use super::{LoadMode, LoadOptions, MeshLoader};
use crate::core::error::{MeshLoadError, MeshResult};
use crate::geometry::mesh::MeshBuffer;
use crate::geometry::normals::synthesize_normals;

/// OBJ 格式加载器
///
/// # 特性
///
/// - 只识别 `v` / `vn` / `f`，其它记录被忽略
/// - 多边形面按扇形三角化
/// - 面角缺少法线时按位置合成平滑法线
/// - 去重模式下相同 (位置, 法线) 组合共享一个顶点
///
/// # 使用示例
///
/// ```rust
/// use mesh_viewer::geometry::loaders::{LoadOptions, MeshLoader, ObjLoader};
///
/// let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
/// let mesh = ObjLoader::load_from_memory(source.as_bytes(), &LoadOptions::default())?;
/// assert_eq!(mesh.vertex_count(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    /// 由已解析的文档构建网格缓冲区
    pub fn build(document: &ObjDocument, options: &LoadOptions) -> MeshResult<MeshBuffer> {
        let needs_normals = match options.mode {
            LoadMode::Deduplicated => document.has_corners_without_normals(),
            LoadMode::Legacy => document.normals.is_empty(),
        };

        let synthesized = (needs_normals && options.synthesize_normals)
            .then(|| synthesize_normals(&document.positions, document.position_triangles()));

        let color = options.color();
        match options.mode {
            LoadMode::Deduplicated => Ok(deduplicate(document, synthesized.as_deref(), color)),
            LoadMode::Legacy => build_per_position(document, synthesized.as_deref(), color),
        }
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> MeshResult<MeshBuffer> {
        let document = parse_obj(reader)?;
        Self::build(&document, options)
    }

    fn load_from_file(path: &Path, options: &LoadOptions) -> MeshResult<MeshBuffer> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let mut mesh = Self::load_from_reader(BufReader::new(file), options)?;
        mesh.name = Some(
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Unnamed")
                .to_string(),
        );

        Ok(mesh)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
