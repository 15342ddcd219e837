/// 顶点去重与缓冲区构建
///
/// OBJ 中位置和法线各自独立编号，而 GPU 只接受单一索引。
/// `VertexDeduplicator` 把每个面角的 (位置索引, 法线索引) 组合映射到一个输出槽位：
/// 第一次出现时分配新槽位，再次出现时复用。
///
/// 另外保留旧版的逐位置构建方式（`build_per_position`）：
/// 每个位置顶点就是一个输出顶点，索引直接使用位置索引。
use std::collections::HashMap;

use super::obj_parser::{Corner, ObjDocument};
use crate::core::error::{MeshLoadError, MeshResult};
use crate::geometry::mesh::MeshBuffer;
use crate::geometry::vertex::MeshVertex;
use crate::math::Vector3;

/// 面角到输出槽位的映射表
pub struct VertexDeduplicator<'a> {
    positions: &'a [Vector3],
    normals: &'a [Vector3],
    synthesized: Option<&'a [Vector3]>,
    color: [f32; 4],
    slots: HashMap<Corner, u32>,
    mesh: MeshBuffer,
}

impl<'a> VertexDeduplicator<'a> {
    /// # 参数
    ///
    /// - `positions` / `normals`: 解析得到的属性列表
    /// - `synthesized`: 按位置索引的合成法线（没有时为 `None`）
    /// - `color`: 每个新顶点使用的颜色
    pub fn new(
        positions: &'a [Vector3],
        normals: &'a [Vector3],
        synthesized: Option<&'a [Vector3]>,
        color: [f32; 4],
    ) -> Self {
        Self {
            positions,
            normals,
            synthesized,
            color,
            slots: HashMap::new(),
            mesh: MeshBuffer::new(),
        }
    }

    /// 预分配容量
    pub fn with_capacity(mut self, triangle_count: usize) -> Self {
        self.mesh = MeshBuffer::with_capacity(triangle_count, triangle_count * 3);
        self.slots.reserve(triangle_count);
        self
    }

    /// 解析一个面角并把槽位追加到索引列表
    pub fn push_corner(&mut self, corner: Corner) -> u32 {
        let slot = match self.slots.get(&corner) {
            Some(&slot) => slot,
            None => {
                let vertex = MeshVertex::from_vectors(
                    &self.positions[corner.position as usize],
                    &self.normal_for(corner),
                );
                let slot = self.mesh.push_vertex(vertex, self.color);
                self.slots.insert(corner, slot);
                slot
            }
        };
        self.mesh.indices.push(slot);
        slot
    }

    pub fn push_triangle(&mut self, triangle: [Corner; 3]) {
        for corner in triangle {
            self.push_corner(corner);
        }
    }

    /// 已分配的不同槽位数量
    pub fn unique_vertices(&self) -> usize {
        self.slots.len()
    }

    pub fn finish(self) -> MeshBuffer {
        self.mesh
    }

    /// 显式法线 > 合成法线 > 零向量
    fn normal_for(&self, corner: Corner) -> Vector3 {
        match (corner.normal, self.synthesized) {
            (Some(n), _) => self.normals[n as usize],
            (None, Some(synthesized)) => synthesized[corner.position as usize],
            (None, None) => Vector3::zeros(),
        }
    }
}

/// 按 (位置, 法线) 组合去重，构建网格缓冲区
pub fn deduplicate(
    document: &ObjDocument,
    synthesized: Option<&[Vector3]>,
    color: [f32; 4],
) -> MeshBuffer {
    let mut dedup = VertexDeduplicator::new(
        &document.positions,
        &document.normals,
        synthesized,
        color,
    )
    .with_capacity(document.triangle_count());

    for triangle in document.triangles() {
        dedup.push_triangle(triangle);
    }

    dedup.finish()
}

/// 旧版构建：每个位置顶点对应一个输出顶点
///
/// 若文件提供了法线，其数量必须与位置数量一致，按解析顺序一一对应；
/// 面角上的法线索引此时不起作用。
pub fn build_per_position(
    document: &ObjDocument,
    synthesized: Option<&[Vector3]>,
    color: [f32; 4],
) -> MeshResult<MeshBuffer> {
    let positions = &document.positions;
    let normals = &document.normals;

    if !normals.is_empty() && normals.len() != positions.len() {
        return Err(MeshLoadError::AttributeCountMismatch {
            positions: positions.len(),
            normals: normals.len(),
        });
    }

    let mut mesh = MeshBuffer::with_capacity(positions.len(), document.triangle_count() * 3);
    for (i, position) in positions.iter().enumerate() {
        let normal = if !normals.is_empty() {
            normals[i]
        } else {
            synthesized.map(|s| s[i]).unwrap_or_else(Vector3::zeros)
        };
        mesh.push_vertex(MeshVertex::from_vectors(position, &normal), color);
    }

    mesh.indices.extend(document.position_triangles().flatten());

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::loaders::obj_parser::parse_obj_str;

    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    #[test]
    fn test_repeated_corner_reuses_slot() {
        let positions = vec![Vector3::zeros(), Vector3::x(), Vector3::y()];
        let normals = vec![Vector3::z()];
        let mut dedup = VertexDeduplicator::new(&positions, &normals, None, GREEN);

        let a = dedup.push_corner(Corner::new(0, Some(0)));
        let b = dedup.push_corner(Corner::new(1, Some(0)));
        let a_again = dedup.push_corner(Corner::new(0, Some(0)));

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(a_again, a);
        assert_eq!(dedup.unique_vertices(), 2);

        let mesh = dedup.finish();
        assert_eq!(mesh.indices, vec![0, 1, 0]);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_same_position_different_normal_gets_new_slot() {
        let positions = vec![Vector3::zeros()];
        let normals = vec![Vector3::x(), Vector3::y()];
        let mut dedup = VertexDeduplicator::new(&positions, &normals, None, GREEN);

        let a = dedup.push_corner(Corner::new(0, Some(0)));
        let b = dedup.push_corner(Corner::new(0, Some(1)));
        let c = dedup.push_corner(Corner::new(0, None));

        assert_ne!(a, b);
        assert_ne!(b, c);
        let mesh = dedup.finish();
        assert_eq!(mesh.vertices[0].normal, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[1].normal, [0.0, 1.0, 0.0]);
        // 既无显式法线也无合成法线
        assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_synthesized_normal_used_when_corner_has_none() {
        let positions = vec![Vector3::zeros()];
        let synthesized = vec![Vector3::z()];
        let mut dedup = VertexDeduplicator::new(&positions, &[], Some(synthesized.as_slice()), GREEN);

        dedup.push_corner(Corner::new(0, None));
        let mesh = dedup.finish();
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.colors[0], GREEN);
    }

    #[test]
    fn test_deduplicate_shared_quad_corners() {
        let doc = parse_obj_str(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
        )
        .unwrap();
        let mesh = deduplicate(&doc, None, GREEN);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_per_position_requires_matching_counts() {
        let doc = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2 3\n").unwrap();
        let err = build_per_position(&doc, None, GREEN).unwrap_err();

        assert!(matches!(
            err,
            MeshLoadError::AttributeCountMismatch { positions: 3, normals: 1 }
        ));
    }

    #[test]
    fn test_per_position_uses_parse_order_normals() {
        let doc = parse_obj_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nvn 0 1 0\nvn 0 0 1\nf 1//3 2//3 3//3\n",
        )
        .unwrap();
        let mesh = build_per_position(&doc, None, GREEN).unwrap();

        assert_eq!(mesh.vertices[0].normal, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_per_position_keeps_unreferenced_vertices() {
        let doc = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 9 9 9\nf 3 2 1\n").unwrap();
        let mesh = build_per_position(&doc, None, GREEN).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![2, 1, 0]);
        assert_eq!(mesh.vertices[3].normal, [0.0, 0.0, 0.0]);
    }
}
