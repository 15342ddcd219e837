/// 内置几何体
///
/// 目前只有一个边长为 1、以原点为中心的参考立方体，
/// 每个面 4 个顶点（共 24 个），法线朝外，逆时针为正面。
use super::mesh::MeshBuffer;
use super::vertex::MeshVertex;
use crate::math::Color;

/// 立方体各面：(法线, 四个角点, 颜色)
const CUBE_FACES: [([f32; 3], [[f32; 3]; 4], Color); 6] = [
    // 上
    (
        [0.0, 1.0, 0.0],
        [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
        Color::RED,
    ),
    // 前
    (
        [0.0, 0.0, 1.0],
        [[-0.5, 0.5, 0.5], [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5]],
        Color::RED,
    ),
    // 左
    (
        [-1.0, 0.0, 0.0],
        [[-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5]],
        Color::BLUE,
    ),
    // 下
    (
        [0.0, -1.0, 0.0],
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [-0.5, -0.5, -0.5]],
        Color::MAGENTA,
    ),
    // 后
    (
        [0.0, 0.0, -1.0],
        [[0.5, 0.5, -0.5], [-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5]],
        Color::CYAN,
    ),
    // 右
    (
        [1.0, 0.0, 0.0],
        [[0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5]],
        Color::YELLOW,
    ),
];

/// 每个面内的两个三角形（相对该面第一个顶点的偏移）
const CUBE_FACE_INDICES: [[u32; 6]; 6] = [
    [0, 1, 2, 0, 2, 3],
    [0, 1, 2, 0, 2, 3],
    [0, 1, 2, 2, 3, 0],
    [0, 2, 1, 0, 3, 2],
    [1, 0, 3, 1, 3, 2],
    [0, 2, 1, 0, 3, 2],
];

impl MeshBuffer {
    /// 创建参考立方体
    pub fn cube() -> Self {
        let mut mesh = MeshBuffer::with_capacity(24, 36);

        for ((normal, corners, color), face_indices) in CUBE_FACES.iter().zip(CUBE_FACE_INDICES) {
            let base = mesh.vertex_count() as u32;
            for corner in corners {
                mesh.push_vertex(MeshVertex::new(*corner, *normal), color.to_array());
            }
            mesh.indices.extend(face_indices.iter().map(|i| base + i));
        }

        mesh.name = Some("Cube".to_string());
        mesh
    }
}
