/// 网格缓冲区模块
///
/// 定义加载流程的最终产物：交错顶点数组、独立的颜色数组和三角形索引数组。
/// `MeshBuffer` 只是一个数据持有者，不包含任何 GPU 资源；
/// 加载器把它整体交给渲染端后不再保留引用。

use super::vertex::{MeshVertex, VertexLayout};

/// CPU侧网格缓冲区
///
/// # 示例
///
/// ```rust
/// use mesh_viewer::geometry::mesh::MeshBuffer;
/// use mesh_viewer::geometry::vertex::MeshVertex;
///
/// let mesh = MeshBuffer {
///     vertices: vec![
///         MeshVertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
///         MeshVertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
///         MeshVertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
///     ],
///     colors: vec![[0.0, 1.0, 0.0, 1.0]; 3],
///     indices: vec![0, 1, 2],
///     name: Some("Triangle".to_string()),
/// };
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// 交错顶点数组（按槽位顺序）
    pub vertices: Vec<MeshVertex>,

    /// 每个顶点的 RGBA 颜色（按槽位顺序，与 `vertices` 等长）
    pub colors: Vec<[f32; 4]>,

    /// 三角形索引，每3个索引定义一个三角形
    pub indices: Vec<u32>,

    /// 网格名称（从文件加载时为文件名）
    pub name: Option<String>,
}

impl MeshBuffer {
    /// 创建一个空的网格缓冲区
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个带容量预分配的网格缓冲区
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            colors: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            name: None,
        }
    }

    /// 追加一个顶点并返回它的槽位
    pub fn push_vertex(&mut self, vertex: MeshVertex, color: [f32; 4]) -> u32 {
        let slot = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.colors.push(color);
        slot
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 交错的位置+法线 float 数组（零拷贝）
    pub fn interleaved(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// 颜色 float 数组，每顶点 4 个 float（零拷贝）
    pub fn color_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// 按三角形迭代索引
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// 用统一颜色覆盖所有顶点颜色
    pub fn set_uniform_color(&mut self, color: [f32; 4]) {
        self.colors.clear();
        self.colors.resize(self.vertices.len(), color);
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数
    /// - 所有索引都在有效范围内
    /// - 颜色数量与顶点数量一致
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        if self.colors.len() != self.vertices.len() {
            return Err(format!(
                "color count {} does not match vertex count {}",
                self.colors.len(),
                self.vertices.len()
            ));
        }

        let vertex_count = self.vertices.len() as u32;
        if let Some(i) = self.indices.iter().position(|&index| index >= vertex_count) {
            return Err(format!(
                "index {} at position {} is out of range (vertex count {})",
                self.indices[i], i, vertex_count
            ));
        }

        Ok(())
    }

    /// 交错数组的浮点数量应为顶点数 * 6
    pub fn interleaved_len(&self) -> usize {
        self.vertices.len() * VertexLayout::FLOATS_PER_VERTEX
    }
}
