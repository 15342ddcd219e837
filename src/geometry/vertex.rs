/// 几何体顶点定义模块
///
/// 定义上传到 GPU 的交错顶点记录（位置 + 法线）以及渲染端必须遵守的布局约定。
/// 颜色属性不参与交错，存放在独立的缓冲区里（见 `MeshBuffer::color_data`）。

use bytemuck::{Pod, Zeroable};

use crate::math::Vector3;

/// 交错顶点记录
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)，偏移 0
/// - normal: 12 bytes (3 * f32)，偏移 12
/// - **总计**: 24 bytes
///
/// # 示例
///
/// ```rust
/// use mesh_viewer::geometry::vertex::MeshVertex;
///
/// let vertex = MeshVertex::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]);
/// assert_eq!(vertex.position, [0.0, 1.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 合成法线为单位向量；没有任何三角形引用的顶点为零向量。
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// 从 nalgebra 向量创建
    #[inline]
    pub fn from_vectors(position: &Vector3, normal: &Vector3) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
        }
    }
}

/// 顶点布局约定
///
/// 渲染端按此约定配置顶点属性：
/// - 属性 0：位置，交错缓冲区偏移 0，3 个 float
/// - 属性 2：法线，紧跟位置之后，3 个 float
/// - 属性 1：颜色，独立缓冲区，4 个 float，无间隔无交错
pub struct VertexLayout;

impl VertexLayout {
    pub const POSITION_COMPONENTS: usize = 3;
    pub const NORMAL_COMPONENTS: usize = 3;
    pub const COLOR_COMPONENTS: usize = 4;

    pub const POSITION_OFFSET: usize = 0;
    pub const NORMAL_OFFSET: usize =
        Self::POSITION_OFFSET + Self::POSITION_COMPONENTS * std::mem::size_of::<f32>();

    /// 交错记录的字节跨度
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();

    /// 每个顶点在交错数组中占用的 float 数量
    pub const FLOATS_PER_VERTEX: usize = Self::POSITION_COMPONENTS + Self::NORMAL_COMPONENTS;

    /// 着色器属性位置
    pub const POSITION_LOCATION: u32 = 0;
    pub const COLOR_LOCATION: u32 = 1;
    pub const NORMAL_LOCATION: u32 = 2;
}
