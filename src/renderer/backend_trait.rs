//! 统一的渲染后端接口
//!
//! 查看器只通过这个 trait 与图形 API 交互：上传网格得到句柄，
//! 每帧用句柄和 uniform 绘制，不再需要时释放。
//! 具体后端决定句柄是什么（GPU 缓冲区、记录编号等）。

use crate::core::error::Result;
use crate::geometry::mesh::MeshBuffer;
use crate::math::{Matrix3, Matrix4};

/// 一次绘制调用所需的全部 uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub model: Matrix4,
    /// 模型矩阵左上 3x3 的逆转置
    pub normal: Matrix3,
    pub view: Matrix4,
    pub projection: Matrix4,
    pub light_color: [f32; 3],
    pub light_position: [f32; 3],
    pub view_position: [f32; 3],
    pub shininess: f32,
}

/// 渲染后端
///
/// # 示例
///
/// ```ignore
/// let handle = backend.upload_mesh(&mesh)?;
/// backend.draw_mesh(&handle, &uniforms)?;
/// backend.release_mesh(handle);
/// ```
pub trait RenderBackend {
    /// 已上传网格的句柄
    type MeshHandle;

    /// 上传网格的顶点、颜色和索引数据
    fn upload_mesh(&mut self, mesh: &MeshBuffer) -> Result<Self::MeshHandle>;

    /// 用给定 uniform 绘制一个已上传的网格
    fn draw_mesh(&mut self, handle: &Self::MeshHandle, uniforms: &FrameUniforms) -> Result<()>;

    /// 释放网格占用的资源
    fn release_mesh(&mut self, handle: Self::MeshHandle);

    /// 后端名称
    fn name(&self) -> &str;
}

/// 借用的后端同样可以驱动查看器，查看器销毁后调用方仍能检查后端状态
impl<T: RenderBackend + ?Sized> RenderBackend for &mut T {
    type MeshHandle = T::MeshHandle;

    fn upload_mesh(&mut self, mesh: &MeshBuffer) -> Result<Self::MeshHandle> {
        (**self).upload_mesh(mesh)
    }

    fn draw_mesh(&mut self, handle: &Self::MeshHandle, uniforms: &FrameUniforms) -> Result<()> {
        (**self).draw_mesh(handle, uniforms)
    }

    fn release_mesh(&mut self, handle: Self::MeshHandle) {
        (**self).release_mesh(handle)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
