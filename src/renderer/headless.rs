//! 无窗口后端
//!
//! 不访问任何图形 API，只记录上传和绘制。命令行和测试使用。

use std::collections::HashMap;

use super::backend_trait::{FrameUniforms, RenderBackend};
use crate::core::error::{Result, ViewerError};
use crate::geometry::mesh::MeshBuffer;

/// 已上传网格的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadedMesh {
    pub vertices: usize,
    pub indices: usize,
}

/// 无窗口后端的网格句柄
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct HeadlessHandle(u64);

/// 记录一次绘制调用
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub mesh: u64,
    pub triangles: usize,
    pub uniforms: FrameUniforms,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u64,
    meshes: HashMap<u64, UploadedMesh>,
    draws: Vec<DrawCall>,
    released: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前仍驻留的网格数量
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn released_meshes(&self) -> usize {
        self.released
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draws
    }

    /// 清空绘制记录（每帧开始时调用）
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl RenderBackend for HeadlessBackend {
    type MeshHandle = HeadlessHandle;

    fn upload_mesh(&mut self, mesh: &MeshBuffer) -> Result<Self::MeshHandle> {
        mesh.validate().map_err(ViewerError::Render)?;

        let id = self.next_id;
        self.next_id += 1;
        self.meshes.insert(
            id,
            UploadedMesh {
                vertices: mesh.vertex_count(),
                indices: mesh.index_count(),
            },
        );
        Ok(HeadlessHandle(id))
    }

    fn draw_mesh(&mut self, handle: &Self::MeshHandle, uniforms: &FrameUniforms) -> Result<()> {
        let mesh = self
            .meshes
            .get(&handle.0)
            .ok_or_else(|| ViewerError::Render(format!("mesh {} is not resident", handle.0)))?;

        self.draws.push(DrawCall {
            mesh: handle.0,
            triangles: mesh.indices / 3,
            uniforms: *uniforms,
        });
        Ok(())
    }

    fn release_mesh(&mut self, handle: Self::MeshHandle) {
        if self.meshes.remove(&handle.0).is_some() {
            self.released += 1;
        }
    }

    fn name(&self) -> &str {
        "headless"
    }
}
