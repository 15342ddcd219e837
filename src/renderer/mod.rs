//! 渲染器模块
//!
//! `Viewer` 持有一个渲染后端、轨道相机、光照状态和已上传的物体，
//! 每帧为每个物体计算 uniform 并交给后端绘制。
//!
//! # 架构设计
//!
//! ```text
//! MeshBuffer ──upload──> RenderBackend::MeshHandle
//!                                 │
//! OrbitCamera + LightingState ──> FrameUniforms ──draw──> RenderBackend
//! ```

use std::path::Path;

use crate::component::{CameraAction, OrbitCamera};
use crate::core::error::{Result, ViewerError};
use crate::core::scene::{LightConfig, ProjectionConfig, SceneConfig};
use crate::geometry::loaders::{load_mesh, LoadOptions};
use crate::geometry::mesh::MeshBuffer;
use crate::math::{matrix, utils::clamp, Matrix4};
use crate::viewer_debug;

pub mod backend_trait;
pub mod headless;

pub use backend_trait::{FrameUniforms, RenderBackend};
pub use headless::HeadlessBackend;

/// 高光指数的取值范围
pub const SHININESS_RANGE: (f32, f32) = (1.0, 200.0);

/// 光照状态：光源跟随相机位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingState {
    pub color: [f32; 3],
    shininess: f32,
}

impl Default for LightingState {
    fn default() -> Self {
        Self::from_config(&LightConfig::default())
    }
}

impl LightingState {
    pub fn from_config(config: &LightConfig) -> Self {
        let mut state = Self {
            color: config.color,
            shininess: 0.0,
        };
        state.set_shininess(config.shininess);
        state
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// 设置高光指数，超出范围时截断
    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = clamp(shininess, SHININESS_RANGE.0, SHININESS_RANGE.1);
    }
}

/// 场景中的一个物体
struct SceneObject<H> {
    handle: H,
    model: Matrix4,
    name: String,
}

/// 网格查看器
pub struct Viewer<B: RenderBackend> {
    backend: B,
    camera: OrbitCamera,
    lighting: LightingState,
    projection: Matrix4,
    objects: Vec<SceneObject<B::MeshHandle>>,
}

impl<B: RenderBackend> Viewer<B> {
    /// 使用默认相机、光照和投影创建查看器
    pub fn new(backend: B) -> Self {
        Self::with_scene(backend, &SceneConfig::default())
    }

    /// 按场景配置创建查看器（不加载模型）
    pub fn with_scene(backend: B, scene: &SceneConfig) -> Self {
        Self {
            backend,
            camera: OrbitCamera::from_config(&scene.camera),
            lighting: LightingState::from_config(&scene.light),
            projection: scene.projection.matrix(),
            objects: Vec::new(),
        }
    }

    pub fn set_projection(&mut self, projection: &ProjectionConfig) {
        self.projection = projection.matrix();
    }

    /// 加载模型文件并上传
    ///
    /// 返回物体编号。加载失败时不会留下任何已上传的资源。
    pub fn load_model(&mut self, path: &Path, options: &LoadOptions, model: Matrix4) -> Result<usize> {
        let mesh = load_mesh(path, options)?;
        self.add_mesh(&mesh, model)
    }

    /// 添加参考立方体
    pub fn add_cube(&mut self, model: Matrix4) -> Result<usize> {
        self.add_mesh(&MeshBuffer::cube(), model)
    }

    /// 上传任意网格
    pub fn add_mesh(&mut self, mesh: &MeshBuffer, model: Matrix4) -> Result<usize> {
        let handle = self.backend.upload_mesh(mesh)?;
        let name = mesh.name.clone().unwrap_or_else(|| "Unnamed".to_string());

        viewer_debug!(
            object = %name,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            backend = self.backend.name(),
            "Mesh uploaded"
        );

        self.objects.push(SceneObject { handle, model, name });
        Ok(self.objects.len() - 1)
    }

    pub fn apply_camera_action(&mut self, action: CameraAction) {
        self.camera.apply(action);
        viewer_debug!(?action, distance = self.camera.distance(), "Camera updated");
    }

    pub fn set_shininess(&mut self, shininess: f32) {
        self.lighting.set_shininess(shininess);
    }

    /// 为指定模型矩阵生成本帧的 uniform
    pub fn frame_uniforms(&self, model: &Matrix4) -> Result<FrameUniforms> {
        let normal = matrix::normal_matrix(model)
            .ok_or_else(|| ViewerError::Render("model matrix is not invertible".to_string()))?;
        let eye = self.camera.position();

        Ok(FrameUniforms {
            model: *model,
            normal,
            view: self.camera.view_matrix(),
            projection: self.projection,
            light_color: self.lighting.color,
            light_position: eye.into(),
            view_position: eye.into(),
            shininess: self.lighting.shininess(),
        })
    }

    /// 绘制一帧，返回绘制的物体数量
    pub fn render_frame(&mut self) -> Result<usize> {
        for object in &self.objects {
            let uniforms = self.frame_uniforms(&object.model)?;
            self.backend.draw_mesh(&object.handle, &uniforms)?;
        }
        Ok(self.objects.len())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|object| object.name.as_str())
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn lighting(&self) -> &LightingState {
        &self.lighting
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: RenderBackend> Drop for Viewer<B> {
    fn drop(&mut self) {
        for object in self.objects.drain(..) {
            self.backend.release_mesh(object.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::approx_eq;

    #[test]
    fn test_shininess_clamped() {
        let mut lighting = LightingState::default();
        assert_eq!(lighting.shininess(), 40.0);

        lighting.set_shininess(500.0);
        assert_eq!(lighting.shininess(), 200.0);
        lighting.set_shininess(0.0);
        assert_eq!(lighting.shininess(), 1.0);
    }

    #[test]
    fn test_render_frame_draws_every_object() {
        let mut viewer = Viewer::new(HeadlessBackend::new());
        viewer.add_cube(Matrix4::identity()).unwrap();
        viewer.add_cube(matrix::translation(5.0, 0.0, 0.0)).unwrap();

        assert_eq!(viewer.render_frame().unwrap(), 2);
        let draws = viewer.backend().draw_calls();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].triangles, 12);
        assert_eq!(draws[1].uniforms.model[(0, 3)], 5.0);
    }

    #[test]
    fn test_light_follows_camera() {
        let mut viewer = Viewer::new(HeadlessBackend::new());
        viewer.apply_camera_action(CameraAction::ZoomOut);
        let uniforms = viewer.frame_uniforms(&Matrix4::identity()).unwrap();

        assert!(approx_eq(uniforms.light_position[2], 1.1, 1e-6));
        assert_eq!(uniforms.light_position, uniforms.view_position);
        assert_eq!(uniforms.light_color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_drop_releases_every_mesh() {
        let mut backend = HeadlessBackend::new();
        {
            let mut viewer = Viewer::new(&mut backend);
            viewer.add_cube(Matrix4::identity()).unwrap();
            viewer.add_cube(Matrix4::identity()).unwrap();
            assert_eq!(viewer.backend().live_meshes(), 2);
        }

        assert_eq!(backend.live_meshes(), 0);
        assert_eq!(backend.released_meshes(), 2);
    }

    #[test]
    fn test_singular_model_matrix_is_rejected() {
        let viewer = Viewer::new(HeadlessBackend::new());
        assert!(viewer.frame_uniforms(&matrix::uniform_scaling(0.0)).is_err());
    }

    #[test]
    fn test_load_model_failure_uploads_nothing() {
        let mut viewer = Viewer::new(HeadlessBackend::new());
        let result = viewer.load_model(
            Path::new("does/not/exist.obj"),
            &LoadOptions::default(),
            Matrix4::identity(),
        );

        assert!(matches!(result, Err(ViewerError::MeshLoading(_))));
        assert_eq!(viewer.object_count(), 0);
        assert_eq!(viewer.backend().live_meshes(), 0);
    }
}
