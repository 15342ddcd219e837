//! 轨道相机
//!
//! 相机位于以目标点为中心的球面上，由距离和两个角度确定：
//!
//! ```text
//! x = d * cos(elevation) * sin(azimuth)
//! y = d * sin(elevation)
//! z = d * cos(elevation) * cos(azimuth)
//! ```
//!
//! 目标点是平移偏移量本身，相机位置 = 球面点 + 偏移量。

use crate::core::scene::CameraConfig;
use crate::math::{matrix, utils::deg_to_rad, Matrix4, Vector3};

/// 相机操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAction {
    /// 拉远（距离乘以缩放倍率）
    ZoomOut,
    /// 拉近（距离除以缩放倍率）
    ZoomIn,
    /// 方位角增加
    RotateLeft,
    RotateRight,
    /// 仰角增加
    RotateUp,
    RotateDown,
    /// 目标点沿 -Z
    PanForward,
    /// 目标点沿 +Z
    PanBackward,
    /// 目标点沿 -X
    PanLeft,
    /// 目标点沿 +X
    PanRight,
    /// 目标点沿 +Y
    PanUp,
    /// 目标点沿 -Y
    PanDown,
}

/// 轨道相机
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    distance: f32,
    /// 方位角（弧度），绕 Y 轴
    azimuth: f32,
    /// 仰角（弧度），相对 XZ 平面
    elevation: f32,
    offset: Vector3,

    zoom_factor: f32,
    angle_step: f32,
    pan_step: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            distance: config.distance,
            azimuth: 0.0,
            elevation: 0.0,
            offset: Vector3::zeros(),
            zoom_factor: config.zoom_factor,
            angle_step: deg_to_rad(config.angle_step),
            pan_step: config.pan_step,
        }
    }

    /// 执行一次相机操作
    pub fn apply(&mut self, action: CameraAction) {
        match action {
            CameraAction::ZoomOut => self.distance *= self.zoom_factor,
            CameraAction::ZoomIn => self.distance /= self.zoom_factor,
            CameraAction::RotateLeft => self.azimuth += self.angle_step,
            CameraAction::RotateRight => self.azimuth -= self.angle_step,
            CameraAction::RotateUp => self.elevation += self.angle_step,
            CameraAction::RotateDown => self.elevation -= self.angle_step,
            CameraAction::PanForward => self.offset.z -= self.pan_step,
            CameraAction::PanBackward => self.offset.z += self.pan_step,
            CameraAction::PanLeft => self.offset.x -= self.pan_step,
            CameraAction::PanRight => self.offset.x += self.pan_step,
            CameraAction::PanUp => self.offset.y += self.pan_step,
            CameraAction::PanDown => self.offset.y -= self.pan_step,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn offset(&self) -> Vector3 {
        self.offset
    }

    /// 相机位置
    pub fn position(&self) -> Vector3 {
        spherical_point(self.distance, self.azimuth, self.elevation) + self.offset
    }

    /// 观察目标点
    pub fn target(&self) -> Vector3 {
        self.offset
    }

    /// 上向量：仰角再加 90° 处的球面点方向
    pub fn up(&self) -> Vector3 {
        spherical_point(1.0, self.azimuth, self.elevation + std::f32::consts::FRAC_PI_2)
    }

    /// 视图矩阵
    pub fn view_matrix(&self) -> Matrix4 {
        matrix::look_at(&self.position(), &self.target(), &self.up())
    }
}

fn spherical_point(distance: f32, azimuth: f32, elevation: f32) -> Vector3 {
    Vector3::new(
        distance * elevation.cos() * azimuth.sin(),
        distance * elevation.sin(),
        distance * elevation.cos() * azimuth.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::{approx_eq, approx_eq_vec3};

    #[test]
    fn test_default_camera() {
        let camera = OrbitCamera::default();

        assert_eq!(camera.distance(), 1.0);
        assert!(approx_eq_vec3(&camera.position(), &Vector3::new(0.0, 0.0, 1.0), 1e-6));
        assert_eq!(camera.target(), Vector3::zeros());
        assert!(approx_eq_vec3(&camera.up(), &Vector3::y(), 1e-6));
    }

    #[test]
    fn test_zoom() {
        let mut camera = OrbitCamera::default();
        camera.apply(CameraAction::ZoomOut);
        assert!(approx_eq(camera.distance(), 1.1, 1e-6));

        camera.apply(CameraAction::ZoomIn);
        assert!(approx_eq(camera.distance(), 1.0, 1e-6));
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut camera = OrbitCamera::default();
        for _ in 0..7 {
            camera.apply(CameraAction::RotateLeft);
            camera.apply(CameraAction::RotateUp);
        }

        assert!(approx_eq(camera.azimuth(), deg_to_rad(35.0), 1e-5));
        assert!(approx_eq((camera.position() - camera.target()).norm(), 1.0, 1e-5));
        assert!(approx_eq(camera.up().norm(), 1.0, 1e-5));
        assert!(approx_eq(camera.up().dot(&camera.position()), 0.0, 1e-5));
    }

    #[test]
    fn test_pan_moves_target_and_position() {
        let mut camera = OrbitCamera::default();
        camera.apply(CameraAction::PanRight);
        camera.apply(CameraAction::PanUp);
        camera.apply(CameraAction::PanForward);

        let offset = Vector3::new(0.5, 0.5, -0.5);
        assert_eq!(camera.target(), offset);
        assert!(approx_eq_vec3(&camera.position(), &(Vector3::z() + offset), 1e-6));
    }

    #[test]
    fn test_view_matrix_maps_target_to_forward() {
        let camera = OrbitCamera::default();
        let view = camera.view_matrix();
        let target = view.transform_point(&crate::math::Point3::origin());

        // 右手坐标系下目标点位于相机前方 -Z 处
        assert!(approx_eq(target.z, -1.0, 1e-6));
    }
}
