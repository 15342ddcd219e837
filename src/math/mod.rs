//! 统一的数学库模块
//!
//! 基于 `nalgebra`，提供查看器用到的向量/矩阵类型别名和常用辅助函数。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector3/4, Matrix3/4, Color
//! - **常量**：PI, DEG_TO_RAD, EPSILON 等
//! - **工具函数**：clamp, approx_eq 等
//! - **矩阵辅助函数**：平移、缩放、投影、Look-At、法线矩阵

pub use nalgebra::{
    Matrix3 as Mat3, Matrix4 as Mat4, Point3,
    Vector3 as Vec3, Vector4 as Vec4,
};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix3 = Mat3<f32>;
pub type Matrix4 = Mat4<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 转换为顶点颜色数组
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 转换为 RGB 数组（忽略 alpha）
    pub fn to_rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
}

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// π/2
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 检查两个向量是否逐分量近似相等
    pub fn approx_eq_vec3(a: &Vector3, b: &Vector3, epsilon: f32) -> bool {
        approx_eq(a.x, b.x, epsilon) && approx_eq(a.y, b.y, epsilon) && approx_eq(a.z, b.z, epsilon)
    }
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 创建均匀缩放矩阵
    pub fn uniform_scaling(scale: f32) -> Matrix4 {
        Matrix4::new_scaling(scale)
    }

    /// 创建绕 X 轴旋转的矩阵
    pub fn rotation_x(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
    }

    /// 创建透视投影矩阵
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        Matrix4::new_perspective(aspect, fov_y, near, far)
    }

    /// 创建 Look-At 视图矩阵
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Matrix4 {
        Matrix4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }

    /// 法线矩阵 G = (M⁻¹)ᵀ，只取模型矩阵左上 3x3（平移不影响法线）
    ///
    /// 模型矩阵不可逆（例如缩放为 0）时返回 `None`。
    pub fn normal_matrix(model: &Matrix4) -> Option<Matrix3> {
        let linear: Matrix3 = model.fixed_view::<3, 3>(0, 0).into_owned();
        linear.try_inverse().map(|inverse| inverse.transpose())
    }
}
