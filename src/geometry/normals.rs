//! 平滑法线合成
//!
//! 源文件不提供法线时，为每个位置顶点合成一条法线：
//! 按三角形的解析顺序，把每个三角形的单位面法线混合进它三个顶点的当前法线。
//!
//! 混合规则是带计数的滑动平均，每次更新后立即重新归一化：
//!
//! ```text
//! n' = normalize((count * n + face) / (count + 1))
//! ```
//!
//! 面法线在混合前已归一化，因此不按面积加权；
//! 又因为每一步都归一化，最终结果依赖三角形顺序，并不等于所有面法线的算术平均。

use crate::math::{constants::EPSILON, Vector3};

/// 单个顶点的法线累加器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalAccumulator {
    normal: Vector3,
    contributions: u32,
}

impl Default for NormalAccumulator {
    fn default() -> Self {
        Self {
            normal: Vector3::zeros(),
            contributions: 0,
        }
    }
}

impl NormalAccumulator {
    /// 混合一条单位面法线
    pub fn add_face_normal(&mut self, face_normal: &Vector3) {
        if self.contributions == 0 {
            self.normal = *face_normal;
        } else {
            let count = self.contributions as f32;
            let blended = (self.normal * count + face_normal) / (count + 1.0);
            // 方向恰好抵消时保留原法线
            if let Some(unit) = blended.try_normalize(EPSILON) {
                self.normal = unit;
            }
        }
        self.contributions += 1;
    }

    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    #[inline]
    pub fn contributions(&self) -> u32 {
        self.contributions
    }
}

/// 三角形的单位几何法线：normalize((b - a) × (c - a))
///
/// 退化三角形返回 `None`。判定与网格尺度无关：
/// 叉积长度不超过 `EPSILON * |b - a| * |c - a|`（两边夹角的正弦 ≤ EPSILON），
/// 或者叉积下溢、不是有限值。
pub fn face_normal(a: &Vector3, b: &Vector3, c: &Vector3) -> Option<Vector3> {
    let ab = b - a;
    let ac = c - a;
    let cross = ab.cross(&ac);
    let length = cross.norm();

    if !length.is_finite() || length < f32::MIN_POSITIVE || length <= EPSILON * ab.norm() * ac.norm() {
        return None;
    }
    Some(cross / length)
}

/// 为每个位置顶点合成法线
///
/// `triangles` 中是 0 基位置索引，必须已经做过范围检查。
/// 退化三角形不参与混合；没有被任何三角形引用的顶点保持零向量。
pub fn synthesize_normals<I>(positions: &[Vector3], triangles: I) -> Vec<Vector3>
where
    I: IntoIterator<Item = [u32; 3]>,
{
    let mut accumulators = vec![NormalAccumulator::default(); positions.len()];

    for [a, b, c] in triangles {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let Some(normal) = face_normal(&positions[a], &positions[b], &positions[c]) else {
            continue;
        };

        accumulators[a].add_face_normal(&normal);
        accumulators[b].add_face_normal(&normal);
        accumulators[c].add_face_normal(&normal);
    }

    accumulators.iter().map(NormalAccumulator::normal).collect()
}
