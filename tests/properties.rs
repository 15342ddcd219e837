use std::collections::HashSet;
use std::fmt::Write;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use mesh_viewer::geometry::loaders::{LoadMode, LoadOptions, MeshLoader, ObjLoader};
use mesh_viewer::math::Vector3;

const NORMALS: usize = 2;

/// 由随机字节生成一个合法的 OBJ 文本，返回文本和每个面角的 (位置, 法线) 组合
///
/// 位置是整数格点乘以 `10^(scale_exp % 10 - 6)`，覆盖 1e-6 到 1e3 的尺度。
fn build_obj(
    position_seed: u8,
    scale_exp: u8,
    corners: &[(u8, u8)],
    with_normals: bool,
) -> (String, Vec<(usize, Option<usize>)>) {
    let positions = position_seed as usize % 8 + 3;
    let scale = 10f32.powi(scale_exp as i32 % 10 - 6);
    let mut source = String::new();

    for i in 0..positions {
        let f = i as f32;
        let lattice = [f, (f * f) % 7.0, f % 3.0];
        writeln!(
            source,
            "v {} {} {}",
            lattice[0] * scale,
            lattice[1] * scale,
            lattice[2] * scale
        )
        .unwrap();
    }
    if with_normals {
        writeln!(source, "vn 0 0 1").unwrap();
        writeln!(source, "vn 0 1 0").unwrap();
    }

    let mut used = Vec::new();
    for face in corners.chunks_exact(3) {
        source.push('f');
        for &(p, n) in face {
            let position = p as usize % positions + 1;
            let normal = (with_normals && n % 3 != 0).then(|| n as usize % NORMALS + 1);
            match normal {
                Some(normal) => write!(source, " {}//{}", position, normal).unwrap(),
                None => write!(source, " {}", position).unwrap(),
            }
            used.push((position, normal));
        }
        source.push('\n');
    }

    (source, used)
}

#[quickcheck]
fn indices_stay_in_range(position_seed: u8, corners: Vec<(u8, u8)>) -> TestResult {
    if corners.len() < 3 {
        return TestResult::discard();
    }
    let (source, _) = build_obj(position_seed, 6, &corners, true);

    let mesh = match ObjLoader::load_from_memory(source.as_bytes(), &LoadOptions::default()) {
        Ok(mesh) => mesh,
        Err(e) => return TestResult::error(e.to_string()),
    };

    let vertex_count = mesh.vertex_count() as u32;
    TestResult::from_bool(
        mesh.index_count() == corners.len() / 3 * 3
            && mesh.indices.iter().all(|&i| i < vertex_count)
            && mesh.validate().is_ok(),
    )
}

#[quickcheck]
fn one_vertex_per_distinct_corner(position_seed: u8, corners: Vec<(u8, u8)>) -> TestResult {
    if corners.len() < 3 {
        return TestResult::discard();
    }
    let (source, used) = build_obj(position_seed, 6, &corners, true);

    let mesh = match ObjLoader::load_from_memory(source.as_bytes(), &LoadOptions::default()) {
        Ok(mesh) => mesh,
        Err(e) => return TestResult::error(e.to_string()),
    };

    let distinct: HashSet<_> = used.iter().collect();
    TestResult::from_bool(mesh.vertex_count() == distinct.len() && mesh.vertex_count() <= used.len())
}

/// 整数格点上的三角形要么严格共线，要么两边夹角的正弦不小于约 1/150，
/// 所以这里用一个宽松的相对阈值判断是否退化，与加载器内部的判定相互独立。
fn is_proper_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> bool {
    let (a, b, c) = (Vector3::from(a), Vector3::from(b), Vector3::from(c));
    let (ab, ac) = (b - a, c - a);
    ab.cross(&ac).norm() > 1e-3 * ab.norm() * ac.norm()
}

#[quickcheck]
fn referenced_vertices_have_unit_normals(
    position_seed: u8,
    scale_exp: u8,
    corners: Vec<(u8, u8)>,
    legacy: bool,
) -> TestResult {
    if corners.len() < 3 {
        return TestResult::discard();
    }
    // 旧版模式要求法线数量与位置数量一致，这里只生成不带法线的文件
    let (source, _) = build_obj(position_seed, scale_exp, &corners, !legacy);
    let options = LoadOptions {
        mode: if legacy { LoadMode::Legacy } else { LoadMode::Deduplicated },
        ..LoadOptions::default()
    };

    let mesh = match ObjLoader::load_from_memory(source.as_bytes(), &options) {
        Ok(mesh) => mesh,
        Err(e) => return TestResult::error(e.to_string()),
    };

    let mut must_be_unit = vec![false; mesh.vertex_count()];
    for [a, b, c] in mesh.triangles() {
        let position = |i: u32| mesh.vertices[i as usize].position;
        if is_proper_triangle(position(a), position(b), position(c)) {
            for i in [a, b, c] {
                must_be_unit[i as usize] = true;
            }
        }
    }

    TestResult::from_bool(mesh.vertices.iter().zip(&must_be_unit).all(|(v, &must)| {
        let length = v.normal.iter().map(|c| c * c).sum::<f32>().sqrt();
        if must {
            (length - 1.0).abs() < 1e-5
        } else {
            length == 0.0 || (length - 1.0).abs() < 1e-5
        }
    }))
}
