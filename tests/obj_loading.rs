use std::fs;
use std::path::PathBuf;

use mesh_viewer::core::MeshLoadError;
use mesh_viewer::geometry::loaders::{load_mesh, LoadOptions, MeshLoader, ObjLoader};
use mesh_viewer::geometry::VertexLayout;
use mesh_viewer::renderer::{HeadlessBackend, Viewer};
use mesh_viewer::math::Matrix4;

fn load(source: &str) -> Result<mesh_viewer::geometry::MeshBuffer, MeshLoadError> {
    ObjLoader::load_from_memory(source.as_bytes(), &LoadOptions::default())
}

/// 写入系统临时目录，文件名带进程号避免并行测试冲突
fn write_temp_obj(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}_{}.obj", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn distinct_corners_are_never_shared() {
    let mesh = load(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nv 1 1 0\nv 1 0 1\n\
         vn 0 0 1\nvn 0 1 0\n\
         f 1//1 2//1 3//1\nf 4//2 5//2 6//2\n",
    )
    .unwrap();

    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 3 * mesh.triangle_count());
}

#[test]
fn identical_corners_collapse_to_one_vertex() {
    let mesh = load("v 0 0 0\nvn 0 0 1\nf 1//1 1//1 1//1\nf 1//1 1//1 1//1\n").unwrap();

    assert_eq!(mesh.vertex_count(), 1);
    assert_eq!(mesh.indices, vec![0; 6]);
}

#[test]
fn quad_is_fan_triangulated() {
    let mesh = load("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

    let triangles: Vec<[u32; 3]> = mesh.triangles().collect();
    assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3]]);
}

#[test]
fn minimal_triangle_fixture() {
    let mesh = load("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));

    // 交错缓冲区：位置在前，法线紧随其后
    let interleaved = mesh.interleaved();
    assert_eq!(interleaved.len(), 3 * VertexLayout::FLOATS_PER_VERTEX);
    assert_eq!(&interleaved[6..12], &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    assert_eq!(mesh.color_data().len(), 3 * VertexLayout::COLOR_COMPONENTS);
}

#[test]
fn sub_millimetre_triangle_gets_unit_normals() {
    let mesh = load("v 0 0 0\nv 0.0005 0 0\nv 0 0.0005 0\nf 1 2 3\n").unwrap();

    for vertex in &mesh.vertices {
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn shared_vertex_uses_sequential_renormalization() {
    let mesh = load(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\n\
         f 1 3 4\nf 1 4 2\nf 1 2 3\n",
    )
    .unwrap();

    let n = mesh.vertices[0].normal;
    let s5 = 5.0f32.sqrt();
    let expected = [2.0f32.sqrt() / s5, 2.0f32.sqrt() / s5, 1.0 / s5];
    for axis in 0..3 {
        assert!((n[axis] - expected[axis]).abs() < 1e-5, "{:?} != {:?}", n, expected);
    }

    let average = 1.0 / 3.0f32.sqrt();
    assert!((n[2] - average).abs() > 1e-2);
}

#[test]
fn out_of_range_face_index_reports_line() {
    let err = load("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 99\n").unwrap_err();

    assert_eq!(err.line(), Some(4));
    assert!(matches!(err, MeshLoadError::IndexOutOfRange { index: 99, available: 3, .. }));
    assert!(err.to_string().contains("f 1 2 99"));
}

#[test]
fn missing_position_field_is_malformed() {
    let err = load("v 0 0 0\nv 1 2\n").unwrap_err();

    assert_eq!(err.line(), Some(2));
    assert!(matches!(err, MeshLoadError::MalformedRecord { .. }));
    assert!(err.to_string().contains("v 1 2"));
}

#[test]
fn unknown_records_are_ignored() {
    let mesh = load(
        "# teapot\nmtllib teapot.mtl\no Teapot\nv 0 0 0\nvt 0 0\nv 1 0 0\nv 0 1 0\n\
         g body\nusemtl glaze\ns 1\nf 1/1 2/1 3/1\n",
    )
    .unwrap();

    assert_eq!(mesh.vertex_count(), 3);
}

#[test]
fn load_mesh_from_file_sets_name() {
    let path = write_temp_obj("mesh_viewer_fixture", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
    let mesh = load_mesh(&path, &LoadOptions::default());
    fs::remove_file(&path).unwrap();

    let mesh = mesh.unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(
        mesh.name.as_deref(),
        path.file_stem().and_then(|s| s.to_str())
    );
}

#[test]
fn viewer_renders_loaded_model_and_cube() {
    let path = write_temp_obj(
        "mesh_viewer_viewer",
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
    );

    let mut backend = HeadlessBackend::new();
    {
        let mut viewer = Viewer::new(&mut backend);
        let loaded = viewer.load_model(&path, &LoadOptions::legacy(), Matrix4::identity());
        fs::remove_file(&path).unwrap();
        loaded.unwrap();
        viewer.add_cube(Matrix4::identity()).unwrap();

        assert_eq!(viewer.render_frame().unwrap(), 2);
        let triangles: Vec<usize> = viewer
            .backend()
            .draw_calls()
            .iter()
            .map(|draw| draw.triangles)
            .collect();
        assert_eq!(triangles, vec![2, 12]);
    }

    assert_eq!(backend.live_meshes(), 0);
}
