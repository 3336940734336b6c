/// End-to-end loading from files and text.
use std::io::Write;

use approx::assert_relative_eq;
use nalgebra::{Vector3, Vector4};
use objmesh_core::{load, load_from_text, load_with, IndexTriplet, ObjError, ParseOptions};

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

const TEXTURED_QUAD: &str = "\
# quad with uv and normals
o quad
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl none
s off
f 1/1/1 2/2/1 3/3/1 4/4/1
";

fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_triangle_scenario() {
    let mut mesh = load_from_text(TRIANGLE).unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
    let points: Vec<IndexTriplet> = mesh.face(0).unwrap().iter().copied().collect();
    assert_eq!(
        points,
        vec![
            IndexTriplet::new(3, 0, 0),
            IndexTriplet::new(2, 0, 0),
            IndexTriplet::new(1, 0, 0),
        ]
    );

    mesh.compute_normals().unwrap();
    for normal in mesh.normals() {
        assert_relative_eq!(*normal, Vector3::new(0.0, 0.0, 1.0));
    }
}

#[test]
fn test_textured_quad_ignores_other_directives() {
    let mesh = load_from_text(TEXTURED_QUAD).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.texcoord_count(), 4);
    assert_eq!(mesh.normal_count(), 1);
    assert_eq!(mesh.face_count(), 1);

    let face = mesh.face(0).unwrap();
    assert_eq!(face.len(), 4);
    let first = face.first().unwrap();
    assert_eq!(*first, IndexTriplet::new(4, 4, 1));
    assert_eq!(mesh.texcoord_of(first), Some(&Vector3::new(0.0, 1.0, 0.0)));
    assert_eq!(mesh.normal_of(first), Some(&Vector3::new(0.0, 0.0, 1.0)));
}

#[test]
fn test_load_from_file() {
    let file = write_temp(TEXTURED_QUAD.as_bytes());
    let from_file = load(file.path()).unwrap();
    let from_text = load_from_text(TEXTURED_QUAD).unwrap();
    assert_eq!(from_file, from_text);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.obj");

    let err = load(&path).unwrap_err();
    match err {
        ObjError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_file() {
    let file = write_temp(b"");
    assert!(matches!(load(file.path()), Err(ObjError::EmptyInput)));
}

#[test]
fn test_invalid_utf8() {
    let file = write_temp(b"v 1 2 3\n# \xff\xfe\nv 4 5 6\n");

    let mesh = load(file.path()).unwrap();
    assert_eq!(mesh.vertex_count(), 2);

    let err = load_with(file.path(), &ParseOptions::strict()).unwrap_err();
    assert!(matches!(err, ObjError::InvalidUtf8(_)));
}

#[test]
fn test_strict_error_reports_line() {
    let err = load_from_text_strict("v 0 0 0\nv 1 0 0\nvt 0.5 oops\n");
    assert_eq!(
        err.to_string(),
        "line 3: malformed texture coordinate record: expected a number, found \"oops\""
    );
}

fn load_from_text_strict(text: &str) -> ObjError {
    objmesh_core::load_from_text_with(text, &ParseOptions::strict()).unwrap_err()
}

#[test]
fn test_transform_pipeline() {
    let mut mesh = load_from_text(TRIANGLE).unwrap();
    mesh.rotate(0.0, 0.0, std::f32::consts::PI);
    mesh.translate(1.0, 1.0, 0.0);
    mesh.scale(2.0);

    let expected = [
        Vector4::new(2.0, 2.0, 0.0, 1.0),
        Vector4::new(0.0, 2.0, 0.0, 1.0),
        Vector4::new(2.0, 0.0, 0.0, 1.0),
    ];
    for (vertex, expected) in mesh.vertices().iter().zip(expected.iter()) {
        assert_relative_eq!(vertex, expected, epsilon = 1e-5);
    }
}
