use nalgebra::{Point2, Point3};
use std::fs;
use tempfile::tempdir;
use tria_core::{CellBlock, CellKind, Error, Mesh};
use tria_io::{read_gptria_file, write_gptria_file, FloatFormat, ReadOptions, WriteOptions};

fn tetra_surface() -> Mesh {
    Mesh::with_cells(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ],
        vec![CellBlock::Triangle(vec![
            [0, 2, 1],
            [0, 1, 3],
            [1, 2, 3],
            [0, 3, 2],
        ])],
    )
    .unwrap()
}

#[test]
fn test_file_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tetra.tria");
    let mesh = tetra_surface();

    // 1. Write
    let summary = write_gptria_file(&path, &mesh, &WriteOptions::default()).unwrap();
    assert_eq!(summary.num_vertices, 4);
    assert_eq!(summary.num_triangles, 4);

    // 2. File lines carry 1-based indices and a 0 group tag
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "4");
    assert_eq!(lines[5], "4");
    assert_eq!(lines[6], "1 3 2 0");
    assert_eq!(lines[9], "1 4 3 0");

    // 3. Read back
    let back = read_gptria_file(&path, &ReadOptions::default()).unwrap();
    assert_eq!(back, mesh);
}

#[test]
fn test_file_empty_mesh() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.tria");

    write_gptria_file(&path, &Mesh::default(), &WriteOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "0\n0\n");

    let back = read_gptria_file(&path, &ReadOptions::default()).unwrap();
    assert_eq!(back.num_points(), 0);
    assert!(back.triangles().is_none());
    assert_eq!(back.cell_kinds().count(), 0);
}

#[test]
fn test_file_planar_upgrade() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("planar.tria");
    let mesh = Mesh::with_cells(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ],
        vec![CellBlock::Triangle(vec![[0, 1, 2]])],
    )
    .unwrap();

    let summary = write_gptria_file(&path, &mesh, &WriteOptions::default()).unwrap();
    assert!(summary.padded_planar_points);
    assert!(mesh.points.is_planar());

    let back = read_gptria_file(&path, &ReadOptions::default()).unwrap();
    assert_eq!(back.points.dim(), 3);
    assert_eq!(back.points.to_spatial()[1], Point3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_file_rejects_non_triangle_mesh_before_creating_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quad.tria");
    let mesh = Mesh::with_cells(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![CellBlock::Quad(vec![[0, 1, 2, 3]])],
    )
    .unwrap();
    assert_eq!(mesh.cell_kinds().next(), Some(CellKind::Quad));

    let err = write_gptria_file(&path, &mesh, &WriteOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedCellKind(_)));
    assert!(!path.exists());
}

#[test]
fn test_file_missing() {
    let res = read_gptria_file("/non/existent/mesh.tria", &ReadOptions::default());
    assert!(matches!(res, Err(Error::Io(_))));
}

#[test]
fn test_file_with_comments_from_other_tools() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("commented.tria");
    fs::write(
        &path,
        "# exported surface\n3\n# vertices\n0.5 0 0\n1.5 0 0\n\n0.5 1 0\n# faces\n1\n3 2 1 0\n",
    )
    .unwrap();

    let mesh = read_gptria_file(&path, &ReadOptions::default()).unwrap();
    assert_eq!(mesh.num_points(), 3);
    assert_eq!(mesh.triangles().unwrap(), &[[2, 1, 0]]);
}

#[test]
fn test_file_lenient_truncated() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("short.tria");
    fs::write(&path, "3\n0 0 0\n1 0 0\n0 1 0\n3\n1 2 3 0\n").unwrap();

    assert!(read_gptria_file(&path, &ReadOptions::strict()).is_err());

    let mesh = read_gptria_file(&path, &ReadOptions::lenient()).unwrap();
    assert_eq!(mesh.triangles().map(<[_]>::len), Some(1));
}

#[test]
fn test_file_lenient_keeps_unchecked_references() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dangling.tria");
    fs::write(&path, "1\n0 0 0\n1\n1 2 3 0\n").unwrap();

    // 1. Strict read rejects the dangling references
    let err = read_gptria_file(&path, &ReadOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::Format { line: 4, .. }));

    // 2. Lenient read keeps them as-is
    let mesh = read_gptria_file(&path, &ReadOptions::lenient()).unwrap();
    assert_eq!(mesh.triangles().unwrap(), &[[0, 1, 2]]);

    // 3. A checked mesh refuses the same cells, and so does the writer
    let checked = Mesh::with_cells(
        mesh.points.clone(),
        vec![CellBlock::Triangle(vec![[0, 1, 2]])],
    );
    assert!(matches!(checked, Err(Error::InvalidInput(_))));

    let out = dir.path().join("dangling_out.tria");
    let err = write_gptria_file(&out, &mesh, &WriteOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(!out.exists());
}

#[test]
fn test_file_fixed_precision() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fixed.tria");
    let mesh = Mesh::new(vec![Point3::new(1.0 / 3.0, 0.0, 2.0)]);
    let options = WriteOptions::default().with_float_format(FloatFormat::Fixed(4));

    write_gptria_file(&path, &mesh, &options).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "1\n0.3333 0.0000 2.0000\n0\n");

    let back = read_gptria_file(&path, &ReadOptions::default()).unwrap();
    assert!((back.points.to_spatial()[0].x - 1.0 / 3.0).abs() < 1e-4);
}
