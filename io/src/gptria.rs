//! GridPro `tria` surface mesh I/O
//!
//! Plain-text triangular surface format used by the GridPro gridding tools:
//!
//! ```text
//! <num vertices>
//! x y z             (one line per vertex)
//! <num faces>
//! i j k group       (one line per face, 1-based vertex references)
//! ```
//!
//! Blank lines and lines starting with `#` are skipped wherever a count or a
//! data line is expected. Only a single implicit group is supported: the group
//! tag is ignored on input and always written as `0`.

use crate::options::{ReadMode, ReadOptions, WriteOptions};
use crate::Result;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tria_core::{CellKind, Error, Mesh, Points};

/// File extensions conventionally used for this format.
pub const GPTRIA_EXTENSIONS: [&str; 2] = ["tria", "gptria"];

// Upper bound on pre-allocation driven by a count line, so a corrupt count
// cannot request an arbitrarily large buffer up front.
const MAX_PREALLOC: usize = 1 << 20;

// Line number reported for errors raised at end of stream.
const END_OF_STREAM: usize = 0;

/// Counts reported back by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub num_vertices: usize,
    pub num_triangles: usize,
    /// Planar input points were written with a zero third coordinate.
    pub padded_planar_points: bool,
}

/// Forward-only line reader that skips comments and blank lines and keeps
/// track of the current 1-based line number.
struct SignificantLines<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> SignificantLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Next line that is neither blank nor a comment, trimmed, with its line number.
    fn next_significant(&mut self) -> Result<Option<(usize, String)>> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some((self.line_no, trimmed.to_string())));
        }
        Ok(None)
    }

    /// Reads a count line; only its first token is considered.
    fn read_count(&mut self, what: &str) -> Result<usize> {
        let (line_no, line) = self.next_significant()?.ok_or_else(|| {
            Error::format(
                END_OF_STREAM,
                format!("Unexpected end of stream, expected number of {what}"),
            )
        })?;

        let token = line.split_whitespace().next().unwrap_or_default();
        token.parse().map_err(|_| {
            Error::format(line_no, format!("Invalid number of {what}: '{token}'"))
        })
    }
}

/// Read a `tria` stream into vertices and triangles (0-based).
///
/// The triangle list is `None` when the stream holds no faces, so callers can
/// tell "no triangle cells" apart from an empty triangle array.
pub fn read_gptria<R: BufRead>(
    reader: R,
    options: &ReadOptions,
) -> Result<(Vec<Point3<f64>>, Option<Vec<[usize; 3]>>)> {
    let mut lines = SignificantLines::new(reader);

    let num_vertices = lines.read_count("vertices")?;
    let mut vertices = Vec::with_capacity(num_vertices.min(MAX_PREALLOC));
    while vertices.len() < num_vertices {
        let Some((line_no, line)) = lines.next_significant()? else {
            break;
        };
        vertices.push(parse_vertex(line_no, &line)?);
    }
    check_complete("vertices", num_vertices, vertices.len(), options)?;

    let num_faces = lines.read_count("faces")?;
    let mut triangles = Vec::with_capacity(num_faces.min(MAX_PREALLOC));
    while triangles.len() < num_faces {
        let Some((line_no, line)) = lines.next_significant()? else {
            break;
        };
        let face = parse_face(line_no, &line)?;
        if options.mode == ReadMode::Strict {
            if let Some(&idx) = face.iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::format(
                    line_no,
                    format!(
                        "Face references vertex {} but only {} vertices were declared",
                        idx + 1,
                        vertices.len()
                    ),
                ));
            }
        }
        triangles.push(face);
    }
    check_complete("faces", num_faces, triangles.len(), options)?;

    tracing::debug!(
        "Read tria stream: {} vertices, {} triangles",
        vertices.len(),
        triangles.len()
    );

    let triangles = if triangles.is_empty() {
        None
    } else {
        Some(triangles)
    };
    Ok((vertices, triangles))
}

fn parse_vertex(line_no: usize, line: &str) -> Result<Point3<f64>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::format(
            line_no,
            format!("Expected 3 vertex coordinates, found {}", parts.len()),
        ));
    }

    let mut coords = [0.0f64; 3];
    for (c, part) in coords.iter_mut().zip(&parts) {
        *c = part
            .parse()
            .map_err(|_| Error::format(line_no, format!("Invalid coordinate: {}", part)))?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

fn parse_face(line_no: usize, line: &str) -> Result<[usize; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(Error::format(
            line_no,
            format!(
                "Can only handle triangular faces (3 vertex indices and a group tag), found {} values",
                parts.len()
            ),
        ));
    }

    let mut face = [0usize; 3];
    for (idx, part) in face.iter_mut().zip(&parts[..3]) {
        let one_based: usize = part
            .parse()
            .map_err(|_| Error::format(line_no, format!("Invalid vertex index: {}", part)))?;
        // File indices are 1-based
        *idx = one_based.checked_sub(1).ok_or_else(|| {
            Error::format(line_no, "Vertex index 0 is invalid, indices are 1-based")
        })?;
    }
    Ok(face)
}

fn check_complete(
    what: &str,
    declared: usize,
    found: usize,
    options: &ReadOptions,
) -> Result<()> {
    if found == declared {
        return Ok(());
    }
    match options.mode {
        ReadMode::Strict => Err(Error::format(
            END_OF_STREAM,
            format!("Declared {declared} {what}, found {found} before end of stream"),
        )),
        ReadMode::Lenient => {
            tracing::warn!("tria stream declared {declared} {what} but ended after {found}");
            Ok(())
        }
    }
}

/// Write vertices and triangles (0-based) as a `tria` stream.
///
/// Planar points are written with `z = 0`; `points` itself is not modified.
/// Triangles referencing points past the end are rejected before any output.
pub fn write_gptria<W: Write>(
    writer: &mut W,
    points: &Points,
    triangles: &[[usize; 3]],
    options: &WriteOptions,
) -> Result<WriteSummary> {
    check_triangle_indices(points.len(), triangles)?;

    let padded = points.is_planar();
    if padded {
        tracing::warn!("tria requires 3D points, but 2D points given. Appending 0 third component.");
    }
    let vertices = points.to_spatial();
    let ff = options.float_format;

    writeln!(writer, "{}", vertices.len())?;
    for v in vertices.iter() {
        writeln!(writer, "{} {} {}", ff.format(v.x), ff.format(v.y), ff.format(v.z))?;
    }

    writeln!(writer, "{}", triangles.len())?;
    for [a, b, c] in triangles {
        writeln!(writer, "{} {} {} 0", a + 1, b + 1, c + 1)?;
    }

    tracing::debug!(
        "Wrote tria stream: {} vertices, {} triangles",
        vertices.len(),
        triangles.len()
    );

    Ok(WriteSummary {
        num_vertices: vertices.len(),
        num_triangles: triangles.len(),
        padded_planar_points: padded,
    })
}

/// Write a mesh as a `tria` stream. Fails before writing anything if the mesh
/// holds cells other than triangles.
pub fn write_gptria_mesh<W: Write>(
    writer: &mut W,
    mesh: &Mesh,
    options: &WriteOptions,
) -> Result<WriteSummary> {
    ensure_triangles_only(mesh)?;
    write_gptria(writer, &mesh.points, mesh.triangles().unwrap_or_default(), options)
}

fn check_triangle_indices(num_points: usize, triangles: &[[usize; 3]]) -> Result<()> {
    match triangles.iter().flatten().max() {
        Some(&max) if max >= num_points => Err(Error::InvalidInput(format!(
            "triangle cells reference point {} but the mesh has {} points",
            max, num_points
        ))),
        _ => Ok(()),
    }
}

fn ensure_triangles_only(mesh: &Mesh) -> Result<()> {
    match mesh.cell_kinds().find(|&k| k != CellKind::Triangle) {
        Some(kind) => Err(Error::UnsupportedCellKind(format!(
            "can only deal with triangular faces, found {}",
            kind
        ))),
        None => Ok(()),
    }
}

/// Read a `tria` file into a mesh.
pub fn read_gptria_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Mesh> {
    let file = File::open(path.as_ref())?;
    let (vertices, triangles) = read_gptria(BufReader::new(file), options)?;
    Ok(Mesh::from_triangles(vertices, triangles))
}

/// Write a mesh to a `tria` file.
pub fn write_gptria_file<P: AsRef<Path>>(
    path: P,
    mesh: &Mesh,
    options: &WriteOptions,
) -> Result<WriteSummary> {
    // Reject before creating or truncating the target file
    ensure_triangles_only(mesh)?;
    check_triangle_indices(mesh.num_points(), mesh.triangles().unwrap_or_default())?;

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let summary = write_gptria_mesh(&mut writer, mesh, options)?;
    writer.flush()?;
    Ok(summary)
}

/// Whether `path` carries one of the [`GPTRIA_EXTENSIONS`] (case-insensitive).
pub fn is_gptria_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| GPTRIA_EXTENSIONS.iter().any(|k| ext.eq_ignore_ascii_case(k)))
}
