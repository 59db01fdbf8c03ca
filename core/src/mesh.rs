//! Mesh container: a point array plus connectivity blocks keyed by cell kind.

use crate::cells::{CellBlock, CellKind};
use crate::{Error, Result};
use nalgebra::{Point2, Point3};
use std::borrow::Cow;

/// Point coordinates, either planar or spatial.
#[derive(Debug, Clone, PartialEq)]
pub enum Points {
    Planar(Vec<Point2<f64>>),
    Spatial(Vec<Point3<f64>>),
}

impl Points {
    pub fn len(&self) -> usize {
        match self {
            Points::Planar(p) => p.len(),
            Points::Spatial(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dim(&self) -> usize {
        match self {
            Points::Planar(_) => 2,
            Points::Spatial(_) => 3,
        }
    }

    pub fn is_planar(&self) -> bool {
        matches!(self, Points::Planar(_))
    }

    /// Spatial view of the points. Planar points are copied with `z = 0`;
    /// the points held by `self` are left untouched.
    pub fn to_spatial(&self) -> Cow<'_, [Point3<f64>]> {
        match self {
            Points::Spatial(p) => Cow::Borrowed(p.as_slice()),
            Points::Planar(p) => Cow::Owned(p.iter().map(|q| Point3::new(q.x, q.y, 0.0)).collect()),
        }
    }

    /// Builds points from raw coordinate rows, all of which must have 2 or 3 components.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dim = rows.first().map_or(3, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(Error::InvalidInput(format!(
                "Point {} has {} coordinates, expected {}",
                i,
                row.len(),
                dim
            )));
        }

        match dim {
            2 => Ok(Points::Planar(rows.iter().map(|r| Point2::new(r[0], r[1])).collect())),
            3 => Ok(Points::Spatial(
                rows.iter().map(|r| Point3::new(r[0], r[1], r[2])).collect(),
            )),
            d => Err(Error::InvalidInput(format!(
                "Points must have 2 or 3 coordinates, got {}",
                d
            ))),
        }
    }
}

impl Default for Points {
    fn default() -> Self {
        Points::Spatial(Vec::new())
    }
}

impl From<Vec<Point3<f64>>> for Points {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Points::Spatial(points)
    }
}

impl From<Vec<Point2<f64>>> for Points {
    fn from(points: Vec<Point2<f64>>) -> Self {
        Points::Planar(points)
    }
}

/// Points plus at most one connectivity block per cell kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub points: Points,
    cells: Vec<CellBlock>,
}

impl Mesh {
    pub fn new(points: impl Into<Points>) -> Self {
        Self {
            points: points.into(),
            cells: Vec::new(),
        }
    }

    pub fn with_cells(points: impl Into<Points>, cells: Vec<CellBlock>) -> Result<Self> {
        let mut mesh = Self::new(points);
        for block in cells {
            mesh.add_cells(block)?;
        }
        Ok(mesh)
    }

    /// Spatial mesh from raw reader output. No triangle block is added when
    /// `triangles` is `None` or empty.
    ///
    /// Unlike [`Mesh::add_cells`], triangle indices are taken as-is and not
    /// checked against the point count. Output of a lenient read may reference
    /// points past the end; use [`Mesh::with_cells`] to get a checked mesh.
    pub fn from_triangles(vertices: Vec<Point3<f64>>, triangles: Option<Vec<[usize; 3]>>) -> Self {
        let mut mesh = Self::new(vertices);
        if let Some(tris) = triangles.filter(|t| !t.is_empty()) {
            mesh.cells.push(CellBlock::Triangle(tris));
        }
        mesh
    }

    /// Adds a block, merging into an existing block of the same kind.
    /// Empty blocks are ignored.
    pub fn add_cells(&mut self, block: CellBlock) -> Result<()> {
        if block.is_empty() {
            return Ok(());
        }
        if let Some(max) = block.max_index() {
            if max >= self.points.len() {
                return Err(Error::InvalidInput(format!(
                    "{} cells reference point {} but the mesh has {} points",
                    block.kind(),
                    max,
                    self.points.len()
                )));
            }
        }

        match self.cells.iter_mut().find(|b| b.kind() == block.kind()) {
            Some(existing) => existing.extend_from(block),
            None => {
                self.cells.push(block);
                Ok(())
            }
        }
    }

    pub fn cells(&self) -> &[CellBlock] {
        &self.cells
    }

    pub fn cell_kinds(&self) -> impl Iterator<Item = CellKind> + '_ {
        self.cells.iter().map(CellBlock::kind)
    }

    pub fn cells_of(&self, kind: CellKind) -> Option<&CellBlock> {
        self.cells.iter().find(|b| b.kind() == kind)
    }

    /// Triangle connectivity, `None` when the mesh has no triangle block.
    pub fn triangles(&self) -> Option<&[[usize; 3]]> {
        self.cells.iter().find_map(|b| match b {
            CellBlock::Triangle(t) => Some(t.as_slice()),
            _ => None,
        })
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.iter().map(CellBlock::len).sum()
    }
}
