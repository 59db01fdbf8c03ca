//! Cell kinds and connectivity blocks.
//!
//! The set of kinds is closed: names coming from files or callers are resolved
//! through [`CellKind::from_name`] so unknown kinds are rejected at the boundary.

use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    Vertex,
    Line,
    Triangle,
    Quad,
    Tetra,
    Hexahedron,
}

impl CellKind {
    pub const ALL: [CellKind; 6] = [
        CellKind::Vertex,
        CellKind::Line,
        CellKind::Triangle,
        CellKind::Quad,
        CellKind::Tetra,
        CellKind::Hexahedron,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CellKind::Vertex => "vertex",
            CellKind::Line => "line",
            CellKind::Triangle => "triangle",
            CellKind::Quad => "quad",
            CellKind::Tetra => "tetra",
            CellKind::Hexahedron => "hexahedron",
        }
    }

    /// Number of point references per cell.
    pub fn num_nodes(self) -> usize {
        match self {
            CellKind::Vertex => 1,
            CellKind::Line => 2,
            CellKind::Triangle => 3,
            CellKind::Quad | CellKind::Tetra => 4,
            CellKind::Hexahedron => 8,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::UnsupportedCellKind(name.to_string()))
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Connectivity for a single cell kind, indices are 0-based into the mesh points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellBlock {
    Vertex(Vec<[usize; 1]>),
    Line(Vec<[usize; 2]>),
    Triangle(Vec<[usize; 3]>),
    Quad(Vec<[usize; 4]>),
    Tetra(Vec<[usize; 4]>),
    Hexahedron(Vec<[usize; 8]>),
}

impl CellBlock {
    pub fn kind(&self) -> CellKind {
        match self {
            CellBlock::Vertex(_) => CellKind::Vertex,
            CellBlock::Line(_) => CellKind::Line,
            CellBlock::Triangle(_) => CellKind::Triangle,
            CellBlock::Quad(_) => CellKind::Quad,
            CellBlock::Tetra(_) => CellKind::Tetra,
            CellBlock::Hexahedron(_) => CellKind::Hexahedron,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CellBlock::Vertex(c) => c.len(),
            CellBlock::Line(c) => c.len(),
            CellBlock::Triangle(c) => c.len(),
            CellBlock::Quad(c) => c.len(),
            CellBlock::Tetra(c) => c.len(),
            CellBlock::Hexahedron(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest point index referenced by the block.
    pub fn max_index(&self) -> Option<usize> {
        fn max_of<const N: usize>(cells: &[[usize; N]]) -> Option<usize> {
            cells.iter().flat_map(|c| c.iter().copied()).max()
        }

        match self {
            CellBlock::Vertex(c) => max_of(c),
            CellBlock::Line(c) => max_of(c),
            CellBlock::Triangle(c) => max_of(c),
            CellBlock::Quad(c) => max_of(c),
            CellBlock::Tetra(c) => max_of(c),
            CellBlock::Hexahedron(c) => max_of(c),
        }
    }

    /// Appends the cells of `other` to `self`. Both blocks must be the same kind.
    pub(crate) fn extend_from(&mut self, other: CellBlock) -> Result<()> {
        match (self, other) {
            (CellBlock::Vertex(a), CellBlock::Vertex(b)) => a.extend(b),
            (CellBlock::Line(a), CellBlock::Line(b)) => a.extend(b),
            (CellBlock::Triangle(a), CellBlock::Triangle(b)) => a.extend(b),
            (CellBlock::Quad(a), CellBlock::Quad(b)) => a.extend(b),
            (CellBlock::Tetra(a), CellBlock::Tetra(b)) => a.extend(b),
            (CellBlock::Hexahedron(a), CellBlock::Hexahedron(b)) => a.extend(b),
            (a, b) => {
                return Err(Error::InvalidInput(format!(
                    "Cannot merge {} cells into a {} block",
                    b.kind(),
                    a.kind()
                )))
            }
        }
        Ok(())
    }
}
