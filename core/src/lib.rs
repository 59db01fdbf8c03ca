//! Core types shared by the tria crates: the error type and the mesh container.

pub mod cells;
pub mod mesh;

pub use cells::{CellBlock, CellKind};
pub use mesh::{Mesh, Points};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Unsupported cell kind: {0}")]
    UnsupportedCellKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }
}
