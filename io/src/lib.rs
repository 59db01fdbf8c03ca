//! Mesh File I/O Module
//!
//! Reads and writes triangular surface meshes in the GridPro `tria` text format.
//! Streams are handled through [`read_gptria`] / [`write_gptria`]; the
//! `*_file` variants open and close the file around them.

pub mod gptria;
pub mod options;

pub use gptria::{
    is_gptria_path, read_gptria, read_gptria_file, write_gptria, write_gptria_file,
    write_gptria_mesh, WriteSummary, GPTRIA_EXTENSIONS,
};
pub use options::{FloatFormat, ReadMode, ReadOptions, WriteOptions};

pub use tria_core::{Error, Result};
