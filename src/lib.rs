pub use tria_core as core;
pub use tria_io as io;

pub use tria_core::{CellBlock, CellKind, Error, Mesh, Points, Result};
pub use tria_io::{read_gptria_file, write_gptria_file, ReadMode, ReadOptions, WriteOptions};
