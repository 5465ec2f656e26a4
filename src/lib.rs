//! Reader and writer for multi-block PLOT3D function (`.q`) files.
//!
//! A file is a sequence of Fortran unformatted records:
//!
//! 1. `[ngrids]`
//! 2. `[Ni, Nj, (Nk,) ...]` for every grid
//! 3. per grid: `[mach, alpha, reynolds, time]`, then the flow data
//!
//! Byte order, integer width and real precision are not stored in the file and
//! must be supplied through [`Plot3dConfig`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod file;
pub mod geometry;
pub mod grid;
pub mod payload;
pub mod read;
pub mod record;
pub mod scalars;
pub mod utils;
pub mod write;

pub use config::{Dimensionality, FloatPrecision, HeaderWidth, Plot3dConfig};
pub use dataset::{DatasetSummary, GridSummary, MultiBlockDataset};
pub use error::{Plot3dError, Result};
pub use file::Plot3dFile;
pub use geometry::GridDescriptor;
pub use grid::Grid;
pub use payload::ColumnMajor;
pub use read::{read_plot3d_q, read_plot3d_q_from};
pub use record::{RecordReader, RecordWriter};
pub use scalars::FreeStreamScalars;
pub use utils::Endian;
pub use write::{write_plot3d_q, write_plot3d_q_to};

pub use ndarray;
