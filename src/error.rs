use std::io;

/// Errors raised while decoding, encoding or accessing a PLOT3D function file.
///
/// `record` is the zero-based index of the unformatted record being processed
/// and `offset` is the byte offset into the stream where that record started.
#[derive(thiserror::Error, Debug)]
pub enum Plot3dError {
    #[error("An io error occured: `{0}`")]
    Io(#[from] io::Error),
    #[error("record {record} at byte {offset} truncated: expected {expected} bytes, found {found}")]
    Truncated {
        record: usize,
        offset: u64,
        expected: u64,
        found: u64,
    },
    #[error("corrupt record {record} at byte {offset}: prefix {prefix} != suffix {suffix}")]
    CorruptRecord {
        record: usize,
        offset: u64,
        prefix: u64,
        suffix: u64,
    },
    #[error("record {record} for grid {grid} holds {found} values, expected {expected}")]
    ShapeMismatch {
        record: usize,
        grid: usize,
        expected: usize,
        found: usize,
    },
    #[error("could not find variable {var} on grid {grid} ({ngrids} grids, {nvar} variables)")]
    Index {
        grid: usize,
        var: usize,
        ngrids: usize,
        nvar: usize,
    },
    #[error("could not find grid {grid} ({ngrids} grids)")]
    GridIndex { grid: usize, ngrids: usize },
    #[error("variable {var} on grid {grid} has shape {expected:?}, got data of shape {found:?}")]
    VariableShape {
        grid: usize,
        var: usize,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("grid extents {extents:?} are invalid: {reason}")]
    InvalidExtents {
        extents: Vec<usize>,
        reason: &'static str,
    },
    #[error("record {record} at byte {offset} does not match the configured layout: {reason}")]
    ConfigurationMismatch {
        record: usize,
        offset: u64,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Plot3dError>;
