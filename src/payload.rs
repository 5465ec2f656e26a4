//! Grid payload codec and the column-major reshape.
//!
//! A payload record stores `prod(extents) * nvar` reals with `i` varying
//! fastest and the variable index slowest:
//!
//! ```text
//! 3-D: offset = i + Ni * (j + Nj * (k + Nk * v))
//! 2-D: offset = i + Ni * (j + Nj * v)
//! ```
//!
//! In memory each grid is an `ArrayD<f64>` of shape `(extents..., nvar)`.
//! Elements are placed through [`ColumnMajor`] rather than by reinterpreting
//! the flat buffer, so the mapping never depends on the array's own layout.

use std::io::{Read, Write};

use ndarray::{ArrayD, Dimension, IxDyn};

use crate::config::FloatPrecision;
use crate::error::{Plot3dError, Result};
use crate::geometry::GridDescriptor;
use crate::record::{RecordReader, RecordWriter};

/// Stride table for a column-major (first axis fastest) layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMajor {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl ColumnMajor {
    pub fn new(shape: &[usize]) -> Self {
        let mut strides = Vec::with_capacity(shape.len());
        let mut stride = 1;
        for &n in shape {
            strides.push(stride);
            stride *= n;
        }
        Self {
            shape: shape.to_vec(),
            strides,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat offset of multi-index `idx`.
    #[inline]
    pub fn offset(&self, idx: &[usize]) -> usize {
        debug_assert_eq!(idx.len(), self.shape.len());
        debug_assert!(idx.iter().zip(&self.shape).all(|(i, n)| i < n));
        idx.iter().zip(&self.strides).map(|(i, s)| i * s).sum()
    }
}

/// Read one grid's payload record and reshape it to `(extents..., nvar)`.
pub fn decode_payload<R: Read>(
    reader: &mut RecordReader<R>,
    grid: usize,
    descriptor: &GridDescriptor,
    nvar: usize,
    precision: FloatPrecision,
) -> Result<ArrayD<f64>> {
    let record = reader.record_index();
    let flat = reader.read_reals(precision)?;
    let shape = descriptor.payload_shape(nvar);
    let layout = ColumnMajor::new(&shape);
    if flat.len() != layout.len() {
        return Err(Plot3dError::ShapeMismatch {
            record,
            grid,
            expected: layout.len(),
            found: flat.len(),
        });
    }
    Ok(ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        flat[layout.offset(ix.slice())]
    }))
}

/// Flatten `data` column-major (`i` fastest, variable slowest) into one record.
pub fn encode_payload<W: Write>(
    writer: &mut RecordWriter<W>,
    data: &ArrayD<f64>,
    precision: FloatPrecision,
) -> Result<()> {
    writer.write_reals(&flatten(data), precision)
}

pub(crate) fn flatten(data: &ArrayD<f64>) -> Vec<f64> {
    let layout = ColumnMajor::new(data.shape());
    let mut flat = vec![0.0; layout.len()];
    for (ix, &v) in data.indexed_iter() {
        flat[layout.offset(ix.slice())] = v;
    }
    flat
}
