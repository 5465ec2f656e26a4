//! Grid count and per-grid extents: the first two records of a file.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::config::Dimensionality;
use crate::error::{Plot3dError, Result};
use crate::record::{RecordReader, RecordWriter};

/// Upper bound on a plausible grid count. Anything larger almost always comes
/// from decoding the header with the wrong byte order or integer width.
pub const MAX_GRIDS: usize = 1_000_000;

/// Most integers accepted in the grid-count record. Writers emit one.
pub const MAX_HEADER_INTS: usize = 16;

/// Per-axis point counts of one structured grid, in `i, j[, k]` order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDescriptor {
    extents: Vec<usize>,
}

impl GridDescriptor {
    /// Build a descriptor from 2 or 3 extents, each at least 1.
    pub fn new(extents: &[usize]) -> Result<Self> {
        if Dimensionality::from_ndim(extents.len()).is_none() {
            return Err(Plot3dError::InvalidExtents {
                extents: extents.to_vec(),
                reason: "expected 2 or 3 axes",
            });
        }
        if extents.iter().any(|&n| n == 0) {
            return Err(Plot3dError::InvalidExtents {
                extents: extents.to_vec(),
                reason: "every extent must be positive",
            });
        }
        Ok(Self {
            extents: extents.to_vec(),
        })
    }

    pub fn new_2d(imax: usize, jmax: usize) -> Result<Self> {
        Self::new(&[imax, jmax])
    }

    pub fn new_3d(imax: usize, jmax: usize, kmax: usize) -> Result<Self> {
        Self::new(&[imax, jmax, kmax])
    }

    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    pub fn dimensionality(&self) -> Dimensionality {
        match self.extents.len() {
            2 => Dimensionality::Two,
            _ => Dimensionality::Three,
        }
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.extents.iter().product()
    }

    /// `prod(extents) * nvar`, or `None` on overflow.
    pub fn checked_len(&self, nvar: usize) -> Option<usize> {
        self.extents
            .iter()
            .try_fold(nvar, |acc, &n| acc.checked_mul(n))
    }

    /// Shape of the payload array: `(extents..., nvar)`.
    pub fn payload_shape(&self, nvar: usize) -> Vec<usize> {
        let mut shape = self.extents.clone();
        shape.push(nvar);
        shape
    }
}

/// Read the grid-count record and return its first element.
///
/// This is the first record of the file, so its length marker is also where a
/// wrong byte order or header width shows up first.
pub fn decode_header<R: Read>(reader: &mut RecordReader<R>) -> Result<usize> {
    let (record, offset) = (reader.record_index(), reader.offset());
    let ints = reader.read_ints_bounded(MAX_HEADER_INTS)?;
    let mismatch = |reason: String| Plot3dError::ConfigurationMismatch {
        record,
        offset,
        reason,
    };
    let first = *ints
        .first()
        .ok_or_else(|| mismatch("grid count record is empty".into()))?;
    if first < 1 || first as u64 > MAX_GRIDS as u64 {
        return Err(mismatch(format!("implausible grid count {first}")));
    }
    Ok(first as usize)
}

/// Read the dims record: `grid_count * ndim` integers, grid-major, axis-minor.
pub fn decode_dims<R: Read>(
    reader: &mut RecordReader<R>,
    grid_count: usize,
    dimensionality: Dimensionality,
) -> Result<Vec<GridDescriptor>> {
    let (record, offset) = (reader.record_index(), reader.offset());
    let ndim = dimensionality.ndim();
    let ints = reader.read_ints()?;
    let mismatch = |reason: String| Plot3dError::ConfigurationMismatch {
        record,
        offset,
        reason,
    };
    if ints.len() != grid_count * ndim {
        return Err(mismatch(format!(
            "dims record holds {} integers, expected {grid_count} grids x {ndim} axes",
            ints.len()
        )));
    }

    let mut dims = Vec::with_capacity(grid_count);
    for (g, chunk) in ints.chunks_exact(ndim).enumerate() {
        if let Some(bad) = chunk.iter().find(|&&n| n < 1) {
            return Err(mismatch(format!("grid {g} has non-positive extent {bad}")));
        }
        let extents: Vec<usize> = chunk.iter().map(|&n| n as usize).collect();
        let descriptor = GridDescriptor { extents };
        if descriptor.checked_len(dimensionality.nvar()).is_none() {
            return Err(mismatch(format!(
                "grid {g} extents {:?} overflow the addressable size",
                descriptor.extents
            )));
        }
        dims.push(descriptor);
    }
    Ok(dims)
}

pub fn encode_header<W: Write>(writer: &mut RecordWriter<W>, grid_count: usize) -> Result<()> {
    writer.write_ints(&[grid_count as i64])
}

/// Exact inverse of [`decode_dims`].
pub fn encode_dims<W: Write>(writer: &mut RecordWriter<W>, dims: &[GridDescriptor]) -> Result<()> {
    let flat: Vec<i64> = dims
        .iter()
        .flat_map(|d| d.extents.iter().map(|&n| n as i64))
        .collect();
    writer.write_ints(&flat)
}
