use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::config::FloatPrecision;
use crate::error::{Plot3dError, Result};
use crate::record::{RecordReader, RecordWriter};

/// Free-stream conditions stored ahead of each grid's payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeStreamScalars {
    pub mach: f64,
    pub alpha: f64,
    pub reynolds: f64,
    pub time: f64,
}

impl FreeStreamScalars {
    pub fn new(mach: f64, alpha: f64, reynolds: f64, time: f64) -> Self {
        Self {
            mach,
            alpha,
            reynolds,
            time,
        }
    }

    /// On-disk order: mach, alpha, reynolds, time.
    pub fn to_array(&self) -> [f64; 4] {
        [self.mach, self.alpha, self.reynolds, self.time]
    }

    pub fn from_array(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Read the 4-value scalar record that precedes grid `grid`'s payload.
pub fn decode_scalars<R: Read>(
    reader: &mut RecordReader<R>,
    grid: usize,
    precision: FloatPrecision,
) -> Result<FreeStreamScalars> {
    let (record, offset) = (reader.record_index(), reader.offset());
    let values = reader.read_reals(precision)?;
    // half or double the expected count: the precision is wrong
    if values.len() == 2 || values.len() == 8 {
        return Err(Plot3dError::ConfigurationMismatch {
            record,
            offset,
            reason: format!(
                "scalar record holds {} values at {}-byte precision, expected 4",
                values.len(),
                precision.bytes()
            ),
        });
    }
    let values: [f64; 4] = values
        .as_slice()
        .try_into()
        .map_err(|_| Plot3dError::ShapeMismatch {
            record,
            grid,
            expected: 4,
            found: values.len(),
        })?;
    Ok(FreeStreamScalars::from_array(values))
}

pub fn encode_scalars<W: Write>(
    writer: &mut RecordWriter<W>,
    scalars: &FreeStreamScalars,
    precision: FloatPrecision,
) -> Result<()> {
    writer.write_reals(&scalars.to_array(), precision)
}
