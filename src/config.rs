use serde::{Deserialize, Serialize};

use crate::utils::Endian;

/// Width of record length markers and of header integers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderWidth {
    Four,
    Eight,
}

impl HeaderWidth {
    pub fn bytes(self) -> usize {
        match self {
            HeaderWidth::Four => 4,
            HeaderWidth::Eight => 8,
        }
    }
}

/// On-disk width of floating point values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatPrecision {
    F32,
    F64,
}

impl FloatPrecision {
    pub fn bytes(self) -> usize {
        match self {
            FloatPrecision::F32 => 4,
            FloatPrecision::F64 => 8,
        }
    }
}

/// Spatial dimensionality of every grid in a file.
///
/// 2-D files carry 4 flow variables per point, 3-D files carry 5.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensionality {
    Two,
    Three,
}

impl Dimensionality {
    #[inline]
    pub fn ndim(self) -> usize {
        match self {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }

    #[inline]
    pub fn nvar(self) -> usize {
        match self {
            Dimensionality::Two => 4,
            Dimensionality::Three => 5,
        }
    }

    pub fn from_ndim(ndim: usize) -> Option<Self> {
        match ndim {
            2 => Some(Dimensionality::Two),
            3 => Some(Dimensionality::Three),
            _ => None,
        }
    }
}

/// Layout a file was written with.
///
/// The format has no self-describing marker for any of these, so the reader
/// must be given the same values the writer used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot3dConfig {
    pub endian: Endian,
    pub header_width: HeaderWidth,
    pub precision: FloatPrecision,
    pub dimensionality: Dimensionality,
}

impl Default for Plot3dConfig {
    /// Big-endian, 4-byte integers, 8-byte reals, 3-D.
    fn default() -> Self {
        Self {
            endian: Endian::Big,
            header_width: HeaderWidth::Four,
            precision: FloatPrecision::F64,
            dimensionality: Dimensionality::Three,
        }
    }
}

impl Plot3dConfig {
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    pub fn with_header_width(mut self, header_width: HeaderWidth) -> Self {
        self.header_width = header_width;
        self
    }

    pub fn with_precision(mut self, precision: FloatPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_dimensionality(mut self, dimensionality: Dimensionality) -> Self {
        self.dimensionality = dimensionality;
        self
    }

    #[inline]
    pub fn nvar(&self) -> usize {
        self.dimensionality.nvar()
    }
}
