use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::config::HeaderWidth;

/// Byte order used for every multi-byte field in a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub fn read_u32(buf: &[u8], e: Endian) -> u32 {
        match e {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }
    pub fn write_u32(buf: &mut [u8], v: u32, e: Endian) {
        match e {
            Endian::Little => LittleEndian::write_u32(buf, v),
            Endian::Big => BigEndian::write_u32(buf, v),
        }
    }
    pub fn read_u64(buf: &[u8], e: Endian) -> u64 {
        match e {
            Endian::Little => LittleEndian::read_u64(buf),
            Endian::Big => BigEndian::read_u64(buf),
        }
    }
    pub fn write_u64(buf: &mut [u8], v: u64, e: Endian) {
        match e {
            Endian::Little => LittleEndian::write_u64(buf, v),
            Endian::Big => BigEndian::write_u64(buf, v),
        }
    }

    /// Record length marker of `width` bytes.
    pub fn read_marker(buf: &[u8], width: HeaderWidth, e: Endian) -> u64 {
        match width {
            HeaderWidth::Four => Self::read_u32(buf, e) as u64,
            HeaderWidth::Eight => Self::read_u64(buf, e),
        }
    }
    pub fn write_marker(buf: &mut [u8], v: u64, width: HeaderWidth, e: Endian) {
        match width {
            HeaderWidth::Four => Self::write_u32(buf, v as u32, e),
            HeaderWidth::Eight => Self::write_u64(buf, v, e),
        }
    }

    /// Signed Fortran INTEGER of `width` bytes.
    pub fn read_int(buf: &[u8], width: HeaderWidth, e: Endian) -> i64 {
        match width {
            HeaderWidth::Four => Self::read_u32(buf, e) as i32 as i64,
            HeaderWidth::Eight => Self::read_u64(buf, e) as i64,
        }
    }
    pub fn write_int(buf: &mut [u8], v: i64, width: HeaderWidth, e: Endian) {
        match width {
            HeaderWidth::Four => Self::write_u32(buf, v as i32 as u32, e),
            HeaderWidth::Eight => Self::write_u64(buf, v as u64, e),
        }
    }

    pub fn read_f32_slice(buf: &[u8], e: Endian) -> Vec<f32> {
        buf.chunks_exact(4)
            .map(|chunk| f32::from_bits(Self::read_u32(chunk, e)))
            .collect()
    }
    pub fn write_f32_slice(v: &[f32], e: Endian) -> Vec<u8> {
        let mut out = vec![0u8; v.len() * 4];
        for (chunk, f) in out.chunks_exact_mut(4).zip(v) {
            Self::write_u32(chunk, f.to_bits(), e);
        }
        out
    }
    pub fn read_f64_slice(buf: &[u8], e: Endian) -> Vec<f64> {
        buf.chunks_exact(8)
            .map(|chunk| f64::from_bits(Self::read_u64(chunk, e)))
            .collect()
    }
    pub fn write_f64_slice(v: &[f64], e: Endian) -> Vec<u8> {
        let mut out = vec![0u8; v.len() * 8];
        for (chunk, f) in out.chunks_exact_mut(8).zip(v) {
            Self::write_u64(chunk, f.to_bits(), e);
        }
        out
    }
}
