//! Fortran unformatted records: `[len] payload [len]`.
//!
//! The length markers are `HeaderWidth` bytes wide and use the same byte order
//! as the payload. Every record in a PLOT3D file goes through this module.

use std::io::{Read, Write};

use crate::config::{FloatPrecision, HeaderWidth};
use crate::error::{Plot3dError, Result};
use crate::utils::Endian;

/// Reads consecutive records from a stream, tracking the record index and byte
/// offset for error reporting.
pub struct RecordReader<R> {
    inner: R,
    endian: Endian,
    header_width: HeaderWidth,
    offset: u64,
    record: usize,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R, endian: Endian, header_width: HeaderWidth) -> Self {
        Self {
            inner,
            endian,
            header_width,
            offset: 0,
            record: 0,
        }
    }

    /// Index of the next record to be read.
    pub fn record_index(&self) -> usize {
        self.record
    }

    /// Byte offset of the next record to be read.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn header_width(&self) -> HeaderWidth {
        self.header_width
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read one record and return its payload.
    ///
    /// Fails with `Truncated` if the stream ends before the prefix, payload or
    /// suffix is complete, and with `CorruptRecord` if prefix and suffix differ.
    pub fn read_record(&mut self) -> Result<Vec<u8>> {
        let start = self.offset;
        let prefix = self.read_marker(start)?;
        self.finish_record(prefix, start)
    }

    /// Read one record as a sequence of `header_width` integers.
    pub fn read_ints(&mut self) -> Result<Vec<i64>> {
        let (record, start) = (self.record, self.offset);
        let buf = self.read_record()?;
        check_alignment(buf.len(), self.header_width.bytes(), record, start)?;
        Ok(self.decode_ints(&buf))
    }

    /// Read a record expected to hold between 1 and `max_ints` integers.
    ///
    /// The length marker is checked before any payload is read. A marker
    /// outside that range almost always means the byte order or header width
    /// is wrong, and is reported as `ConfigurationMismatch`.
    pub fn read_ints_bounded(&mut self, max_ints: usize) -> Result<Vec<i64>> {
        let (record, start) = (self.record, self.offset);
        let width = self.header_width.bytes() as u64;
        let prefix = self.read_marker(start)?;
        if prefix == 0 || prefix > max_ints as u64 * width || prefix % width != 0 {
            return Err(Plot3dError::ConfigurationMismatch {
                record,
                offset: start,
                reason: format!(
                    "length marker {prefix} is not 1 to {max_ints} {width}-byte integers, \
                     check byte order and header width"
                ),
            });
        }
        let buf = self.finish_record(prefix, start)?;
        Ok(self.decode_ints(&buf))
    }

    /// Read one record as a sequence of reals stored at `precision`.
    pub fn read_reals(&mut self, precision: FloatPrecision) -> Result<Vec<f64>> {
        let (record, start) = (self.record, self.offset);
        let buf = self.read_record()?;
        check_alignment(buf.len(), precision.bytes(), record, start)?;
        Ok(match precision {
            FloatPrecision::F32 => Endian::read_f32_slice(&buf, self.endian)
                .into_iter()
                .map(|v| v as f64)
                .collect(),
            FloatPrecision::F64 => Endian::read_f64_slice(&buf, self.endian),
        })
    }

    fn read_marker(&mut self, start: u64) -> Result<u64> {
        let bytes = self.take_bytes(self.header_width.bytes() as u64, start)?;
        Ok(Endian::read_marker(&bytes, self.header_width, self.endian))
    }

    fn finish_record(&mut self, prefix: u64, start: u64) -> Result<Vec<u8>> {
        let payload = self.take_bytes(prefix, start)?;
        let suffix = self.read_marker(start)?;
        if prefix != suffix {
            return Err(Plot3dError::CorruptRecord {
                record: self.record,
                offset: start,
                prefix,
                suffix,
            });
        }
        log::debug!("read record {} at byte {} ({} bytes)", self.record, start, prefix);
        self.record += 1;
        Ok(payload)
    }

    fn decode_ints(&self, buf: &[u8]) -> Vec<i64> {
        let width = self.header_width;
        buf.chunks_exact(width.bytes())
            .map(|chunk| Endian::read_int(chunk, width, self.endian))
            .collect()
    }

    // Grows with what the stream holds: a marker decoded with the wrong byte
    // order can claim gigabytes.
    fn take_bytes(&mut self, len: u64, start: u64) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let got = (&mut self.inner).take(len).read_to_end(&mut buf)? as u64;
        self.offset += got;
        if got < len {
            return Err(Plot3dError::Truncated {
                record: self.record,
                offset: start,
                expected: len,
                found: got,
            });
        }
        Ok(buf)
    }
}

/// Writes consecutive records to a stream.
pub struct RecordWriter<W> {
    inner: W,
    endian: Endian,
    header_width: HeaderWidth,
    offset: u64,
    record: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, endian: Endian, header_width: HeaderWidth) -> Self {
        Self {
            inner,
            endian,
            header_width,
            offset: 0,
            record: 0,
        }
    }

    pub fn record_index(&self) -> usize {
        self.record
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write `payload` framed by its length on both sides.
    pub fn write_record(&mut self, payload: &[u8]) -> Result<()> {
        let len = payload.len() as u64;
        if self.header_width == HeaderWidth::Four && len > u32::MAX as u64 {
            let reason = format!("{len} byte record does not fit a 4-byte length marker");
            return Err(self.mismatch(reason));
        }
        let mut lenb = [0u8; 8];
        let lenb = &mut lenb[..self.header_width.bytes()];
        Endian::write_marker(lenb, len, self.header_width, self.endian);
        self.inner.write_all(lenb)?;
        self.inner.write_all(payload)?;
        self.inner.write_all(lenb)?;
        log::debug!("wrote record {} at byte {} ({} bytes)", self.record, self.offset, len);
        self.offset += len + 2 * self.header_width.bytes() as u64;
        self.record += 1;
        Ok(())
    }

    /// Write `values` as one record of `header_width` integers.
    pub fn write_ints(&mut self, values: &[i64]) -> Result<()> {
        let width = self.header_width;
        if width == HeaderWidth::Four {
            if let Some(v) = values.iter().find(|v| i32::try_from(**v).is_err()) {
                return Err(self.mismatch(format!("integer {v} does not fit in 4 bytes")));
            }
        }
        let mut buf = vec![0u8; values.len() * width.bytes()];
        for (chunk, v) in buf.chunks_exact_mut(width.bytes()).zip(values) {
            Endian::write_int(chunk, *v, width, self.endian);
        }
        self.write_record(&buf)
    }

    /// Write `values` as one record of reals at `precision`.
    pub fn write_reals(&mut self, values: &[f64], precision: FloatPrecision) -> Result<()> {
        let buf = match precision {
            FloatPrecision::F32 => Endian::write_f32_slice(
                &values.iter().map(|v| *v as f32).collect::<Vec<f32>>(),
                self.endian,
            ),
            FloatPrecision::F64 => Endian::write_f64_slice(values, self.endian),
        };
        self.write_record(&buf)
    }

    fn mismatch(&self, reason: String) -> Plot3dError {
        Plot3dError::ConfigurationMismatch {
            record: self.record,
            offset: self.offset,
            reason,
        }
    }
}

fn check_alignment(len: usize, width: usize, record: usize, offset: u64) -> Result<()> {
    if len % width != 0 {
        return Err(Plot3dError::ConfigurationMismatch {
            record,
            offset,
            reason: format!("{len} byte record is not a multiple of the {width} byte element size"),
        });
    }
    Ok(())
}
