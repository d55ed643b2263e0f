//! Buffered binary and text emitters.

use std::io::{BufWriter, Write};

use crate::varint;
use crate::Error;

const BUFFER_CAPACITY: usize = 64 * 1024;

/// Buffered sink for the binary format: raw bytes, little-endian fixed
/// widths, and varints.
pub struct BinaryWriter<W: Write> {
    inner: BufWriter<W>,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(w: W) -> Self {
        BinaryWriter {
            inner: BufWriter::with_capacity(BUFFER_CAPACITY, w),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.inner.write_all(bytes).map_err(Error::Io)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.write_bytes(&[value])
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<(), Error> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64_le(&mut self, value: u64) -> Result<(), Error> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_varint(&mut self, value: u64) -> Result<(), Error> {
        varint::encode(&mut self.inner, value)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush().map_err(Error::Io)
    }
}

/// Buffered sink for the TSV text format: decimal integers, tabs, newlines.
pub struct TextWriter<W: Write> {
    inner: BufWriter<W>,
}

impl<W: Write> TextWriter<W> {
    pub fn new(w: W) -> Self {
        TextWriter {
            inner: BufWriter::with_capacity(BUFFER_CAPACITY, w),
        }
    }

    /// Emits one `"{u}\t{v}\t{w}\n"` line. `u32`/`u8` `Display` already gives
    /// plain decimal digits with no leading zeros and no locale formatting.
    pub fn write_edge(&mut self, u: u32, v: u32, w: u8) -> Result<(), Error> {
        write!(self.inner, "{u}\t{v}\t{w}\n").map_err(Error::Io)
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush().map_err(Error::Io)
    }
}
