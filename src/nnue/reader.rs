//! Strict little-endian reader that accounts for every byte of a network file.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use super::error::{NetworkError, Section};

/// Wraps a reader of known total length.
///
/// Every read first checks the remaining byte budget, so a short file is
/// reported as [`NetworkError::Truncated`] for the section being read instead
/// of surfacing as a bare EOF halfway through a weight matrix.
pub(crate) struct SectionReader<R> {
    inner: R,
    remaining: u64,
}

impl<R: Read> SectionReader<R> {
    pub(crate) fn new(inner: R, len: u64) -> Self {
        SectionReader {
            inner,
            remaining: len,
        }
    }

    /// Fail unless `needed` more bytes are available for `section`.
    pub(crate) fn ensure(&self, section: Section, needed: u64) -> Result<(), NetworkError> {
        if needed > self.remaining {
            return Err(NetworkError::Truncated {
                section,
                needed,
                remaining: self.remaining,
            });
        }
        Ok(())
    }

    fn consume(&mut self, section: Section, bytes: u64) -> Result<(), NetworkError> {
        self.ensure(section, bytes)?;
        self.remaining -= bytes;
        Ok(())
    }

    pub(crate) fn read_u32(&mut self, section: Section) -> Result<u32, NetworkError> {
        self.consume(section, 4)?;
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(NetworkError::Unreadable)
    }

    pub(crate) fn read_bytes(
        &mut self,
        section: Section,
        count: usize,
    ) -> Result<Vec<u8>, NetworkError> {
        self.consume(section, count as u64)?;
        let mut buf = vec![0u8; count];
        self.inner
            .read_exact(&mut buf)
            .map_err(NetworkError::Unreadable)?;
        Ok(buf)
    }

    pub(crate) fn read_i8_vec(
        &mut self,
        section: Section,
        count: usize,
    ) -> Result<Vec<i8>, NetworkError> {
        self.consume(section, count as u64)?;
        let mut buf = vec![0i8; count];
        self.inner
            .read_i8_into(&mut buf)
            .map_err(NetworkError::Unreadable)?;
        Ok(buf)
    }

    pub(crate) fn read_i16_vec(
        &mut self,
        section: Section,
        count: usize,
    ) -> Result<Vec<i16>, NetworkError> {
        self.consume(section, 2 * count as u64)?;
        let mut buf = vec![0i16; count];
        self.inner
            .read_i16_into::<LittleEndian>(&mut buf)
            .map_err(NetworkError::Unreadable)?;
        Ok(buf)
    }

    pub(crate) fn read_i32_vec(
        &mut self,
        section: Section,
        count: usize,
    ) -> Result<Vec<i32>, NetworkError> {
        self.consume(section, 4 * count as u64)?;
        let mut buf = vec![0i32; count];
        self.inner
            .read_i32_into::<LittleEndian>(&mut buf)
            .map_err(NetworkError::Unreadable)?;
        Ok(buf)
    }

    /// Read a `u32` and compare it with the hash the architecture expects.
    pub(crate) fn expect_hash(&mut self, section: Section, expected: u32) -> Result<(), NetworkError> {
        let found = self.read_u32(section)?;
        if found != expected {
            return Err(NetworkError::HashMismatch {
                section,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Succeed only if the whole input has been consumed.
    pub(crate) fn finish(self) -> Result<(), NetworkError> {
        if self.remaining != 0 {
            return Err(NetworkError::TrailingBytes {
                trailing: self.remaining,
            });
        }
        Ok(())
    }
}
