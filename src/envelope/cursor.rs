//! Bounds-checked reader over an envelope buffer.
//!
//! Every integer in the envelope is big-endian. Reads go through
//! [`slice::get`] so a hostile length can only ever produce
//! [`DecodeError::Truncated`], never an out-of-bounds access.

use super::error::{DecodeError, Region};

/// Forward-only cursor over a borrowed buffer.
#[derive(Clone, Debug)]
pub(crate) struct WireCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireCursor<'a> {
    /// Start reading `buf` at `pos`.
    pub(crate) const fn at(buf: &'a [u8], pos: usize) -> Self { Self { buf, pos } }

    /// Offset of the next unread byte.
    pub(crate) const fn position(&self) -> usize { self.pos }

    fn available(&self) -> usize { self.buf.len().saturating_sub(self.pos) }

    fn truncated(&self, region: Region, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            region,
            offset: self.pos,
            needed,
            available: self.available(),
        }
    }

    fn read_array<const N: usize>(&mut self, region: Region) -> Result<[u8; N], DecodeError> {
        let buf = self.buf;
        let bytes = buf
            .get(self.pos..)
            .and_then(|rest| rest.first_chunk::<N>())
            .ok_or_else(|| self.truncated(region, N))?;
        self.pos += N;
        Ok(*bytes)
    }

    /// Read a single byte.
    pub(crate) fn read_u8(&mut self, region: Region) -> Result<u8, DecodeError> {
        let [byte] = self.read_array::<1>(region)?;
        Ok(byte)
    }

    /// Read a network-order `u32`.
    pub(crate) fn read_u32(&mut self, region: Region) -> Result<u32, DecodeError> {
        self.read_array(region).map(u32::from_be_bytes)
    }

    /// Read a network-order `u64`.
    pub(crate) fn read_u64(&mut self, region: Region) -> Result<u64, DecodeError> {
        self.read_array(region).map(u64::from_be_bytes)
    }

    /// Borrow the next `len` bytes.
    pub(crate) fn take(&mut self, len: u32, region: Region) -> Result<&'a [u8], DecodeError> {
        let needed = usize::try_from(len).map_err(|_| self.truncated(region, usize::MAX))?;
        let buf = self.buf;
        let slice = self
            .pos
            .checked_add(needed)
            .and_then(|end| buf.get(self.pos..end))
            .ok_or_else(|| self.truncated(region, needed))?;
        self.pos += needed;
        Ok(slice)
    }
}
