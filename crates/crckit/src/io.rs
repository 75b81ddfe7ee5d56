//! `std::io` adapters that hash the bytes passing through them.

use std::io::{self, IoSlice, IoSliceMut, Read, Write};

use crate::engine::{Crc, Digest};

/// Wraps a [`Read`] and computes a CRC of exactly the bytes read.
///
/// ```
/// use std::io::Read;
///
/// use crckit::{Crc, CrcModel, io::CrcReader};
///
/// let crc32 = Crc::new(CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF)?);
/// let mut reader = CrcReader::new(&b"123456789"[..], &crc32);
/// let mut out = Vec::new();
/// reader.read_to_end(&mut out).unwrap();
/// assert_eq!(reader.crc(), 0xCBF4_3926);
/// # Ok::<(), crckit::CrcError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CrcReader<'a, R> {
  inner: R,
  digest: Digest<'a>,
}

impl<'a, R> CrcReader<'a, R> {
  /// Wrap `inner`, hashing with `crc` from its initial value.
  #[must_use]
  pub fn new(inner: R, crc: &'a Crc) -> Self {
    Self { inner, digest: crc.digest() }
  }

  /// Wrap `inner`, continuing an existing digest.
  #[must_use]
  pub const fn with_digest(inner: R, digest: Digest<'a>) -> Self {
    Self { inner, digest }
  }

  /// CRC of everything read so far.
  #[must_use]
  pub const fn crc(&self) -> u64 {
    self.digest.finalize()
  }

  /// The running digest.
  #[must_use]
  pub const fn digest(&self) -> &Digest<'a> {
    &self.digest
  }

  /// Inner reader and final CRC.
  pub fn into_parts(self) -> (R, u64) {
    let crc = self.digest.finalize();
    (self.inner, crc)
  }

  /// Inner reader, discarding the CRC.
  pub fn into_inner(self) -> R {
    self.inner
  }

  /// Reference to the inner reader.
  pub const fn inner(&self) -> &R {
    &self.inner
  }
}

impl<R: Read> Read for CrcReader<'_, R> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.digest.update(data);
    }
    Ok(n)
  }

  fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs.iter() {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.digest.update(data);
      }
      remaining -= take;
    }
    Ok(n)
  }
}

/// Wraps a [`Write`] and computes a CRC of exactly the bytes accepted by the
/// inner writer.
///
/// Short writes are accounted for: only the prefix the inner writer reports
/// as written is hashed.
#[derive(Clone, Debug)]
pub struct CrcWriter<'a, W> {
  inner: W,
  digest: Digest<'a>,
}

impl<'a, W> CrcWriter<'a, W> {
  /// Wrap `inner`, hashing with `crc` from its initial value.
  #[must_use]
  pub fn new(inner: W, crc: &'a Crc) -> Self {
    Self { inner, digest: crc.digest() }
  }

  /// Wrap `inner`, continuing an existing digest.
  #[must_use]
  pub const fn with_digest(inner: W, digest: Digest<'a>) -> Self {
    Self { inner, digest }
  }

  /// CRC of everything written so far.
  #[must_use]
  pub const fn crc(&self) -> u64 {
    self.digest.finalize()
  }

  /// The running digest.
  #[must_use]
  pub const fn digest(&self) -> &Digest<'a> {
    &self.digest
  }

  /// Inner writer and final CRC.
  pub fn into_parts(self) -> (W, u64) {
    let crc = self.digest.finalize();
    (self.inner, crc)
  }

  /// Inner writer, discarding the CRC.
  pub fn into_inner(self) -> W {
    self.inner
  }

  /// Reference to the inner writer.
  pub const fn inner(&self) -> &W {
    &self.inner
  }
}

impl<W: Write> Write for CrcWriter<'_, W> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.digest.update(data);
    }
    Ok(n)
  }

  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.digest.update(data);
      }
      remaining -= take;
    }
    Ok(n)
  }

  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}
