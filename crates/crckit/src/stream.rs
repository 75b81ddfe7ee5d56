//! Caller-owned streaming state.

/// Pre-finish register value plus the number of bytes consumed.
///
/// A `CrcStream` carries no reference to its model; pair it with the
/// [`Crc`](crate::Crc) that produced it. Streams are `Copy`, so forking a
/// computation is just a copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CrcStream {
  state: u64,
  len: u64,
}

impl CrcStream {
  /// Stream at register `state` after `len` bytes.
  #[inline]
  #[must_use]
  pub const fn new(state: u64, len: u64) -> Self {
    Self { state, len }
  }

  /// Internal register state.
  #[inline]
  #[must_use]
  pub const fn state(&self) -> u64 {
    self.state
  }

  /// Bytes consumed so far.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> u64 {
    self.len
  }

  /// Whether no bytes have been consumed.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  pub(crate) const fn advanced(self, state: u64, consumed: usize) -> Self {
    Self { state, len: self.len.wrapping_add(consumed as u64) }
  }
}

/// Where a computation starts from.
///
/// Replaces "pass an integer, a byte string or a previous object" with one
/// explicit type; [`Crc::stream_from`](crate::Crc::stream_from) is the single
/// conversion point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Seed<'a> {
  /// The model's own initial CRC.
  #[default]
  Initial,
  /// Continue from a finished CRC value.
  Value(u64),
  /// The state after hashing these bytes from the initial CRC.
  Bytes(&'a [u8]),
  /// A stream produced earlier by the same engine.
  PriorState(CrcStream),
}

impl From<u64> for Seed<'_> {
  #[inline]
  fn from(crc: u64) -> Self {
    Self::Value(crc)
  }
}

impl<'a> From<&'a [u8]> for Seed<'a> {
  #[inline]
  fn from(bytes: &'a [u8]) -> Self {
    Self::Bytes(bytes)
  }
}

impl From<CrcStream> for Seed<'_> {
  #[inline]
  fn from(stream: CrcStream) -> Self {
    Self::PriorState(stream)
  }
}
