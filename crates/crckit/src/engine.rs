//! The CRC engine: a model plus the tables derived from it.

use alloc::{format, string::String, vec::Vec};
use core::fmt;

use crate::{
  acrc,
  combine,
  config::{self, Strategy},
  error::CrcError,
  model::CrcModel,
  shift::{self, UnshiftTable},
  stream::{CrcStream, Seed},
  tables::CrcTables,
  update,
};

// ─────────────────────────────────────────────────────────────────────────────
// Crc
// ─────────────────────────────────────────────────────────────────────────────

/// A CRC model with its lookup tables, ready to hash.
///
/// Tables are built once in the constructor and never mutated, so a `Crc` can
/// be shared freely between threads (`&Crc` is all any operation needs).
///
/// # Examples
///
/// ```
/// use crckit::{Crc, CrcModel};
///
/// let crc32 = Crc::new(CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF)?);
/// assert_eq!(crc32.checksum(b"123456789"), 0xCBF4_3926);
///
/// // Streaming
/// let mut digest = crc32.digest();
/// digest.update(b"1234");
/// digest.update(b"56789");
/// assert_eq!(digest.finalize(), 0xCBF4_3926);
///
/// // Combine
/// let a = crc32.checksum(b"1234");
/// let b = crc32.checksum(b"56789");
/// assert_eq!(crc32.combine(a, b, 5), 0xCBF4_3926);
/// # Ok::<(), crckit::CrcError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Crc {
  model: CrcModel,
  strategy: Strategy,
  tables: Option<CrcTables>,
  unshift: Option<UnshiftTable>,
}

impl Crc {
  /// Engine for `model` using the process configuration ([`config::get`]).
  #[must_use]
  pub fn new(model: CrcModel) -> Self {
    Self::with_strategy(model, config::get().strategy())
  }

  /// Engine for `model` with an explicit update strategy.
  #[must_use]
  pub fn with_strategy(model: CrcModel, strategy: Strategy) -> Self {
    let strategy = match strategy {
      Strategy::Sliced(n) => Strategy::sliced(n),
      other => other,
    };
    let tables = match strategy.table_count() {
      0 => None,
      n => Some(CrcTables::build(&model, n)),
    };
    let unshift = if model.reflect_in() { UnshiftTable::build(&model).ok() } else { None };

    #[cfg(feature = "tracing")]
    tracing::debug!(model = %model, strategy = %strategy, unshift = unshift.is_some(), "built crc engine");

    Self { model, strategy, tables, unshift }
  }

  /// The model this engine computes.
  #[inline]
  #[must_use]
  pub const fn model(&self) -> &CrcModel {
    &self.model
  }

  /// The update strategy in use.
  #[inline]
  #[must_use]
  pub const fn strategy(&self) -> Strategy {
    self.strategy
  }

  /// Strategy family name, for diagnostics.
  #[inline]
  #[must_use]
  pub const fn backend_name(&self) -> &'static str {
    self.strategy.name()
  }

  /// Lookup tables, absent for the reference strategy.
  #[inline]
  #[must_use]
  pub const fn tables(&self) -> Option<&CrcTables> {
    self.tables.as_ref()
  }

  // ── Transform ──────────────────────────────────────────────────────────────

  /// Register state that continues from CRC value `crc`.
  #[inline]
  #[must_use]
  pub const fn setup(&self, crc: u64) -> u64 {
    self.model.setup(crc)
  }

  /// Register state of the empty message.
  #[inline]
  #[must_use]
  pub const fn initial_state(&self) -> u64 {
    self.model.initial_state()
  }

  /// CRC value of register `state`.
  #[inline]
  #[must_use]
  pub const fn finish(&self, state: u64) -> u64 {
    self.model.finish(state)
  }

  // ── Update ─────────────────────────────────────────────────────────────────

  /// Feed `data` through register `state`.
  #[inline]
  #[must_use]
  pub fn update(&self, state: u64, data: &[u8]) -> u64 {
    update::update(&self.model, self.tables.as_ref(), state, data)
  }

  /// One-shot CRC of `data`.
  #[inline]
  #[must_use]
  pub fn checksum(&self, data: &[u8]) -> u64 {
    self.finish(self.update(self.initial_state(), data))
  }

  /// CRC of `data` continued from `seed`.
  #[must_use]
  pub fn checksum_from(&self, seed: Seed<'_>, data: &[u8]) -> u64 {
    self.finish_stream(self.update_stream(self.stream_from(seed), data))
  }

  // ── Streams ────────────────────────────────────────────────────────────────

  /// Fresh stream at the model's initial CRC.
  #[inline]
  #[must_use]
  pub const fn stream(&self) -> CrcStream {
    CrcStream::new(self.initial_state(), 0)
  }

  /// Stream that starts from `seed`. This is the one place seeds are
  /// interpreted.
  #[must_use]
  pub fn stream_from(&self, seed: Seed<'_>) -> CrcStream {
    match seed {
      Seed::Initial => self.stream(),
      Seed::Value(crc) => CrcStream::new(self.setup(crc), 0),
      Seed::Bytes(data) => self.update_stream(self.stream(), data),
      Seed::PriorState(stream) => stream,
    }
  }

  /// Advance `stream` by `data`.
  #[inline]
  #[must_use]
  pub fn update_stream(&self, stream: CrcStream, data: &[u8]) -> CrcStream {
    stream.advanced(self.update(stream.state(), data), data.len())
  }

  /// CRC value of `stream`.
  #[inline]
  #[must_use]
  pub const fn finish_stream(&self, stream: CrcStream) -> u64 {
    self.finish(stream.state())
  }

  /// Incremental hasher bound to this engine.
  #[inline]
  #[must_use]
  pub fn digest(&self) -> Digest<'_> {
    Digest::new(self)
  }

  /// Incremental hasher starting from `seed`.
  #[inline]
  #[must_use]
  pub fn digest_from(&self, seed: Seed<'_>) -> Digest<'_> {
    Digest::from_stream(self, self.stream_from(seed))
  }

  // ── Combine ────────────────────────────────────────────────────────────────

  /// `crc(A || B)` from `crc1 = crc(A)`, `crc2 = crc(B)`, `len2 = len(B)`.
  #[inline]
  #[must_use]
  pub const fn combine(&self, crc1: u64, crc2: u64, len2: u64) -> u64 {
    combine::combine(&self.model, crc1, crc2, len2)
  }

  // ── Shifting ───────────────────────────────────────────────────────────────

  /// Advance register `state` by individual input bits.
  #[must_use]
  pub fn shift_bits(&self, state: u64, input: impl IntoIterator<Item = bool>) -> u64 {
    shift::shift_bits(&self.model, state, input)
  }

  /// Advance register `state` by whole bytes. Same as [`Crc::update`].
  #[inline]
  #[must_use]
  pub fn shift_bytes(&self, state: u64, data: &[u8]) -> u64 {
    self.update(state, data)
  }

  /// Rewind register `state` over input bits listed in feeding order.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidModel`] for an even polynomial.
  pub fn unshift_bits<I>(&self, state: u64, input: I) -> Result<u64, CrcError>
  where
    I: IntoIterator<Item = bool>,
    I::IntoIter: DoubleEndedIterator,
  {
    shift::unshift_bits(&self.model, state, input)
  }

  /// Rewind register `state` over `data`, so that
  /// `unshift_bytes(update(s, d), d) == s`.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidModel`] for an even polynomial.
  pub fn unshift_bytes(&self, state: u64, data: &[u8]) -> Result<u64, CrcError> {
    match &self.unshift {
      Some(table) => Ok(table.unshift_bytes(state, data)),
      None => shift::unshift_bytes_bitwise(&self.model, state, data),
    }
  }

  // ── Inversion ──────────────────────────────────────────────────────────────

  /// Bytes `mid` such that `crc(prefix || mid || suffix) == target`.
  ///
  /// ```
  /// use crckit::{Crc, CrcModel, Seed};
  ///
  /// let crc32 = Crc::new(CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF)?);
  /// let mid = crc32.acrc(Seed::Bytes(b"hello "), b" world", 0xDEAD_BEEF)?;
  /// let mut msg = b"hello ".to_vec();
  /// msg.extend_from_slice(&mid);
  /// msg.extend_from_slice(b" world");
  /// assert_eq!(crc32.checksum(&msg), 0xDEAD_BEEF);
  /// # Ok::<(), crckit::CrcError>(())
  /// ```
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidModel`] for an even polynomial,
  /// [`CrcError::UnsupportedOperation`] unless the model reflects both input
  /// and output.
  pub fn acrc(&self, prefix: Seed<'_>, suffix: &[u8], target: u64) -> Result<Vec<u8>, CrcError> {
    acrc::check_model(&self.model)?;
    let table = self.unshift.as_ref().ok_or(CrcError::even_polynomial())?;
    acrc::forge(&self.model, table, self.stream_from(prefix).state(), suffix, target)
  }

  // ── Encodings ──────────────────────────────────────────────────────────────

  /// Big-endian bytes of `crc`, `byte_size` long.
  #[must_use]
  pub fn to_bytes(&self, crc: u64) -> Vec<u8> {
    let n = self.model.byte_size();
    crc.to_be_bytes().into_iter().skip(8 - n).collect()
  }

  /// Uppercase hex of `crc`, two digits per byte.
  #[must_use]
  pub fn to_hex(&self, crc: u64) -> String {
    format!("{:0digits$X}", crc & self.model.mask(), digits = self.model.byte_size() * 2)
  }

  /// Encoding of `crc` that, appended to a message whose CRC it is, drives
  /// the CRC to [`Crc::magic_number`] when the model has one: little-endian
  /// for reflected output, padded big-endian otherwise.
  #[must_use]
  pub fn magic_bytes(&self, crc: u64) -> Vec<u8> {
    let n = self.model.byte_size();
    let crc = crc & self.model.mask();
    if self.model.reflect_out() {
      crc.to_le_bytes().into_iter().take(n).collect()
    } else {
      (crc << self.model.alignment_pad()).to_be_bytes().into_iter().skip(8 - n).collect()
    }
  }

  /// Residue: the CRC of any message followed by its own
  /// [`magic_bytes`](Crc::magic_bytes).
  ///
  /// `None` when input and output orientations differ. The appended encoding
  /// does not cancel the register then, so no fixed residue exists.
  #[must_use]
  pub fn magic_number(&self) -> Option<u64> {
    if self.model.reflect_in() != self.model.reflect_out() {
      return None;
    }
    Some(self.checksum(&self.magic_bytes(self.model.initial())))
  }
}

impl fmt::Display for Crc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.model, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Digest
// ─────────────────────────────────────────────────────────────────────────────

/// Incremental hasher bound to a [`Crc`] engine.
///
/// Remembers where it started so digests can be concatenated with
/// [`Digest::combine`] regardless of their seeds.
#[derive(Clone, Copy, Debug)]
pub struct Digest<'a> {
  crc: &'a Crc,
  start: CrcStream,
  stream: CrcStream,
}

impl<'a> Digest<'a> {
  /// Digest at the model's initial CRC.
  #[must_use]
  pub const fn new(crc: &'a Crc) -> Self {
    Self::from_stream(crc, crc.stream())
  }

  /// Digest continuing `stream`.
  #[must_use]
  pub const fn from_stream(crc: &'a Crc, stream: CrcStream) -> Self {
    Self { crc, start: stream, stream }
  }

  /// Feed more data.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.stream = self.crc.update_stream(self.stream, data);
  }

  /// CRC of everything fed so far (including the seed). Does not consume.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u64 {
    self.crc.finish_stream(self.stream)
  }

  /// Go back to the starting seed.
  #[inline]
  pub fn reset(&mut self) {
    self.stream = self.start;
  }

  /// Bytes fed since the seed.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> u64 {
    self.stream.len().wrapping_sub(self.start.len())
  }

  /// Whether nothing was fed since the seed.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The underlying stream.
  #[inline]
  #[must_use]
  pub const fn stream(&self) -> CrcStream {
    self.stream
  }

  /// The engine this digest is bound to.
  #[inline]
  #[must_use]
  pub const fn engine(&self) -> &'a Crc {
    self.crc
  }

  /// Digest of this digest's input followed by `other`'s input.
  ///
  /// `other` may come from a different engine as long as the models are
  /// variants of each other; its own seed is honoured.
  ///
  /// # Errors
  ///
  /// [`CrcError::ModelMismatch`] when the models are not variants.
  pub fn combine(&self, other: &Digest<'_>) -> Result<Self, CrcError> {
    let model = self.crc.model();
    if !model.is_variant_of(other.crc.model()) {
      return Err(CrcError::ModelMismatch);
    }
    let other_seed = other.crc.finish_stream(other.start);
    let len2 = other.len();
    let crc = combine::combine(&model.with_initial(other_seed), self.finalize(), other.finalize(), len2);
    let stream = CrcStream::new(self.crc.setup(crc), self.stream.len().wrapping_add(len2));
    Ok(Self { crc: self.crc, start: self.start, stream })
  }

  /// Big-endian bytes of the current CRC.
  #[must_use]
  pub fn to_bytes(&self) -> Vec<u8> {
    self.crc.to_bytes(self.finalize())
  }

  /// Uppercase hex of the current CRC.
  #[must_use]
  pub fn to_hex(&self) -> String {
    self.crc.to_hex(self.finalize())
  }
}

impl PartialEq<Digest<'_>> for Digest<'_> {
  /// Equal when the models are variants and the CRCs match.
  fn eq(&self, other: &Digest<'_>) -> bool {
    self.crc.model().is_variant_of(other.crc.model()) && self.finalize() == other.finalize()
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{string::ToString, vec};

  use super::*;

  fn crc32() -> Crc {
    Crc::new(CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF).unwrap())
  }

  fn ccitt() -> Crc {
    Crc::new(CrcModel::new(16, 0x1021, 0xFFFF, false, false, 0).unwrap())
  }

  #[test]
  fn test_checksum_known_answers() {
    assert_eq!(crc32().checksum(b"123456789"), 0xCBF4_3926);
    assert_eq!(ccitt().checksum(b"123456789"), 0x29B1);
    assert_eq!(crc32().checksum(b""), 0);
    assert_eq!(ccitt().checksum(b""), 0xFFFF);
  }

  #[test]
  fn test_every_strategy_gives_same_result() {
    let model = CrcModel::new(24, 0x86_4CFB, 0xB7_04CE, false, false, 0).unwrap();
    for strategy in [Strategy::Reference, Strategy::Table, Strategy::Sliced(2), Strategy::Sliced(16), Strategy::Sliced(0)] {
      let engine = Crc::with_strategy(model, strategy);
      assert_eq!(engine.checksum(b"123456789"), 0x21_CF02, "{strategy}");
    }
  }

  #[test]
  fn test_strategy_is_normalized() {
    let model = CrcModel::new(8, 0x07, 0, false, false, 0).unwrap();
    assert_eq!(Crc::with_strategy(model, Strategy::Sliced(1)).strategy(), Strategy::Table);
    assert_eq!(Crc::with_strategy(model, Strategy::Sliced(99)).strategy(), Strategy::Sliced(32));
    assert!(Crc::with_strategy(model, Strategy::Reference).tables().is_none());
    assert_eq!(Crc::with_strategy(model, Strategy::Sliced(4)).tables().map(CrcTables::slices), Some(4));
    assert_eq!(Crc::with_strategy(model, Strategy::Table).backend_name(), "table");
  }

  #[test]
  fn test_stream_from_seeds() {
    let c = crc32();
    let after = c.stream_from(Seed::Bytes(b"1234"));
    assert_eq!(after.len(), 4);
    assert_eq!(c.checksum_from(Seed::PriorState(after), b"56789"), 0xCBF4_3926);
    assert_eq!(c.checksum_from(Seed::Value(c.checksum(b"1234")), b"56789"), 0xCBF4_3926);
    assert_eq!(c.checksum_from(Seed::Bytes(b"1234"), b"56789"), 0xCBF4_3926);
    assert_eq!(c.checksum_from(Seed::Initial, b"123456789"), 0xCBF4_3926);
  }

  #[test]
  fn test_digest_streaming_and_reset() {
    let c = ccitt();
    let mut d = c.digest();
    assert!(d.is_empty());
    d.update(b"1234");
    d.update(b"");
    d.update(b"56789");
    assert_eq!(d.len(), 9);
    assert_eq!(d.finalize(), 0x29B1);
    assert_eq!(d.to_hex(), "29B1");
    assert_eq!(d.to_bytes(), vec![0x29, 0xB1]);
    d.reset();
    assert_eq!(d.finalize(), 0xFFFF);
  }

  #[test]
  fn test_digest_combine_default_seeds() {
    let c = crc32();
    let mut a = c.digest();
    a.update(b"hello ");
    let mut b = c.digest();
    b.update(b"world");
    let joined = a.combine(&b).unwrap();
    assert_eq!(joined.finalize(), c.checksum(b"hello world"));
    assert_eq!(joined.len(), 11);
  }

  #[test]
  fn test_digest_combine_strips_other_seed() {
    // The right-hand digest continues some earlier message; combining splices
    // only the bytes it was fed.
    let c = crc32();
    let mut a = c.digest();
    a.update(b"say ");
    let mut b = c.digest_from(Seed::Bytes(b"hello "));
    b.update(b"world");
    assert_eq!(b.len(), 5);
    assert_eq!(b.finalize(), c.checksum(b"hello world"));

    let joined = a.combine(&b).unwrap();
    assert_eq!(joined.finalize(), c.checksum(b"say world"));
    assert_eq!(joined.len(), 9);

    let mut v = c.digest_from(Seed::Value(0x1234_5678));
    v.update(b"world");
    assert_eq!(a.combine(&v).unwrap().finalize(), c.checksum(b"say world"));
  }

  #[test]
  fn test_digest_combine_mismatch() {
    let a = crc32();
    let b = ccitt();
    assert_eq!(a.digest().combine(&b.digest()).unwrap_err(), CrcError::ModelMismatch);
    assert_ne!(a.digest(), b.digest());
  }

  #[test]
  fn test_digest_eq_across_variants() {
    let a = Crc::new(CrcModel::new(16, 0x1021, 0, false, false, 0).unwrap());
    let b = Crc::new(CrcModel::new(16, 0x1021, 0xFFFF, false, false, 0).unwrap());
    let mut da = a.digest();
    da.update(b"x");
    let db = b.digest_from(Seed::Value(da.finalize()));
    assert_eq!(da, db);
  }

  #[test]
  fn test_shift_unshift_bytes() {
    for c in [crc32(), ccitt()] {
      let s = 0x1234_5678 & c.model().mask();
      let fwd = c.shift_bytes(s, b"unshift me");
      assert_eq!(c.unshift_bytes(fwd, b"unshift me").unwrap(), s);
    }
  }

  #[test]
  fn test_shift_bits_partial_byte() {
    let c = ccitt();
    let s = c.shift_bits(c.initial_state(), [true, false, true]);
    assert_eq!(c.unshift_bits(s, [true, false, true]).unwrap(), c.initial_state());
  }

  #[test]
  fn test_acrc_round_trip() {
    let c = crc32();
    let mid = c.acrc(Seed::Bytes(b"abc"), b"def", 0x0BAD_CAFE).unwrap();
    let mut msg = b"abc".to_vec();
    msg.extend_from_slice(&mid);
    msg.extend_from_slice(b"def");
    assert_eq!(c.checksum(&msg), 0x0BAD_CAFE);
  }

  #[test]
  fn test_acrc_unsupported() {
    assert!(matches!(ccitt().acrc(Seed::Initial, b"", 0), Err(CrcError::UnsupportedOperation(_))));
  }

  #[test]
  fn test_magic() {
    let c = crc32();
    assert_eq!(c.magic_bytes(0), vec![0, 0, 0, 0]);
    assert_eq!(c.magic_number(), Some(0x2144_DF1C));
    let crc = c.checksum(b"payload");
    let mut msg = b"payload".to_vec();
    msg.extend_from_slice(&c.magic_bytes(crc));
    assert_eq!(Some(c.checksum(&msg)), c.magic_number());
  }

  #[test]
  fn test_magic_absent_for_mixed_orientation() {
    let umts = Crc::new(CrcModel::new(12, 0x80F, 0, false, true, 0).unwrap());
    assert_eq!(umts.magic_number(), None);
    let swapped = Crc::new(CrcModel::new(12, 0x80F, 0, true, false, 0).unwrap());
    assert_eq!(swapped.magic_number(), None);
    assert!(ccitt().magic_number().is_some());
  }

  #[test]
  fn test_encodings() {
    let c = crc32();
    assert_eq!(c.to_hex(0xCBF4_3926), "CBF43926");
    assert_eq!(c.to_bytes(0xCBF4_3926), vec![0xCB, 0xF4, 0x39, 0x26]);
    let c12 = Crc::new(CrcModel::new(12, 0x80F, 0, false, false, 0).unwrap());
    assert_eq!(c12.to_hex(0xF5B), "0F5B");
    assert_eq!(c12.magic_bytes(0xF5B), vec![0xF5, 0xB0]);
    assert_eq!(c.to_string(), "CRC-32-0x04C11DB7 reflect-in/out init=0 xor=~0");
  }
}
