//! CRC model definition.
//!
//! A [`CrcModel`] is the immutable parameter set that every other component
//! reads: width, generator polynomial, the initial CRC, the two reflection
//! flags and the output xor.
//!
//! # Initial value convention
//!
//! `initial` is the *external* CRC of the empty message, i.e. the value
//! `checksum(b"")` returns. For CRC-32 (zlib) that is `0` with
//! `xor_out = 0xFFFF_FFFF`, not the `0xFFFF_FFFF` register preset printed in
//! most catalogues. Use [`CrcModel::from_rocksoft`] to build a model from
//! catalogue parameters.

use core::fmt;

use crate::{bits, error::CrcError};

/// Largest supported CRC width.
pub const MAX_WIDTH: u8 = 64;

/// Parameters of a CRC algorithm.
///
/// Fields are masked to `width` on construction, so every accessor returns a
/// value inside `0..=mask()`.
///
/// # Examples
///
/// ```
/// use crckit::CrcModel;
///
/// let crc32 = CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF)?;
/// assert_eq!(crc32.byte_size(), 4);
/// assert_eq!(crc32.to_string(), "CRC-32-0x04C11DB7 reflect-in/out init=0 xor=~0");
/// # Ok::<(), crckit::CrcError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CrcModel {
  width: u8,
  polynomial: u64,
  initial: u64,
  reflect_in: bool,
  reflect_out: bool,
  xor_out: u64,
}

impl CrcModel {
  /// Build a model, masking `polynomial`, `initial` and `xor_out` to `width`.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidModel`] when `width` is not in `1..=64`.
  pub const fn new(
    width: u8,
    polynomial: u64,
    initial: u64,
    reflect_in: bool,
    reflect_out: bool,
    xor_out: u64,
  ) -> Result<Self, CrcError> {
    if width == 0 || width > MAX_WIDTH {
      return Err(CrcError::invalid_width(width));
    }
    Ok(Self::from_parts(width, polynomial, initial, reflect_in, reflect_out, xor_out))
  }

  /// Build a model from catalogue (Rocksoft) parameters, where `init` is the
  /// register preset rather than the CRC of the empty message.
  ///
  /// ```
  /// use crckit::CrcModel;
  ///
  /// let a = CrcModel::from_rocksoft(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF)?;
  /// let b = CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF)?;
  /// assert_eq!(a, b);
  /// # Ok::<(), crckit::CrcError>(())
  /// ```
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidModel`] when `width` is not in `1..=64`.
  pub const fn from_rocksoft(
    width: u8,
    polynomial: u64,
    init: u64,
    reflect_in: bool,
    reflect_out: bool,
    xor_out: u64,
  ) -> Result<Self, CrcError> {
    if width == 0 || width > MAX_WIDTH {
      return Err(CrcError::invalid_width(width));
    }
    let register = init & bits::mask(width as u32);
    let presented = if reflect_out { bits::reflect(register, width as u32) } else { register };
    Ok(Self::from_parts(width, polynomial, presented ^ xor_out, reflect_in, reflect_out, xor_out))
  }

  /// Unchecked constructor for static tables whose width is known to be valid.
  pub(crate) const fn from_parts(
    width: u8,
    polynomial: u64,
    initial: u64,
    reflect_in: bool,
    reflect_out: bool,
    xor_out: u64,
  ) -> Self {
    let mask = bits::mask(width as u32);
    Self {
      width,
      polynomial: polynomial & mask,
      initial: initial & mask,
      reflect_in,
      reflect_out,
      xor_out: xor_out & mask,
    }
  }

  /// CRC width in bits.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u8 {
    self.width
  }

  /// Generator polynomial in normal (MSB-first) form, without the implicit
  /// `x^width` term.
  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> u64 {
    self.polynomial
  }

  /// Generator polynomial bit-reversed over `width` bits.
  #[inline]
  #[must_use]
  pub const fn polynomial_reflected(&self) -> u64 {
    bits::reflect(self.polynomial, self.width as u32)
  }

  /// CRC of the empty message.
  #[inline]
  #[must_use]
  pub const fn initial(&self) -> u64 {
    self.initial
  }

  /// Whether input bytes are consumed LSB first.
  #[inline]
  #[must_use]
  pub const fn reflect_in(&self) -> bool {
    self.reflect_in
  }

  /// Whether the register is reflected before the output xor.
  #[inline]
  #[must_use]
  pub const fn reflect_out(&self) -> bool {
    self.reflect_out
  }

  /// Value xored into the register to produce the CRC.
  #[inline]
  #[must_use]
  pub const fn xor_out(&self) -> u64 {
    self.xor_out
  }

  /// `2^width - 1`.
  #[inline]
  #[must_use]
  pub const fn mask(&self) -> u64 {
    bits::mask(self.width as u32)
  }

  /// Bytes needed to hold a CRC value.
  #[inline]
  #[must_use]
  pub const fn byte_size(&self) -> usize {
    (self.width as usize).div_ceil(8)
  }

  /// Bits between `width` and the next byte boundary.
  #[inline]
  #[must_use]
  pub const fn alignment_pad(&self) -> u32 {
    (self.byte_size() as u32) * 8 - self.width as u32
  }

  /// Two models are variants when they produce interchangeable CRC values:
  /// everything but `initial` matches.
  #[must_use]
  pub const fn is_variant_of(&self, other: &Self) -> bool {
    self.width == other.width
      && self.polynomial == other.polynomial
      && self.reflect_in == other.reflect_in
      && self.reflect_out == other.reflect_out
      && self.xor_out == other.xor_out
  }

  /// Copy of this model with a different empty-message CRC.
  #[must_use]
  pub const fn with_initial(self, initial: u64) -> Self {
    Self { initial: initial & self.mask(), ..self }
  }
}

impl fmt::Display for CrcModel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let digits = self.byte_size() * 2;
    write!(f, "CRC-{}-0x{:0digits$X}", self.width, self.polynomial)?;
    match (self.reflect_in, self.reflect_out) {
      (true, true) => f.write_str(" reflect-in/out")?,
      (true, false) => f.write_str(" reflect-in")?,
      (false, true) => f.write_str(" reflect-out")?,
      (false, false) => {}
    }
    f.write_str(" init=")?;
    write_constant(f, self.initial, self.mask())?;
    f.write_str(" xor=")?;
    write_constant(f, self.xor_out, self.mask())
  }
}

fn write_constant(f: &mut fmt::Formatter<'_>, value: u64, mask: u64) -> fmt::Result {
  match value {
    0 => f.write_str("0"),
    v if v == mask => f.write_str("~0"),
    v => write!(f, "0x{v:X}"),
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn test_new_masks_fields() {
    let m = CrcModel::new(5, 0xFF, 0xFF, true, true, 0xFF).unwrap();
    assert_eq!(m.polynomial(), 0x1F);
    assert_eq!(m.initial(), 0x1F);
    assert_eq!(m.xor_out(), 0x1F);
    assert_eq!(m.mask(), 0x1F);
  }

  #[test]
  fn test_new_rejects_bad_width() {
    assert_eq!(CrcModel::new(0, 1, 0, false, false, 0), Err(CrcError::invalid_width(0)));
    assert_eq!(CrcModel::new(65, 1, 0, false, false, 0), Err(CrcError::invalid_width(65)));
    assert!(CrcModel::new(64, 1, 0, false, false, 0).is_ok());
    assert!(CrcModel::new(1, 1, 0, false, false, 0).is_ok());
  }

  #[test]
  fn test_derived_sizes() {
    for (width, bytes, pad) in [(1u8, 1usize, 7u32), (8, 1, 0), (12, 2, 4), (24, 3, 0), (31, 4, 1), (64, 8, 0)] {
      let m = CrcModel::new(width, 1, 0, false, false, 0).unwrap();
      assert_eq!(m.byte_size(), bytes, "width={width}");
      assert_eq!(m.alignment_pad(), pad, "width={width}");
    }
  }

  #[test]
  fn test_polynomial_reflected() {
    let crc32c = CrcModel::new(32, 0x1EDC_6F41, 0, true, true, !0).unwrap();
    assert_eq!(crc32c.polynomial_reflected(), 0x82F6_3B78);
  }

  #[test]
  fn test_from_rocksoft_conversions() {
    // CRC-16/CCITT-FALSE: register preset 0xFFFF, no xor.
    let m = CrcModel::from_rocksoft(16, 0x1021, 0xFFFF, false, false, 0).unwrap();
    assert_eq!(m.initial(), 0xFFFF);
    // CRC-16/RIELLO: reflected preset 0xB2AA presents as 0x554D.
    let m = CrcModel::from_rocksoft(16, 0x1021, 0xB2AA, true, true, 0).unwrap();
    assert_eq!(m.initial(), 0x554D);
    // CRC-12/UMTS: reflect-out only, zero preset.
    let m = CrcModel::from_rocksoft(12, 0x80F, 0, false, true, 0).unwrap();
    assert_eq!(m.initial(), 0);
    // CRC-64/XZ.
    let m = CrcModel::from_rocksoft(64, 0x42F0_E1EB_A9EA_3693, !0, true, true, !0).unwrap();
    assert_eq!(m.initial(), 0);
  }

  #[test]
  fn test_variant() {
    let a = CrcModel::new(16, 0x1021, 0, false, false, 0).unwrap();
    let b = a.with_initial(0xFFFF);
    assert!(a.is_variant_of(&b));
    assert_ne!(a, b);
    let c = CrcModel::new(16, 0x1021, 0, true, true, 0).unwrap();
    assert!(!a.is_variant_of(&c));
    let d = CrcModel::new(16, 0x8005, 0, false, false, 0).unwrap();
    assert!(!a.is_variant_of(&d));
  }

  #[test]
  fn test_display() {
    let crc32 = CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF).unwrap();
    assert_eq!(crc32.to_string(), "CRC-32-0x04C11DB7 reflect-in/out init=0 xor=~0");
    let ccitt = CrcModel::new(16, 0x1021, 0xFFFF, false, false, 0).unwrap();
    assert_eq!(ccitt.to_string(), "CRC-16-0x1021 init=~0 xor=0");
    let umts = CrcModel::new(12, 0x80F, 0, false, true, 0).unwrap();
    assert_eq!(umts.to_string(), "CRC-12-0x080F reflect-out init=0 xor=0");
    let itu = CrcModel::new(8, 0x07, 0x55, false, false, 0x55).unwrap();
    assert_eq!(itu.to_string(), "CRC-8-0x07 init=0x55 xor=0x55");
  }
}
