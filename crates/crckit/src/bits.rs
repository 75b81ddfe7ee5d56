//! Bit reflection primitives.
//!
//! Reflection (bit reversal) turns an LSB-first register into an MSB-first one
//! and back. Every transform in this crate funnels through [`reflect`], so the
//! native-width swap networks below are the hot path; [`reflect_reference`] is
//! the per-bit loop they are checked against.

/// Reflect the 8 bits of `v`.
#[inline]
#[must_use]
pub const fn reflect8(v: u8) -> u8 {
  let v = ((v & 0x55) << 1) | ((v >> 1) & 0x55);
  let v = ((v & 0x33) << 2) | ((v >> 2) & 0x33);
  (v << 4) | (v >> 4)
}

/// Reflect the 16 bits of `v`.
#[inline]
#[must_use]
pub const fn reflect16(v: u16) -> u16 {
  let v = ((v & 0x5555) << 1) | ((v >> 1) & 0x5555);
  let v = ((v & 0x3333) << 2) | ((v >> 2) & 0x3333);
  let v = ((v & 0x0F0F) << 4) | ((v >> 4) & 0x0F0F);
  (v << 8) | (v >> 8)
}

/// Reflect the 32 bits of `v`.
#[inline]
#[must_use]
pub const fn reflect32(v: u32) -> u32 {
  let v = ((v & 0x5555_5555) << 1) | ((v >> 1) & 0x5555_5555);
  let v = ((v & 0x3333_3333) << 2) | ((v >> 2) & 0x3333_3333);
  let v = ((v & 0x0F0F_0F0F) << 4) | ((v >> 4) & 0x0F0F_0F0F);
  let v = ((v & 0x00FF_00FF) << 8) | ((v >> 8) & 0x00FF_00FF);
  (v << 16) | (v >> 16)
}

/// Reflect the 64 bits of `v`.
#[inline]
#[must_use]
pub const fn reflect64(v: u64) -> u64 {
  let v = ((v & 0x5555_5555_5555_5555) << 1) | ((v >> 1) & 0x5555_5555_5555_5555);
  let v = ((v & 0x3333_3333_3333_3333) << 2) | ((v >> 2) & 0x3333_3333_3333_3333);
  let v = ((v & 0x0F0F_0F0F_0F0F_0F0F) << 4) | ((v >> 4) & 0x0F0F_0F0F_0F0F_0F0F);
  let v = ((v & 0x00FF_00FF_00FF_00FF) << 8) | ((v >> 8) & 0x00FF_00FF_00FF_00FF);
  let v = ((v & 0x0000_FFFF_0000_FFFF) << 16) | ((v >> 16) & 0x0000_FFFF_0000_FFFF);
  (v << 32) | (v >> 32)
}

/// Reflect the low `width` bits of `value`; bits above `width` are discarded.
///
/// Picks the smallest native swap network that holds `width` bits and shifts
/// the result back down. `width == 0` yields 0, widths above 64 are treated
/// as 64.
///
/// ```
/// use crckit::bits::reflect;
///
/// assert_eq!(reflect(0x04C1_1DB7, 32), 0xEDB8_8320);
/// assert_eq!(reflect(0b110, 3), 0b011);
/// ```
#[inline]
#[must_use]
pub const fn reflect(value: u64, width: u32) -> u64 {
  match width {
    0 => 0,
    1..=8 => (reflect8(value as u8) >> (8 - width)) as u64,
    9..=16 => (reflect16(value as u16) >> (16 - width)) as u64,
    17..=32 => (reflect32(value as u32) >> (32 - width)) as u64,
    _ => reflect64(value) >> (64 - if width > 64 { 64 } else { width }),
  }
}

/// Per-bit reflection, the oracle for [`reflect`].
#[must_use]
pub const fn reflect_reference(value: u64, width: u32) -> u64 {
  let width = if width > 64 { 64 } else { width };
  let mut result = 0u64;
  let mut i = 0u32;
  while i < width {
    if (value >> i) & 1 != 0 {
      result |= 1 << (width - 1 - i);
    }
    i += 1;
  }
  result
}

/// All-ones mask covering the low `width` bits (`u64::MAX` for 64 and above).
#[inline]
#[must_use]
pub const fn mask(width: u32) -> u64 {
  if width >= 64 { u64::MAX } else { (1u64 << width) - 1 }
}

const _: () = {
  assert!(reflect(0x04C1_1DB7, 32) == 0xEDB8_8320);
  assert!(reflect(0x42F0_E1EB_A9EA_3693, 64) == 0xC96C_5795_D787_0F42);
  assert!(reflect(0x1021, 16) == 0x8408);
  assert!(reflect(0x0589, 16) == 0x91A0);
  assert!(mask(64) == u64::MAX);
  assert!(mask(1) == 1);
};
