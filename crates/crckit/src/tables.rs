//! Lookup table generation for arbitrary widths.
//!
//! # Orientations
//!
//! | Orientation | Register | Table 0 entry `b` |
//! |-------------|----------|-------------------|
//! | Reflected | `width` bits, LSB-first | 8 right-shift steps from `b` with `reflect(poly)` |
//! | Normal | `W = byte_size * 8` bits, MSB-first | 8 left-shift steps from `b << (W - 8)` with `poly << pad` |
//!
//! Normal tables are padded so a byte boundary always sits at the top of the
//! register; `update` shifts the unpadded state up on entry and back down on
//! exit. Slice `k` is slice `k - 1` followed by one zero byte, which is what
//! slice-by-N needs to fold `N` bytes per step.

// SAFETY: indexes are `u8`-derived (< 256) or bounded by `slices.len()` loop ranges.
#![allow(clippy::indexing_slicing)]

use alloc::{vec, vec::Vec};

use crate::{bits, model::CrcModel};

/// Maximum number of slices a table set will hold.
pub const MAX_SLICES: usize = 32;

/// Default slice count for the sliced strategy.
pub const DEFAULT_SLICES: usize = 16;

/// Which way the register shifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
  /// LSB-first (right-shifting) register, used when `reflect_in` is set.
  Reflected,
  /// MSB-first (left-shifting) register.
  Normal,
}

impl Orientation {
  /// Orientation the register of `model` uses.
  #[inline]
  #[must_use]
  pub const fn of(model: &CrcModel) -> Self {
    if model.reflect_in() { Self::Reflected } else { Self::Normal }
  }
}

/// Byte-aligned view of a normal-orientation register.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Padded {
  /// Bits added below the CRC to reach a byte boundary.
  pub pad: u32,
  /// Padded register width.
  pub bits: u32,
  /// Mask over `bits`.
  pub mask: u64,
  /// `polynomial << pad`.
  pub poly: u64,
}

impl Padded {
  #[inline]
  pub const fn of(model: &CrcModel) -> Self {
    let pad = model.alignment_pad();
    let bits = model.byte_size() as u32 * 8;
    Self { pad, bits, mask: bits::mask(bits), poly: model.polynomial() << pad }
  }

  /// Shift distance that moves the top byte down to bits 0..8.
  #[inline]
  pub const fn top_shift(&self) -> u32 {
    self.bits - 8
  }

  /// One left-shift LFSR step.
  #[inline]
  pub const fn step(&self, s: u64) -> u64 {
    if (s >> (self.bits - 1)) & 1 != 0 { ((s << 1) ^ self.poly) & self.mask } else { (s << 1) & self.mask }
  }
}

/// One right-shift LFSR step with the reflected polynomial.
#[inline]
pub(crate) const fn step_reflected(s: u64, rpoly: u64) -> u64 {
  if s & 1 != 0 { (s >> 1) ^ rpoly } else { s >> 1 }
}

/// Table-0 entry for a reflected register.
#[must_use]
pub const fn reflected_table_entry(rpoly: u64, index: u8) -> u64 {
  let mut crc = index as u64;
  let mut i = 0;
  while i < 8 {
    crc = step_reflected(crc, rpoly);
    i += 1;
  }
  crc
}

/// Table-0 entry for a normal register of `model`, in padded form.
#[must_use]
pub const fn normal_table_entry(model: &CrcModel, index: u8) -> u64 {
  let p = Padded::of(model);
  let mut crc = (index as u64) << p.top_shift();
  let mut i = 0;
  while i < 8 {
    crc = p.step(crc);
    i += 1;
  }
  crc
}

/// One or more 256-entry tables for a model.
///
/// Built once per engine and shared by reference. Slice 0 drives the
/// single-table update, slices `0..n` drive slice-by-`n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrcTables {
  orientation: Orientation,
  width: u8,
  polynomial: u64,
  slices: Vec<[u64; 256]>,
}

impl CrcTables {
  /// Build `slices` tables for `model`. The count is clamped to
  /// `1..=MAX_SLICES`.
  #[must_use]
  pub fn build(model: &CrcModel, slices: usize) -> Self {
    let count = slices.clamp(1, MAX_SLICES);
    let orientation = Orientation::of(model);
    let mut tables = vec![[0u64; 256]; count];

    match orientation {
      Orientation::Reflected => {
        let rpoly = model.polynomial_reflected();
        for (b, entry) in tables[0].iter_mut().enumerate() {
          *entry = reflected_table_entry(rpoly, b as u8);
        }
        for k in 1..count {
          for b in 0..256 {
            let prev = tables[k - 1][b];
            tables[k][b] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
          }
        }
      }
      Orientation::Normal => {
        let p = Padded::of(model);
        for (b, entry) in tables[0].iter_mut().enumerate() {
          *entry = normal_table_entry(model, b as u8);
        }
        for k in 1..count {
          for b in 0..256 {
            let prev = tables[k - 1][b];
            tables[k][b] = tables[0][((prev >> p.top_shift()) & 0xFF) as usize] ^ ((prev << 8) & p.mask);
          }
        }
      }
    }

    Self { orientation, width: model.width(), polynomial: model.polynomial(), slices: tables }
  }

  /// Register orientation the tables were built for.
  #[inline]
  #[must_use]
  pub const fn orientation(&self) -> Orientation {
    self.orientation
  }

  /// Width of the model the tables were built for.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u8 {
    self.width
  }

  /// Number of slices.
  #[inline]
  #[must_use]
  pub fn slices(&self) -> usize {
    self.slices.len()
  }

  /// Slice `k`, if present.
  #[inline]
  #[must_use]
  pub fn table(&self, k: usize) -> Option<&[u64; 256]> {
    self.slices.get(k)
  }

  #[inline]
  pub(crate) fn all(&self) -> &[[u64; 256]] {
    &self.slices
  }

  /// Normal-form polynomial the tables were generated from.
  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> u64 {
    self.polynomial
  }

  /// Whether these tables can drive updates for `model`: same width,
  /// polynomial and input orientation.
  #[inline]
  #[must_use]
  pub fn matches(&self, model: &CrcModel) -> bool {
    self.width == model.width() && self.polynomial == model.polynomial() && self.orientation == Orientation::of(model)
  }
}
