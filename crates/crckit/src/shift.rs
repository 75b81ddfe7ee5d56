//! Forward and backward register shifting.
//!
//! Forward shifting is plain LFSR stepping, bit by bit, so messages that are
//! not a whole number of bytes can be fed. Backward shifting runs the LFSR in
//! reverse: given the state *after* some input and that input, recover the
//! state *before* it. This only works when the polynomial has its constant
//! term (bit 0) set, which makes every step a bijection.
//!
//! Bit sequences are consumed in the order the register sees them:
//! LSB-first within a byte for reflected models, MSB-first otherwise.

// SAFETY: unshift table indexes are masked to 0..=255.
#![allow(clippy::indexing_slicing)]

use crate::{
  bits,
  error::CrcError,
  model::CrcModel,
  tables::{Orientation, Padded, step_reflected},
};

/// Fail unless every LFSR step of `model` is invertible.
#[inline]
pub(crate) const fn ensure_invertible(model: &CrcModel) -> Result<(), CrcError> {
  if model.polynomial() & 1 == 0 { Err(CrcError::even_polynomial()) } else { Ok(()) }
}

// ─────────────────────────────────────────────────────────────────────────────
// Single steps
// ─────────────────────────────────────────────────────────────────────────────

/// Undo one reflected step and remove input bit `bit`.
///
/// Forward: `s ^= bit; s = s & 1 ? (s >> 1) ^ rpoly : s >> 1`. Because
/// `rpoly` has bit `width - 1` set, that bit after the step says whether the
/// feedback fired.
#[inline]
pub(crate) const fn unstep_reflected(s: u64, rpoly: u64, width: u32, bit: bool) -> u64 {
  let mask = bits::mask(width);
  let top = (s >> (width - 1)) & 1;
  let mut s = (s << 1) & mask;
  if top != 0 {
    s ^= ((rpoly << 1) | 1) & mask;
  }
  s ^ bit as u64
}

/// Undo one padded normal step and remove input bit `bit` at the head.
#[inline]
const fn unstep_normal(s: u64, p: &Padded, bit: bool) -> u64 {
  let head = p.bits - 1;
  let fired = (s >> p.pad) & 1;
  let mut s = s >> 1;
  if fired != 0 {
    s ^= (p.poly >> 1) | (1 << head);
  }
  s ^ ((bit as u64) << head)
}

// ─────────────────────────────────────────────────────────────────────────────
// Bit and byte shifting
// ─────────────────────────────────────────────────────────────────────────────

/// Advance `state` by the given input bits.
#[must_use]
pub fn shift_bits(model: &CrcModel, state: u64, input: impl IntoIterator<Item = bool>) -> u64 {
  let state = state & model.mask();
  match Orientation::of(model) {
    Orientation::Reflected => {
      let rpoly = model.polynomial_reflected();
      input.into_iter().fold(state, |s, bit| step_reflected(s ^ bit as u64, rpoly))
    }
    Orientation::Normal => {
      let p = Padded::of(model);
      let head = p.bits - 1;
      input.into_iter().fold(state << p.pad, |s, bit| p.step(s ^ ((bit as u64) << head))) >> p.pad
    }
  }
}

/// Rewind `state` over the given input bits, which are listed in the order
/// they were originally fed.
///
/// # Errors
///
/// [`CrcError::InvalidModel`] for an even polynomial.
pub fn unshift_bits<I>(model: &CrcModel, state: u64, input: I) -> Result<u64, CrcError>
where
  I: IntoIterator<Item = bool>,
  I::IntoIter: DoubleEndedIterator,
{
  ensure_invertible(model)?;
  let state = state & model.mask();
  let input = input.into_iter().rev();
  Ok(match Orientation::of(model) {
    Orientation::Reflected => {
      let rpoly = model.polynomial_reflected();
      let width = model.width() as u32;
      input.fold(state, |s, bit| unstep_reflected(s, rpoly, width, bit))
    }
    Orientation::Normal => {
      let p = Padded::of(model);
      input.fold(state << p.pad, |s, bit| unstep_normal(s, &p, bit)) >> p.pad
    }
  })
}

/// Bits of `data` in feeding order for `model`.
pub(crate) fn bits_of<'a>(model: &CrcModel, data: &'a [u8]) -> impl DoubleEndedIterator<Item = bool> + 'a {
  let reflected = model.reflect_in();
  data.iter().flat_map(move |&b| {
    (0..8u32).map(move |i| {
      let pos = if reflected { i } else { 7 - i };
      (b >> pos) & 1 != 0
    })
  })
}

/// Rewind `state` over `data`, bit by bit.
///
/// # Errors
///
/// [`CrcError::InvalidModel`] for an even polynomial.
pub fn unshift_bytes_bitwise(model: &CrcModel, state: u64, data: &[u8]) -> Result<u64, CrcError> {
  unshift_bits(model, state, bits_of(model, data))
}

// ─────────────────────────────────────────────────────────────────────────────
// Unshift table
// ─────────────────────────────────────────────────────────────────────────────

/// 256-entry table that rewinds a reflected register by one byte per lookup.
///
/// Entry `h` is the result of eight backward steps starting from `h` placed
/// at the top of a register at least 8 bits wide. For widths below 8 the
/// register is widened to 8 bits and the input byte supplies the extra low
/// bits of the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnshiftTable {
  entries: [u64; 256],
  width: u8,
  polynomial: u64,
}

impl UnshiftTable {
  /// Build the table for a reflected model.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidModel`] for an even polynomial, and
  /// [`CrcError::UnsupportedOperation`] for a normal-orientation model.
  pub fn build(model: &CrcModel) -> Result<Self, CrcError> {
    ensure_invertible(model)?;
    if !model.reflect_in() {
      return Err(CrcError::UnsupportedOperation("unshift table for a non-reflected model"));
    }

    let width = model.width() as u32;
    let reg = width.max(8);
    let pad = reg - width;
    let mask = bits::mask(reg);
    let head = reg - 1;
    let feedback = (((model.polynomial_reflected() << 1) | 1) << pad) & mask;

    let mut entries = [0u64; 256];
    for (h, entry) in entries.iter_mut().enumerate() {
      let mut s = (h as u64) << (reg - 8);
      for _ in 0..8 {
        let top = (s >> head) & 1;
        s = (s << 1) & mask;
        if top != 0 {
          s ^= feedback;
        }
      }
      *entry = s >> pad;
    }

    Ok(Self { entries, width: model.width(), polynomial: model.polynomial() })
  }

  /// Whether this table rewinds `model`'s register: same width and
  /// polynomial, reflected input.
  #[inline]
  #[must_use]
  pub const fn matches(&self, model: &CrcModel) -> bool {
    self.width == model.width() && self.polynomial == model.polynomial() && model.reflect_in()
  }

  /// Rewind `state` over one input byte.
  #[inline]
  #[must_use]
  pub fn unshift_byte(&self, state: u64, byte: u8) -> u64 {
    let width = self.width as u32;
    let c = byte as u64;
    if width >= 8 {
      let low = bits::mask(width - 8);
      self.entries[(state >> (width - 8)) as usize & 0xFF] ^ ((state & low) << 8) ^ c
    } else {
      let v = (state << 8) | c;
      self.entries[(v >> width) as usize & 0xFF] ^ (c & bits::mask(width))
    }
  }

  /// Rewind `state` over `data` (last byte first).
  #[must_use]
  pub fn unshift_bytes(&self, state: u64, data: &[u8]) -> u64 {
    data.iter().rev().fold(state & bits::mask(self.width as u32), |s, &b| self.unshift_byte(s, b))
  }
}
