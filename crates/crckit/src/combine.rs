//! GF(2) matrix CRC combination for any width.
//!
//! Given `crc(A)`, `crc(B)` and `len(B)`, computes `crc(A || B)` without
//! touching the data, in O(width² · log len(B)).
//!
//! # Mathematical Background
//!
//! With `M` the one-bit shift operator of the register in output orientation
//! and `init` the CRC of the empty message:
//!
//! ```text
//! crc(A || B) = M^(8·len(B)) · (crc(A) ^ init) ^ crc(B)
//! ```
//!
//! `M^(8·len(B))` is applied by square-and-multiply over the bits of
//! `len(B)`, starting from the one-byte operator `M^8`.

// SAFETY: column indexes are `< width <= 64` by construction.
#![allow(clippy::indexing_slicing)]

use crate::model::CrcModel;

// ─────────────────────────────────────────────────────────────────────────────
// GF(2) Matrix
// ─────────────────────────────────────────────────────────────────────────────

/// A `width × width` GF(2) matrix stored as column bitmasks.
///
/// Column `j` is the image of the unit vector `1 << j`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gf2Matrix {
  cols: [u64; 64],
  width: u8,
}

impl Gf2Matrix {
  /// Identity matrix of the given width.
  #[must_use]
  pub const fn identity(width: u8) -> Self {
    let mut cols = [0u64; 64];
    let mut j = 0;
    while j < width as usize && j < 64 {
      cols[j] = 1 << j;
      j += 1;
    }
    Self { cols, width }
  }

  /// The one-bit shift operator of `model`'s register in output orientation.
  ///
  /// Right-shift with `reflect(poly)` feedback when `reflect_out`, left-shift
  /// with `poly` feedback otherwise.
  #[must_use]
  pub const fn shift1(model: &CrcModel) -> Self {
    let width = model.width() as usize;
    let mut cols = [0u64; 64];
    if model.reflect_out() {
      cols[0] = model.polynomial_reflected();
      let mut j = 1;
      while j < width {
        cols[j] = 1 << (j - 1);
        j += 1;
      }
    } else {
      let mut j = 0;
      while j + 1 < width {
        cols[j] = 1 << (j + 1);
        j += 1;
      }
      cols[width - 1] = model.polynomial();
    }
    Self { cols, width: model.width() }
  }

  /// Matrix-vector product.
  #[inline]
  #[must_use]
  pub const fn mul_vec(&self, mut vec: u64) -> u64 {
    let mut result = 0u64;
    let mut j = 0;
    while vec != 0 && j < self.width as usize {
      if vec & 1 != 0 {
        result ^= self.cols[j];
      }
      vec >>= 1;
      j += 1;
    }
    result
  }

  /// Matrix product `self · other`.
  #[must_use]
  pub const fn mul_mat(&self, other: &Self) -> Self {
    let mut cols = [0u64; 64];
    let mut j = 0;
    while j < self.width as usize {
      cols[j] = self.mul_vec(other.cols[j]);
      j += 1;
    }
    Self { cols, width: self.width }
  }

  /// `self · self`.
  #[inline]
  #[must_use]
  pub const fn square(&self) -> Self {
    self.mul_mat(self)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Combine
// ─────────────────────────────────────────────────────────────────────────────

/// CRC of `A || B` from `crc1 = crc(A)`, `crc2 = crc(B)` and `len2 = len(B)`.
///
/// `crc2` must have been computed from `model.initial()`. A zero `len2`
/// returns `crc1` unchanged.
#[must_use]
pub const fn combine(model: &CrcModel, crc1: u64, crc2: u64, len2: u64) -> u64 {
  let mask = model.mask();
  if len2 == 0 {
    return crc1 & mask;
  }

  let mut acc = (crc1 ^ model.initial()) & mask;
  let mut odd = Gf2Matrix::shift1(model);
  let mut even = odd.square(); // 2 bits
  odd = even.square(); // 4 bits

  let mut len = len2;
  loop {
    even = odd.square(); // 8, 32, 128, ... bits
    if len & 1 != 0 {
      acc = even.mul_vec(acc);
    }
    len >>= 1;
    if len == 0 {
      break;
    }

    odd = even.square();
    if len & 1 != 0 {
      acc = odd.mul_vec(acc);
    }
    len >>= 1;
    if len == 0 {
      break;
    }
  }

  (acc ^ crc2) & mask
}

/// Shift operator for `bytes` zero bytes, by square-and-multiply.
///
/// Useful when many CRCs are combined with the same `len2`:
/// `combine(m, a, b, n) == op.mul_vec(a ^ m.initial()) ^ b`.
#[must_use]
pub const fn zeros_operator(model: &CrcModel, bytes: u64) -> Gf2Matrix {
  let mut result = Gf2Matrix::identity(model.width());
  let mut power = Gf2Matrix::shift1(model).square().square().square();
  let mut n = bytes;
  while n != 0 {
    if n & 1 != 0 {
      result = power.mul_mat(&result);
    }
    power = power.square();
    n >>= 1;
  }
  result
}
