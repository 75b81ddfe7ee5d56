//! Register update strategies.
//!
//! Three interchangeable ways to feed bytes through the register:
//!
//! - [`update_reference`]: bit-at-a-time LFSR, no tables. The oracle.
//! - `update_table`: one lookup per byte through slice 0.
//! - `update_sliced`: slice-by-N, one lookup per byte into `N` tables with
//!   the lookups of a chunk independent of each other. The `len % N` tail goes
//!   through `update_table`.
//!
//! The table paths trust that their tables were built for the model, so they
//! are only reachable through [`Crc`](crate::Crc), which builds both together.
//!
//! All three produce identical states for any model, any input and any slice
//! count. State values are unpadded and masked to the model width on entry and
//! exit; normal-orientation paths work in the padded register internally.

// Table indexes are `u8` values widened to usize (< 256); slice indexes
// are `n - 1 - i` with `i < n == tables.len()`.
#![allow(clippy::indexing_slicing)]

use crate::{
  model::CrcModel,
  tables::{CrcTables, Orientation, Padded, step_reflected},
};

#[inline]
const fn shr(v: u64, n: usize) -> u64 {
  if n >= 64 { 0 } else { v >> n }
}

#[inline]
const fn shl(v: u64, n: usize) -> u64 {
  if n >= 64 { 0 } else { v << n }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference
// ─────────────────────────────────────────────────────────────────────────────

/// Bit-by-bit update. Slow, table-free and obviously correct.
#[must_use]
pub fn update_reference(model: &CrcModel, state: u64, data: &[u8]) -> u64 {
  let state = state & model.mask();
  match Orientation::of(model) {
    Orientation::Reflected => {
      let rpoly = model.polynomial_reflected();
      data.iter().fold(state, |mut s, &b| {
        s ^= b as u64;
        for _ in 0..8 {
          s = step_reflected(s, rpoly);
        }
        s
      })
    }
    Orientation::Normal => {
      let p = Padded::of(model);
      let s = data.iter().fold(state << p.pad, |mut s, &b| {
        s ^= (b as u64) << p.top_shift();
        for _ in 0..8 {
          s = p.step(s);
        }
        s
      });
      s >> p.pad
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Single table
// ─────────────────────────────────────────────────────────────────────────────

/// Byte-at-a-time update through slice 0 of `tables`.
#[must_use]
pub(crate) fn update_table(model: &CrcModel, tables: &CrcTables, state: u64, data: &[u8]) -> u64 {
  debug_assert!(tables.matches(model), "tables built for a different model");
  let t0 = &tables.all()[0];
  let state = state & model.mask();
  match tables.orientation() {
    Orientation::Reflected => data.iter().fold(state, |s, &b| t0[((s ^ b as u64) & 0xFF) as usize] ^ (s >> 8)),
    Orientation::Normal => {
      let p = Padded::of(model);
      let top = p.top_shift();
      let s = data
        .iter()
        .fold(state << p.pad, |s, &b| t0[(((s >> top) ^ b as u64) & 0xFF) as usize] ^ ((s << 8) & p.mask));
      s >> p.pad
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slice-by-N
// ─────────────────────────────────────────────────────────────────────────────

/// Slice-by-N update where `N = tables.slices()`.
///
/// Per `N`-byte chunk the register's bytes are xored into the leading bytes of
/// the chunk, byte `i` is looked up in slice `N - 1 - i`, and the part of the
/// register that is shifted past the chunk is carried over. Works for any `N`,
/// including chunks longer or shorter than the register.
#[must_use]
pub(crate) fn update_sliced(model: &CrcModel, tables: &CrcTables, state: u64, data: &[u8]) -> u64 {
  debug_assert!(tables.matches(model), "tables built for a different model");
  let n = tables.slices();
  if n == 1 {
    return update_table(model, tables, state, data);
  }

  let t = tables.all();
  let mut chunks = data.chunks_exact(n);
  let state = state & model.mask();

  let state = match tables.orientation() {
    Orientation::Reflected => {
      let mut s = state;
      for chunk in chunks.by_ref() {
        let mut acc = shr(s, 8 * n);
        for (i, &b) in chunk.iter().enumerate() {
          let idx = (b as u64 ^ shr(s, 8 * i)) & 0xFF;
          acc ^= t[n - 1 - i][idx as usize];
        }
        s = acc;
      }
      s
    }
    Orientation::Normal => {
      let p = Padded::of(model);
      let lanes = p.bits as usize / 8;
      let mut s = state << p.pad;
      for chunk in chunks.by_ref() {
        let mut acc = shl(s, 8 * n) & p.mask;
        for (i, &b) in chunk.iter().enumerate() {
          let reg = if i < lanes { (s >> (p.bits as usize - 8 * (i + 1))) & 0xFF } else { 0 };
          acc ^= t[n - 1 - i][((b as u64) ^ reg) as usize];
        }
        s = acc;
      }
      s >> p.pad
    }
  };

  update_table(model, tables, state, chunks.remainder())
}

/// Update `state` with `data`, picking the strategy from what `tables` holds:
/// no tables is the reference path, one slice the table path, more slices the
/// sliced path.
#[inline]
#[must_use]
pub(crate) fn update(model: &CrcModel, tables: Option<&CrcTables>, state: u64, data: &[u8]) -> u64 {
  match tables {
    None => update_reference(model, state, data),
    Some(t) if t.slices() == 1 => update_table(model, t, state, data),
    Some(t) => update_sliced(model, t, state, data),
  }
}
