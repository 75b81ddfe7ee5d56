//! CRC inversion: bytes that force a target CRC.
//!
//! For a reflected model, given the register state after a prefix, a suffix and
//! a target CRC, [`forge`] returns the `byte_size` bytes `mid` such that
//! `crc(prefix || mid || suffix) == target`.
//!
//! The register is run backwards from the target through the suffix, then
//! through the padding bits of `mid`, then through the `width` bits that the
//! prefix state contributes. Whatever is left in the register is `mid`.

use alloc::vec::Vec;

use crate::{
  error::CrcError,
  model::CrcModel,
  shift::{UnshiftTable, ensure_invertible, unstep_reflected},
};

/// Check that `model` supports inversion.
///
/// # Errors
///
/// [`CrcError::InvalidModel`] for an even polynomial,
/// [`CrcError::UnsupportedOperation`] unless both reflect flags are set.
pub const fn check_model(model: &CrcModel) -> Result<(), CrcError> {
  if let Err(e) = ensure_invertible(model) {
    return Err(e);
  }
  if !(model.reflect_in() && model.reflect_out()) {
    return Err(CrcError::UnsupportedOperation("CRC inversion requires a reflect-in/out model"));
  }
  Ok(())
}

/// Bytes to insert after a prefix with register state `prefix_state` so that
/// the message ending in `suffix` has CRC `target`.
///
/// `unshift` rewinds the suffix a byte at a time. `target` is masked to the
/// model width.
///
/// # Errors
///
/// See [`check_model`]. [`CrcError::ModelMismatch`] when `unshift` was built
/// for a different width or polynomial.
pub fn forge(
  model: &CrcModel,
  unshift: &UnshiftTable,
  prefix_state: u64,
  suffix: &[u8],
  target: u64,
) -> Result<Vec<u8>, CrcError> {
  check_model(model)?;
  if !unshift.matches(model) {
    return Err(CrcError::ModelMismatch);
  }

  let width = model.width() as u32;
  let rpoly = model.polynomial_reflected();
  let prefix_state = prefix_state & model.mask();

  let mut t = unshift.unshift_bytes(model.setup(target), suffix);
  for _ in 0..model.alignment_pad() {
    t = unstep_reflected(t, rpoly, width, false);
  }
  for i in (0..width).rev() {
    t = unstep_reflected(t, rpoly, width, (prefix_state >> i) & 1 != 0);
  }

  Ok(t.to_le_bytes().into_iter().take(model.byte_size()).collect())
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec;

  use super::*;
  use crate::update::update_reference;

  fn crc(m: &CrcModel, parts: &[&[u8]]) -> u64 {
    m.finish(parts.iter().fold(m.initial_state(), |s, p| update_reference(m, s, p)))
  }

  fn reflected_models() -> [CrcModel; 7] {
    [
      CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF).unwrap(),
      CrcModel::new(32, 0x1EDC_6F41, 0, true, true, 0xFFFF_FFFF).unwrap(),
      CrcModel::new(64, 0x42F0_E1EB_A9EA_3693, 0, true, true, u64::MAX).unwrap(),
      CrcModel::new(16, 0x1021, 0x554D, true, true, 0).unwrap(),
      CrcModel::new(14, 0x805, 0, true, true, 0).unwrap(),
      CrcModel::new(5, 0x05, 0, true, true, 0x1F).unwrap(),
      CrcModel::new(3, 0x03, 0x7, true, true, 0).unwrap(),
    ]
  }

  #[test]
  fn test_forge_hits_target() {
    for m in reflected_models() {
      let table = UnshiftTable::build(&m).unwrap();
      let cases: [(&[u8], &[u8], u64); 4] =
        [(b"", b"", 12345), (b"123456789", b"", 1_234_567), (b"", b"123456789", 123_456_789), (b"abc", b"xyz!", !0)];
      for (pre, post, target) in cases {
        let pre_state = update_reference(&m, m.initial_state(), pre);
        let mid = forge(&m, &table, pre_state, post, target).unwrap();
        assert_eq!(mid.len(), m.byte_size());
        assert_eq!(crc(&m, &[pre, &mid[..], post]), target & m.mask(), "{m} pre={pre:?} post={post:?}");
      }
    }
  }

  #[test]
  fn test_forge_crc32_known_bytes() {
    let m = reflected_models()[0];
    let table = UnshiftTable::build(&m).unwrap();
    // The four bytes that make an otherwise empty CRC-32 message hash to 0.
    let mid = forge(&m, &table, m.initial_state(), b"", 0).unwrap();
    assert_eq!(crc(&m, &[&mid[..]]), 0);
    assert_eq!(mid, vec![0x9D, 0x0A, 0xD9, 0x6D]);
  }

  #[test]
  fn test_forge_rejects_foreign_unshift_table() {
    let crc32 = reflected_models()[0];
    let crc32c = reflected_models()[1];
    let foreign = UnshiftTable::build(&crc32c).unwrap();
    let state = crc32.initial_state();
    assert_eq!(forge(&crc32, &foreign, state, b"suffix", 0x1234_5678), Err(CrcError::ModelMismatch));

    // A table for a variant (different initial value) is fine.
    let own = UnshiftTable::build(&crc32.with_initial(0xFFFF)).unwrap();
    let mid = forge(&crc32, &own, state, b"suffix", 0x1234_5678).unwrap();
    assert_eq!(crc(&crc32, &[&mid[..], b"suffix"]), 0x1234_5678);
  }

  #[test]
  fn test_non_reflected_is_unsupported() {
    let m = CrcModel::new(16, 0x1021, 0xFFFF, false, false, 0).unwrap();
    assert!(matches!(check_model(&m), Err(CrcError::UnsupportedOperation(_))));
    let m = CrcModel::new(12, 0x80F, 0, false, true, 0).unwrap();
    assert!(matches!(check_model(&m), Err(CrcError::UnsupportedOperation(_))));
  }

  #[test]
  fn test_even_polynomial_is_invalid() {
    let m = CrcModel::new(16, 0x8004, 0, true, true, 0).unwrap();
    assert_eq!(check_model(&m), Err(CrcError::even_polynomial()));
  }
}
