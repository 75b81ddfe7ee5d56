//! Conversion between external CRC values and internal register states.
//!
//! The register is kept in *input* orientation (LSB-first when `reflect_in`).
//! When input and output orientations differ the value is reflected on the way
//! in and out, and `xor_out` is applied on both sides so that
//! `finish(setup(x)) == x`.

use crate::{bits, model::CrcModel};

impl CrcModel {
  /// Internal register state that continues a message whose CRC is `crc`.
  ///
  /// `setup(initial())` is the starting state of a fresh message.
  #[inline]
  #[must_use]
  pub const fn setup(&self, crc: u64) -> u64 {
    let v = (crc ^ self.xor_out()) & self.mask();
    self.reorient(v)
  }

  /// Register state of an empty message.
  #[inline]
  #[must_use]
  pub const fn initial_state(&self) -> u64 {
    self.setup(self.initial())
  }

  /// CRC value for the internal register `state`.
  #[inline]
  #[must_use]
  pub const fn finish(&self, state: u64) -> u64 {
    (self.reorient(state & self.mask()) ^ self.xor_out()) & self.mask()
  }

  #[inline]
  const fn reorient(&self, v: u64) -> u64 {
    if self.reflect_in() != self.reflect_out() { bits::reflect(v, self.width() as u32) } else { v }
  }
}

#[cfg(test)]
mod tests {
  use crate::model::CrcModel;

  fn models() -> [CrcModel; 5] {
    [
      CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF).unwrap(),
      CrcModel::new(12, 0x80F, 0, false, true, 0).unwrap(),
      CrcModel::new(12, 0x80F, 0x123, true, false, 0xABC).unwrap(),
      CrcModel::new(5, 0x09, 0x09, false, false, 0).unwrap(),
      CrcModel::new(64, 0x42F0_E1EB_A9EA_3693, 0, true, true, u64::MAX).unwrap(),
    ]
  }

  #[test]
  fn test_finish_inverts_setup() {
    for m in models() {
      let mut x = 0x0123_4567_89AB_CDEFu64;
      for _ in 0..200 {
        x = x.rotate_left(7) ^ 0x9E37_79B9;
        let v = x & m.mask();
        assert_eq!(m.finish(m.setup(v)), v, "{m}");
        assert_eq!(m.setup(m.finish(v)), v, "{m}");
      }
    }
  }

  #[test]
  fn test_setup_crc32() {
    let m = models()[0];
    assert_eq!(m.initial_state(), 0xFFFF_FFFF);
    assert_eq!(m.finish(0xFFFF_FFFF), 0);
  }

  #[test]
  fn test_setup_reflects_when_orientations_differ() {
    let m = CrcModel::new(12, 0x80F, 0, false, true, 0).unwrap();
    assert_eq!(m.setup(0x001), 0x800);
    assert_eq!(m.finish(0x800), 0x001);
  }

  #[test]
  fn test_setup_masks_input() {
    let m = CrcModel::new(8, 0x07, 0, false, false, 0).unwrap();
    assert_eq!(m.setup(0x1FF), 0xFF);
    assert_eq!(m.finish(0x1FF), 0xFF);
  }
}
