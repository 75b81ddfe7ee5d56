//! Well-known CRC presets and a name registry.
//!
//! Every preset stores `initial` as the CRC of the empty message (see
//! [`CrcModel`]), along with the CRC of `"123456789"` so the table can verify
//! itself.
//!
//! ```
//! # #[cfg(feature = "std")] {
//! let crc = crckit::catalog::lookup("CRC-16/CCITT-FALSE")?;
//! assert_eq!(crc.checksum(b"123456789"), 0x29B1);
//! // Names are matched case-insensitively, ignoring punctuation.
//! assert!(crckit::catalog::lookup("crc32c").is_ok());
//! # }
//! # Ok::<(), crckit::CrcError>(())
//! ```

use alloc::vec::Vec;

use crate::{config::Strategy, engine::Crc, error::CrcError, model::CrcModel, tables::CrcTables, update::update_table};

/// A named CRC model with its check value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
  /// Canonical name first, then aliases.
  pub names: &'static [&'static str],
  /// Width in bits.
  pub width: u8,
  /// Normal-form polynomial.
  pub polynomial: u64,
  /// CRC of the empty message.
  pub initial: u64,
  /// LSB-first input.
  pub reflect_in: bool,
  /// Reflect before the output xor.
  pub reflect_out: bool,
  /// Output xor.
  pub xor_out: u64,
  /// CRC of `"123456789"`.
  pub check: u64,
}

impl Preset {
  /// Canonical name.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    match self.names.first() {
      Some(name) => *name,
      None => "",
    }
  }

  /// The preset as a model.
  #[must_use]
  pub const fn model(&self) -> CrcModel {
    CrcModel::from_parts(self.width, self.polynomial, self.initial, self.reflect_in, self.reflect_out, self.xor_out)
  }

  /// Engine for this preset with the process-wide strategy.
  #[must_use]
  pub fn engine(&self) -> Crc {
    Crc::new(self.model())
  }

  /// Engine for this preset with an explicit strategy.
  #[must_use]
  pub fn engine_with(&self, strategy: Strategy) -> Crc {
    Crc::with_strategy(self.model(), strategy)
  }
}

const ONES: u64 = u64::MAX;

macro_rules! preset {
  ([$($name:literal),+ $(,)?], $width:expr, $poly:expr, $refin:expr, $refout:expr, $init:expr, $xor:expr, $check:expr) => {
    Preset {
      names: &[$($name),+],
      width: $width,
      polynomial: $poly,
      initial: $init & $crate::bits::mask($width),
      reflect_in: $refin,
      reflect_out: $refout,
      xor_out: $xor & $crate::bits::mask($width),
      check: $check,
    }
  };
}

/// Known presets.
pub static PRESETS: &[Preset] = &[
  preset!(["CRC-1", "CRC-1-PARITY"], 1, 0x01, true, true, 0, ONES, 0x01),
  preset!(["CRC-3-ROHC"], 3, 0x03, true, true, ONES, 0, 0x06),
  preset!(["CRC-4-INTERLAKEN"], 4, 0x03, false, false, 0, ONES, 0x0B),
  preset!(["CRC-4-ITU", "CRC-4-G-704"], 4, 0x03, true, true, 0, 0, 0x07),
  preset!(["CRC-5-EPC", "CRC-5-EPC-C1G2"], 5, 0x09, false, false, 0x09, 0, 0x00),
  preset!(["CRC-5-ITU", "CRC-5-G-704"], 5, 0x15, true, true, 0, 0, 0x07),
  preset!(["CRC-5-USB"], 5, 0x05, true, true, 0, ONES, 0x19),
  preset!(["CRC-6-CDMA2000-A"], 6, 0x27, false, false, ONES, 0, 0x0D),
  preset!(["CRC-6-CDMA2000-B"], 6, 0x07, false, false, ONES, 0, 0x3B),
  preset!(["CRC-6-DARC"], 6, 0x19, true, true, 0, 0, 0x26),
  preset!(["CRC-6-ITU", "CRC-6-G-704"], 6, 0x03, true, true, 0, 0, 0x06),
  preset!(["CRC-7", "CRC-7-MMC"], 7, 0x09, false, false, 0, 0, 0x75),
  preset!(["CRC-7-ROHC"], 7, 0x4F, true, true, ONES, 0, 0x53),
  preset!(["CRC-7-UMTS"], 7, 0x45, false, false, 0, 0, 0x61),
  preset!(["CRC-8", "CRC-8-SMBUS", "CRC-8-CCITT"], 8, 0x07, false, false, 0, 0, 0xF4),
  preset!(["CRC-8-MAXIM", "CRC-8-MAXIM-DOW", "DOW-CRC"], 8, 0x31, true, true, 0, 0, 0xA1),
  preset!(["CRC-8-DARC"], 8, 0x39, true, true, 0, 0, 0x15),
  preset!(["CRC-8-SAE-J1850"], 8, 0x1D, false, false, 0, ONES, 0x4B),
  preset!(["CRC-8-WCDMA"], 8, 0x9B, true, true, 0, 0, 0x25),
  preset!(["CRC-8-CDMA2000"], 8, 0x9B, false, false, ONES, 0, 0xDA),
  preset!(["CRC-8-DVB-S2"], 8, 0xD5, false, false, 0, 0, 0xBC),
  preset!(["CRC-8-EBU", "CRC-8-AES", "CRC-8-TECH-3250"], 8, 0x1D, true, true, ONES, 0, 0x97),
  preset!(["CRC-8-I-CODE"], 8, 0x1D, false, false, 0xFD, 0, 0x7E),
  preset!(["CRC-8-ITU", "CRC-8-I-432-1"], 8, 0x07, false, false, 0x55, 0x55, 0xA1),
  preset!(["CRC-8-LTE"], 8, 0x9B, false, false, 0, 0, 0xEA),
  preset!(["CRC-8-ROHC"], 8, 0x07, true, true, ONES, 0, 0xD0),
  preset!(["CRC-10", "CRC-10-ATM", "CRC-10-I-610"], 10, 0x233, false, false, 0, 0, 0x199),
  preset!(["CRC-10-CDMA2000"], 10, 0x3D9, false, false, ONES, 0, 0x233),
  preset!(["CRC-11", "CRC-11-FLEXRAY"], 11, 0x385, false, false, 0x1A, 0, 0x5A3),
  preset!(["CRC-11-UMTS"], 11, 0x307, false, false, 0, 0, 0x061),
  preset!(["CRC-12-CDMA2000"], 12, 0xF13, false, false, ONES, 0, 0xD4D),
  preset!(["CRC-12-DECT"], 12, 0x80F, false, false, 0, 0, 0xF5B),
  preset!(["CRC-12-UMTS", "CRC-12-3GPP"], 12, 0x80F, false, true, 0, 0, 0xDAF),
  preset!(["CRC-13-BBC"], 13, 0x1CF5, false, false, 0, 0, 0x4FA),
  preset!(["CRC-14-DARC"], 14, 0x805, true, true, 0, 0, 0x82D),
  preset!(["CRC-15", "CRC-15-CAN"], 15, 0x4599, false, false, 0, 0, 0x59E),
  preset!(["CRC-15-MPT1327"], 15, 0x6815, false, false, 1, 1, 0x2566),
  preset!(["CRC-16", "CRC-16-ARC", "CRC-16-IBM", "CRC-16-LHA"], 16, 0x8005, true, true, 0, 0, 0xBB3D),
  preset!(["CRC-16-AUG-CCITT", "CRC-16-SPI-FUJITSU"], 16, 0x1021, false, false, 0x1D0F, 0, 0xE5CC),
  preset!(["CRC-16-CDMA2000"], 16, 0xC867, false, false, ONES, 0, 0x4C06),
  preset!(["CRC-16-DECT-R"], 16, 0x0589, false, false, 1, 1, 0x007E),
  preset!(["CRC-16-DECT-X"], 16, 0x0589, false, false, 0, 0, 0x007F),
  preset!(["CRC-16-T10-DIF"], 16, 0x8BB7, false, false, 0, 0, 0xD0DB),
  preset!(["CRC-16-DNP"], 16, 0x3D65, true, true, ONES, ONES, 0xEA82),
  preset!(["CRC-16-BUYPASS", "CRC-16-UMTS", "CRC-16-VERIFONE"], 16, 0x8005, false, false, 0, 0, 0xFEE8),
  preset!(["CRC-16-CCITT-FALSE", "CRC-16-IBM-3740", "CRC-16-AUTOSAR"], 16, 0x1021, false, false, ONES, 0, 0x29B1),
  preset!(["CRC-16-DDS-110"], 16, 0x8005, false, false, 0x800D, 0, 0x9ECF),
  preset!(["CRC-16-EN-13757"], 16, 0x3D65, false, false, ONES, ONES, 0xC2B7),
  preset!(["CRC-16-GENIBUS", "CRC-16-EPC", "CRC-16-DARC"], 16, 0x1021, false, false, 0, ONES, 0xD64E),
  preset!(["CRC-16-LJ1200"], 16, 0x6F63, false, false, 0, 0, 0xBDF4),
  preset!(["CRC-16-MAXIM", "CRC-16-MAXIM-DOW"], 16, 0x8005, true, true, ONES, ONES, 0x44C2),
  preset!(["CRC-16-MCRF4XX"], 16, 0x1021, true, true, ONES, 0, 0x6F91),
  preset!(["CRC-16-RIELLO"], 16, 0x1021, true, true, 0x554D, 0, 0x63D0),
  preset!(["CRC-16-TELEDISK"], 16, 0xA097, false, false, 0, 0, 0x0FB3),
  preset!(["CRC-16-TMS37157"], 16, 0x1021, true, true, 0x3791, 0, 0x26B1),
  preset!(["CRC-16-USB"], 16, 0x8005, true, true, 0, ONES, 0xB4C8),
  preset!(["CRC-A", "CRC-16-ISO-IEC-14443-3-A"], 16, 0x1021, true, true, 0x6363, 0, 0xBF05),
  preset!(["CRC-16-KERMIT", "KERMIT", "CRC-16-CCITT", "CRC-CCITT"], 16, 0x1021, true, true, 0, 0, 0x2189),
  preset!(["CRC-16-MODBUS", "MODBUS"], 16, 0x8005, true, true, ONES, 0, 0x4B37),
  preset!(["CRC-16-X-25", "X-25", "CRC-16-IBM-SDLC", "CRC-16-ISO-HDLC"], 16, 0x1021, true, true, 0, ONES, 0x906E),
  preset!(["CRC-16-XMODEM", "XMODEM", "ZMODEM", "CRC-16-ACORN"], 16, 0x1021, false, false, 0, 0, 0x31C3),
  preset!(["CRC-24", "CRC-24-RADIX-64"], 24, 0x86_4CFB, false, false, 0, 0, 0xCD_E703),
  preset!(["CRC-24-OPENPGP"], 24, 0x86_4CFB, false, false, 0xB7_04CE, 0, 0x21_CF02),
  preset!(["CRC-24-BLE"], 24, 0x00_065B, true, true, 0xAA_AAAA, 0, 0xC2_5A56),
  preset!(["CRC-24-FLEXRAY-A"], 24, 0x5D_6DCB, false, false, 0xFE_DCBA, 0, 0x79_79BD),
  preset!(["CRC-24-FLEXRAY-B"], 24, 0x5D_6DCB, false, false, 0xAB_CDEF, 0, 0x1F_23B8),
  preset!(["CRC-24-INTERLAKEN"], 24, 0x32_8B63, false, false, 0, ONES, 0xB4_F3E6),
  preset!(["CRC-24-LTE-A"], 24, 0x86_4CFB, false, false, 0, 0, 0xCD_E703),
  preset!(["CRC-24-LTE-B"], 24, 0x80_0063, false, false, 0, 0, 0x23_EF52),
  preset!(["CRC-30-CDMA"], 30, 0x2030_B9C7, false, false, 0, ONES, 0x04C3_4ABF),
  preset!(["CRC-31-PHILIPS"], 31, 0x04C1_1DB7, false, false, 0, ONES, 0x0CE9_E46C),
  preset!(["CRC-32", "CRC-32-ISO-HDLC", "CRC-32-IEEE", "ZLIB"], 32, 0x04C1_1DB7, true, true, 0, ONES, 0xCBF4_3926),
  preset!(["CRC-32-BZIP2", "CRC-32-AAL5"], 32, 0x04C1_1DB7, false, false, 0, ONES, 0xFC89_1918),
  preset!(["CRC-32C", "CRC-32-CASTAGNOLI", "CRC-32-ISCSI"], 32, 0x1EDC_6F41, true, true, 0, ONES, 0xE306_9283),
  preset!(["CRC-32D", "CRC-32-BASE91-D"], 32, 0xA833_982B, true, true, 0, ONES, 0x8731_5576),
  preset!(["CRC-32-MPEG-2"], 32, 0x04C1_1DB7, false, false, ONES, 0, 0x0376_E6E7),
  preset!(["CRC-32-POSIX", "CKSUM"], 32, 0x04C1_1DB7, false, false, ONES, ONES, 0x765E_7680),
  preset!(["CRC-32Q", "CRC-32-AIXM"], 32, 0x8141_41AB, false, false, 0, 0, 0x3010_BF7F),
  preset!(["CRC-32-JAMCRC", "JAMCRC"], 32, 0x04C1_1DB7, true, true, ONES, 0, 0x340B_C6D9),
  preset!(["CRC-32-XFER"], 32, 0x0000_00AF, false, false, 0, 0, 0xBD0B_E338),
  preset!(["CRC-40-GSM"], 40, 0x00_0482_0009, false, false, ONES, ONES, 0xD4_164F_C646),
  preset!(["CRC-64-XZ", "CRC-64-GO-ECMA"], 64, 0x42F0_E1EB_A9EA_3693, true, true, 0, ONES, 0x995D_C9BB_DF19_39FA),
  preset!(["CRC-64", "CRC-64-ECMA", "CRC-64-ECMA-182"], 64, 0x42F0_E1EB_A9EA_3693, false, false, 0, 0, 0x6C40_DF5F_0B49_7347),
  preset!(["CRC-64-WE"], 64, 0x42F0_E1EB_A9EA_3693, false, false, 0, ONES, 0x62EC_59E3_F1A4_F00A),
];

/// Lowercase ASCII alphanumerics of `name`, everything else dropped.
///
/// `"CRC-16/CCITT_FALSE"` and `"crc16ccittfalse"` normalize to the same key.
pub fn normalize_name(name: &str) -> impl Iterator<Item = char> + '_ {
  name.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_lowercase())
}

fn names_match(a: &str, b: &str) -> bool {
  normalize_name(a).eq(normalize_name(b))
}

/// Preset with the given name or alias, by linear scan. Works without `std`.
#[must_use]
pub fn find(name: &str) -> Option<&'static Preset> {
  PRESETS.iter().find(|p| p.names.iter().any(|n| names_match(n, name)))
}

#[cfg(feature = "std")]
mod registry {
  use std::{collections::BTreeMap, string::String, sync::OnceLock, vec::Vec};

  use super::{PRESETS, normalize_name};
  use crate::{engine::Crc, error::CrcError};

  struct Registry {
    engines: Vec<Crc>,
    by_name: BTreeMap<String, usize>,
  }

  fn build() -> Registry {
    let engines: Vec<Crc> = PRESETS.iter().map(super::Preset::engine).collect();
    let mut by_name = BTreeMap::new();
    for (index, preset) in PRESETS.iter().enumerate() {
      for name in preset.names {
        by_name.entry(normalize_name(name).collect()).or_insert(index);
      }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(presets = engines.len(), names = by_name.len(), "initialised crc registry");

    Registry { engines, by_name }
  }

  fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(build)
  }

  /// Shared engine for a preset name or alias.
  ///
  /// Engines are built once, on first use, for every preset.
  ///
  /// # Errors
  ///
  /// [`CrcError::UnknownModel`] when no preset has that name.
  pub fn lookup(name: &str) -> Result<&'static Crc, CrcError> {
    let reg = registry();
    let key: String = normalize_name(name).collect();
    reg.by_name.get(&key).and_then(|&i| reg.engines.get(i)).ok_or(CrcError::UnknownModel)
  }
}

#[cfg(feature = "std")]
pub use registry::lookup;

// ─────────────────────────────────────────────────────────────────────────────
// Model search
// ─────────────────────────────────────────────────────────────────────────────

/// Initial values and output xors tried by callers that know nothing about
/// the model: all zeros, all ones, and one.
pub const COMMON_CONSTANTS: [u64; 3] = [0, ONES, 1];

/// Every model of `width` that maps `data` to `crc`.
///
/// Tries each polynomial in `polynomials` under all four orientation pairs,
/// with every combination of `xors` and `initials` (the CRC of the empty
/// message, as in [`CrcModel::new`]). Inputs are masked to `width`.
/// Results come out in polynomial, `reflect_in`, `reflect_out`, xor, initial
/// order and may contain duplicates when the candidate lists do.
///
/// ```
/// use crckit::{CrcModel, catalog};
///
/// let found = catalog::search(0x31C3, b"123456789", 16, &[0x1021], &[0], &[0])?;
/// assert_eq!(found, [CrcModel::new(16, 0x1021, 0, false, false, 0)?]);
/// # Ok::<(), crckit::CrcError>(())
/// ```
///
/// # Errors
///
/// [`CrcError::InvalidModel`](crate::CrcError::InvalidModel) when `width` is
/// not in `1..=64`.
pub fn search(
  crc: u64,
  data: &[u8],
  width: u8,
  polynomials: &[u64],
  initials: &[u64],
  xors: &[u64],
) -> Result<Vec<CrcModel>, CrcError> {
  // Validates the width once for every candidate below.
  let width_shape = CrcModel::new(width, 0, 0, false, false, 0)?;
  let crc = crc & width_shape.mask();
  let mut found = Vec::new();

  for &polynomial in polynomials {
    for reflect_in in [false, true] {
      let shape = CrcModel::from_parts(width, polynomial, 0, reflect_in, false, 0);
      // Table contents depend only on width, polynomial and input orientation.
      let tables = CrcTables::build(&shape, 1);
      for reflect_out in [false, true] {
        for &xor_out in xors {
          for &initial in initials {
            let model = CrcModel::from_parts(width, polynomial, initial, reflect_in, reflect_out, xor_out);
            let state = update_table(&model, &tables, model.initial_state(), data);
            if model.finish(state) == crc {
              found.push(model);
            }
          }
        }
      }
    }
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(width, polynomials = polynomials.len(), matches = found.len(), "searched crc models");

  Ok(found)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{collections::BTreeSet, string::String, vec};

  use super::*;
  use crate::update::update_reference;

  #[test]
  fn test_presets_check_values() {
    for p in PRESETS {
      let m = p.model();
      let got = m.finish(update_reference(&m, m.initial_state(), b"123456789"));
      assert_eq!(got, p.check, "{} ({m})", p.name());
    }
  }

  #[test]
  fn test_presets_are_valid_models() {
    for p in PRESETS {
      let checked = CrcModel::new(p.width, p.polynomial, p.initial, p.reflect_in, p.reflect_out, p.xor_out);
      assert_eq!(checked, Ok(p.model()), "{}", p.name());
    }
  }

  #[test]
  fn test_names_are_unique() {
    let mut seen = BTreeSet::new();
    for p in PRESETS {
      assert!(!p.names.is_empty());
      for n in p.names {
        let key: String = normalize_name(n).collect();
        assert!(seen.insert(key), "duplicate name {n}");
      }
    }
  }

  #[test]
  fn test_normalize_name() {
    let key: String = normalize_name("CRC-16/CCITT_False ").collect();
    assert_eq!(key, "crc16ccittfalse");
  }

  #[test]
  fn test_find() {
    assert_eq!(find("crc-32").map(Preset::name), Some("CRC-32"));
    assert_eq!(find("CRC32C").map(Preset::name), Some("CRC-32C"));
    assert_eq!(find("x25").map(Preset::name), Some("CRC-16-X-25"));
    assert!(find("crc-99").is_none());
  }

  #[test]
  fn test_search_recovers_crc32() {
    let found = search(0xCBF4_3926, b"123456789", 32, &[0x04C1_1DB7, 0x1EDC_6F41], &COMMON_CONSTANTS, &COMMON_CONSTANTS).unwrap();
    let crc32 = find("CRC-32").unwrap().model();
    assert!(found.contains(&crc32), "{found:?}");
    for m in &found {
      let got = m.finish(update_reference(m, m.initial_state(), b"123456789"));
      assert_eq!(got, 0xCBF4_3926, "{m}");
    }
  }

  #[test]
  fn test_search_masks_inputs() {
    // Upper bits of the target and candidates are ignored.
    let found = search(0xFFFF_29B1, b"123456789", 16, &[0xF_1021], &[u64::MAX], &[0]).unwrap();
    assert_eq!(found, vec![find("CRC-16-CCITT-FALSE").unwrap().model()]);
  }

  #[test]
  fn test_search_empty_and_invalid() {
    assert_eq!(search(0, b"123456789", 16, &[], &COMMON_CONSTANTS, &COMMON_CONSTANTS), Ok(vec![]));
    assert_eq!(search(0x1234, b"123456789", 16, &[0x1021], &[], &[0]), Ok(vec![]));
    assert!(matches!(search(0, b"", 0, &[1], &[0], &[0]), Err(CrcError::InvalidModel(_))));
    assert!(matches!(search(0, b"", 65, &[1], &[0], &[0]), Err(CrcError::InvalidModel(_))));
  }

  #[cfg(feature = "std")]
  #[test]
  fn test_lookup() {
    let crc = lookup("CRC-64/XZ").unwrap();
    assert_eq!(crc.checksum(b"123456789"), 0x995D_C9BB_DF19_39FA);
    assert!(core::ptr::eq(crc, lookup("crc64xz").unwrap()));
    assert_eq!(lookup("nope").unwrap_err(), crate::CrcError::UnknownModel);
  }
}
