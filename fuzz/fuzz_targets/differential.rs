//! Differential fuzz target against the `crc` crate.
//!
//! Arbitrary data is run through a selection of catalog algorithms in both
//! implementations; our models are built from the oracle's Rocksoft
//! parameters.

#![no_main]

use arbitrary::Arbitrary;
use crckit::{Crc, CrcModel, Strategy};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  slices: u8,
  data: Vec<u8>,
}

macro_rules! check {
  ($input:expr, $ty:ty, $($alg:path),+ $(,)?) => {$({
    let alg: &'static crc::Algorithm<$ty> = &$alg;
    let model = CrcModel::from_rocksoft(
      alg.width,
      alg.poly as u64,
      alg.init as u64,
      alg.refin,
      alg.refout,
      alg.xorout as u64,
    )
    .expect("catalog algorithm is a valid model");
    let ours = Crc::with_strategy(model, Strategy::sliced(usize::from($input.slices))).checksum(&$input.data);
    let theirs = crc::Crc::<$ty>::new(alg).checksum(&$input.data) as u64;
    assert_eq!(ours, theirs, "mismatch against {}", stringify!($alg));
  })+};
}

fuzz_target!(|input: Input| {
  check!(input, u8, crc::CRC_3_ROHC, crc::CRC_5_USB, crc::CRC_7_MMC, crc::CRC_8_SMBUS);
  check!(input, u16, crc::CRC_12_UMTS, crc::CRC_15_CAN, crc::CRC_16_IBM_3740, crc::CRC_16_KERMIT);
  check!(input, u32, crc::CRC_24_OPENPGP, crc::CRC_31_PHILIPS, crc::CRC_32_ISCSI, crc::CRC_32_BZIP2);
  check!(input, u64, crc::CRC_40_GSM, crc::CRC_64_XZ, crc::CRC_64_ECMA_182);
});
