//! Fuzz target for CRC inversion.
//!
//! Forges the bytes between an arbitrary prefix and suffix and checks the
//! assembled message hits the target. Also checks that unshifting reverses
//! updating.

#![no_main]

use arbitrary::Arbitrary;
use crckit::{Crc, CrcModel, Seed, Strategy};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  width: u8,
  polynomial: u64,
  initial: u64,
  xor_out: u64,
  target: u64,
  prefix: Vec<u8>,
  suffix: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let width = 1 + input.width % 64;
  let Ok(model) = CrcModel::new(width, input.polynomial | 1, input.initial, true, true, input.xor_out) else {
    return;
  };
  let crc = Crc::with_strategy(model, Strategy::Sliced(8));
  let target = input.target & model.mask();

  let mid = crc.acrc(Seed::Bytes(&input.prefix), &input.suffix, target).expect("odd reflected model");
  assert_eq!(mid.len(), model.byte_size());

  let msg = [&input.prefix[..], &mid[..], &input.suffix[..]].concat();
  assert_eq!(crc.checksum(&msg), target, "forged CRC mismatch for {model}");

  let state = crc.update(crc.initial_state(), &input.suffix);
  assert_eq!(crc.unshift_bytes(state, &input.suffix), Ok(crc.initial_state()));
});
