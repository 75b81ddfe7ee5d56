//! Fuzz target for CRC combine.
//!
//! Splits arbitrary data at arbitrary points under an arbitrary model and
//! checks that chaining `combine` over the pieces gives the one-shot CRC.

#![no_main]

use arbitrary::Arbitrary;
use crckit::{Crc, CrcModel, Strategy};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  width: u8,
  polynomial: u64,
  initial: u64,
  reflect_in: bool,
  reflect_out: bool,
  xor_out: u64,
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let width = 1 + input.width % 64;
  let Ok(model) =
    CrcModel::new(width, input.polynomial, input.initial, input.reflect_in, input.reflect_out, input.xor_out)
  else {
    return;
  };
  let crc = Crc::with_strategy(model, Strategy::Table);
  let data = &input.data;
  let expected = crc.checksum(data);

  // Normalize splits to valid range and sort
  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.sort_unstable();
  splits.dedup();

  let mut combined = model.initial();
  let mut prev = 0;
  for split in splits.into_iter().chain([data.len()]) {
    let chunk = &data[prev..split];
    combined = crc.combine(combined, crc.checksum(chunk), chunk.len() as u64);
    prev = split;
  }

  assert_eq!(combined, expected, "combine chain mismatch for {model}");
});
