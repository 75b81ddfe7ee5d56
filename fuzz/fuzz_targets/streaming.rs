//! Fuzz target for streaming updates.
//!
//! Feeds arbitrary chunks through caller-owned streams and digests under
//! every strategy and checks they all agree with the bit-at-a-time result.

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
  slices: u8,
  chunks: Vec<Vec<u8>>,
}

fuzz_target!(|input: Input| {
  let width = 1 + input.width % 64;
  let Ok(model) =
    CrcModel::new(width, input.polynomial, input.initial, input.reflect_in, input.reflect_out, input.xor_out)
  else {
    return;
  };
  let data: Vec<u8> = input.chunks.concat();
  let expected = Crc::with_strategy(model, Strategy::Reference).checksum(&data);

  for strategy in [Strategy::Table, Strategy::sliced(usize::from(input.slices))] {
    let crc = Crc::with_strategy(model, strategy);
    assert_eq!(crc.checksum(&data), expected, "{strategy} one-shot mismatch for {model}");

    let mut stream = crc.stream();
    let mut digest = crc.digest();
    for chunk in &input.chunks {
      stream = crc.update_stream(stream, chunk);
      digest.update(chunk);
    }
    assert_eq!(crc.finish_stream(stream), expected, "{strategy} stream mismatch for {model}");
    assert_eq!(stream.len(), data.len() as u64);
    assert_eq!(digest.finalize(), expected, "{strategy} digest mismatch for {model}");
  }
});
