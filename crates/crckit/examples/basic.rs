//! Basic usage: presets, custom models, streaming, combine and forging.
//!
//! Run with: `cargo run --example basic -p crckit`

use std::thread;

use crckit::{Crc, CrcError, CrcModel, Seed, catalog};

fn main() -> Result<(), CrcError> {
  println!("=== crckit Basic Examples ===\n");

  presets()?;
  custom_model()?;
  streaming()?;
  parallel_combine()?;
  forging()?;
  Ok(())
}

/// Named presets from the shared registry.
fn presets() -> Result<(), CrcError> {
  println!("--- Presets ---\n");

  let data = b"123456789";
  for name in ["CRC-32", "CRC-32C", "CRC-64-XZ", "CRC-16-CCITT-FALSE", "CRC-24-OPENPGP", "CRC-5-USB"] {
    let crc = catalog::lookup(name)?;
    println!("{name:<20} {}  ({crc})", crc.to_hex(crc.checksum(data)));
  }

  println!();
  Ok(())
}

/// Any width from 1 to 64 bits.
fn custom_model() -> Result<(), CrcError> {
  println!("--- Custom Model ---\n");

  // 12-bit, normal input, reflected output, given in Rocksoft form.
  let model = CrcModel::from_rocksoft(12, 0x80F, 0, false, true, 0)?;
  let crc = Crc::new(model);
  println!("{model}: {}", crc.to_hex(crc.checksum(b"123456789")));
  assert_eq!(crc.checksum(b"123456789"), 0xDAF);

  println!("strategy: {}", crc.strategy());
  println!();
  Ok(())
}

/// Caller-owned stream and the `Digest` wrapper.
fn streaming() -> Result<(), CrcError> {
  println!("--- Streaming ---\n");

  let crc = catalog::lookup("CRC-32")?;

  let mut stream = crc.stream();
  for chunk in [&b"123"[..], b"456", b"789"] {
    stream = crc.update_stream(stream, chunk);
  }
  println!("stream:  0x{:08X} after {} bytes", crc.finish_stream(stream), stream.len());

  let mut digest = crc.digest_from(Seed::Bytes(b"1234"));
  digest.update(b"56789");
  println!("digest:  0x{}", digest.to_hex());
  assert_eq!(crc.finish_stream(stream), digest.finalize());

  println!();
  Ok(())
}

/// Hash halves on separate threads and join with `combine`.
fn parallel_combine() -> Result<(), CrcError> {
  println!("--- Parallel Combine ---\n");

  let crc = catalog::lookup("CRC-64-XZ")?;
  let data: Vec<u8> = (0..1_000_000u32).map(|i| (i * 31) as u8).collect();
  let (left, right) = data.split_at(data.len() / 2);

  let (a, b) = thread::scope(|s| {
    let a = s.spawn(|| crc.checksum(left));
    let b = s.spawn(|| crc.checksum(right));
    (a.join().expect("worker panicked"), b.join().expect("worker panicked"))
  });

  let combined = crc.combine(a, b, right.len() as u64);
  println!("combined: 0x{combined:016X}");
  assert_eq!(combined, crc.checksum(&data));

  println!();
  Ok(())
}

/// Choose a CRC and get the bytes that produce it.
fn forging() -> Result<(), CrcError> {
  println!("--- Forging ---\n");

  let crc = catalog::lookup("CRC-32")?;
  let mid = crc.acrc(Seed::Bytes(b"file header "), b" trailer", 0xC0FF_EE00)?;

  let msg = [&b"file header "[..], &mid[..], &b" trailer"[..]].concat();
  println!("patch bytes {mid:02X?} give 0x{:08X}", crc.checksum(&msg));
  assert_eq!(crc.checksum(&msg), 0xC0FF_EE00);

  if let Some(residue) = crc.magic_number() {
    println!("CRC-32 residue: 0x{residue:08X}");
  }
  Ok(())
}
