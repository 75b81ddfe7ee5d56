//! Generic, parameterized CRC engine.
//!
//! Any CRC of width 1 to 64 bits, described by a [`CrcModel`]: generator
//! polynomial, initial value, input/output reflection and output xor. On top
//! of plain checksumming the engine can combine CRCs of adjacent blocks,
//! run the register backwards, and forge the bytes that give a message a
//! chosen CRC.
//!
//! # Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`bits`] | bit reflection |
//! | [`model`] | [`CrcModel`] and its derived sizes |
//! | [`tables`] | 256-entry lookup tables, single and slice-by-N |
//! | [`update`] | reference, table and slice-by-N register updates |
//! | [`combine`] | `crc(A ‖ B)` from `crc(A)`, `crc(B)`, `len(B)` |
//! | [`shift`] | forward/backward bit and byte shifting |
//! | [`acrc`] | CRC inversion |
//! | [`catalog`] | named presets and the shared registry |
//! | [`config`] | strategy selection and environment overrides |
//!
//! # Example
//!
//! ```rust
//! use crckit::{Crc, CrcModel, Seed};
//!
//! // CRC-32 (zlib). `initial` is the CRC of the empty message.
//! let model = CrcModel::new(32, 0x04C1_1DB7, 0, true, true, 0xFFFF_FFFF)?;
//! let crc32 = Crc::new(model);
//!
//! // One-shot
//! let crc = crc32.checksum(b"123456789");
//! assert_eq!(crc, 0xCBF4_3926);
//!
//! // Streaming through caller-owned state
//! let stream = crc32.update_stream(crc32.stream(), b"1234");
//! let stream = crc32.update_stream(stream, b"56789");
//! assert_eq!(crc32.finish_stream(stream), crc);
//!
//! // Combine independently computed halves
//! let (a, b) = (crc32.checksum(b"1234"), crc32.checksum(b"56789"));
//! assert_eq!(crc32.combine(a, b, 5), crc);
//!
//! // Forge four bytes that force a chosen CRC
//! let mid = crc32.acrc(Seed::Bytes(b"12"), b"89", 0x1234_5678)?;
//! let msg = [&b"12"[..], &mid[..], &b"89"[..]].concat();
//! assert_eq!(crc32.checksum(&msg), 0x1234_5678);
//! # Ok::<(), crckit::CrcError>(())
//! ```
//!
//! # Strategy selection
//!
//! Engines built with [`Crc::new`] use [`config::get`]: slice-by-16 unless
//! `CRCKIT_FORCE` (`reference`, `table`, `sliced`) or `CRCKIT_SLICES` say
//! otherwise. [`Crc::with_strategy`] picks explicitly. Every strategy gives
//! bit-identical results.
//!
//! # Features
//!
//! - `std` (default): environment overrides, the name registry and the
//!   `io` adapters.
//! - `tracing`: `debug` events when engines and the registry are built.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod acrc;
pub mod bits;
pub mod catalog;
pub mod combine;
pub mod config;
mod engine;
mod error;
#[cfg(feature = "std")]
pub mod io;
pub mod model;
pub mod shift;
mod stream;
pub mod tables;
mod transform;
pub mod update;

pub use config::Strategy;
pub use engine::{Crc, Digest};
pub use error::{CrcError, InvalidModel};
pub use model::CrcModel;
pub use stream::{CrcStream, Seed};
pub use tables::{CrcTables, Orientation};
