//! Update strategy configuration (overrides + tunables).
//!
//! Centralizes the knobs that pick how [`Crc`](crate::Crc) engines feed bytes:
//! - Benchmarks/tests can force a specific strategy
//! - Table memory can be traded against throughput through the slice count
//! - Introspection can report the active configuration without allocation
//!
//! With `std`, `CRCKIT_FORCE` and `CRCKIT_SLICES` are read once per process.

use core::fmt;

use crate::tables::{DEFAULT_SLICES, MAX_SLICES};

/// Requested update strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Force {
  /// Use the default (slice-by-N with the configured slice count).
  #[default]
  Auto,
  /// Bit-at-a-time, no tables.
  Reference,
  /// One 256-entry table.
  Table,
  /// Slice-by-N tables.
  Sliced,
}

impl Force {
  /// Stable lowercase name.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Reference => "reference",
      Self::Table => "table",
      Self::Sliced => "sliced",
    }
  }
}

/// Resolved strategy an engine runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
  /// Bit-at-a-time, no tables.
  Reference,
  /// One 256-entry table.
  Table,
  /// Slice-by-N with the given slice count (`2..=MAX_SLICES`).
  Sliced(usize),
}

impl Strategy {
  /// Slice-by-N, falling back to [`Strategy::Table`] for `slices <= 1` and
  /// clamping to [`MAX_SLICES`].
  #[must_use]
  pub const fn sliced(slices: usize) -> Self {
    match slices {
      0 | 1 => Self::Table,
      n if n > MAX_SLICES => Self::Sliced(MAX_SLICES),
      n => Self::Sliced(n),
    }
  }

  /// Number of tables this strategy needs (0 for the reference path).
  #[must_use]
  pub const fn table_count(self) -> usize {
    match self {
      Self::Reference => 0,
      Self::Table => 1,
      Self::Sliced(n) => n,
    }
  }

  /// Strategy family name (`reference`, `table` or `sliced`).
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Table => "table",
      Self::Sliced(_) => "sliced",
    }
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Sliced(n) => write!(f, "slice-by-{n}"),
      other => f.write_str(other.name()),
    }
  }
}

/// Strategy tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tunables {
  /// Slice count used by [`Force::Auto`] and [`Force::Sliced`].
  pub slices: usize,
}

impl Default for Tunables {
  fn default() -> Self {
    Self { slices: DEFAULT_SLICES }
  }
}

/// Full runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Config {
  /// Requested force mode (env/programmatic).
  pub requested_force: Force,
  /// Force mode after resolving `Auto`.
  pub effective_force: Force,
  /// Slice count and friends.
  pub tunables: Tunables,
}

impl Config {
  /// Configuration for an explicit request, ignoring the environment.
  #[must_use]
  pub fn new(force: Force, slices: usize) -> Self {
    let effective_force = match force {
      Force::Auto => Force::Sliced,
      other => other,
    };
    Self { requested_force: force, effective_force, tunables: Tunables { slices: clamp_slices(slices) } }
  }

  /// Concrete strategy for this configuration.
  #[must_use]
  pub const fn strategy(&self) -> Strategy {
    match self.effective_force {
      Force::Reference => Strategy::Reference,
      Force::Table => Strategy::Table,
      Force::Auto | Force::Sliced => Strategy::sliced(self.tunables.slices),
    }
  }
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Force,
  slices: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn parse_usize(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
      return None;
    }
    value.parse::<usize>().ok()
  }

  fn parse_force(name: &str) -> Option<Force> {
    let value = std::env::var(name).ok()?;
    parse_force_value(&value)
  }

  Overrides { force: parse_force("CRCKIT_FORCE").unwrap_or_default(), slices: parse_usize("CRCKIT_SLICES") }
}

#[cfg_attr(not(feature = "std"), allow(dead_code))]
fn parse_force_value(value: &str) -> Option<Force> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }
  if value.eq_ignore_ascii_case("auto") {
    return Some(Force::Auto);
  }
  if value.eq_ignore_ascii_case("reference") || value.eq_ignore_ascii_case("bitwise") {
    return Some(Force::Reference);
  }
  if value.eq_ignore_ascii_case("table") || value.eq_ignore_ascii_case("lookup") {
    return Some(Force::Table);
  }
  if value.eq_ignore_ascii_case("sliced") || value.eq_ignore_ascii_case("slice") {
    return Some(Force::Sliced);
  }
  None
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
fn clamp_slices(slices: usize) -> usize {
  slices.clamp(1, MAX_SLICES)
}

/// Effective configuration for the current process.
///
/// Merges the defaults with `CRCKIT_*` environment overrides when `std` is
/// enabled.
#[must_use]
pub fn get() -> Config {
  let ov = overrides();
  Config::new(ov.force, ov.slices.unwrap_or(DEFAULT_SLICES))
}
