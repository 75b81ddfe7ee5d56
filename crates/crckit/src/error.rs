//! Error types.
//!
//! Every fallible operation validates its inputs before touching any state,
//! so an error never leaves a stream or engine half-updated.

use core::fmt;

/// Why a set of CRC parameters was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InvalidModel {
  /// Width outside `1..=64`.
  Width(u8),
  /// The operation needs an invertible LFSR, i.e. a polynomial with bit 0 set.
  EvenPolynomial,
}

impl fmt::Display for InvalidModel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Width(width) => write!(f, "width {width} is outside 1..=64"),
      Self::EvenPolynomial => f.write_str("polynomial must be odd"),
    }
  }
}

/// Errors returned by model construction, combine, inversion and lookup.
///
/// # Examples
///
/// ```
/// use crckit::{CrcError, CrcModel, InvalidModel};
///
/// let err = CrcModel::new(65, 0x07, 0, false, false, 0).unwrap_err();
/// assert_eq!(err, CrcError::InvalidModel(InvalidModel::Width(65)));
/// assert_eq!(err.to_string(), "invalid CRC model: width 65 is outside 1..=64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CrcError {
  /// The model parameters are not usable for the requested operation.
  InvalidModel(InvalidModel),
  /// Two CRC values or streams come from models that are not variants of
  /// each other (width, polynomial, reflection or xor differ).
  ModelMismatch,
  /// The model is valid but the operation is not defined for it.
  UnsupportedOperation(&'static str),
  /// No catalog entry matches the requested name.
  UnknownModel,
}

impl CrcError {
  /// Shorthand for [`InvalidModel::Width`].
  #[inline]
  #[must_use]
  pub const fn invalid_width(width: u8) -> Self {
    Self::InvalidModel(InvalidModel::Width(width))
  }

  /// Shorthand for [`InvalidModel::EvenPolynomial`].
  #[inline]
  #[must_use]
  pub const fn even_polynomial() -> Self {
    Self::InvalidModel(InvalidModel::EvenPolynomial)
  }
}

impl fmt::Display for CrcError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidModel(reason) => write!(f, "invalid CRC model: {reason}"),
      Self::ModelMismatch => f.write_str("CRC models are not variants of each other"),
      Self::UnsupportedOperation(what) => write!(f, "unsupported operation: {what}"),
      Self::UnknownModel => f.write_str("unknown CRC model name"),
    }
  }
}

impl core::error::Error for CrcError {}

impl From<InvalidModel> for CrcError {
  #[inline]
  fn from(reason: InvalidModel) -> Self {
    Self::InvalidModel(reason)
  }
}
