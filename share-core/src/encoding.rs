//! Canonical encoding of public scalars into share space.
//!
//! Public constants (e.g. a learning rate) must encode bit-identically on
//! every party, otherwise the parties disagree on the broadcast operand of a
//! primitive call. The canonical format is fixed six-fraction-digit decimal
//! (`%f` in C), applied after widening to `f64`. Precision beyond that format
//! is dropped; that is accepted behavior, not an error.

use num_traits::ToPrimitive;

use crate::protocols::ProtocolError;
use crate::share::ShareValue;
use crate::types::PublicScalar;

/// Renders a value in the canonical fixed format.
pub fn encode_f64(value: f64) -> ShareValue {
    ShareValue::new(format!("{value:.6}"))
}

/// Parses a canonical encoding back into a value.
///
/// Only the local reference protocols decode shares; real protocol engines
/// treat them as opaque.
pub fn decode_f64(share: &ShareValue) -> Result<f64, ProtocolError> {
    share
        .as_str()
        .trim()
        .parse::<f64>()
        .map_err(|_| ProtocolError::Conversion(share.as_str().to_owned()))
}

/// Widens a public scalar to `f64` and renders it canonically.
pub fn encode_public_scalar(scalar: &PublicScalar) -> Result<ShareValue, ProtocolError> {
    let widened = match scalar {
        PublicScalar::F64(value) => value.to_f64(),
        PublicScalar::I64(value) => value.to_f64(),
    }
    .ok_or_else(|| ProtocolError::Conversion(format!("{scalar:?}")))?;
    Ok(encode_f64(widened))
}
