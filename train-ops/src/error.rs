//! Error kinds reported to the host graph runtime.

use share_core::TensorShape;
use share_core::protocols::ProtocolError;

/// Failure of an update operation.
///
/// All variants except [`Protocol`](UpdateError::Protocol) are precondition
/// failures detected before any primitive call, so the variable's buffer is
/// guaranteed unchanged. A protocol failure after partial pipeline progress
/// also leaves the buffer unchanged, because commit only happens once, after
/// the full pipeline succeeds.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The caller requested `use_locking = true`.
    #[error("the 'use_locking' attribute is not supported by this engine")]
    UnsupportedLocking,
    /// The target variable uses the resource storage kind.
    #[error("resource-kind variables are not supported by this engine")]
    UnsupportedStorageKind,
    /// The target variable's buffer has never been committed.
    #[error("attempting to use uninitialized variable: {0}")]
    UninitializedVariable(String),
    /// The update operand's shape does not match the variable's shape.
    #[error("var and update operand do not have the same shape: {var} vs {operand}")]
    ShapeMismatch {
        /// The variable's shape.
        var: TensorShape,
        /// The operand's shape (or its flat length as a rank-1 shape).
        operand: TensorShape,
    },
    /// alpha is not a legacy scalar.
    #[error("alpha is not a scalar: {0}")]
    ScalarShapeViolation(TensorShape),
    /// The protocol engine failed during a primitive call. Fatal to the
    /// invocation; no commit occurs and no retry is attempted here.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
