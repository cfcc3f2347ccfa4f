//! Local reference implementations of the secure primitive surface.
//!
//! Real protocol engines (with network rounds and preprocessing) implement
//! [`SecureOps`](crate::traits::SecureOps) in their own crates. The two
//! implementations here run without any communication and exist so the update
//! engine can be exercised end-to-end:
//!
//! - [`plain`]: single-party oracle, shares are plaintext encodings.
//! - [`additive`]: two-party additive sharing, local ops only.

pub mod additive;
pub mod plain;

/// Failure of a primitive call inside the protocol engine.
///
/// Fatal to the invocation that issued the call; the update engine never
/// retries and never commits after one of these.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A share encoding could not be parsed.
    #[error("could not correctly convert string: {0}")]
    Conversion(String),
    /// The operands of an elementwise call have different lengths.
    #[error("operand length mismatch: lhs has {lhs} elements, rhs has {rhs}")]
    LengthMismatch {
        /// Left-hand element count.
        lhs: usize,
        /// Right-hand element count.
        rhs: usize,
    },
    /// The engine cannot run this call with the given operand tagging.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// A transport failure in a network-backed engine.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Any other protocol-level failure.
    #[error(transparent)]
    Other(#[from] eyre::Report),
}
