#![warn(missing_docs)]
//! Secure elementwise update operations over secret-shared variables.
//!
//! This crate is the bridge between a plaintext-style computation graph and
//! an MPC protocol engine: it takes update formulas the graph expresses over
//! whole tensors (`var := source`, `var := var - alpha * delta`), validates
//! the operands against the same contract a plaintext implementation would
//! enforce, decomposes the formula into an ordered sequence of secure
//! primitive calls with correct constant/secret operand tagging, and commits
//! the result in place into the variable's share buffer.
//!
//! The protocol engine itself is consumed through the
//! [`Protocol`](share_core::traits::Protocol) trait and never implemented
//! here; a failed primitive call aborts the invocation before anything is
//! committed, so the variable's buffer is only ever replaced wholesale.
//!
//! Locking-based concurrent mutation of a single variable and resource-kind
//! variables are rejected at the boundary. Callers serialize concurrent
//! updates to the same variable; updates to different variables are fully
//! independent.

pub mod error;
pub mod ops;
pub mod types;
pub mod variable;

pub use error::UpdateError;
pub use ops::{apply_gradient_descent, assign};
pub use types::{ScalarOperand, ShareTensor, UpdateConfig};
pub use variable::{StorageKind, Variable};
