//! Data model and protocol-facing traits for secure elementwise updates.
//!
//! A [`ShareValue`] is one opaque secret share of a scalar; a [`ShareBuffer`]
//! is the flat per-element storage backing a logical tensor. The
//! [`SecureOps`](traits::SecureOps) trait is the primitive surface an MPC
//! protocol engine exposes (elementwise `mul`/`sub` over share buffers), and
//! [`Protocol`](traits::Protocol) hands out a per-invocation ops client for a
//! given routing token.
//!
//! The [`protocols`] module ships two local reference implementations: a
//! single-party plaintext oracle and a two-party additive scheme. Real
//! protocol engines live in their own crates and only need to implement the
//! traits defined here.

pub mod encoding;
pub mod protocols;
pub mod shape;
pub mod share;
pub mod traits;
pub mod types;

pub use shape::TensorShape;
pub use share::{ShareBuffer, ShareValue};
pub use types::{DType, MsgId, OpAttributes, PublicScalar};
