//! The primitive surface an MPC protocol engine exposes to the update engine.

use crate::protocols::ProtocolError;
use crate::share::{ShareBuffer, ShareValue};
use crate::types::{MsgId, OpAttributes};

/// Elementwise secure primitives over share buffers.
///
/// Both operands must already have equal length; broadcast constants are
/// pre-expanded by the caller. A returned error is a protocol-level failure
/// (network round or cryptographic failure) and is fatal to the invocation
/// that issued the call.
pub trait SecureOps {
    /// Elementwise product: `out[i] = lhs[i] * rhs[i]`.
    fn mul(
        &mut self,
        lhs: &[ShareValue],
        rhs: &[ShareValue],
        attrs: &OpAttributes,
    ) -> Result<ShareBuffer, ProtocolError>;

    /// Elementwise difference: `out[i] = lhs[i] - rhs[i]`.
    fn sub(
        &mut self,
        lhs: &[ShareValue],
        rhs: &[ShareValue],
        attrs: &OpAttributes,
    ) -> Result<ShareBuffer, ProtocolError>;
}

/// A handle to a protocol engine that hands out per-invocation ops clients.
///
/// Replaces a process-wide singleton lookup: the handle is constructed once
/// by the host and passed explicitly into each operation call, so lifecycle
/// is visible at the call site. Handing out an ops client is a read-only
/// lookup and safe for concurrent invocations on different variables.
pub trait Protocol {
    /// The ops client type for one invocation.
    type Ops: SecureOps;

    /// Returns an ops client routing its messages under `msg_id`.
    fn ops(&self, msg_id: &MsgId) -> Self::Ops;
}
