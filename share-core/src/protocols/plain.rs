//! Single-party plaintext oracle.
//!
//! A share IS the canonical encoding of its value, so every primitive is a
//! decode/compute/re-encode loop. Mostly used for testing; use with care in
//! production environments.

use rayon::prelude::*;

use crate::encoding::{decode_f64, encode_f64};
use crate::protocols::ProtocolError;
use crate::share::{ShareBuffer, ShareValue};
use crate::traits::{Protocol, SecureOps};
use crate::types::{MsgId, OpAttributes};

/// The plaintext oracle protocol handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainProtocol;

impl Protocol for PlainProtocol {
    type Ops = PlainOps;

    fn ops(&self, msg_id: &MsgId) -> PlainOps {
        PlainOps {
            msg_id: msg_id.clone(),
        }
    }
}

/// Ops client of [`PlainProtocol`].
pub struct PlainOps {
    msg_id: MsgId,
}

fn elementwise(
    lhs: &[ShareValue],
    rhs: &[ShareValue],
    op: impl Fn(f64, f64) -> f64 + Sync,
) -> Result<ShareBuffer, ProtocolError> {
    if lhs.len() != rhs.len() {
        return Err(ProtocolError::LengthMismatch {
            lhs: lhs.len(),
            rhs: rhs.len(),
        });
    }
    lhs.par_iter()
        .zip(rhs.par_iter())
        .map(|(a, b)| Ok(encode_f64(op(decode_f64(a)?, decode_f64(b)?))))
        .collect()
}

impl SecureOps for PlainOps {
    fn mul(
        &mut self,
        lhs: &[ShareValue],
        rhs: &[ShareValue],
        _attrs: &OpAttributes,
    ) -> Result<ShareBuffer, ProtocolError> {
        tracing::trace!("{}: plain mul over {} elements", self.msg_id, lhs.len());
        elementwise(lhs, rhs, |a, b| a * b)
    }

    fn sub(
        &mut self,
        lhs: &[ShareValue],
        rhs: &[ShareValue],
        _attrs: &OpAttributes,
    ) -> Result<ShareBuffer, ProtocolError> {
        tracing::trace!("{}: plain sub over {} elements", self.msg_id, lhs.len());
        elementwise(lhs, rhs, |a, b| a - b)
    }
}
