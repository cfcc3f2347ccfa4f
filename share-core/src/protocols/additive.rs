//! Two-party additive sharing, local ops only.
//!
//! A value `x` is held as summands `x = x0 + x1`, one per party, each stored
//! in the canonical encoding. The primitives the update engine needs are all
//! share-local under this scheme as long as one multiplication operand is a
//! public broadcast: each party scales its own summand, and a public operand
//! of an addition or subtraction is incorporated by exactly one party. A
//! product of two secret operands would need preprocessed triples, which a
//! local engine does not have, so that call is rejected instead of silently
//! producing a wrong share.

use itertools::izip;
use rand::Rng;
use rayon::prelude::*;

use crate::encoding::{decode_f64, encode_f64};
use crate::protocols::ProtocolError;
use crate::share::{ShareBuffer, ShareValue};
use crate::traits::{Protocol, SecureOps};
use crate::types::{MsgId, OpAttributes};

/// Which of the two parties this engine instance runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyID {
    /// Party 0. Incorporates public summands.
    ID0,
    /// Party 1.
    ID1,
}

impl TryFrom<usize> for PartyID {
    type Error = eyre::Report;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PartyID::ID0),
            1 => Ok(PartyID::ID1),
            other => Err(eyre::eyre!(
                "invalid party id {other} for a two-party protocol"
            )),
        }
    }
}

/// Protocol handle of the additive scheme for one party.
#[derive(Debug, Clone, Copy)]
pub struct AdditiveProtocol {
    id: PartyID,
}

impl AdditiveProtocol {
    /// Creates the handle for the given party.
    pub fn new(id: PartyID) -> Self {
        Self { id }
    }

    /// The party this handle runs as.
    pub fn id(&self) -> PartyID {
        self.id
    }
}

impl Protocol for AdditiveProtocol {
    type Ops = AdditiveOps;

    fn ops(&self, msg_id: &MsgId) -> AdditiveOps {
        AdditiveOps {
            id: self.id,
            msg_id: msg_id.clone(),
        }
    }
}

/// Ops client of [`AdditiveProtocol`].
pub struct AdditiveOps {
    id: PartyID,
    msg_id: MsgId,
}

fn zip_map(
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

impl SecureOps for AdditiveOps {
    fn mul(
        &mut self,
        lhs: &[ShareValue],
        rhs: &[ShareValue],
        attrs: &OpAttributes,
    ) -> Result<ShareBuffer, ProtocolError> {
        tracing::trace!("{}: additive mul over {} elements", self.msg_id, lhs.len());
        let id = self.id;
        match (attrs.lh_is_const(), attrs.rh_is_const()) {
            // public * public: promote to a trivial share held by party 0
            (true, true) => zip_map(lhs, rhs, move |a, b| match id {
                PartyID::ID0 => a * b,
                PartyID::ID1 => 0.0,
            }),
            (true, false) | (false, true) => zip_map(lhs, rhs, |a, b| a * b),
            (false, false) => Err(ProtocolError::UnsupportedOperation(
                "secret-secret multiplication requires preprocessed triples".to_owned(),
            )),
        }
    }

    fn sub(
        &mut self,
        lhs: &[ShareValue],
        rhs: &[ShareValue],
        attrs: &OpAttributes,
    ) -> Result<ShareBuffer, ProtocolError> {
        tracing::trace!("{}: additive sub over {} elements", self.msg_id, lhs.len());
        let id = self.id;
        match (attrs.lh_is_const(), attrs.rh_is_const()) {
            (false, false) => zip_map(lhs, rhs, |a, b| a - b),
            // a public summand is incorporated by party 0 only
            (true, false) => zip_map(lhs, rhs, move |a, b| match id {
                PartyID::ID0 => a - b,
                PartyID::ID1 => -b,
            }),
            (false, true) => zip_map(lhs, rhs, move |a, b| match id {
                PartyID::ID0 => a - b,
                PartyID::ID1 => a,
            }),
            (true, true) => zip_map(lhs, rhs, move |a, b| match id {
                PartyID::ID0 => a - b,
                PartyID::ID1 => 0.0,
            }),
        }
    }
}

/// Splits one value into two additive summands.
///
/// Masks are drawn on the integer grid so the fixed six-digit encoding of
/// each summand is exact and recombination loses nothing.
pub fn share_value<R: Rng>(value: f64, rng: &mut R) -> [ShareValue; 2] {
    let mask = rng.gen_range(-1_000_000..=1_000_000) as f64;
    [encode_f64(mask), encode_f64(value - mask)]
}

/// Splits a flat buffer of values into the two parties' share buffers.
pub fn share_values<R: Rng>(values: &[f64], rng: &mut R) -> [ShareBuffer; 2] {
    let mut buf0 = Vec::with_capacity(values.len());
    let mut buf1 = Vec::with_capacity(values.len());
    for &value in values {
        let [share0, share1] = share_value(value, rng);
        buf0.push(share0);
        buf1.push(share1);
    }
    [buf0, buf1]
}

/// Recombines one value from both parties' shares.
pub fn combine_value(share0: &ShareValue, share1: &ShareValue) -> Result<f64, ProtocolError> {
    Ok(decode_f64(share0)? + decode_f64(share1)?)
}

/// Recombines a flat buffer of values from both parties' share buffers.
pub fn combine_values(
    buf0: &[ShareValue],
    buf1: &[ShareValue],
) -> Result<Vec<f64>, ProtocolError> {
    if buf0.len() != buf1.len() {
        return Err(ProtocolError::LengthMismatch {
            lhs: buf0.len(),
            rhs: buf1.len(),
        });
    }
    izip!(buf0.iter(), buf1.iter())
        .map(|(share0, share1)| combine_value(share0, share1))
        .collect()
}
