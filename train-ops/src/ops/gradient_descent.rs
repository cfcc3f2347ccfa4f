//! The secure gradient-descent step.

use share_core::MsgId;
use share_core::protocols::ProtocolError;
use share_core::traits::{Protocol, SecureOps};
use share_core::types::OpAttributes;

use crate::error::UpdateError;
use crate::types::{ScalarOperand, ShareTensor, UpdateConfig};
use crate::variable::Variable;

/// Applies `var[i] := var[i] - alpha * delta[i]` through the protocol engine.
///
/// Share space has no fused multiply-subtract and no subtraction with mixed
/// constant/secret operands, so the formula runs as two ordered primitive
/// calls: `Mul(alpha_broadcast, delta)` with the broadcast tagged constant,
/// then `Sub(var, product)` with both operands tagged secret. The constant
/// tags are set per call; the protocol engine uses them to pick cheaper
/// local variants for public broadcasts.
///
/// alpha is widened to `f64` and rendered in the canonical fixed format
/// before broadcasting, so every party derives a bit-identical encoding of
/// the public constant. Precision beyond that format is dropped.
///
/// Commit happens once, after both calls succeed; any failure leaves the
/// variable's buffer unchanged. Returns the same mutable handle that was
/// passed in.
pub fn apply_gradient_descent<'a, P: Protocol>(
    protocol: &P,
    msg_id: &MsgId,
    var: &'a mut Variable,
    alpha: &ScalarOperand,
    delta: &ShareTensor,
    config: &UpdateConfig,
) -> Result<&'a mut Variable, UpdateError> {
    tracing::debug!(
        "gradient-descent step on variable '{}' under {msg_id}",
        var.name()
    );
    super::check_update_eligibility(var, config)?;
    let Some(current) = var.buffer() else {
        return Err(UpdateError::UninitializedVariable(var.name().to_owned()));
    };
    if !alpha.shape().is_legacy_scalar() {
        return Err(UpdateError::ScalarShapeViolation(alpha.shape().clone()));
    }
    if !var.shape().is_same_size(delta.shape()) {
        return Err(UpdateError::ShapeMismatch {
            var: var.shape().clone(),
            operand: delta.shape().clone(),
        });
    }

    let ele_nums = delta.num_elements();
    let alpha_broadcast = alpha.broadcast(ele_nums)?;
    let mut ops = protocol.ops(msg_id);

    let mut attrs = OpAttributes::new();
    attrs.set_const_flags(alpha.is_constant(), false);
    let product = ops.mul(&alpha_broadcast, delta.values(), &attrs)?;

    attrs.set_const_flags(false, false);
    let result = ops.sub(current, &product, &attrs)?;
    if result.len() != ele_nums {
        return Err(UpdateError::Protocol(ProtocolError::LengthMismatch {
            lhs: ele_nums,
            rhs: result.len(),
        }));
    }

    var.commit(&result);
    Ok(var)
}
