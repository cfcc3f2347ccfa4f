//! Operand and configuration types of the update operations.

use eyre::bail;
use serde::{Deserialize, Serialize};
use share_core::encoding::encode_public_scalar;
use share_core::{PublicScalar, ShareBuffer, ShareValue, TensorShape};

use crate::error::UpdateError;

/// The update-engine configuration surface, as passed by the host runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct UpdateConfig {
    /// Request exclusive locking of the mutated variable. Not supported;
    /// any update invoked with `true` is rejected.
    #[serde(default)]
    pub use_locking: bool,
}

/// An immutable secret-shared tensor operand (e.g. the gradient `delta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTensor {
    shape: TensorShape,
    values: ShareBuffer,
}

impl ShareTensor {
    /// Creates a tensor operand; the buffer length must equal the shape's
    /// element count.
    pub fn new(shape: TensorShape, values: ShareBuffer) -> eyre::Result<Self> {
        if values.len() != shape.num_elements() {
            bail!(
                "share buffer has {} elements but shape {shape} has {}",
                values.len(),
                shape.num_elements()
            );
        }
        Ok(Self { shape, values })
    }

    /// The tensor's shape.
    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    /// The flat share buffer.
    pub fn values(&self) -> &[ShareValue] {
        &self.values
    }

    /// Total element count.
    pub fn num_elements(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ScalarKind {
    Public(PublicScalar),
    Share(ShareValue),
}

/// A scalar operand of an update formula (e.g. the learning rate `alpha`).
///
/// Either a plaintext-visible literal to be broadcast-encoded (a constant
/// for tagging purposes), or a single already-encoded secret share (not a
/// constant). Carries the shape the host runtime declared for it, which must
/// be a legacy scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarOperand {
    shape: TensorShape,
    kind: ScalarKind,
}

impl ScalarOperand {
    /// A public literal with the rank-0 scalar shape.
    pub fn public(value: impl Into<PublicScalar>) -> Self {
        Self {
            shape: TensorShape::scalar(),
            kind: ScalarKind::Public(value.into()),
        }
    }

    /// A public literal with an explicitly declared shape.
    pub fn public_with_shape(value: impl Into<PublicScalar>, shape: TensorShape) -> Self {
        Self {
            shape,
            kind: ScalarKind::Public(value.into()),
        }
    }

    /// A secret-shared scalar with the rank-0 scalar shape.
    pub fn share(share: ShareValue) -> Self {
        Self {
            shape: TensorShape::scalar(),
            kind: ScalarKind::Share(share),
        }
    }

    /// The declared shape.
    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    /// Whether this operand is a public broadcast constant for the purpose
    /// of per-call tagging.
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, ScalarKind::Public(_))
    }

    /// Expands the scalar to a per-element operand of length `len`.
    ///
    /// Public literals are widened and rendered canonically so every party
    /// derives a bit-identical broadcast.
    pub(crate) fn broadcast(&self, len: usize) -> Result<ShareBuffer, UpdateError> {
        let encoded = match &self.kind {
            ScalarKind::Public(value) => encode_public_scalar(value)?,
            ScalarKind::Share(share) => share.clone(),
        };
        Ok(vec![encoded; len])
    }
}
