//! Tensor shape descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered list of dimension sizes.
///
/// Rank 0 denotes a scalar with one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TensorShape(Vec<usize>);

impl TensorShape {
    /// Creates a shape from its dimension sizes.
    pub fn new(dims: impl Into<Vec<usize>>) -> Self {
        Self(dims.into())
    }

    /// The rank-0 scalar shape.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// The dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Total element count (1 for rank 0).
    pub fn num_elements(&self) -> usize {
        self.0.iter().product()
    }

    /// Whether this shape is treated as a scalar for broadcasting: rank 0, or
    /// rank 1 with exactly one element.
    pub fn is_legacy_scalar(&self) -> bool {
        self.rank() <= 1 && self.num_elements() == 1
    }

    /// Whether both shapes have identical dimension sizes.
    pub fn is_same_size(&self, other: &TensorShape) -> bool {
        self.0 == other.0
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "]")
    }
}
