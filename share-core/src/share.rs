//! Opaque share values and the buffers that hold them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One secret share of a scalar, stored in its serialized protocol encoding.
///
/// The contents are meaningless outside the protocol that produced them;
/// equality only says two encodings are byte-identical, not that the
/// underlying values agree. The `Debug` impl never prints the payload so
/// shares cannot end up in logs by accident.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareValue(String);

impl ShareValue {
    /// Wraps an already-encoded share.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The raw encoding.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the share and returns the raw encoding.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ShareValue {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl From<&str> for ShareValue {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_owned())
    }
}

impl fmt::Debug for ShareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShareValue(<{} bytes>)", self.0.len())
    }
}

/// Flat per-element share storage of a logical tensor, in row-major order.
///
/// Length equals the element count of the tensor it backs.
pub type ShareBuffer = Vec<ShareValue>;
