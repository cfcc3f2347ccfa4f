//! Common types shared between the update engine and protocol clients.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Element type tag of a variable.
///
/// Determines how public scalar constants (e.g. a learning rate) reach the
/// canonical share encoding; both supported dtypes widen to `f64` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// 64-bit floating point elements.
    Double,
    /// 32-bit signed integer elements.
    Int32,
}

/// A plaintext-visible scalar, as it arrives from the host graph runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PublicScalar {
    /// A floating-point literal.
    F64(f64),
    /// An integer literal. Widening to `f64` is lossy beyond 2^53; this is
    /// accepted behavior of the canonical encoding, not an error.
    I64(i64),
}

impl From<f64> for PublicScalar {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<i64> for PublicScalar {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for PublicScalar {
    fn from(value: i32) -> Self {
        Self::I64(i64::from(value))
    }
}

/// Per-invocation routing token.
///
/// Identifies one operation instance to the protocol engine so concurrent
/// invocations route their network rounds independently. Obtained from the
/// host runtime and passed explicitly into [`Protocol::ops`](crate::traits::Protocol::ops).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MsgId(String);

impl MsgId {
    /// Creates a routing token from an operation identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The token as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MsgId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for MsgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute key marking the left-hand operand as a public broadcast constant.
pub const LH_IS_CONST: &str = "lh_is_const";
/// Attribute key marking the right-hand operand as a public broadcast constant.
pub const RH_IS_CONST: &str = "rh_is_const";

/// String-keyed attributes passed opaquely to each primitive call.
///
/// Rebuilt per call by the update composer; the protocol engine reads the
/// constant-tagging keys to pick cheaper local variants where an operand is a
/// public broadcast. An incorrect tag is not detectable on this side of the
/// trust boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpAttributes(BTreeMap<String, String>);

impl OpAttributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up one attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets both constant-tagging keys ("1" for constant, "0" otherwise).
    pub fn set_const_flags(&mut self, lh_is_const: bool, rh_is_const: bool) {
        self.set(LH_IS_CONST, if lh_is_const { "1" } else { "0" });
        self.set(RH_IS_CONST, if rh_is_const { "1" } else { "0" });
    }

    /// Whether the left-hand operand is tagged as a public constant.
    pub fn lh_is_const(&self) -> bool {
        self.get(LH_IS_CONST) == Some("1")
    }

    /// Whether the right-hand operand is tagged as a public constant.
    pub fn rh_is_const(&self) -> bool {
        self.get(RH_IS_CONST) == Some("1")
    }
}
