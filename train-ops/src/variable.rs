//! Mutable secret-shared variables.

use eyre::bail;
use itertools::izip;
use serde::{Deserialize, Serialize};
use share_core::{DType, ShareBuffer, ShareValue, TensorShape};

/// How the host runtime stores a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageKind {
    /// A directly aliasable mutable buffer ("ref" variable).
    Ref,
    /// A reference-counted handle ("resource" variable). Not supported by
    /// this engine; rejected by validation.
    Resource,
}

/// A named, mutable container for one secret-shared tensor.
///
/// Created by the host graph runtime before any op runs. The backing buffer
/// starts out absent (uninitialized) and is only ever written by commit;
/// a variable counts as initialized once its first commit lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    shape: TensorShape,
    dtype: DType,
    storage: StorageKind,
    buffer: Option<ShareBuffer>,
}

impl Variable {
    /// Creates an uninitialized variable.
    pub fn new(
        name: impl Into<String>,
        shape: TensorShape,
        dtype: DType,
        storage: StorageKind,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            dtype,
            storage,
            buffer: None,
        }
    }

    /// Creates a variable with an already-committed buffer; the buffer
    /// length must equal the shape's element count.
    pub fn with_buffer(
        name: impl Into<String>,
        shape: TensorShape,
        dtype: DType,
        storage: StorageKind,
        buffer: ShareBuffer,
    ) -> eyre::Result<Self> {
        if buffer.len() != shape.num_elements() {
            bail!(
                "share buffer has {} elements but shape {shape} has {}",
                buffer.len(),
                shape.num_elements()
            );
        }
        Ok(Self {
            name: name.into(),
            shape,
            dtype,
            storage,
            buffer: Some(buffer),
        })
    }

    /// The variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable's shape.
    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    /// The variable's element type tag.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// The variable's storage kind.
    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    /// Total element count of the variable's shape.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Whether a buffer has ever been committed.
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// The backing share buffer, if initialized.
    pub fn buffer(&self) -> Option<&ShareBuffer> {
        self.buffer.as_ref()
    }

    /// Writes a pipeline result into the backing buffer.
    ///
    /// An existing buffer is overwritten element by element, never swapped,
    /// so read views held by the host runtime stay valid. A shorter result
    /// replaces exactly the leading elements. On an uninitialized variable
    /// the result becomes the initial buffer; callers ensure it covers the
    /// full element count.
    pub(crate) fn commit(&mut self, result: &[ShareValue]) {
        match &mut self.buffer {
            Some(buffer) => {
                for (dst, src) in izip!(buffer.iter_mut(), result.iter()) {
                    dst.clone_from(src);
                }
            }
            None => self.buffer = Some(result.to_vec()),
        }
    }
}
