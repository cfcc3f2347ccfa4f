//! The update operations and their shared operand validation.
//!
//! Each operation validates first and fails fast with no side effect, then
//! drives the protocol engine through its primitive pipeline, then commits
//! once. Every invocation runs synchronously to completion on the calling
//! thread; blocking only happens inside the protocol engine during its
//! network rounds.

mod assign;
mod gradient_descent;

pub use assign::assign;
pub use gradient_descent::apply_gradient_descent;

use crate::error::UpdateError;
use crate::types::UpdateConfig;
use crate::variable::{StorageKind, Variable};

/// Checks the preconditions common to every update operation, in order:
/// locking first, then the storage kind.
fn check_update_eligibility(var: &Variable, config: &UpdateConfig) -> Result<(), UpdateError> {
    if config.use_locking {
        return Err(UpdateError::UnsupportedLocking);
    }
    if var.storage() == StorageKind::Resource {
        return Err(UpdateError::UnsupportedStorageKind);
    }
    Ok(())
}
