//! In-place assignment of a share buffer.

use share_core::{ShareValue, TensorShape};

use crate::error::UpdateError;
use crate::types::UpdateConfig;
use crate::variable::Variable;

/// Assigns `source` into `var`'s backing buffer: `var[i] := source[i]`.
///
/// The source is already secret-shared in the same representation, so this
/// is a raw copy with no primitive call. A source of N elements replaces
/// exactly the first N elements of an initialized target; on an
/// uninitialized target the source must cover the full element count and
/// becomes the initial buffer.
///
/// Returns the same mutable handle that was passed in: the mutated variable
/// serves as both the operation's input and its nominal output.
pub fn assign<'a>(
    var: &'a mut Variable,
    source: &[ShareValue],
    config: &UpdateConfig,
) -> Result<&'a mut Variable, UpdateError> {
    tracing::debug!(
        "assign of {} elements into variable '{}'",
        source.len(),
        var.name()
    );
    super::check_update_eligibility(var, config)?;

    let fits = match var.buffer() {
        // prefix replacement of an existing buffer
        Some(buffer) => source.len() <= buffer.len(),
        // first commit must fill the whole buffer
        None => source.len() == var.num_elements(),
    };
    if !fits {
        return Err(UpdateError::ShapeMismatch {
            var: var.shape().clone(),
            operand: TensorShape::new(vec![source.len()]),
        });
    }

    var.commit(source);
    Ok(var)
}
