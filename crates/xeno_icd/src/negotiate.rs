//! Loader interface version negotiation

use crate::IcdError;

/// Highest loader/ICD interface version this driver speaks.
pub const MAX_INTERFACE_VERSION: u32 = 2;

/// Agree on `min(proposed, 2)`; version 0 is rejected.
pub fn negotiate(proposed: u32) -> Result<u32, IcdError> {
    if proposed == 0 {
        return Err(IcdError::IncompatibleInterface { proposed });
    }
    Ok(proposed.min(MAX_INTERFACE_VERSION))
}
