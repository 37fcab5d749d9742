use ash::vk;
use thiserror::Error;

/// Failures of the loader-facing entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IcdError {
    #[error("loader interface version {proposed} is not supported")]
    IncompatibleInterface { proposed: u32 },

    #[error("{what} unavailable: {reason}")]
    ResourceUnavailable { what: String, reason: String },

    #[error("'{name}' not found")]
    NotFound { name: String },

    #[error("buffer holds {capacity} of {available} entries")]
    Incomplete { capacity: u32, available: u32 },
}

impl From<IcdError> for vk::Result {
    fn from(err: IcdError) -> Self {
        match err {
            IcdError::IncompatibleInterface { .. } => vk::Result::ERROR_INCOMPATIBLE_DRIVER,
            IcdError::ResourceUnavailable { .. } | IcdError::NotFound { .. } => {
                vk::Result::ERROR_INITIALIZATION_FAILED
            }
            IcdError::Incomplete { .. } => vk::Result::INCOMPLETE,
        }
    }
}

/// Collapse a query outcome into the loader's result code.
pub fn to_vk(result: Result<(), IcdError>) -> vk::Result {
    match result {
        Ok(()) => vk::Result::SUCCESS,
        Err(err) => err.into(),
    }
}
