pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "real_estate")]
pub mod real_estate;

#[cfg(feature = "location")]
pub mod location;

pub use error::ImmoError;
pub use types::*;

/// Standard result type for all immo operations
pub type ImmoResult<T> = Result<T, ImmoError>;
