pub mod assumptions;
pub mod error;
pub mod mortgage;
pub mod solver;
pub mod strategies;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "rehab")]
pub mod rehab;

pub use error::DealIqError;
pub use types::*;

/// Standard result type for all deal analysis operations
pub type DealIqResult<T> = Result<T, DealIqError>;
