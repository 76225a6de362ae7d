pub mod credit;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "portfolio")]
pub mod portfolio;

#[cfg(feature = "analytics")]
pub mod analytics;

#[cfg(feature = "offers")]
pub mod offers;

#[cfg(feature = "session")]
pub mod session;

pub use error::GreenCreditError;
pub use types::*;

/// Standard result type for all green-credit operations
pub type GreenCreditResult<T> = Result<T, GreenCreditError>;
