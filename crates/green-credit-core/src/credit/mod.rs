pub mod record;

#[cfg(feature = "lifecycle")]
pub mod lifecycle;

#[cfg(feature = "lifecycle")]
pub mod payment;
