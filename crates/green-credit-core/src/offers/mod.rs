pub mod offer;
pub mod validation;
