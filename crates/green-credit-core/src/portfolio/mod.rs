pub mod assumptions;
pub mod delinquency;
pub mod interest;
pub mod savings;
pub mod stats;
pub mod summary;

pub use assumptions::PortfolioAssumptions;
