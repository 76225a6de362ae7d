pub mod credit;
pub mod offers;
pub mod portfolio;
