//! API handlers for the LendWise backend

pub mod investment;
pub mod loan;
pub mod user;

pub use investment::*;
pub use loan::*;
pub use user::*;
