//! Service layer for the LendWise backend

pub mod investment_service;
pub mod loan_service;
pub mod recommendation;
pub mod risk_engine;
pub mod user_service;

pub use investment_service::InvestmentService;
pub use loan_service::LoanService;
pub use user_service::UserService;
