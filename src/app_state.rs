//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::services::{InvestmentService, LoanService, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub loan_service: Arc<LoanService>,
    pub investment_service: Arc<InvestmentService>,
    pub db_pool: PgPool,
}

impl AppState {
    /// Build the state, wiring every service onto the shared pool.
    pub fn new(db_pool: PgPool) -> Self {
        Self {
            user_service: Arc::new(UserService::new(db_pool.clone())),
            loan_service: Arc::new(LoanService::new(db_pool.clone())),
            investment_service: Arc::new(InvestmentService::new(db_pool.clone())),
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<InvestmentService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.investment_service.clone()
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
