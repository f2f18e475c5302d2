//! Route definitions for the LendWise API

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use sqlx::PgPool;

use crate::app_state::AppState;
use crate::handlers::*;
use crate::middleware;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(user_routes())
        .merge(loan_routes())
        .merge(investment_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}

async fn root() -> &'static str {
    "LendWise API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// Health check endpoint
async fn health_check(State(pool): State<PgPool>) -> Json<HealthResponse> {
    let db_status = match crate::db::check_health(&pool).await {
        Ok(_) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if db_status == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// User routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(register_user))
        .route("/api/users/:id", get(get_user_profile))
        .route("/api/users/:id/financials", put(update_financial_profile))
}

// Loan routes
pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans", post(create_loan_request))
        .route("/api/loans/explore", get(get_explore_loans))
        .route("/api/loans/recommended", get(get_recommended_loans))
        .route("/api/loans/my-loans/:user_id", get(get_my_loans))
        .route("/api/loans/:id/certificate", post(submit_certificate))
}

// Investment routes
pub fn investment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/investments", post(create_investment))
        .route(
            "/api/investments/my-portfolio/:user_id",
            get(get_lender_portfolio),
        )
}
