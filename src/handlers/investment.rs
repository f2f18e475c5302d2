//! Investment API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{ApiResponse, FundLoanRequest, FundLoanResponse, PortfolioEntry};
use crate::services::InvestmentService;

/// POST /api/investments - Fund a loan
pub async fn create_investment(
    State(investment_service): State<Arc<InvestmentService>>,
    Json(request): Json<FundLoanRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<FundLoanResponse>>)> {
    request.validate()?;

    let response = investment_service.fund_loan(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

/// GET /api/investments/my-portfolio/:user_id - A lender's portfolio
pub async fn get_lender_portfolio(
    State(investment_service): State<Arc<InvestmentService>>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<PortfolioEntry>>>> {
    let entries = investment_service.lender_portfolio(&user_id).await?;

    Ok(Json(ApiResponse::ok(entries)))
}
