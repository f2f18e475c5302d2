//! Loan API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{
    ApiResponse, CreateLoanRequest, LoanRequest, OpenLoanView, SubmitCertificateRequest,
    SubmitCertificateResponse,
};
use crate::services::recommendation::{self, RiskTolerance};
use crate::services::LoanService;

/// POST /api/loans - Create a loan request with automatic tiering
pub async fn create_loan_request(
    State(loan_service): State<Arc<LoanService>>,
    Json(request): Json<CreateLoanRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<LoanRequest>>)> {
    request.validate()?;

    let loan = loan_service.create_loan_request(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(loan))))
}

/// GET /api/loans/explore - Open loan requests, newest first
pub async fn get_explore_loans(
    State(loan_service): State<Arc<LoanService>>,
) -> ApiResult<Json<ApiResponse<Vec<OpenLoanView>>>> {
    let loans = loan_service.list_open_loans().await?;

    Ok(Json(ApiResponse::ok(loans)))
}

/// Query parameters for loan recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub tolerance: Option<RiskTolerance>,
}

/// GET /api/loans/recommended - Open loans filtered by risk tolerance
pub async fn get_recommended_loans(
    State(loan_service): State<Arc<LoanService>>,
    Query(query): Query<RecommendationQuery>,
) -> ApiResult<Json<ApiResponse<Vec<OpenLoanView>>>> {
    let tolerance = query.tolerance.unwrap_or_default();
    let open = loan_service.list_open_loans().await?;
    let loans = recommendation::recommend(tolerance, open);

    Ok(Json(ApiResponse::ok(loans)))
}

/// GET /api/loans/my-loans/:user_id - A borrower's own loan requests
pub async fn get_my_loans(
    State(loan_service): State<Arc<LoanService>>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<LoanRequest>>>> {
    let loans = loan_service.list_borrower_loans(&user_id).await?;

    Ok(Json(ApiResponse::ok(loans)))
}

/// POST /api/loans/:id/certificate - Submit a funding certificate
pub async fn submit_certificate(
    State(loan_service): State<Arc<LoanService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitCertificateRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SubmitCertificateResponse>>)> {
    request.validate()?;

    let response = loan_service.submit_certificate(&id, request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}
