//! User API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{ApiResponse, RegisterUserRequest, UpdateFinancialProfileRequest, User};
use crate::services::UserService;

/// POST /api/users - Register a new user
pub async fn register_user(
    State(user_service): State<Arc<UserService>>,
    Json(request): Json<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    request.validate()?;

    let user = user_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// GET /api/users/:id - Get a user profile
pub async fn get_user_profile(
    State(user_service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = user_service.get_user(&id).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/:id/financials - Update financial profile and recompute score
pub async fn update_financial_profile(
    State(user_service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFinancialProfileRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = user_service.update_financial_profile(&id, request).await?;

    Ok(Json(ApiResponse::ok(user)))
}
