//! User service layer - registration, profiles, and score recomputation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{RegisterUserRequest, UpdateFinancialProfileRequest, User, UserRole};
use crate::services::risk_engine;

/// User service for account and financial profile management
#[derive(Clone)]
pub struct UserService {
    db_pool: PgPool,
}

impl UserService {
    /// Create a new user service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Register a new user.
    ///
    /// The role string is normalized at this boundary; legacy aliases map to
    /// the canonical enum. Duplicate emails are rejected.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, ApiError> {
        let role = match request.role.as_deref() {
            None => UserRole::Borrower,
            Some(raw) => UserRole::parse(raw).ok_or_else(|| {
                ApiError::ValidationError(format!("Unknown role: '{}'", raw))
            })?,
        };

        let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&request.email)
            .fetch_optional(&self.db_pool)
            .await?;

        if existing.is_some() {
            return Err(ApiError::StateConflict("User already exists".to_string()));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, simulated_auth_id, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.simulated_auth_id)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(user_id = %user.id, role = %user.role.as_str(), "User registered");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &Uuid) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        user.ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Merge a partial financial profile update and recompute the risk score.
    ///
    /// The score is derived data: it is never accepted from the caller, only
    /// recomputed from the merged profile and persisted.
    pub async fn update_financial_profile(
        &self,
        id: &Uuid,
        request: UpdateFinancialProfileRequest,
    ) -> Result<User, ApiError> {
        let user = self.get_user(id).await?;

        let monthly_income = request.monthly_income.unwrap_or(user.monthly_income);
        let monthly_expenses = request.monthly_expenses.unwrap_or(user.monthly_expenses);
        let savings_target = request.savings_target.unwrap_or(user.savings_target);
        let employment_type = request.employment_type.unwrap_or(user.employment_type);

        let risk_score = risk_engine::score_profile(&crate::models::FinancialProfile {
            monthly_income,
            monthly_expenses,
            employment_type,
        });

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET monthly_income = $1,
                monthly_expenses = $2,
                savings_target = $3,
                employment_type = $4,
                risk_score = $5,
                updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(monthly_income)
        .bind(monthly_expenses)
        .bind(savings_target)
        .bind(employment_type)
        .bind(risk_score)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(user_id = %id, risk_score, "Financial profile updated, score recomputed");

        Ok(updated)
    }
}
