//! Investment service layer - loan funding and the lender portfolio
//!
//! Funding is one database transaction: the loan row is locked, the pure
//! funding transition decides acceptance, and the investment plus its ledger
//! entry are written together with the loan update. Concurrent contributions
//! to the same loan serialize on the row lock and can never jointly push
//! `funded_amount` past `amount`.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    ContributionError, FundLoanRequest, FundLoanResponse, Investment, InvestmentStatus,
    LoanRequest, PortfolioEntry, TransactionType,
};

/// Investment service for funding loans and reading portfolios
#[derive(Clone)]
pub struct InvestmentService {
    db_pool: PgPool,
}

impl InvestmentService {
    /// Create a new investment service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Fund a loan: apply the contribution, record the investment, and write
    /// the lender's ledger entry, atomically.
    pub async fn fund_loan(&self, request: FundLoanRequest) -> Result<FundLoanResponse, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, LoanRequest>(
            "SELECT * FROM loan_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request.loan_request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan request not found".to_string()))?;

        let update = loan
            .evaluate_contribution(request.amount)
            .map_err(|e| match e {
                ContributionError::NotFundable => {
                    ApiError::StateConflict("Loan is not available for funding".to_string())
                }
                ContributionError::ExceedsRequested => {
                    ApiError::StateConflict("Investment exceeds requested amount".to_string())
                }
            })?;

        let now = Utc::now();

        let loan = sqlx::query_as::<_, LoanRequest>(
            r#"
            UPDATE loan_requests
            SET funded_amount = $1, status = $2, updated_at = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(update.new_funded_amount)
        .bind(update.new_status)
        .bind(now)
        .bind(request.loan_request_id)
        .fetch_one(&mut *tx)
        .await?;

        let investment = sqlx::query_as::<_, Investment>(
            r#"
            INSERT INTO investments (lender_id, loan_request_id, amount_invested, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.lender_id)
        .bind(request.loan_request_id)
        .bind(request.amount)
        .bind(InvestmentStatus::Active)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        // Ledger entry: money leaving the lender.
        sqlx::query(
            r#"
            INSERT INTO transactions (user_id, tx_type, amount, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request.lender_id)
        .bind(TransactionType::Investment)
        .bind(-request.amount)
        .bind(format!("Investment in loan {}", request.loan_request_id))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = %loan.id,
            lender_id = %request.lender_id,
            amount = request.amount,
            funded_amount = loan.funded_amount,
            status = ?loan.status,
            "Loan funded"
        );

        Ok(FundLoanResponse { investment, loan })
    }

    /// A lender's investments joined with loan state and borrower name.
    pub async fn lender_portfolio(
        &self,
        lender_id: &Uuid,
    ) -> Result<Vec<PortfolioEntry>, ApiError> {
        let entries = sqlx::query_as::<_, PortfolioEntry>(
            r#"
            SELECT
                i.id AS investment_id,
                i.amount_invested,
                i.status AS investment_status,
                i.created_at AS invested_at,
                l.id AS loan_request_id,
                l.amount AS loan_amount,
                l.funded_amount AS loan_funded_amount,
                l.status AS loan_status,
                l.interest_rate,
                l.risk_tier,
                u.name AS borrower_name
            FROM investments i
            JOIN loan_requests l ON l.id = i.loan_request_id
            JOIN users u ON u.id = l.borrower_id
            WHERE i.lender_id = $1
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(lender_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(entries)
    }
}
