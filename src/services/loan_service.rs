//! Loan service layer - Business logic for loan request management

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CreateLoanRequest, LoanCertificate, LoanRequest, LoanStatus, RiskTier,
    SubmitCertificateRequest, SubmitCertificateResponse, OpenLoanView, User,
};
use crate::services::risk_engine;

/// Days a borrower has after certificate submission.
const CERTIFICATE_DEADLINE_DAYS: i64 = 30;

/// Loan service for managing the loan request lifecycle
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a loan request with tier and rate from the borrower's profile.
    ///
    /// The scorer runs fresh on every creation and the new score is persisted
    /// back onto the borrower in the same transaction as the loan insert.
    pub async fn create_loan_request(
        &self,
        request: CreateLoanRequest,
    ) -> Result<LoanRequest, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let borrower = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(request.borrower_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound("Borrower not found".to_string()))?;

        let score = risk_engine::score_profile(&borrower.financial_profile());
        let tier = RiskTier::from_score(score);
        let interest_rate = tier.interest_rate();

        sqlx::query("UPDATE users SET risk_score = $1, updated_at = $2 WHERE id = $3")
            .bind(score)
            .bind(Utc::now())
            .bind(borrower.id)
            .execute(&mut *tx)
            .await?;

        let loan = sqlx::query_as::<_, LoanRequest>(
            r#"
            INSERT INTO loan_requests (
                borrower_id, amount, interest_rate, duration_months, purpose,
                status, risk_tier, funded_amount, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, $8)
            RETURNING *
            "#,
        )
        .bind(request.borrower_id)
        .bind(request.amount)
        .bind(interest_rate)
        .bind(request.duration_months)
        .bind(&request.purpose)
        .bind(LoanStatus::Pending)
        .bind(tier)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = %loan.id,
            borrower_id = %loan.borrower_id,
            risk_score = score,
            risk_tier = ?tier,
            interest_rate,
            "Loan request created"
        );

        Ok(loan)
    }

    /// Open loans (status Pending) joined with borrower display data, newest first.
    pub async fn list_open_loans(&self) -> Result<Vec<OpenLoanView>, ApiError> {
        let loans = sqlx::query_as::<_, OpenLoanView>(
            r#"
            SELECT
                l.id, l.borrower_id, u.name AS borrower_name,
                u.risk_score AS borrower_risk_score,
                l.amount, l.interest_rate, l.duration_months, l.purpose,
                l.risk_tier, l.funded_amount, l.created_at
            FROM loan_requests l
            JOIN users u ON u.id = l.borrower_id
            WHERE l.status = 'Pending'
            ORDER BY l.created_at DESC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(loans)
    }

    /// A borrower's own loan requests, newest first.
    pub async fn list_borrower_loans(
        &self,
        borrower_id: &Uuid,
    ) -> Result<Vec<LoanRequest>, ApiError> {
        let loans = sqlx::query_as::<_, LoanRequest>(
            "SELECT * FROM loan_requests WHERE borrower_id = $1 ORDER BY created_at DESC",
        )
        .bind(borrower_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(loans)
    }

    /// Record a funding certificate for a fully funded loan.
    ///
    /// Allowed only while the loan is Funded or Active; a Funded loan
    /// transitions to Active and gets its submission deadline stamped.
    pub async fn submit_certificate(
        &self,
        loan_id: &Uuid,
        request: SubmitCertificateRequest,
    ) -> Result<SubmitCertificateResponse, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, LoanRequest>(
            "SELECT * FROM loan_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(loan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan request not found".to_string()))?;

        if !matches!(loan.status, LoanStatus::Funded | LoanStatus::Active) {
            return Err(ApiError::StateConflict(
                "Loan is not eligible for certificate submission".to_string(),
            ));
        }

        let now = Utc::now();
        let deadline = now + Duration::days(CERTIFICATE_DEADLINE_DAYS);

        let certificate = sqlx::query_as::<_, LoanCertificate>(
            r#"
            INSERT INTO loan_certificates (
                loan_request_id, principal, interest, total_due, signed_by,
                deadline, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(loan_id)
        .bind(request.principal)
        .bind(request.interest)
        .bind(request.total_due)
        .bind(&request.signed_by)
        .bind(deadline)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let loan = sqlx::query_as::<_, LoanRequest>(
            r#"
            UPDATE loan_requests
            SET certificate_submitted = TRUE,
                certificate_deadline = $1,
                status = 'Active',
                updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(deadline)
        .bind(now)
        .bind(loan_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(loan_id = %loan_id, deadline = %deadline, "Certificate submitted");

        Ok(SubmitCertificateResponse { certificate, loan })
    }
}
