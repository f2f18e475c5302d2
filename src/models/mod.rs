//! Data models for the LendWise backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// User roles, one canonical lowercase representation.
///
/// Legacy role spellings from older clients ("Student", "Non-student",
/// mixed casings) are accepted by [`UserRole::parse`] at the API boundary
/// and normalized here.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Borrower,
    Lender,
    Admin,
}

impl UserRole {
    /// Parse a role string, mapping legacy aliases to the canonical enum.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "borrower" | "student" | "non-student" => Some(UserRole::Borrower),
            "lender" => Some(UserRole::Lender),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Borrower => "borrower",
            UserRole::Lender => "lender",
            UserRole::Admin => "admin",
        }
    }
}

/// Employment types as declared on the financial profile.
///
/// `Other` absorbs unknown inputs at the boundary and carries no scoring
/// adjustment. Wire names keep the hyphenated spellings clients send.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "employment_type", rename_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    Other,
}

impl EmploymentType {
    pub fn parse(s: &str) -> Self {
        match s {
            "Full-time" => EmploymentType::FullTime,
            "Part-time" => EmploymentType::PartTime,
            "Self-employed" => EmploymentType::SelfEmployed,
            "Unemployed" => EmploymentType::Unemployed,
            _ => EmploymentType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::SelfEmployed => "Self-employed",
            EmploymentType::Unemployed => "Unemployed",
            EmploymentType::Other => "Other",
        }
    }
}

impl From<String> for EmploymentType {
    fn from(s: String) -> Self {
        EmploymentType::parse(&s)
    }
}

impl From<EmploymentType> for String {
    fn from(e: EmploymentType) -> Self {
        e.as_str().to_string()
    }
}

/// User model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub simulated_auth_id: String,
    pub role: UserRole,
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    pub savings_target: i64,
    pub employment_type: EmploymentType,
    /// Derived 0-100 score, recomputed on profile updates and loan creation.
    pub risk_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The slice of the user the risk scorer looks at.
    pub fn financial_profile(&self) -> FinancialProfile {
        FinancialProfile {
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            employment_type: self.employment_type,
        }
    }
}

/// Financial profile inputs to the risk scorer.
#[derive(Debug, Clone, Copy)]
pub struct FinancialProfile {
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    pub employment_type: EmploymentType,
}

/// Request to register a new user
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "simulated_auth_id is required"))]
    pub simulated_auth_id: String,
    /// Free-form role string, normalized via [`UserRole::parse`].
    pub role: Option<String>,
}

/// Partial update of a user's financial profile
#[derive(Debug, Deserialize)]
pub struct UpdateFinancialProfileRequest {
    pub monthly_income: Option<i64>,
    pub monthly_expenses: Option<i64>,
    pub savings_target: Option<i64>,
    pub employment_type: Option<EmploymentType>,
}

/// Loan lifecycle status.
///
/// `Repaid` and `Defaulted` are reachable in the schema but no transition
/// logic targets them; they exist so persisted data can carry them.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_status")]
pub enum LoanStatus {
    Pending,
    Funded,
    Active,
    Repaid,
    Defaulted,
}

/// Risk tier letter grade, A best to D worst.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(type_name = "risk_tier")]
pub enum RiskTier {
    A,
    B,
    C,
    D,
}

/// Loan request model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct LoanRequest {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub amount: i64,
    /// Annual interest rate in whole percent, fixed at creation from the tier.
    pub interest_rate: i32,
    pub duration_months: i32,
    pub purpose: String,
    pub status: LoanStatus,
    pub risk_tier: RiskTier,
    /// Running total of accepted investments. Never exceeds `amount`.
    pub funded_amount: i64,
    pub certificate_submitted: bool,
    pub certificate_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of applying an accepted contribution to a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingUpdate {
    pub new_funded_amount: i64,
    pub new_status: LoanStatus,
}

/// Why a contribution was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionError {
    /// The loan is not in `Pending` status.
    NotFundable,
    /// The contribution would push `funded_amount` past `amount`.
    ExceedsRequested,
}

impl LoanRequest {
    /// Decide whether a contribution is accepted and what it changes.
    ///
    /// Pure transition of the funding state machine: callers must apply the
    /// returned update under a per-loan lock so concurrent contributions
    /// cannot jointly overshoot the requested amount. The whole contribution
    /// is rejected on overshoot, never clamped.
    pub fn evaluate_contribution(
        &self,
        contribution: i64,
    ) -> Result<FundingUpdate, ContributionError> {
        if self.status != LoanStatus::Pending {
            return Err(ContributionError::NotFundable);
        }
        let new_funded_amount = self
            .funded_amount
            .checked_add(contribution)
            .ok_or(ContributionError::ExceedsRequested)?;
        if new_funded_amount > self.amount {
            return Err(ContributionError::ExceedsRequested);
        }
        let new_status = if new_funded_amount >= self.amount {
            LoanStatus::Funded
        } else {
            LoanStatus::Pending
        };

        Ok(FundingUpdate {
            new_funded_amount,
            new_status,
        })
    }
}

/// Request to create a loan request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoanRequest {
    pub borrower_id: Uuid,
    #[validate(range(min = 1, message = "amount must be greater than 0"))]
    pub amount: i64,
    #[validate(range(min = 1, message = "duration_months must be greater than 0"))]
    pub duration_months: i32,
    #[validate(length(min = 1, message = "purpose is required"))]
    pub purpose: String,
}

/// Open loan joined with borrower display data, for the explore listing.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct OpenLoanView {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub borrower_risk_score: i32,
    pub amount: i64,
    pub interest_rate: i32,
    pub duration_months: i32,
    pub purpose: String,
    pub risk_tier: RiskTier,
    pub funded_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Request to submit a funding certificate for a loan
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitCertificateRequest {
    #[validate(range(min = 1, message = "principal must be greater than 0"))]
    pub principal: i64,
    #[validate(range(min = 0, message = "interest must not be negative"))]
    pub interest: i64,
    #[validate(range(min = 1, message = "total_due must be greater than 0"))]
    pub total_due: i64,
    #[validate(length(min = 1, message = "signed_by is required"))]
    pub signed_by: String,
}

/// Borrower-signed certificate record. A data record, not a signature.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct LoanCertificate {
    pub id: Uuid,
    pub loan_request_id: Uuid,
    pub principal: i64,
    pub interest: i64,
    pub total_due: i64,
    pub signed_by: String,
    pub deadline: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

/// Certificate record plus the loan state it produced.
#[derive(Debug, Serialize)]
pub struct SubmitCertificateResponse {
    pub certificate: LoanCertificate,
    pub loan: LoanRequest,
}

/// Investment status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "investment_status")]
pub enum InvestmentStatus {
    Active,
    Completed,
    Defaulted,
}

/// Immutable record of one lender's contribution to one loan request.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Investment {
    pub id: Uuid,
    pub lender_id: Uuid,
    pub loan_request_id: Uuid,
    pub amount_invested: i64,
    pub status: InvestmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Request to fund a loan
#[derive(Debug, Deserialize, Validate)]
pub struct FundLoanRequest {
    pub lender_id: Uuid,
    pub loan_request_id: Uuid,
    #[validate(range(min = 1, message = "amount must be greater than 0"))]
    pub amount: i64,
}

/// Investment plus the loan state it produced.
#[derive(Debug, Serialize)]
pub struct FundLoanResponse {
    pub investment: Investment,
    pub loan: LoanRequest,
}

/// One row of a lender's portfolio: investment joined with loan and borrower.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct PortfolioEntry {
    pub investment_id: Uuid,
    pub amount_invested: i64,
    pub investment_status: InvestmentStatus,
    pub invested_at: DateTime<Utc>,
    pub loan_request_id: Uuid,
    pub loan_amount: i64,
    pub loan_funded_amount: i64,
    pub loan_status: LoanStatus,
    pub interest_rate: i32,
    pub risk_tier: RiskTier,
    pub borrower_name: String,
}

/// Ledger entry types
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "transaction_type", rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    LoanDisbursal,
    Repayment,
    Investment,
}

/// Generic ledger entry. A side-effect log, not validated against balances.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tx_type: TransactionType,
    /// Signed amount: negative for money leaving the user.
    pub amount: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending_loan(amount: i64, funded_amount: i64) -> LoanRequest {
        LoanRequest {
            id: Uuid::new_v4(),
            borrower_id: Uuid::new_v4(),
            amount,
            interest_rate: 12,
            duration_months: 12,
            purpose: "Laptop".to_string(),
            status: LoanStatus::Pending,
            risk_tier: RiskTier::B,
            funded_amount,
            certificate_submitted: false,
            certificate_deadline: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_partial_contribution_stays_pending() {
        let loan = pending_loan(1000, 0);
        let update = loan.evaluate_contribution(500).unwrap();
        assert_eq!(update.new_funded_amount, 500);
        assert_eq!(update.new_status, LoanStatus::Pending);
    }

    #[test]
    fn test_exact_fill_transitions_to_funded() {
        let loan = pending_loan(1000, 500);
        let update = loan.evaluate_contribution(500).unwrap();
        assert_eq!(update.new_funded_amount, 1000);
        assert_eq!(update.new_status, LoanStatus::Funded);
    }

    #[test]
    fn test_overshoot_rejected_whole() {
        // Remaining 500; 600 must be rejected outright, not clamped.
        let loan = pending_loan(1000, 500);
        assert_eq!(
            loan.evaluate_contribution(600),
            Err(ContributionError::ExceedsRequested)
        );
    }

    #[test]
    fn test_funded_loan_rejects_any_amount() {
        let mut loan = pending_loan(1000, 1000);
        loan.status = LoanStatus::Funded;
        assert_eq!(
            loan.evaluate_contribution(1),
            Err(ContributionError::NotFundable)
        );
        assert_eq!(
            loan.evaluate_contribution(1_000_000),
            Err(ContributionError::NotFundable)
        );
    }

    #[test]
    fn test_non_pending_states_not_fundable() {
        for status in [LoanStatus::Active, LoanStatus::Repaid, LoanStatus::Defaulted] {
            let mut loan = pending_loan(1000, 0);
            loan.status = status;
            assert_eq!(
                loan.evaluate_contribution(100),
                Err(ContributionError::NotFundable)
            );
        }
    }

    #[test]
    fn test_role_parse_normalizes_aliases() {
        assert_eq!(UserRole::parse("borrower"), Some(UserRole::Borrower));
        assert_eq!(UserRole::parse("Student"), Some(UserRole::Borrower));
        assert_eq!(UserRole::parse("Non-student"), Some(UserRole::Borrower));
        assert_eq!(UserRole::parse("Lender"), Some(UserRole::Lender));
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("oracle"), None);
    }

    #[test]
    fn test_employment_type_wire_names() {
        let full_time: EmploymentType = serde_json::from_str("\"Full-time\"").unwrap();
        assert_eq!(full_time, EmploymentType::FullTime);

        let self_employed: EmploymentType = serde_json::from_str("\"Self-employed\"").unwrap();
        assert_eq!(self_employed, EmploymentType::SelfEmployed);

        // Unknown inputs fall back to Other instead of failing.
        let unknown: EmploymentType = serde_json::from_str("\"Gig-economy\"").unwrap();
        assert_eq!(unknown, EmploymentType::Other);
    }

    #[test]
    fn test_status_and_tier_wire_names() {
        assert_eq!(
            serde_json::to_string(&LoanStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(serde_json::to_string(&RiskTier::A).unwrap(), "\"A\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Borrower).unwrap(),
            "\"borrower\""
        );
    }
}
