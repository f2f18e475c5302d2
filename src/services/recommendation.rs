//! Loan recommendations for lenders
//!
//! Filters and ranks open loans against a lender's declared risk tolerance.
//! Pure functions; the handler fetches the open loans and applies these.

use serde::{Deserialize, Serialize};

use crate::models::{OpenLoanView, RiskTier};

/// A lender's stated appetite for risk when browsing open loans.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTolerance {
    /// The tiers a lender with this tolerance will consider.
    pub fn allowed_tiers(&self) -> &'static [RiskTier] {
        match self {
            RiskTolerance::Low => &[RiskTier::A, RiskTier::B],
            RiskTolerance::Medium => &[RiskTier::A, RiskTier::B, RiskTier::C],
            RiskTolerance::High => &[RiskTier::A, RiskTier::B, RiskTier::C, RiskTier::D],
        }
    }
}

/// Filter open loans to the tolerated tiers and rank them.
///
/// High tolerance chases yield: interest rate descending. Low and Medium
/// rank safety first: tier ascending (A before B), rate descending within
/// a tier.
pub fn recommend(tolerance: RiskTolerance, mut loans: Vec<OpenLoanView>) -> Vec<OpenLoanView> {
    let allowed = tolerance.allowed_tiers();
    loans.retain(|loan| allowed.contains(&loan.risk_tier));

    match tolerance {
        RiskTolerance::High => {
            loans.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));
        }
        _ => {
            loans.sort_by(|a, b| {
                a.risk_tier
                    .cmp(&b.risk_tier)
                    .then(b.interest_rate.cmp(&a.interest_rate))
            });
        }
    }

    loans
}
