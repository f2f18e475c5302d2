//! Risk scoring engine for LendWise
//!
//! Deterministic credit heuristics: a financial profile maps to a 0-100
//! score, the score maps to a letter tier, and the tier fixes the annual
//! interest rate for new loan requests. Everything here is pure; callers
//! persist the results.

use crate::models::{EmploymentType, FinancialProfile, RiskTier};

// ============================================================================
// Scoring Constants
// ============================================================================

/// Every profile starts here before adjustments.
const BASE_SCORE: i32 = 50;

/// Minimum risk score
const MIN_SCORE: i32 = 0;

/// Maximum risk score
const MAX_SCORE: i32 = 100;

/// Applied instead of the expense-ratio adjustment when income is absent.
const NO_INCOME_PENALTY: i32 = -20;

/// Disposable income above this earns the larger stability bonus.
const DISPOSABLE_HIGH_THRESHOLD: i64 = 2000;

/// Disposable income above this earns the smaller stability bonus.
const DISPOSABLE_LOW_THRESHOLD: i64 = 1000;

/// Minimum score for tier A.
const TIER_A_MIN: i32 = 85;

/// Minimum score for tier B.
const TIER_B_MIN: i32 = 70;

/// Minimum score for tier C.
const TIER_C_MIN: i32 = 50;

// ============================================================================
// Risk Scorer
// ============================================================================

/// Score a financial profile on the 0-100 scale.
///
/// Higher is better. The result is clamped to [0, 100].
pub fn score_profile(profile: &FinancialProfile) -> i32 {
    let mut score = BASE_SCORE;

    score += employment_adjustment(profile.employment_type);
    score += expense_ratio_adjustment(profile.monthly_income, profile.monthly_expenses);
    score += disposable_income_adjustment(profile.monthly_income, profile.monthly_expenses);

    score.clamp(MIN_SCORE, MAX_SCORE)
}

fn employment_adjustment(employment: EmploymentType) -> i32 {
    match employment {
        EmploymentType::FullTime => 25,
        EmploymentType::SelfEmployed => 15,
        EmploymentType::PartTime => 5,
        EmploymentType::Unemployed => -30,
        EmploymentType::Other => 0,
    }
}

/// Adjustment from the expenses/income ratio.
///
/// Bucket boundaries are strict: a ratio of exactly 0.30 falls into the
/// `< 0.50` bucket, not the `< 0.30` one. Compared with integer
/// cross-multiplication so boundaries are exact.
fn expense_ratio_adjustment(income: i64, expenses: i64) -> i32 {
    if income <= 0 {
        return NO_INCOME_PENALTY;
    }

    // expenses / income < 3/10, 5/10, 7/10; > 9/10
    if expenses * 10 < income * 3 {
        25
    } else if expenses * 10 < income * 5 {
        15
    } else if expenses * 10 < income * 7 {
        5
    } else if expenses * 10 > income * 9 {
        -20
    } else {
        0
    }
}

fn disposable_income_adjustment(income: i64, expenses: i64) -> i32 {
    let disposable = income - expenses;
    if disposable > DISPOSABLE_HIGH_THRESHOLD {
        10
    } else if disposable > DISPOSABLE_LOW_THRESHOLD {
        5
    } else if disposable < 0 {
        -20
    } else {
        0
    }
}

// ============================================================================
// Tier Assigner
// ============================================================================

impl RiskTier {
    /// Classify a 0-100 risk score. Boundaries are inclusive.
    pub fn from_score(score: i32) -> Self {
        if score >= TIER_A_MIN {
            RiskTier::A
        } else if score >= TIER_B_MIN {
            RiskTier::B
        } else if score >= TIER_C_MIN {
            RiskTier::C
        } else {
            RiskTier::D
        }
    }

    /// Annual interest rate in whole percent for loans in this tier.
    pub fn interest_rate(&self) -> i32 {
        match self {
            RiskTier::A => 8,
            RiskTier::B => 12,
            RiskTier::C => 18,
            RiskTier::D => 24,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskTier::A => "Excellent profile, lowest risk",
            RiskTier::B => "Good profile, low risk",
            RiskTier::C => "Fair profile, moderate risk",
            RiskTier::D => "Weak profile, elevated risk",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(income: i64, expenses: i64, employment: EmploymentType) -> FinancialProfile {
        FinancialProfile {
            monthly_income: income,
            monthly_expenses: expenses,
            employment_type: employment,
        }
    }

    #[test]
    fn test_strong_profile_hits_the_cap() {
        // 50 + 25 (Full-time) + 15 (ratio 0.3 is NOT < 0.30, so the < 0.50
        // bucket applies) + 10 (disposable 3500 > 2000) = 100.
        let score = score_profile(&profile(5000, 1500, EmploymentType::FullTime));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_ratio_boundary_is_strict() {
        // Just under 0.30 gets the full bonus instead: 50 + 25 + 25 + 10 = 110 -> 100.
        let below = score_profile(&profile(5000, 1499, EmploymentType::FullTime));
        assert_eq!(below, 100);

        // At exactly 0.30 the employment bonus alone separates the two.
        let at = score_profile(&profile(5000, 1500, EmploymentType::Other));
        assert_eq!(at, 50 + 0 + 15 + 10);
    }

    #[test]
    fn test_zero_income_penalized() {
        // 50 + 0 (Other) - 20 (no income) + 0 (disposable 0) = 30
        let score = score_profile(&profile(0, 0, EmploymentType::Other));
        assert_eq!(score, 30);
    }

    #[test]
    fn test_negative_disposable_income_penalized() {
        // Ratio 2.0 -> > 0.90 bucket (-20), disposable -1000 (-20):
        // 50 + 0 - 20 - 20 = 10
        let score = score_profile(&profile(1000, 2000, EmploymentType::Other));
        assert_eq!(score, 10);
    }

    #[test]
    fn test_score_clamped_to_floor() {
        // 50 - 30 (Unemployed) - 20 (no income) - 20 (negative disposable) = -20 -> 0
        let score = score_profile(&profile(0, 500, EmploymentType::Unemployed));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_score_range_holds_at_extremes() {
        let profiles = [
            profile(0, 0, EmploymentType::Unemployed),
            profile(-100, 0, EmploymentType::Other),
            profile(1_000_000, 0, EmploymentType::FullTime),
            profile(100, 1_000_000, EmploymentType::Unemployed),
        ];
        for p in profiles {
            let score = score_profile(&p);
            assert!((0..=100).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_disposable_income_buckets() {
        // Income 10000: ratio buckets held constant at < 0.30 by tiny expenses.
        let base = 50 + 0 + 25;
        assert_eq!(
            score_profile(&profile(10_000, 7_999, EmploymentType::Other)),
            50 + 0 + 0 + 10 // ratio ~0.8 -> no ratio adjustment, disposable 2001
        );
        assert_eq!(
            score_profile(&profile(3_000, 500, EmploymentType::Other)),
            base + 10 // disposable 2500 > 2000
        );
        assert_eq!(
            score_profile(&profile(2_000, 500, EmploymentType::Other)),
            50 + 0 + 25 + 5 // disposable 1500 -> the smaller bonus
        );
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_score(100), RiskTier::A);
        assert_eq!(RiskTier::from_score(85), RiskTier::A);
        assert_eq!(RiskTier::from_score(84), RiskTier::B);
        assert_eq!(RiskTier::from_score(70), RiskTier::B);
        assert_eq!(RiskTier::from_score(69), RiskTier::C);
        assert_eq!(RiskTier::from_score(50), RiskTier::C);
        assert_eq!(RiskTier::from_score(49), RiskTier::D);
        assert_eq!(RiskTier::from_score(0), RiskTier::D);
    }

    #[test]
    fn test_tier_rates() {
        assert_eq!(RiskTier::A.interest_rate(), 8);
        assert_eq!(RiskTier::B.interest_rate(), 12);
        assert_eq!(RiskTier::C.interest_rate(), 18);
        assert_eq!(RiskTier::D.interest_rate(), 24);
    }
}
