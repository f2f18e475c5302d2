//! Risk scoring and tier assignment tests
//!
//! These tests pin the deterministic scoring formula and the tier table,
//! including the exact boundary behavior of every bucket.

use lendwise_server::models::{EmploymentType, FinancialProfile, RiskTier};
use lendwise_server::services::risk_engine::score_profile;

fn profile(income: i64, expenses: i64, employment: EmploymentType) -> FinancialProfile {
    FinancialProfile {
        monthly_income: income,
        monthly_expenses: expenses,
        employment_type: employment,
    }
}

// ============================================================================
// Tier Classification Tests
// ============================================================================

#[test]
fn test_tier_a_from_85() {
    assert_eq!(RiskTier::from_score(100), RiskTier::A);
    assert_eq!(RiskTier::from_score(90), RiskTier::A);
    assert_eq!(RiskTier::from_score(85), RiskTier::A);
}

#[test]
fn test_tier_b_from_70() {
    assert_eq!(RiskTier::from_score(84), RiskTier::B);
    assert_eq!(RiskTier::from_score(70), RiskTier::B);
}

#[test]
fn test_tier_c_from_50() {
    assert_eq!(RiskTier::from_score(69), RiskTier::C);
    assert_eq!(RiskTier::from_score(50), RiskTier::C);
}

#[test]
fn test_tier_d_below_50() {
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

#[test]
fn test_tier_descriptions() {
    assert!(!RiskTier::A.description().is_empty());
    assert!(!RiskTier::B.description().is_empty());
    assert!(!RiskTier::C.description().is_empty());
    assert!(!RiskTier::D.description().is_empty());
}

// ============================================================================
// Scoring Scenario Tests
// ============================================================================

#[test]
fn test_full_time_healthy_profile_scores_100() {
    // 50 base + 25 Full-time + 15 expense ratio (0.3 lands in the < 0.50
    // bucket, not < 0.30) + 10 disposable (3500 > 2000) = 100.
    let score = score_profile(&profile(5000, 1500, EmploymentType::FullTime));
    assert_eq!(score, 100);
    assert_eq!(RiskTier::from_score(score), RiskTier::A);
    assert_eq!(RiskTier::from_score(score).interest_rate(), 8);
}

#[test]
fn test_employment_adjustments() {
    // Same finances, only employment varies. Income 1000, expenses 900:
    // ratio 0.9 -> no ratio adjustment, disposable 100 -> no adjustment.
    let base = 50;
    assert_eq!(
        score_profile(&profile(1000, 900, EmploymentType::FullTime)),
        base + 25
    );
    assert_eq!(
        score_profile(&profile(1000, 900, EmploymentType::SelfEmployed)),
        base + 15
    );
    assert_eq!(
        score_profile(&profile(1000, 900, EmploymentType::PartTime)),
        base + 5
    );
    assert_eq!(
        score_profile(&profile(1000, 900, EmploymentType::Unemployed)),
        base - 30
    );
    assert_eq!(
        score_profile(&profile(1000, 900, EmploymentType::Other)),
        base
    );
}

#[test]
fn test_unemployed_with_no_income_floors_at_zero() {
    // 50 - 30 - 20 (no income) - 20 (negative disposable) = -20 -> clamped.
    let score = score_profile(&profile(0, 1000, EmploymentType::Unemployed));
    assert_eq!(score, 0);
    assert_eq!(RiskTier::from_score(score), RiskTier::D);
}

#[test]
fn test_score_stays_in_range_for_extreme_profiles() {
    let extremes = [
        profile(0, 0, EmploymentType::Other),
        profile(i64::from(i32::MAX), 0, EmploymentType::FullTime),
        profile(1, 1_000_000, EmploymentType::Unemployed),
        profile(-500, 200, EmploymentType::Other),
    ];
    for p in extremes {
        let score = score_profile(&p);
        assert!(
            (0..=100).contains(&score),
            "score {} out of range for income={} expenses={}",
            score,
            p.monthly_income,
            p.monthly_expenses
        );
    }
}

#[test]
fn test_expense_ratio_buckets_are_strict() {
    // Employment Other and disposable below 1000 keep those terms at zero,
    // isolating the ratio adjustment. Income 1000 so each boundary is exact.
    let at_030 = score_profile(&profile(1000, 300, EmploymentType::Other));
    assert_eq!(at_030, 50 + 15, "ratio 0.30 belongs to the < 0.50 bucket");

    let below_030 = score_profile(&profile(1000, 299, EmploymentType::Other));
    assert_eq!(below_030, 50 + 25);

    let at_050 = score_profile(&profile(1000, 500, EmploymentType::Other));
    assert_eq!(at_050, 50 + 5, "ratio 0.50 belongs to the < 0.70 bucket");

    let at_070 = score_profile(&profile(1000, 700, EmploymentType::Other));
    assert_eq!(at_070, 50, "ratio 0.70 gets no adjustment");

    let at_090 = score_profile(&profile(1000, 900, EmploymentType::Other));
    assert_eq!(at_090, 50, "ratio 0.90 is not above the > 0.90 threshold");

    let above_090 = score_profile(&profile(1000, 901, EmploymentType::Other));
    assert_eq!(above_090, 50 - 20);
}
