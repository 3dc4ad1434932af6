//! Property checks over the decision engine.

use chrono::NaiveDate;
use loan_decision::decision::{
    credit_score, DecisionEngine, DecisionError, LoanRequest, PersonalCode, PolicyConstants,
};
use proptest::prelude::*;

const ELIGIBLE_CODES: [&str; 4] = [
    "38506151201",
    "38506153008",
    "38506155503",
    "38506158004",
];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

fn out_of_range_amount() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..2000i64, 10001i64..=i64::MAX]
}

fn out_of_range_period() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..12i64, 61i64..=i64::MAX]
}

proptest! {
    #[test]
    fn amounts_outside_bounds_are_rejected(
        code in prop::sample::select(ELIGIBLE_CODES.to_vec()),
        amount in out_of_range_amount(),
        period in any::<i64>(),
    ) {
        let decision = DecisionEngine::default().decide(&LoanRequest::new(code, amount, period), today());
        prop_assert_eq!(decision, Err(DecisionError::InvalidLoanAmount));
    }

    #[test]
    fn periods_outside_bounds_are_rejected(
        code in prop::sample::select(ELIGIBLE_CODES.to_vec()),
        amount in 2000i64..=10000,
        period in out_of_range_period(),
    ) {
        let decision = DecisionEngine::default().decide(&LoanRequest::new(code, amount, period), today());
        prop_assert_eq!(decision, Err(DecisionError::InvalidLoanPeriod));
    }

    #[test]
    fn unparseable_codes_are_rejected_first(
        code in "\\PC*",
        amount in any::<i64>(),
        period in any::<i64>(),
    ) {
        prop_assume!(PersonalCode::parse(&code).is_err());
        let decision = DecisionEngine::default().decide(&LoanRequest::new(code, amount, period), today());
        prop_assert_eq!(decision, Err(DecisionError::InvalidPersonalCode));
    }

    #[test]
    fn debt_band_is_never_approved(amount in 2000i64..=10000, period in 12i64..=60) {
        let decision = DecisionEngine::default().decide(&LoanRequest::new("38506151201", amount, period), today());
        prop_assert_eq!(decision, Err(DecisionError::NoValidLoan));
    }

    #[test]
    fn decisions_are_idempotent_within_a_day(
        code in prop::sample::select(ELIGIBLE_CODES.to_vec()),
        amount in 2000i64..=10000,
        period in 12i64..=60,
    ) {
        let engine = DecisionEngine::default();
        let request = LoanRequest::new(code, amount, period);
        prop_assert_eq!(engine.decide(&request, today()), engine.decide(&request, today()));
    }

    #[test]
    fn approvability_is_monotonic_in_period(
        modifier in 1u32..=5000,
        amount in 20u32..=100,
        period in 12u32..60,
    ) {
        let amount = amount * 100;
        let threshold = PolicyConstants::default().approval_threshold;
        if credit_score(modifier, amount, period) >= threshold {
            prop_assert!(credit_score(modifier, amount, period + 1) >= threshold);
        }
    }

    #[test]
    fn offers_stay_within_policy_bounds(
        code in prop::sample::select(ELIGIBLE_CODES[1..].to_vec()),
        amount in 2000i64..=10000,
        period in 12i64..=60,
    ) {
        let policy = PolicyConstants::default();
        let decision = DecisionEngine::default()
            .decide(&LoanRequest::new(code, amount, period), today())
            .expect("scoring segments always qualify by the maximum period");
        prop_assert!(policy.amount_in_range(decision.loan_amount));
        prop_assert!(decision.loan_period as i64 >= period);
        prop_assert!(decision.loan_period <= policy.maximum_loan_period);
        prop_assert_eq!(decision.loan_amount % policy.loan_amount_step, 0);
    }
}
