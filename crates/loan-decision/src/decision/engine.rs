use chrono::{Local, NaiveDate};
use tracing::debug;

use super::outcome::{AgeViolation, Decision, DecisionError, LoanRequest};
use super::personal_code::PersonalCode;
use super::policy::{CreditModifier, PolicyConstants, PolicyError};

/// Credit score for an offer: `(modifier / amount) * period / 10`.
pub fn credit_score(modifier: u32, amount: u32, period: u32) -> f64 {
    (f64::from(modifier) / f64::from(amount)) * f64::from(period) / 10.0
}

/// Request fields that passed validation, in the types the search works with.
struct ValidatedRequest {
    code: PersonalCode,
    period: u32,
}

/// Stateless decision engine. Holds only the immutable policy, so one instance can serve
/// any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    policy: PolicyConstants,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self {
            policy: PolicyConstants::default(),
        }
    }
}

impl DecisionEngine {
    pub fn new(policy: PolicyConstants) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }

    /// Decide against the local calendar date.
    pub fn decide_today(&self, request: &LoanRequest) -> Result<Decision, DecisionError> {
        self.decide(request, Local::now().date_naive())
    }

    /// Validate the request and search for the best offer.
    ///
    /// Checks run in a fixed order (personal code, age, amount, period) and the first
    /// failure is returned. The requested amount only has to be in range; the offer itself
    /// comes from the search.
    pub fn decide(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<Decision, DecisionError> {
        let ValidatedRequest { code, period } = self.verify_inputs(request, today)?;

        let modifier = match self.credit_modifier(&code)? {
            CreditModifier::Debt => {
                debug!(segment = code.segment(), "applicant has outstanding debt");
                return Err(DecisionError::NoValidLoan);
            }
            CreditModifier::Score(modifier) => modifier,
        };

        let decision = self.search(modifier, period);
        match &decision {
            Ok(offer) => debug!(
                modifier,
                requested_period = period,
                approved_amount = offer.loan_amount,
                approved_period = offer.loan_period,
                "loan approved"
            ),
            Err(_) => debug!(modifier, requested_period = period, "no qualifying offer"),
        }
        decision
    }

    pub fn credit_modifier(&self, code: &PersonalCode) -> Result<CreditModifier, DecisionError> {
        self.policy.credit_modifier(code.segment()).ok_or_else(|| {
            DecisionError::Unexpected(format!("no credit band covers segment {}", code.segment()))
        })
    }

    /// Check the applicant's age against the minimum and the country-specific ceiling.
    pub fn check_age(&self, code: &PersonalCode, today: NaiveDate) -> Result<(), DecisionError> {
        let age = code.age_on(today).ok_or(DecisionError::InvalidPersonalCode)?;

        if age < self.policy.minimum_age as i32 {
            return Err(AgeViolation::UnderMinimum {
                age,
                minimum: self.policy.minimum_age,
            }
            .into());
        }

        let band = self.policy.country_band(code.segment()).ok_or_else(|| {
            DecisionError::Unexpected(format!("no country band covers segment {}", code.segment()))
        })?;
        let maximum = self.policy.maximum_eligible_age(band);
        if age > maximum {
            return Err(AgeViolation::AboveMaximum {
                age,
                maximum,
                country: band.country,
            }
            .into());
        }

        Ok(())
    }

    fn verify_inputs(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<ValidatedRequest, DecisionError> {
        let code = PersonalCode::parse(&request.personal_code).map_err(|err| {
            debug!(reason = %err, "rejected personal code");
            DecisionError::InvalidPersonalCode
        })?;

        self.check_age(&code, today)?;

        u32::try_from(request.loan_amount)
            .ok()
            .filter(|amount| self.policy.amount_in_range(*amount))
            .ok_or(DecisionError::InvalidLoanAmount)?;

        let period = u32::try_from(request.loan_period)
            .ok()
            .filter(|period| self.policy.period_in_range(*period))
            .ok_or(DecisionError::InvalidLoanPeriod)?;

        Ok(ValidatedRequest { code, period })
    }

    /// Walk periods upward from the requested one; at each period take the largest amount
    /// whose score clears the threshold. The first period with any such amount wins.
    fn search(&self, modifier: u32, requested_period: u32) -> Result<Decision, DecisionError> {
        let policy = &self.policy;
        for period in requested_period..=policy.maximum_loan_period {
            let best = policy
                .amounts_descending()
                .find(|amount| credit_score(modifier, *amount, period) >= policy.approval_threshold);

            if let Some(amount) = best {
                return Ok(Decision {
                    loan_amount: amount,
                    loan_period: period,
                });
            }
        }
        Err(DecisionError::NoValidLoan)
    }
}
