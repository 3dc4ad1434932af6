//! Loan decision engine: personal-code validation, age policy, credit modifier resolution,
//! and the greedy (period, amount) approval search.

mod engine;
mod outcome;
pub mod personal_code;
pub mod policy;
pub mod router;

#[cfg(test)]
mod tests;

pub use engine::{credit_score, DecisionEngine};
pub use outcome::{AgeViolation, Decision, DecisionError, ErrorKind, LoanRequest};
pub use personal_code::{approximate_age, PersonalCode, PersonalCodeError};
pub use policy::{
    Country, CountryBand, CreditBand, CreditModifier, PolicyConstants, PolicyError,
};
pub use router::{decision_router, DecisionResponse, UNEXPECTED_ERROR_MESSAGE};
