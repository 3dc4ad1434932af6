use serde::{Deserialize, Serialize};

use super::policy::Country;

/// Loan application as received from the caller. Nothing is trusted until the engine has
/// validated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub personal_code: String,
    pub loan_amount: i64,
    pub loan_period: i64,
}

impl LoanRequest {
    pub fn new(personal_code: impl Into<String>, loan_amount: i64, loan_period: i64) -> Self {
        Self {
            personal_code: personal_code.into(),
            loan_amount,
            loan_period,
        }
    }
}

/// Approved offer: the largest amount available at the shortest qualifying period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub loan_amount: u32,
    pub loan_period: u32,
}

/// Age policy failures. Both surface to the caller as an invalid age.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeViolation {
    #[error("Applicant is under the minimum age.")]
    UnderMinimum { age: i32, minimum: u32 },
    #[error("Applicant exceeds maximum eligible age.")]
    AboveMaximum {
        age: i32,
        maximum: i32,
        country: Country,
    },
}

/// Closed set of reasons a request does not produce an offer, listed in the order the
/// engine checks them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("Invalid personal ID code!")]
    InvalidPersonalCode,
    #[error(transparent)]
    InvalidAge(#[from] AgeViolation),
    #[error("Invalid loan amount!")]
    InvalidLoanAmount,
    #[error("Invalid loan period!")]
    InvalidLoanPeriod,
    #[error("No valid loan found!")]
    NoValidLoan,
    #[error("unexpected decision failure: {0}")]
    Unexpected(String),
}

/// Response class a boundary layer should use for a [`DecisionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

impl DecisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecisionError::InvalidPersonalCode
            | DecisionError::InvalidAge(_)
            | DecisionError::InvalidLoanAmount
            | DecisionError::InvalidLoanPeriod => ErrorKind::BadRequest,
            DecisionError::NoValidLoan => ErrorKind::NotFound,
            DecisionError::Unexpected(_) => ErrorKind::Internal,
        }
    }
}
