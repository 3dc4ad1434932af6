use serde::{Deserialize, Serialize};

/// Highest segment value a personal code can carry.
pub const MAX_SEGMENT: u16 = 9999;

/// Residency inferred from the personal code segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    Estonia,
    Latvia,
    Lithuania,
}

/// Creditworthiness tier for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditModifier {
    /// Applicant carries debt and gets no offer.
    Debt,
    Score(u32),
}

/// Segments from `from` (inclusive) up to the next band's start share a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBand {
    pub from: u16,
    pub modifier: CreditModifier,
}

/// Segments from `from` (inclusive) up to the next band's start resolve to one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryBand {
    pub from: u16,
    pub country: Country,
    pub life_expectancy: u32,
}

/// Lending policy. Read-only once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConstants {
    pub minimum_loan_amount: u32,
    pub maximum_loan_amount: u32,
    pub loan_amount_step: u32,
    pub minimum_loan_period: u32,
    pub maximum_loan_period: u32,
    pub minimum_age: u32,
    pub approval_threshold: f64,
    pub credit_bands: Vec<CreditBand>,
    pub country_bands: Vec<CountryBand>,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            minimum_loan_amount: 2000,
            maximum_loan_amount: 10000,
            loan_amount_step: 100,
            minimum_loan_period: 12,
            maximum_loan_period: 60,
            minimum_age: 18,
            approval_threshold: 0.1,
            credit_bands: vec![
                CreditBand {
                    from: 0,
                    modifier: CreditModifier::Debt,
                },
                CreditBand {
                    from: 2500,
                    modifier: CreditModifier::Score(100),
                },
                CreditBand {
                    from: 5000,
                    modifier: CreditModifier::Score(300),
                },
                CreditBand {
                    from: 7500,
                    modifier: CreditModifier::Score(1000),
                },
            ],
            country_bands: vec![
                CountryBand {
                    from: 0,
                    country: Country::Estonia,
                    life_expectancy: 79,
                },
                CountryBand {
                    from: 3333,
                    country: Country::Latvia,
                    life_expectancy: 75,
                },
                CountryBand {
                    from: 6666,
                    country: Country::Lithuania,
                    life_expectancy: 76,
                },
            ],
        }
    }
}

impl PolicyConstants {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.minimum_loan_amount == 0 || self.minimum_loan_amount > self.maximum_loan_amount {
            return Err(PolicyError::AmountRange {
                minimum: self.minimum_loan_amount,
                maximum: self.maximum_loan_amount,
            });
        }
        if self.loan_amount_step == 0 {
            return Err(PolicyError::ZeroAmountStep);
        }
        if self.minimum_loan_period > self.maximum_loan_period {
            return Err(PolicyError::PeriodRange {
                minimum: self.minimum_loan_period,
                maximum: self.maximum_loan_period,
            });
        }
        if !(self.approval_threshold.is_finite() && self.approval_threshold > 0.0) {
            return Err(PolicyError::ApprovalThreshold(self.approval_threshold));
        }
        check_bands("credit", self.credit_bands.iter().map(|band| band.from))?;
        check_bands("country", self.country_bands.iter().map(|band| band.from))?;
        Ok(())
    }

    pub fn credit_modifier(&self, segment: u16) -> Option<CreditModifier> {
        self.credit_bands
            .iter()
            .rev()
            .find(|band| segment >= band.from)
            .map(|band| band.modifier)
    }

    pub fn country_band(&self, segment: u16) -> Option<&CountryBand> {
        self.country_bands
            .iter()
            .rev()
            .find(|band| segment >= band.from)
    }

    /// Oldest age that still lets the longest loan finish within the country's life expectancy.
    pub fn maximum_eligible_age(&self, band: &CountryBand) -> i32 {
        band.life_expectancy as i32 - (self.maximum_loan_period / 12) as i32
    }

    pub fn amount_in_range(&self, amount: u32) -> bool {
        (self.minimum_loan_amount..=self.maximum_loan_amount).contains(&amount)
    }

    pub fn period_in_range(&self, period: u32) -> bool {
        (self.minimum_loan_period..=self.maximum_loan_period).contains(&period)
    }

    /// Candidate amounts from the maximum down to the minimum in `loan_amount_step` strides.
    pub fn amounts_descending(&self) -> impl Iterator<Item = u32> + '_ {
        let steps = (self.maximum_loan_amount - self.minimum_loan_amount) / self.loan_amount_step;
        (0..=steps).map(move |step| self.maximum_loan_amount - step * self.loan_amount_step)
    }
}

fn check_bands(
    table: &'static str,
    mut starts: impl Iterator<Item = u16>,
) -> Result<(), PolicyError> {
    match starts.next() {
        Some(0) => {}
        _ => return Err(PolicyError::Bands { table }),
    }

    let mut previous = 0;
    for start in starts {
        if start <= previous || start > MAX_SEGMENT {
            return Err(PolicyError::Bands { table });
        }
        previous = start;
    }
    Ok(())
}

/// Inconsistent policy rejected before an engine is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("loan amount range {minimum}..={maximum} is empty or starts at zero")]
    AmountRange { minimum: u32, maximum: u32 },
    #[error("loan amount step must be positive")]
    ZeroAmountStep,
    #[error("loan period range {minimum}..={maximum} is empty")]
    PeriodRange { minimum: u32, maximum: u32 },
    #[error("approval threshold {0} must be a positive number")]
    ApprovalThreshold(f64),
    #[error("{table} bands must start at segment 0 and ascend strictly")]
    Bands { table: &'static str },
}
