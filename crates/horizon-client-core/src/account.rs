use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("balance must not be empty")]
    Empty,
    #[error("balance is not a number: {0}")]
    NotNumeric(String),
    #[error("balance is out of range")]
    OutOfRange,
}

/// Account balance held as whole cents.
///
/// The account endpoint may send the amount as a JSON number (`38.7`) or as
/// a decimal string (`"38.70"`); both land here rounded to the nearest cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "RawBalance")]
pub struct Balance {
    cents: i64,
}

impl Balance {
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    pub fn from_amount(amount: f64) -> Result<Self, BalanceError> {
        if !amount.is_finite() {
            return Err(BalanceError::OutOfRange);
        }
        let cents = (amount * 100.0).round();
        if cents >= i64::MAX as f64 || cents <= i64::MIN as f64 {
            return Err(BalanceError::OutOfRange);
        }
        Ok(Self {
            cents: cents as i64,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, BalanceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BalanceError::Empty);
        }
        let amount = trimmed
            .parse::<f64>()
            .map_err(|_| BalanceError::NotNumeric(trimmed.to_string()))?;
        Self::from_amount(amount)
    }
}

// Renders like the storefront always has: "$" followed by the amount with two
// decimals, sign after the currency symbol ("$-5.00").
impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "${sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBalance {
    Amount(f64),
    Text(String),
}

impl TryFrom<RawBalance> for Balance {
    type Error = BalanceError;

    fn try_from(raw: RawBalance) -> Result<Self, Self::Error> {
        match raw {
            RawBalance::Amount(amount) => Self::from_amount(amount),
            RawBalance::Text(text) => Self::parse(&text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub username: String,
    pub balance: Balance,
    #[serde(rename = "isSeller", alias = "is_seller", default)]
    pub is_seller: bool,
}
