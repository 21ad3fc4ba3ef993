use crate::types::errors::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DECIMAL_PLACES: u32 = 2;

/// Exclusive upper bound of the `DECIMAL(18, 2)` column (16 integer digits).
const INTEGER_DIGITS: u32 = 16;

/// A non-negative monetary amount held at a fixed scale of two fractional digits.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub fn zero() -> Self {
        let mut value = Decimal::ZERO;
        value.rescale(DECIMAL_PLACES);
        Amount(value)
    }

    /// Parses a raw amount, degrading anything unusable to `0.00`.
    ///
    /// Row coverage matters more than a single bad amount, so this never fails.
    pub fn parse_or_zero(value: Option<&str>) -> Self {
        value
            .and_then(|value| Amount::from_str(value).ok())
            .unwrap_or_else(Amount::zero)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::Empty);
        }

        let parsed = Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .map_err(|error| AmountError::InvalidFormat(format!("Value [{value}] is not a number: {error}")))?;

        if parsed < Decimal::ZERO {
            return Err(AmountError::Negative(value.to_string()));
        }

        let mut rounded = parsed.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(DECIMAL_PLACES);

        if rounded >= Decimal::from(10i64.pow(INTEGER_DIGITS)) {
            return Err(AmountError::OutOfRange(value.to_string()));
        }

        Ok(Amount(rounded))
    }
}
