use crate::errors::FormatError;
use std::fmt;
use std::str::FromStr;

const CENTS_PER_DOLLAR: i64 = 100;

/// A signed amount of money held as a whole number of cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Sum of two amounts, or `None` if it doesn't fit in i64 cents.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = FormatError;

    /// Parses `-?D+.CC`: an optional minus sign, at least one dollar digit, a
    /// dot and exactly two cent digits.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::Amount(token.to_string());

        let (negative, unsigned) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (dollars, cents) = unsigned.split_once('.').ok_or_else(invalid)?;

        if dollars.is_empty() || !dollars.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let dollars: i64 = dollars.parse().map_err(|_| invalid())?;
        let cents: i64 = cents.parse().map_err(|_| invalid())?;
        let magnitude = dollars
            .checked_mul(CENTS_PER_DOLLAR)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Amount(if negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_dollar = CENTS_PER_DOLLAR.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            magnitude / per_dollar,
            magnitude % per_dollar
        )
    }
}
