use crate::errors::FormatError;
use std::fmt;
use std::str::FromStr;

/// Days per month, January first. February is 0 here: its length comes from
/// the leap rule when advancing, and bimonthly schedules read the 0 as "no
/// last day".
const MONTH_LENGTHS: [u8; 12] = [31, 0, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Bimonthly transactions fire on this day and on the last day of the month.
pub const MID_MONTH_DAY: u8 = 15;

/// A calendar day. Fields are ordered so that the derived ordering compares
/// year, then month, then day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// Builds a date, rejecting a month outside 1..=12 or a day outside 1..=31.
    pub fn new(month: u8, day: u8, year: u16) -> Result<Self, FormatError> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(FormatError::DateOutOfRange(format!(
                "{:02}.{:02}.{:04}",
                month, day, year
            )));
        }

        Ok(Self { year, month, day })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Returns the calendar day following this one.
    ///
    /// February has 29 days whenever [`is_leap_year`] says so and 28
    /// otherwise. Every other month rolls over at its table length, and
    /// December rolls into January of the following year.
    pub fn advance(self) -> Self {
        let Date {
            mut year,
            mut month,
            mut day,
        } = self;

        day += 1;
        let length = if month == 2 {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        } else {
            MONTH_LENGTHS[usize::from(month - 1)]
        };

        if day > length {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }

        Self { year, month, day }
    }

    /// Renders the date in the `MM.DD.YYYY` input format.
    pub fn token(&self) -> String {
        format!("{:02}.{:02}.{:04}", self.month, self.day, self.year)
    }
}

/// Leap years are counted every fourth year from 2000, with no century
/// exception: 2100 is a leap year, 2001 is not.
pub fn is_leap_year(year: u16) -> bool {
    (i32::from(year) - 2000) % 4 == 0
}

/// Last day of `month` as used by bimonthly schedules. February yields 0.
pub fn last_day_of_month(month: u8) -> u8 {
    match month {
        1..=12 => MONTH_LENGTHS[usize::from(month - 1)],
        _ => 0,
    }
}

impl fmt::Display for Date {
    /// Ledger form, `M-D-Y` without padding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.month, self.day, self.year)
    }
}

impl FromStr for Date {
    type Err = FormatError;

    /// Parses a strict `MM.DD.YYYY` token.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bytes = token.as_bytes();
        if bytes.len() != 10 {
            return Err(FormatError::Date(token.to_string()));
        }

        let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        });
        if !well_formed {
            return Err(FormatError::Date(token.to_string()));
        }

        let digits = |range: std::ops::Range<usize>| {
            bytes[range]
                .iter()
                .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
        };

        // Two digit fields are at most 99, so the narrowing is lossless.
        Date::new(digits(0..2) as u8, digits(3..5) as u8, digits(6..10))
    }
}
