use crate::calendar::{last_day_of_month, Date, MID_MONTH_DAY};
use crate::currency::Amount;
use crate::errors::FormatError;
use std::str::FromStr;

/// The type tag that opens each record of the input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    /// Fires once, on its date.
    Once,

    /// Fires on its start date and every `n` days after it.
    Interval,

    /// Fires every month on the day-of-month it started on. Months too short
    /// to have that day are skipped.
    Monthly,

    /// Fires on the 15th and on the last day of every month once started.
    Bimonthly,
}

impl FromStr for TransactionKind {
    type Err = FormatError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Once" => Ok(TransactionKind::Once),
            "Interval" => Ok(TransactionKind::Interval),
            "Monthly" => Ok(TransactionKind::Monthly),
            "Bimonthly" => Ok(TransactionKind::Bimonthly),
            other => Err(FormatError::TypeTag(other.to_string())),
        }
    }
}

/// Something the simulator can ask, once per simulated day, whether it fires.
pub trait Scheduled {
    /// Advances any scheduling state for `today` and reports whether the
    /// transaction fires on it. Must be called for every simulated day in
    /// order.
    fn fires_on(&mut self, today: Date) -> bool;

    fn amount(&self) -> Amount;

    fn description(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq)]
pub struct OnceTransaction {
    pub date: Date,
    pub amount: Amount,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTransaction {
    pub start: Date,
    pub interval_days: u32,
    pub amount: Amount,
    pub description: String,
    started: bool,
    counter: u32,
}

impl IntervalTransaction {
    pub fn new(start: Date, interval_days: u32, amount: Amount, description: String) -> Self {
        Self {
            start,
            interval_days,
            amount,
            description,
            started: false,
            counter: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyTransaction {
    pub start: Date,
    pub amount: Amount,
    pub description: String,
    started: bool,
}

impl MonthlyTransaction {
    pub fn new(start: Date, amount: Amount, description: String) -> Self {
        Self {
            start,
            amount,
            description,
            started: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BimonthlyTransaction {
    pub start: Date,
    pub amount: Amount,
    pub description: String,
    started: bool,
}

impl BimonthlyTransaction {
    pub fn new(start: Date, amount: Amount, description: String) -> Self {
        Self {
            start,
            amount,
            description,
            started: false,
        }
    }
}

impl Scheduled for OnceTransaction {
    fn fires_on(&mut self, today: Date) -> bool {
        today == self.date
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Scheduled for IntervalTransaction {
    /// Meeting the start date (re)starts the cycle with the counter at zero.
    /// While started, the transaction fires whenever the counter is zero and
    /// the counter wraps back to zero after `interval_days` days.
    fn fires_on(&mut self, today: Date) -> bool {
        if today == self.start {
            self.started = true;
            self.counter = 0;
        }
        if !self.started {
            return false;
        }

        let fires = self.counter == 0;
        self.counter += 1;
        if self.counter == self.interval_days {
            self.counter = 0;
        }
        fires
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Scheduled for MonthlyTransaction {
    fn fires_on(&mut self, today: Date) -> bool {
        if !self.started && today == self.start {
            self.started = true;
        }
        self.started && today.day() == self.start.day()
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Scheduled for BimonthlyTransaction {
    fn fires_on(&mut self, today: Date) -> bool {
        if !self.started && today == self.start {
            self.started = true;
        }
        self.started
            && (today.day() == MID_MONTH_DAY || today.day() == last_day_of_month(today.month()))
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// All loaded transactions, one collection per kind, each kept in the order
/// the records were declared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    pub once: Vec<OnceTransaction>,
    pub interval: Vec<IntervalTransaction>,
    pub monthly: Vec<MonthlyTransaction>,
    pub bimonthly: Vec<BimonthlyTransaction>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.once.len() + self.interval.len() + self.monthly.len() + self.bimonthly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
