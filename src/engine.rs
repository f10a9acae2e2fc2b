use crate::calendar::Date;
use crate::currency::Amount;
use crate::errors::ProjectionError;
use crate::loader::Plan;
use crate::transactions::{Registry, Scheduled};
use std::convert::Infallible;
use tracing::{debug, info};

/// One firing of a transaction, with the balance it left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub balance: Amount,
    pub amount: Amount,
    pub date: Date,
    pub description: String,
}

/// Destination for ledger entries, in the order they fire.
pub trait LedgerSink {
    type Error;

    fn record(&mut self, entry: &LedgerEntry) -> Result<(), Self::Error>;
}

impl LedgerSink for Vec<LedgerEntry> {
    type Error = Infallible;

    fn record(&mut self, entry: &LedgerEntry) -> Result<(), Self::Error> {
        self.push(entry.clone());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Done,
}

/// Walks the calendar from the begin date, one day per tick, and reports
/// `Done` as soon as a tick reaches the end date. The end date itself is
/// therefore never handed out as a day to evaluate. An end date the calendar
/// never produces, such as `02.30`, stops the clock on the first day past it.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    current: Date,
    end: Date,
}

impl SimulationClock {
    pub fn new(begin: Date, end: Date) -> Self {
        Self {
            current: begin,
            end,
        }
    }

    /// The day currently being evaluated.
    pub fn today(&self) -> Date {
        self.current
    }

    pub fn tick(&mut self) -> ClockState {
        self.current = self.current.advance();
        if self.current >= self.end {
            ClockState::Done
        } else {
            ClockState::Running
        }
    }
}

/// Runs the day-by-day projection of a registry over a report range.
///
/// Each day the once, interval, monthly and bimonthly collections are checked
/// in that order. Within a collection the most recently declared transaction
/// is checked first. Every firing adds its amount to the running balance and
/// is handed to the sink together with the new balance.
pub struct Simulator {
    clock: SimulationClock,
    registry: Registry,
    balance: Amount,
}

impl Simulator {
    /// The registry's scheduling state is taken as is, so it should be fresh.
    pub fn new(begin: Date, end: Date, registry: Registry) -> Self {
        Self {
            clock: SimulationClock::new(begin, end),
            registry,
            balance: Amount::ZERO,
        }
    }

    /// Runs until the clock reaches the end date and returns the final
    /// balance. A sink error or a balance overflow stops the run immediately.
    pub fn run<S: LedgerSink>(
        &mut self,
        sink: &mut S,
    ) -> Result<Amount, ProjectionError<S::Error>> {
        loop {
            let today = self.clock.today();
            let Registry {
                once,
                interval,
                monthly,
                bimonthly,
            } = &mut self.registry;

            fire_all(once, today, &mut self.balance, sink)?;
            fire_all(interval, today, &mut self.balance, sink)?;
            fire_all(monthly, today, &mut self.balance, sink)?;
            fire_all(bimonthly, today, &mut self.balance, sink)?;

            if self.clock.tick() == ClockState::Done {
                break;
            }
        }

        info!("end balance {}", self.balance);
        Ok(self.balance)
    }
}

fn fire_all<T: Scheduled, S: LedgerSink>(
    transactions: &mut [T],
    today: Date,
    balance: &mut Amount,
    sink: &mut S,
) -> Result<(), ProjectionError<S::Error>> {
    for transaction in transactions.iter_mut().rev() {
        if !transaction.fires_on(today) {
            continue;
        }

        let next = balance
            .checked_add(transaction.amount())
            .ok_or_else(|| ProjectionError::Overflow {
                balance: balance.to_string(),
                amount: transaction.amount().to_string(),
                description: transaction.description().to_string(),
                date: today.to_string(),
            })?;
        *balance = next;
        debug!(
            "{} {} {} -> {}",
            today,
            transaction.description(),
            transaction.amount(),
            balance
        );
        sink.record(&LedgerEntry {
            balance: *balance,
            amount: transaction.amount(),
            date: today,
            description: transaction.description().to_string(),
        })
        .map_err(ProjectionError::Sink)?;
    }

    Ok(())
}

impl Plan {
    /// Projects the plan into `sink` and returns the final balance.
    ///
    /// Works on a copy of the registry, so the same plan always projects to
    /// the same ledger.
    pub fn project<S: LedgerSink>(
        &self,
        sink: &mut S,
    ) -> Result<Amount, ProjectionError<S::Error>> {
        Simulator::new(self.begin, self.end, self.registry.clone()).run(sink)
    }

    /// Projects the plan into memory.
    pub fn ledger(&self) -> Result<(Vec<LedgerEntry>, Amount), ProjectionError<Infallible>> {
        let mut entries = Vec::new();
        let balance = self.project(&mut entries)?;
        Ok((entries, balance))
    }
}
