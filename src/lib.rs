//! Projects a running bank balance over a date range from a list of one-time
//! and recurring transactions, producing a day-ordered CSV ledger.

pub mod args;
pub mod calendar;
pub mod currency;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod logging;
pub mod statement;
pub mod transactions;
