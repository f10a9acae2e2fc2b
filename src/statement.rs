use crate::engine::{LedgerEntry, LedgerSink};
use crate::errors::StatementError;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// A ledger line as written to the output file:
/// `balance,amount,M-D-Y,description`.
#[derive(Debug, Serialize)]
struct StatementRecord<'a> {
    balance: String,
    amount: String,
    date: String,
    description: &'a str,
}

impl<'a> From<&'a LedgerEntry> for StatementRecord<'a> {
    fn from(entry: &'a LedgerEntry) -> Self {
        Self {
            balance: entry.balance.to_string(),
            amount: entry.amount.to_string(),
            date: entry.date.to_string(),
            description: &entry.description,
        }
    }
}

/// Writes ledger entries as header-less CSV lines.
pub struct StatementWriter<W: io::Write> {
    writer: csv::Writer<W>,
    records: usize,
}

impl StatementWriter<File> {
    /// Creates, or truncates, the ledger file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StatementError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| StatementError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(file))
    }
}

impl<W: io::Write> StatementWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);

        Self { writer, records: 0 }
    }

    /// Number of records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flushes everything written and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W, StatementError> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|err| StatementError::Flush(err.into_error()))
    }
}

impl<W: io::Write> LedgerSink for StatementWriter<W> {
    type Error = StatementError;

    fn record(&mut self, entry: &LedgerEntry) -> Result<(), Self::Error> {
        self.writer.serialize(StatementRecord::from(entry))?;
        self.records += 1;
        Ok(())
    }
}
