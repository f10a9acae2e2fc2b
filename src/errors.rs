use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A token in the input file does not have the expected shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("couldn't read the date '{0}', use format mm.dd.yyyy")]
    Date(String),

    #[error("date '{0}' has a month or day out of range")]
    DateOutOfRange(String),

    #[error("couldn't use amount '{0}', not in the dollar/cent format d.cc, dd.cc, ddd.cc, etc.")]
    Amount(String),

    #[error("number '{0}' contains non-number characters")]
    Integer(String),

    #[error("unknown transaction type '{0}', expected Once, Interval, Monthly or Bimonthly")]
    TypeTag(String),

    #[error("input is missing the report {0} date")]
    MissingHeader(&'static str),
}

/// The input is well formed but cannot be projected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "start date {start} of '{description}' occurs before report begin date {begin}, \
         please make it on or after the report begin date"
    )]
    StartBeforeBegin {
        description: String,
        start: String,
        begin: String,
    },

    #[error("report end date {end} must come after begin date {begin}")]
    EmptyRange { begin: String, end: String },

    #[error("interval of '{0}' must be at least one day")]
    ZeroInterval(String),
}

/// Any failure that aborts loading a plan. No partial plan survives one.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read data file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Writing the ledger failed.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("failed to open ledger output {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write ledger record: {0}")]
    Serialize(#[from] csv::Error),

    #[error("failed to flush ledger output: {0}")]
    Flush(#[from] io::Error),
}

/// A projection stopped before reaching the end date.
#[derive(Debug, Error)]
pub enum ProjectionError<E> {
    #[error("running balance {balance} overflowed applying {amount} for '{description}' on {date}")]
    Overflow {
        balance: String,
        amount: String,
        description: String,
        date: String,
    },

    #[error("{0}")]
    Sink(E),
}
