use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "BillMakerList.txt";
pub const DEFAULT_OUTPUT: &str = "Bills.csv";

#[derive(Debug, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbosity: u64,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(Self::app().get_matches())
    }

    /// Parses an explicit argument list, program name first.
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(Self::app().get_matches_from_safe(args)?))
    }

    fn app() -> App<'static, 'static> {
        App::new("bill_projector")
            .version("0.1.0")
            .about("Projects a running balance over recurring and one-time bills")
            .arg(Arg::with_name("input")
                .takes_value(true).default_value(DEFAULT_INPUT)
                .help("path of the transaction list to read from"))
            .arg(Arg::with_name("output")
                .short("o").long("output").takes_value(true).default_value(DEFAULT_OUTPUT)
                .help("path of the CSV ledger to write, overwritten on each run"))
            .arg(Arg::with_name("verbose")
                .short("v").long("verbose").multiple(true)
                .help("log more detail to stderr, repeat for more"))
    }

    fn from_matches(matches: clap::ArgMatches<'_>) -> Self {
        Self {
            input: PathBuf::from(matches.value_of("input").unwrap_or(DEFAULT_INPUT)),
            output: PathBuf::from(matches.value_of("output").unwrap_or(DEFAULT_OUTPUT)),
            verbosity: matches.occurrences_of("verbose"),
        }
    }
}
