use crate::calendar::Date;
use crate::currency::Amount;
use crate::errors::{FormatError, LoadError, ValidationError};
use crate::transactions::{
    BimonthlyTransaction, IntervalTransaction, MonthlyTransaction, OnceTransaction, Registry,
    TransactionKind,
};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Every record is a separator followed by these five tokens: type tag,
/// count, start date, amount and description.
const RECORD_TOKENS: usize = 6;

/// A fully loaded projection request: the report range and every
/// transaction to project over it.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub begin: Date,
    pub end: Date,
    pub registry: Registry,
}

/// One record as read from the input, before it is sorted into the registry.
struct Record<'a> {
    kind: TransactionKind,
    interval_days: Option<u32>,
    start: Date,
    amount: Amount,
    description: &'a str,
}

impl<'a> Record<'a> {
    fn parse(tokens: &[&'a str]) -> Result<Self, FormatError> {
        // tokens[0] is the separator; only its presence matters.
        let kind: TransactionKind = tokens[1].parse()?;
        let interval_days = match kind {
            TransactionKind::Interval => Some(parse_interval_days(tokens[2])?),
            _ => None,
        };

        Ok(Record {
            kind,
            interval_days,
            start: tokens[3].parse()?,
            amount: tokens[4].parse()?,
            description: tokens[5],
        })
    }
}

/// Parses an interval day count: one or more ASCII digits and nothing else.
pub fn parse_interval_days(token: &str) -> Result<u32, FormatError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::Integer(token.to_string()));
    }

    token
        .parse()
        .map_err(|_| FormatError::Integer(token.to_string()))
}

impl Plan {
    /// Adds a parsed record to the registry, enforcing that repeating
    /// transactions never start before the report begins.
    fn insert(&mut self, record: Record<'_>) -> Result<(), LoadError> {
        let description = record.description.to_string();

        if record.kind != TransactionKind::Once && record.start < self.begin {
            return Err(ValidationError::StartBeforeBegin {
                description,
                start: record.start.token(),
                begin: self.begin.token(),
            }
            .into());
        }

        match record.kind {
            TransactionKind::Once => self.registry.once.push(OnceTransaction {
                date: record.start,
                amount: record.amount,
                description,
            }),
            TransactionKind::Interval => {
                let interval_days = record.interval_days.unwrap_or_default();
                if interval_days == 0 {
                    return Err(ValidationError::ZeroInterval(description).into());
                }
                self.registry.interval.push(IntervalTransaction::new(
                    record.start,
                    interval_days,
                    record.amount,
                    description,
                ));
            }
            TransactionKind::Monthly => self.registry.monthly.push(MonthlyTransaction::new(
                record.start,
                record.amount,
                description,
            )),
            TransactionKind::Bimonthly => {
                self.registry.bimonthly.push(BimonthlyTransaction::new(
                    record.start,
                    record.amount,
                    description,
                ))
            }
        }

        Ok(())
    }
}

impl FromStr for Plan {
    type Err = LoadError;

    /// Reads the begin and end dates followed by as many complete records as
    /// the input holds. A trailing partial record ends the input; any
    /// malformed token or invalid record aborts the whole load.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut tokens = input.split_whitespace();

        let begin: Date = tokens
            .next()
            .ok_or(FormatError::MissingHeader("begin"))?
            .parse()?;
        let end: Date = tokens
            .next()
            .ok_or(FormatError::MissingHeader("end"))?
            .parse()?;
        info!("report range {} through {}", begin, end);

        if end <= begin {
            return Err(ValidationError::EmptyRange {
                begin: begin.token(),
                end: end.token(),
            }
            .into());
        }

        let mut plan = Plan {
            begin,
            end,
            registry: Registry::default(),
        };

        loop {
            let record: Vec<&str> = tokens.by_ref().take(RECORD_TOKENS).collect();
            if record.len() < RECORD_TOKENS {
                if !record.is_empty() {
                    debug!("ignoring {} trailing token(s): {:?}", record.len(), record);
                }
                break;
            }

            plan.insert(Record::parse(&record)?)?;
        }

        info!(
            once = plan.registry.once.len(),
            interval = plan.registry.interval.len(),
            monthly = plan.registry.monthly.len(),
            bimonthly = plan.registry.bimonthly.len(),
            "loaded {} transaction(s)",
            plan.registry.len()
        );

        Ok(plan)
    }
}

impl TryFrom<PathBuf> for Plan {
    type Error = LoadError;

    /// Reads and parses the input file at `path`.
    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        let input = match fs::read_to_string(&path) {
            Ok(input) => input,
            Err(source) => return Err(LoadError::Io { path, source }),
        };

        input.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(month: u8, day: u8, year: u16) -> Date {
        Date::new(month, day, year).unwrap()
    }

    const SAMPLE: &str = "09.19.2002
01.01.2004
,
Once
x
09.23.2002
1637.29
CurrentBalance9.23.2002
,
Monthly
x
09.25.2002
-35.00
FastLane
,
Interval
180
10.01.2002
-80.00
CarServiceB
";

    #[test]
    fn should_load_every_kind_of_record() {
        let plan: Plan = SAMPLE.parse().unwrap();

        assert_eq!(plan.begin, date(9, 19, 2002));
        assert_eq!(plan.end, date(1, 1, 2004));
        assert_eq!(
            plan.registry.once,
            vec![OnceTransaction {
                date: date(9, 23, 2002),
                amount: Amount::from_cents(163_729),
                description: "CurrentBalance9.23.2002".to_string(),
            }]
        );
        assert_eq!(
            plan.registry.monthly,
            vec![MonthlyTransaction::new(
                date(9, 25, 2002),
                Amount::from_cents(-3_500),
                "FastLane".to_string()
            )]
        );
        assert_eq!(
            plan.registry.interval,
            vec![IntervalTransaction::new(
                date(10, 1, 2002),
                180,
                Amount::from_cents(-8_000),
                "CarServiceB".to_string()
            )]
        );
        assert!(plan.registry.bimonthly.is_empty());
    }

    #[test]
    fn should_accept_records_on_a_single_line() {
        let plan: Plan = "01.01.2020 06.01.2020 , Bimonthly x 01.01.2020 1200.00 Paycheck"
            .parse()
            .unwrap();

        assert_eq!(plan.registry.bimonthly.len(), 1);
        assert_eq!(plan.registry.bimonthly[0].description, "Paycheck");
    }

    #[test]
    fn should_ignore_a_trailing_partial_record() {
        let plan: Plan = "01.01.2020 06.01.2020 , Once x 01.02.2020 5.00 Lunch , Monthly x"
            .parse()
            .unwrap();

        assert_eq!(plan.registry.len(), 1);
    }

    #[test]
    fn should_load_a_header_without_records() {
        let plan: Plan = "01.01.2020 06.01.2020".parse().unwrap();
        assert!(plan.registry.is_empty());
    }

    #[test]
    fn should_allow_once_before_begin() {
        let plan: Plan = "01.01.2020 06.01.2020 , Once x 12.25.2019 5.00 Past"
            .parse()
            .unwrap();
        assert_eq!(plan.registry.once.len(), 1);
    }

    #[test]
    fn should_reject_repeating_starts_before_begin() {
        for kind in ["Interval", "Monthly", "Bimonthly"] {
            let input = format!("01.02.2020 06.01.2020 , {} 30 01.01.2020 5.00 Early", kind);
            match input.parse::<Plan>() {
                Err(LoadError::Validation(ValidationError::StartBeforeBegin {
                    description,
                    start,
                    begin,
                })) => {
                    assert_eq!(description, "Early");
                    assert_eq!(start, "01.01.2020");
                    assert_eq!(begin, "01.02.2020");
                }
                other => panic!("{}: unexpected result {:?}", kind, other),
            }
        }
    }

    #[test]
    fn should_accept_repeating_starts_on_begin() {
        let plan: Plan = "01.02.2020 06.01.2020 , Monthly x 01.02.2020 5.00 OnTime"
            .parse()
            .unwrap();
        assert_eq!(plan.registry.monthly.len(), 1);
    }

    #[test]
    fn should_abort_on_a_malformed_date() {
        let result = "01.01.2020 06.01.2020 , Once x 01.05.2020 5.00 Fine , Once x 13.99.abcd 5.00 Bad"
            .parse::<Plan>();

        assert!(matches!(
            result,
            Err(LoadError::Format(FormatError::Date(token))) if token == "13.99.abcd"
        ));
    }

    #[test]
    fn should_abort_on_a_malformed_amount() {
        let result = "01.01.2020 06.01.2020 , Once x 01.05.2020 12.345 Bad".parse::<Plan>();

        assert!(matches!(
            result,
            Err(LoadError::Format(FormatError::Amount(token))) if token == "12.345"
        ));
    }

    #[test]
    fn should_abort_on_an_unknown_type_tag() {
        let result = "01.01.2020 06.01.2020 , Weekly x 01.05.2020 1.00 Bad".parse::<Plan>();

        assert!(matches!(
            result,
            Err(LoadError::Format(FormatError::TypeTag(tag))) if tag == "Weekly"
        ));
    }

    #[test]
    fn should_abort_on_a_malformed_interval() {
        let result = "01.01.2020 06.01.2020 , Interval 1x 01.05.2020 1.00 Bad".parse::<Plan>();
        assert!(matches!(
            result,
            Err(LoadError::Format(FormatError::Integer(token))) if token == "1x"
        ));

        let result = "01.01.2020 06.01.2020 , Interval 0 01.05.2020 1.00 Never".parse::<Plan>();
        assert!(matches!(
            result,
            Err(LoadError::Validation(ValidationError::ZeroInterval(_)))
        ));
    }

    #[test]
    fn should_ignore_the_count_for_non_interval_records() {
        let plan: Plan = "01.01.2020 06.01.2020 , Monthly anything 01.05.2020 1.00 Gym"
            .parse()
            .unwrap();
        assert_eq!(plan.registry.monthly.len(), 1);
    }

    #[test]
    fn should_reject_a_missing_or_malformed_header() {
        assert!(matches!(
            "".parse::<Plan>(),
            Err(LoadError::Format(FormatError::MissingHeader("begin")))
        ));
        assert!(matches!(
            "01.01.2020".parse::<Plan>(),
            Err(LoadError::Format(FormatError::MissingHeader("end")))
        ));
        assert!(matches!(
            "01.01.2020 2020-06-01".parse::<Plan>(),
            Err(LoadError::Format(FormatError::Date(_)))
        ));
    }

    #[test]
    fn should_reject_an_empty_report_range() {
        assert!(matches!(
            "01.01.2020 01.01.2020".parse::<Plan>(),
            Err(LoadError::Validation(ValidationError::EmptyRange { .. }))
        ));
        assert!(matches!(
            "02.01.2020 01.01.2020".parse::<Plan>(),
            Err(LoadError::Validation(ValidationError::EmptyRange { .. }))
        ));
    }

    #[test]
    fn should_parse_interval_days() {
        assert_eq!(parse_interval_days("180"), Ok(180));
        assert_eq!(parse_interval_days("007"), Ok(7));
        assert!(parse_interval_days("").is_err());
        assert!(parse_interval_days("-5").is_err());
        assert!(parse_interval_days("99999999999").is_err());
    }

    #[test]
    fn should_load_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let plan = Plan::try_from(file.path().to_path_buf()).unwrap();
        assert_eq!(plan.registry.len(), 3);
    }

    #[test]
    fn should_report_missing_files() {
        let path = PathBuf::from("does/not/exist/BillMakerList.txt");
        match Plan::try_from(path.clone()) {
            Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
