use bill_projector::args::Args;
use bill_projector::loader::Plan;
use bill_projector::logging;
use bill_projector::statement::StatementWriter;
use std::process;
use tracing::info;

fn main() {
    let args = Args::parse();
    logging::init(args.verbosity);

    let plan = match Plan::try_from(args.input) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("failed to process input file: {}", err);
            process::exit(1);
        }
    };

    let mut writer = match StatementWriter::create(&args.output) {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("failed to generate output report: {}", err);
            process::exit(1);
        }
    };

    let balance = match plan.project(&mut writer) {
        Ok(balance) => balance,
        Err(err) => {
            eprintln!("failed to generate output report: {}", err);
            process::exit(1);
        }
    };

    let records = writer.records();
    if let Err(err) = writer.finish() {
        eprintln!("failed to generate output report: {}", err);
        process::exit(1);
    }
    info!("wrote {} ledger line(s) to {}", records, args.output.display());

    println!("End balance: {}", balance);
}
