use std::env;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

fn level_for(verbosity: u64) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Everything else stays at warn; only this crate is raised by `-v`.
fn default_directives(verbosity: u64) -> String {
    format!("warn,bill_projector={}", level_for(verbosity))
}

/// Installs the global stderr subscriber. A non-empty `RUST_LOG` replaces the
/// directives picked by `verbosity`. Later calls are no-ops.
pub fn init(verbosity: u64) {
    TRACING_INIT.call_once(|| {
        let filter = match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
            _ => EnvFilter::new(default_directives(verbosity)),
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
