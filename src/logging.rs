#![cfg(feature = "std")]
//! Stderr logger for the binaries. The board is drawn on stdout, so log lines stay apart.

use log::{LevelFilter, Log, Metadata, Record};
use std::env;
use std::io::Write;

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
const LOG_ENV: &str = "SEABATTLE_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "{:>5} {:<6} {}",
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// `seabattle::ai` becomes `ai`; targets from other crates are kept whole.
fn short_target(target: &str) -> &str {
    target.strip_prefix("seabattle::").unwrap_or(target)
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at the level named by `SEABATTLE_LOG` (default `info`).
/// Calling it again is harmless.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
