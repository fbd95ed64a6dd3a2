//! Stderr logger for command line tools.
//!
//! Records are printed as `[elapsed LEVEL target] message`. Install it once
//! at startup with `init_with_level`; library code only talks to `log`.
//! Debug output is meant for this workspace: records from other crates are
//! capped at `info` whatever level is requested.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_TARGET_PREFIX: &str = "docscan";
const FOREIGN_MAX_LEVEL: LevelFilter = LevelFilter::Info;

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    fn level_for(&self, target: &str) -> LevelFilter {
        if target.starts_with(OWN_TARGET_PREFIX) {
            self.level
        } else {
            self.level.min(FOREIGN_MAX_LEVEL)
        }
    }
}

fn format_record(
    elapsed: f64,
    level: log::Level,
    target: &str,
    message: &std::fmt::Arguments<'_>,
) -> String {
    let target = target.split("::").last().unwrap_or(target);
    format!("[{elapsed:7.3}s {level:>5} {target}] {message}")
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_record(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Level for a command line `--verbose` switch: every polar line is logged
/// at `debug`, the run summary at `info`.
pub fn verbosity_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the stderr logger with the provided level filter.
///
/// The first call wins; later calls keep the installed logger and level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(logger.level);
    Ok(())
}

/// `EnvFilter` directives used when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
fn default_directives(level: LevelFilter) -> String {
    let own = level.to_string().to_lowercase();
    let foreign = level.min(FOREIGN_MAX_LEVEL).to_string().to_lowercase();
    format!("{foreign},{OWN_TARGET_PREFIX}_geometry={own},{OWN_TARGET_PREFIX}_cli={own}")
}

/// Install a `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` applies to the docscan
/// crates the same way it does for [`init_with_level`].
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
