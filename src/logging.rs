//! File logging for interactive sessions.
//!
//! The panel owns the terminal while it runs, so log lines go to a file
//! through a non-blocking writer instead of stderr.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub const DEFAULT_LOG_FILE: &str = "fieldkit.log";

/// Environment variable that overrides the level filter entirely.
pub const LOG_ENV: &str = "FIELDKIT_LOG";

/// Directive used when neither `FIELDKIT_LOG` nor `--log-level` is set.
fn level_directive(level: Option<&str>) -> String {
    format!("fieldkit={}", level.unwrap_or("info"))
}

/// Install the global subscriber writing to `log_path`.
///
/// Hold the returned guard until exit; dropping it flushes pending lines.
/// Debug builds also record span enter/close events.
pub fn init_logging(log_path: Option<&Path>, level: Option<&str>) -> WorkerGuard {
    let log_path = log_path.unwrap_or(Path::new(DEFAULT_LOG_FILE));
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new("fieldkit=info"));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    #[cfg(debug_assertions)]
    let layer = layer.with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE);

    tracing_subscriber::registry().with(filter).with(layer).init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_scopes_level_to_crate() {
        assert_eq!(level_directive(None), "fieldkit=info");
        assert_eq!(level_directive(Some("trace")), "fieldkit=trace");
    }
}
