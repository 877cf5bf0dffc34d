//! Diagnostic channel setup
//!
//! Diagnostics go to stderr, one event per line, prefixed with `LOG:` so
//! they can be filtered out wherever they end up mixed with data.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Prefix of every diagnostic line
pub const LOG_PREFIX: &str = "LOG:";

/// Environment variable that turns on verbose diagnostics
pub const VERBOSE_ENV: &str = "VERBOSE";

/// Event formatter producing `LOG: <LEVEL> <message> <fields>` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{} {} ", LOG_PREFIX, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Whether the `VERBOSE` value asks for verbose output
pub fn env_requests_verbose(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !(v == "0" || v.eq_ignore_ascii_case("false")),
    }
}

/// Default filter directive for a `-v` count and `VERBOSE` value
pub fn filter_directive(verbosity: u8, env_verbose: Option<&str>) -> &'static str {
    let verbosity = if env_requests_verbose(env_verbose) {
        verbosity.max(2)
    } else {
        verbosity
    };

    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the computed level.
pub fn setup_logging(verbosity: u8, env_verbose: Option<&str>) {
    let filter = filter_directive(verbosity, env_verbose);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LogLineFormat)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
