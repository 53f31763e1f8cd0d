//! Diagnostic stream: `INFO:` / `ERROR:` lines on stderr, silent unless verbose.

use std::fmt;
use std::io;

use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use crate::config::Options;

/// Formats each event as `LEVEL: message` with no timestamp or target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedLines;

impl<S, N> FormatEvent<S, N> for PrefixedLines
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
        let prefix = match *event.metadata().level() {
            Level::ERROR => "ERROR",
            Level::WARN => "WARN",
            _ => "INFO",
        };
        write!(writer, "{prefix}: ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

pub fn level_for(options: &Options) -> LevelFilter {
    if options.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::OFF
    }
}

/// Builds the subscriber for one run. Callers scope it with
/// `tracing::subscriber::with_default` instead of installing it globally.
pub fn subscriber<W>(options: &Options, make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(level_for(options))
        .with_writer(make_writer)
        .with_ansi(false)
        .event_format(PrefixedLines)
        .finish()
}

pub fn stderr_subscriber(options: &Options) -> impl Subscriber + Send + Sync {
    subscriber(options, io::stderr)
}
