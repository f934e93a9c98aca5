//! Log setup: `timestamp:LEVEL:target: message` lines to stderr or a file.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::cli::LogLevel;

/// Formats events as `2024-03-07 09:41:12:WARNING:target: message`.
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
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
        let meta = event.metadata();
        write!(
            writer,
            "{}:{}:{}: ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level_name(meta.level()),
            meta.target()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        _ => "TRACE",
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
        }
    }
}

/// Install the global subscriber.
///
/// With `log_to` the file is created (truncated if it exists); otherwise logs
/// go to stderr.
pub fn init(level: LogLevel, log_to: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let writer = match log_to {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Cannot open log file '{}': {}", path.display(), e))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(level))
        .event_format(LineFormat)
        .with_writer(writer)
        .try_init()
        .map_err(|e| format!("Cannot initialize logging: {}", e))?;

    Ok(())
}
