//! Log formatter that stamps every line with the simulation tick.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Last simulation tick published by the driver.
static SIMULATION_TICK: AtomicU64 = AtomicU64::new(0);

/// Ticks are shown as 16-bit hex; they wrap after about 18 minutes at 60 Hz.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

/// `HH:MM:SS.ffff 0xTICK LEVEL span{fields}: target: message`
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        dimmed(&mut writer, ansi, format_args!("{timestamp} 0x{:04X}", tick() & TICK_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        level(&mut writer, ansi, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.metadata().name())?;
                if let Some(fields) = span.extensions().get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                writer.write_char(':')?;
            }
            writer.write_char(' ')?;
        }

        dimmed(&mut writer, ansi, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level(writer: &mut Writer<'_>, ansi: bool, level: &Level) -> fmt::Result {
    let (color, text) = match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    };
    if ansi {
        write!(writer, "{color}{text}\x1b[0m")
    } else {
        writer.write_str(text)
    }
}

fn dimmed(writer: &mut Writer<'_>, ansi: bool, value: impl fmt::Display) -> fmt::Result {
    if ansi {
        write!(writer, "\x1b[2m{value}\x1b[0m")
    } else {
        write!(writer, "{value}")
    }
}

/// Publishes the current simulation tick for log lines to pick up.
pub fn set_tick(tick: u64) {
    SIMULATION_TICK.store(tick, Ordering::Relaxed);
}

pub fn tick() -> u64 {
    SIMULATION_TICK.load(Ordering::Relaxed)
}
