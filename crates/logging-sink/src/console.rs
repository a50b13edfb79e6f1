//! crates/logging-sink/src/console.rs
//! Console sink with level-based ANSI coloring.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use logging::{Level, Sink, SinkError};

const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BOLD_RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

static COLORED: AtomicBool = AtomicBool::new(true);
static STDOUT_SINK: OnceLock<Arc<ConsoleSink<Stdout>>> = OnceLock::new();

/// Enables or disables coloring for every console sink that follows the
/// process-wide setting.
pub fn set_colored(colored: bool) {
    COLORED.store(colored, Ordering::Relaxed);
}

/// The process-wide coloring setting. Enabled by default.
pub fn colored() -> bool {
    COLORED.load(Ordering::Relaxed)
}

const fn color_for(level: Level) -> Option<&'static str> {
    match level {
        Level::Warn => Some(YELLOW),
        Level::Error => Some(RED),
        Level::Critical => Some(BOLD_RED),
        _ => None,
    }
}

/// Writes records to a stream, flushing after each one.
///
/// Warning, error and critical records are wrapped in yellow, red and bold
/// red escape sequences while coloring is enabled.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    writer: Mutex<W>,
    colored: Option<bool>,
}

impl<W: Write + Send> ConsoleSink<W> {
    /// A sink that follows the process-wide coloring setting.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            colored: None,
        }
    }

    /// A sink with a fixed coloring choice, independent of [`set_colored`].
    pub const fn with_colors(writer: W, colored: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            colored: Some(colored),
        }
    }

    fn is_colored(&self) -> bool {
        self.colored.unwrap_or_else(colored)
    }
}

impl ConsoleSink<Stdout> {
    /// The single process-wide standard output sink.
    pub fn stdout() -> Arc<Self> {
        Arc::clone(STDOUT_SINK.get_or_init(|| Arc::new(Self::new(io::stdout()))))
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn log(&self, level: Level, formatted: &str) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match color_for(level).filter(|_| self.is_colored()) {
            Some(color) => {
                // The reset code precedes the line ending.
                let (body, eol) = formatted
                    .strip_suffix('\n')
                    .map_or((formatted, ""), |body| (body, "\n"));
                writer.write_all(color.as_bytes())?;
                writer.write_all(body.as_bytes())?;
                writer.write_all(RESET.as_bytes())?;
                writer.write_all(eol.as_bytes())?;
            }
            None => writer.write_all(formatted.as_bytes())?,
        }
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::SharedBuffer;

    fn write_all_levels(sink: &ConsoleSink<SharedBuffer>) {
        for level in [Level::Info, Level::Warn, Level::Error, Level::Critical] {
            sink.log(level, &format!("{level}\n")).unwrap();
        }
    }

    #[test]
    fn colors_warn_and_above() {
        let buffer = SharedBuffer::new();
        let sink = ConsoleSink::with_colors(buffer.clone(), true);
        write_all_levels(&sink);
        assert_eq!(
            buffer.contents(),
            "info\n\x1b[33mwarning\x1b[0m\n\x1b[31merror\x1b[0m\n\x1b[1;31mcritical\x1b[0m\n"
        );
    }

    #[test]
    fn plain_when_colors_disabled() {
        let buffer = SharedBuffer::new();
        let sink = ConsoleSink::with_colors(buffer.clone(), false);
        write_all_levels(&sink);
        assert_eq!(buffer.contents(), "info\nwarning\nerror\ncritical\n");
    }

    #[test]
    fn default_sink_follows_global_flag() {
        let buffer = SharedBuffer::new();
        let sink = ConsoleSink::new(buffer.clone());
        set_colored(false);
        sink.log(Level::Error, "e\n").unwrap();
        set_colored(true);
        sink.log(Level::Error, "e\n").unwrap();
        assert_eq!(buffer.contents(), "e\n\x1b[31me\x1b[0m\n");
    }

    #[test]
    fn stdout_sink_is_shared() {
        assert!(Arc::ptr_eq(&ConsoleSink::stdout(), &ConsoleSink::stdout()));
    }

    #[test]
    fn record_without_line_ending_is_still_reset() {
        let buffer = SharedBuffer::new();
        let sink = ConsoleSink::with_colors(buffer.clone(), true);
        sink.log(Level::Warn, "partial").unwrap();
        assert_eq!(buffer.contents(), "\x1b[33mpartial\x1b[0m");
    }
}
