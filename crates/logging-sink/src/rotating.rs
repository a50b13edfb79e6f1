//! crates/logging-sink/src/rotating.rs
//! Size-based rotating file sink.
//!
//! The active file is `<base>.log`; history files are `<base>.log.1` (newest)
//! through `<base>.log.N` (oldest). When a write would push the byte count of
//! the active file past the limit, the sink closes the file, shifts every
//! history file up by one index (dropping the oldest), renames the active file
//! to `.1` and reopens a truncated active file before writing.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{Level, Sink, SinkError};

/// Extension of every rotating log file.
pub const LOG_EXTENSION: &str = "log";

struct State {
    file: Option<BufWriter<File>>,
    current_size: u64,
}

/// A file sink that rotates once the active file reaches a byte limit.
#[derive(Debug)]
pub struct RotatingFileSink {
    base: PathBuf,
    active: PathBuf,
    max_size: u64,
    max_files: usize,
    force_flush: bool,
    state: Mutex<State>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("open", &self.file.is_some())
            .field("current_size", &self.current_size)
            .finish()
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl RotatingFileSink {
    /// Opens `<base>.log` for appending, creating missing parent directories.
    ///
    /// The byte count starts at zero even when the file already has content.
    pub fn open(
        base: impl Into<PathBuf>,
        max_size: u64,
        max_files: usize,
        force_flush: bool,
    ) -> Result<Self, SinkError> {
        let base = base.into();
        let active = with_suffix(&base, &format!(".{LOG_EXTENSION}"));

        if let Some(parent) = active.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SinkError::Open {
                path: active.clone(),
                source,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&active)
            .map_err(|source| SinkError::Open {
                path: active.clone(),
                source,
            })?;

        Ok(Self {
            base,
            active,
            max_size,
            max_files,
            force_flush,
            state: Mutex::new(State {
                file: Some(BufWriter::new(file)),
                current_size: 0,
            }),
        })
    }

    /// Extension-less base path.
    pub fn base_path(&self) -> &Path {
        &self.base
    }

    /// Path of the file currently written to.
    pub fn active_path(&self) -> &Path {
        &self.active
    }

    /// Path of history file `index`; index 0 is the active file.
    pub fn history_path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.active.clone()
        } else {
            with_suffix(&self.active, &format!(".{index}"))
        }
    }

    /// Byte limit of the active file.
    pub const fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Number of history files kept.
    pub const fn max_files(&self) -> usize {
        self.max_files
    }

    /// Whether every record is flushed to disk.
    pub const fn force_flush(&self) -> bool {
        self.force_flush
    }

    /// Bytes counted against the active file since it was opened.
    pub fn current_size(&self) -> u64 {
        self.lock().current_size
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn rotate(&self, state: &mut State) -> Result<(), SinkError> {
        if let Some(mut file) = state.file.take() {
            file.flush()?;
        }

        for index in (1..=self.max_files.max(1)).rev() {
            let source = self.history_path(index - 1);
            let target = self.history_path(index);
            if target.exists() {
                fs::remove_file(&target).map_err(|source| SinkError::Remove {
                    path: target.clone(),
                    source,
                })?;
            }
            if source.exists() {
                fs::rename(&source, &target).map_err(|err| SinkError::Rename {
                    from: source.clone(),
                    to: target.clone(),
                    source: err,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.active)
            .map_err(|source| SinkError::Reopen {
                path: self.active.clone(),
                source,
            })?;
        state.file = Some(BufWriter::new(file));
        crate::trace::rotated(&self.active);
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn log(&self, _level: Level, formatted: &str) -> Result<(), SinkError> {
        let mut state = self.lock();
        if state.file.is_none() {
            return Err(SinkError::Closed {
                path: self.active.clone(),
            });
        }

        let len = formatted.len() as u64;
        state.current_size += len;
        if state.current_size > self.max_size {
            self.rotate(&mut state)?;
            state.current_size = len;
        }

        let Some(file) = state.file.as_mut() else {
            return Err(SinkError::Closed {
                path: self.active.clone(),
            });
        };
        file.write_all(formatted.as_bytes())?;
        if self.force_flush {
            file.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        match self.lock().file.as_mut() {
            Some(file) => Ok(file.flush()?),
            None => Err(SinkError::Closed {
                path: self.active.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::ScratchDir;

    fn write(sink: &RotatingFileSink, line: &str) {
        sink.log(Level::Info, line).unwrap();
    }

    #[test]
    fn open_creates_active_file_and_parents() {
        let scratch = ScratchDir::new();
        let base = scratch.path().join("nested/dir/app");
        let sink = RotatingFileSink::open(&base, 100, 2, true).unwrap();
        assert!(sink.active_path().ends_with("app.log"));
        assert!(sink.active_path().exists());
        assert_eq!(sink.current_size(), 0);
    }

    #[test]
    fn history_paths_append_index_after_extension() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 100, 2, true).unwrap();
        assert_eq!(sink.history_path(0), scratch.active_log("app"));
        assert_eq!(sink.history_path(2), scratch.history_log("app", 2));
    }

    #[test]
    fn exceeding_limit_rotates() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 10, 2, true).unwrap();
        write(&sink, "12345\n");
        write(&sink, "1234\n");
        assert_eq!(sink.current_size(), 5);
        assert_eq!(scratch.read(scratch.history_log("app", 1)), "12345\n");
    }

    #[test]
    fn size_exactly_at_limit_does_not_rotate() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 10, 2, true).unwrap();
        write(&sink, "1234\n");
        write(&sink, "1234\n");
        assert_eq!(sink.current_size(), 10);
        assert!(!scratch.history_log("app", 1).exists());
    }

    #[test]
    fn rotation_resets_size_to_record_length() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 8, 2, true).unwrap();
        write(&sink, "aaaaaa\n");
        write(&sink, "bbb\n");
        assert_eq!(sink.current_size(), 4);
        assert_eq!(scratch.read(scratch.active_log("app")), "bbb\n");
        assert_eq!(scratch.read(scratch.history_log("app", 1)), "aaaaaa\n");
    }

    #[test]
    fn zero_history_still_renames_to_first_slot() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 4, 0, true).unwrap();
        write(&sink, "one\n");
        write(&sink, "two\n");
        write(&sink, "three\n");
        assert_eq!(scratch.read(scratch.history_log("app", 1)), "two\n");
        assert!(!scratch.history_log("app", 2).exists());
        assert_eq!(scratch.read(scratch.active_log("app")), "three\n");
    }

    #[test]
    fn buffered_output_reaches_disk_on_flush() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 1024, 1, false).unwrap();
        write(&sink, "pending\n");
        sink.flush().unwrap();
        assert_eq!(scratch.read(scratch.active_log("app")), "pending\n");
    }

    #[test]
    fn reopening_appends_to_existing_file() {
        let scratch = ScratchDir::new();
        {
            let sink = RotatingFileSink::open(scratch.base("app"), 1024, 1, true).unwrap();
            write(&sink, "first\n");
        }
        let sink = RotatingFileSink::open(scratch.base("app"), 1024, 1, true).unwrap();
        write(&sink, "second\n");
        assert_eq!(scratch.active_lines("app"), vec!["first", "second"]);
    }

    #[cfg(unix)]
    #[test]
    fn failed_rotation_leaves_sink_closed() {
        let scratch = ScratchDir::new();
        let sink = RotatingFileSink::open(scratch.base("app"), 4, 1, true).unwrap();
        write(&sink, "one\n");
        // A directory in the history slot cannot be removed with remove_file.
        fs::create_dir(scratch.history_log("app", 1)).unwrap();

        let err = sink.log(Level::Info, "two\n").unwrap_err();
        assert!(matches!(err, SinkError::Remove { .. }));
        assert!(matches!(
            sink.log(Level::Info, "three\n").unwrap_err(),
            SinkError::Closed { .. }
        ));
        assert!(matches!(sink.flush(), Err(SinkError::Closed { .. })));
    }
}
