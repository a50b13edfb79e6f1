//! crates/logging/src/logger.rs
//! Named loggers that format records and fan them out to sinks.
//!
//! A synchronous logger writes on the calling thread. An asynchronous logger
//! hands records to a dedicated worker thread through a bounded queue;
//! producers block while the queue is full, so no record is dropped.

use std::fmt::Display;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::error::SinkError;
use crate::level::Level;
use crate::pattern::Pattern;
use crate::record::{Location, Record};
use crate::sink::Sink;

/// Capacity of an asynchronous logger's queue.
pub const ASYNC_QUEUE_CAPACITY: usize = 1024;

/// Callback invoked with the logger name and the failure for errors that
/// cannot be returned to the caller.
pub type ErrorHandler = Arc<dyn Fn(&str, &SinkError) + Send + Sync>;

struct Shared {
    name: Arc<str>,
    pattern: Pattern,
    sinks: Vec<Arc<dyn Sink>>,
    error_handler: RwLock<Option<ErrorHandler>>,
}

impl Shared {
    fn write(&self, record: &Record) -> Result<(), SinkError> {
        let line = self.pattern.format(record);
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(err) = sink.log(record.level, &line) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(err) = sink.flush() {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn report(&self, err: &SinkError) {
        let handler = self
            .error_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match handler {
            Some(handler) => handler(&self.name, err),
            None => default_error_handler(&self.name, err),
        }
    }
}

fn default_error_handler(logger: &str, err: &SinkError) {
    crate::trace::sink_failed(logger, err);
    eprintln!("[*** LOG ERROR ***] [{logger}] {err}");
}

enum Command {
    Record(Record),
    Flush(Sender<Result<(), SinkError>>),
    Terminate,
}

struct Worker {
    sender: Sender<Command>,
    handle: Option<JoinHandle<()>>,
}

fn run_worker(shared: &Shared, receiver: &Receiver<Command>) {
    crate::trace::worker_started(&shared.name);
    for command in receiver {
        match command {
            Command::Record(record) => {
                if let Err(err) = shared.write(&record) {
                    shared.report(&err);
                }
            }
            Command::Flush(ack) => {
                // The requester may have given up waiting.
                let _ = ack.send(shared.flush());
            }
            Command::Terminate => break,
        }
    }
    crate::trace::worker_stopped(&shared.name);
}

/// A named logger bound to a fixed set of sinks.
pub struct Logger {
    shared: Arc<Shared>,
    level: AtomicU8,
    worker: Option<Worker>,
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    name: String,
    sinks: Vec<Arc<dyn Sink>>,
    pattern: Pattern,
    level: Level,
    asynchronous: bool,
    queue_capacity: usize,
}

impl LoggerBuilder {
    /// Appends a sink.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Appends several sinks.
    pub fn sinks(mut self, sinks: impl IntoIterator<Item = Arc<dyn Sink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    /// Sets the pattern. Defaults to `%v`.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets the threshold level. Defaults to [`Level::Trace`].
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Selects asynchronous delivery through a worker thread.
    pub const fn asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }

    /// Overrides [`ASYNC_QUEUE_CAPACITY`] for an asynchronous logger.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Builds the logger, spawning its worker when asynchronous.
    pub fn build(self) -> Result<Logger, SinkError> {
        let shared = Arc::new(Shared {
            name: Arc::from(self.name),
            pattern: self.pattern,
            sinks: self.sinks,
            error_handler: RwLock::new(None),
        });

        let worker = if self.asynchronous {
            let (sender, receiver) = bounded(self.queue_capacity);
            let worker_shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("logwire-{}", shared.name))
                .spawn(move || run_worker(&worker_shared, &receiver))?;
            Some(Worker {
                sender,
                handle: Some(handle),
            })
        } else {
            None
        };

        Ok(Logger {
            shared,
            level: AtomicU8::new(self.level.to_u8()),
            worker,
        })
    }
}

impl Logger {
    /// Starts building a logger called `name`.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            sinks: Vec::new(),
            pattern: Pattern::default(),
            level: Level::Trace,
            asynchronous: false,
            queue_capacity: ASYNC_QUEUE_CAPACITY,
        }
    }

    /// The registry name of this logger.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// The current threshold.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Changes the threshold.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.to_u8(), Ordering::Relaxed);
    }

    /// The pattern records are rendered with.
    pub fn pattern(&self) -> &Pattern {
        &self.shared.pattern
    }

    /// Number of sinks this logger writes to.
    pub fn sink_count(&self) -> usize {
        self.shared.sinks.len()
    }

    /// The sinks in configuration order.
    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.shared.sinks
    }

    /// Whether records go through a worker thread.
    pub const fn is_async(&self) -> bool {
        self.worker.is_some()
    }

    /// Whether a record at `level` passes the threshold.
    pub fn should_log(&self, level: Level) -> bool {
        level != Level::Off && level >= self.level()
    }

    /// Replaces the handler used for failures the caller does not see.
    pub fn set_error_handler(&self, handler: ErrorHandler) {
        *self
            .shared
            .error_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    /// Emits `message` at `level`, returning sink failures to the caller.
    ///
    /// For an asynchronous logger only enqueueing can fail here; write
    /// failures surface through the error handler.
    #[track_caller]
    pub fn try_log(&self, level: Level, message: impl Display) -> Result<(), SinkError> {
        if !self.should_log(level) {
            return Ok(());
        }
        let record = Record::new(Arc::clone(&self.shared.name), level, message.to_string())
            .with_location(Location::caller());
        self.dispatch(record)
    }

    /// Emits a prepared record if its level passes the threshold.
    pub fn log_record(&self, record: Record) -> Result<(), SinkError> {
        if !self.should_log(record.level) {
            return Ok(());
        }
        self.dispatch(record)
    }

    fn dispatch(&self, record: Record) -> Result<(), SinkError> {
        match &self.worker {
            None => self.shared.write(&record),
            Some(worker) => worker
                .sender
                .send(Command::Record(record))
                .map_err(|_| SinkError::WorkerStopped(self.name().to_owned())),
        }
    }

    /// Emits `message` at `level`; failures go to the error handler.
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Display) {
        if let Err(err) = self.try_log(level, message) {
            self.shared.report(&err);
        }
    }

    /// Emits at [`Level::Trace`].
    #[track_caller]
    pub fn trace(&self, message: impl Display) {
        self.log(Level::Trace, message);
    }

    /// Emits at [`Level::Debug`].
    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log(Level::Debug, message);
    }

    /// Emits at [`Level::Info`].
    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log(Level::Info, message);
    }

    /// Emits at [`Level::Warn`].
    #[track_caller]
    pub fn warn(&self, message: impl Display) {
        self.log(Level::Warn, message);
    }

    /// Emits at [`Level::Error`].
    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log(Level::Error, message);
    }

    /// Emits at [`Level::Critical`].
    #[track_caller]
    pub fn critical(&self, message: impl Display) {
        self.log(Level::Critical, message);
    }

    /// Flushes every sink.
    ///
    /// An asynchronous logger first drains every record queued before the call.
    pub fn flush(&self) -> Result<(), SinkError> {
        match &self.worker {
            None => self.shared.flush(),
            Some(worker) => {
                let stopped = || SinkError::WorkerStopped(self.name().to_owned());
                let (ack, done) = bounded(1);
                worker
                    .sender
                    .send(Command::Flush(ack))
                    .map_err(|_| stopped())?;
                done.recv().map_err(|_| stopped())?
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.as_mut()
            && worker.sender.send(Command::Terminate).is_ok()
            && let Some(handle) = worker.handle.take()
        {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("pattern", &self.shared.pattern.as_str())
            .field("sinks", &self.shared.sinks.len())
            .field("async", &self.is_async())
            .finish()
    }
}
