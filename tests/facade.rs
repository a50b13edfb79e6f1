//! Integration tests for the free functions operating on the global context.
//!
//! The global context is process-wide, so every test takes [`SERIAL`] and
//! resets the context before and after it runs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use logwire::{ConfigSource, Context, InitError, Level, OverrideKind};
use test_support::ScratchDir;

static SERIAL: Mutex<()> = Mutex::new(());

struct Fresh {
    _guard: MutexGuard<'static, ()>,
}

impl Fresh {
    fn new() -> Self {
        let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        Context::global().reset();
        Self { _guard: guard }
    }
}

impl Drop for Fresh {
    fn drop(&mut self) {
        Context::global().reset();
    }
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

/// Verifies that registered entries shape the global loggers.
#[test]
fn registered_entries_build_global_loggers() {
    let _fresh = Fresh::new();
    let scratch = ScratchDir::new();
    logwire::set_config(
        scratch.store([
            ("custom_logger_names", "net"),
            ("net_level", "error"),
            ("net_format", "%n %L %v"),
        ]),
        true,
    )
    .unwrap();

    let net = logwire::logger("net").unwrap();
    net.warn("dropped");
    net.error("kept");
    logwire::flush_all().unwrap();

    assert_eq!(net.level(), Level::Error);
    assert_eq!(scratch.active_lines("defaultLog"), ["net E kept"]);
    assert_eq!(logwire::config_source().unwrap(), ConfigSource::ExtFuncSetting);
}

/// Verifies that an unknown logger name resolves to the root logger.
#[test]
fn unknown_logger_is_root() {
    let _fresh = Fresh::new();
    let scratch = ScratchDir::new();
    logwire::instance_with_config(scratch.store(Vec::<(String, String)>::new())).unwrap();

    assert_eq!(logwire::logger("nobody").unwrap().name(), "root_logger");
    assert_eq!(logwire::root_logger().unwrap().name(), "root_logger");
    assert_eq!(logwire::config_source().unwrap(), ConfigSource::DirectParams);
}

/// Verifies that settings arriving after initialisation are rejected.
#[test]
fn late_settings_are_rejected() {
    let _fresh = Fresh::new();
    let scratch = ScratchDir::new();
    logwire::set_config(scratch.store(Vec::<(String, String)>::new()), true).unwrap();
    logwire::instance().unwrap();

    assert!(matches!(
        logwire::set_config([("net_level", "info")], false),
        Err(InitError::AlreadyInitialized(OverrideKind::ConfigMap))
    ));
    assert!(matches!(
        logwire::set_config_file(scratch.path().join("late.conf")),
        Err(InitError::AlreadyInitialized(OverrideKind::ConfigFile))
    ));
    assert!(matches!(
        logwire::instance_with_config(logwire::ConfigStore::defaults()),
        Err(InitError::AlreadyInitialized(OverrideKind::LoggerInstance))
    ));
}

/// Verifies that the effective configuration is exposed.
#[test]
fn config_reflects_backfilled_defaults() {
    let _fresh = Fresh::new();
    let scratch = ScratchDir::new();
    logwire::set_config(scratch.store([("root_logger_level", "info")]), true).unwrap();

    let config = logwire::config().unwrap();
    assert_eq!(config.value("root_logger_level"), Some("info"));
    assert_eq!(config.value("file_rotate_num"), Some("3"));
}
