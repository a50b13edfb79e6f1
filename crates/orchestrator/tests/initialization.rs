//! Integration tests for orchestrator construction.
//!
//! Every test uses its own [`Context`] so the tests can run in parallel.

use std::sync::{Arc, Barrier};
use std::thread;

use logging::Level;
use orchestrator::{ConfigSource, Context, InitError, OverrideKind};
use test_support::ScratchDir;

// ============================================================================
// Configuration Source Tests
// ============================================================================

/// Verifies that a registered configuration file is read.
#[test]
fn configuration_file_is_loaded() {
    let scratch = ScratchDir::new();
    let body = format!(
        "# loggers\n\
         custom_logger_names = net\n\
         net_level = \"error\"\n\
         root_logger_sinks = file\n\
         file_full_name = {}\n",
        scratch.base_str("fromfile")
    );
    let path = scratch.write_config("app.conf", &body);
    let context = Context::new();
    context.set_config_file(&path).unwrap();

    let orchestrator = context.instance().unwrap();

    assert_eq!(orchestrator.config_source(), ConfigSource::ExtFileSpecified);
    assert_eq!(orchestrator.logger("net").unwrap().level(), Level::Error);
    orchestrator.root().unwrap().info("from file");
    orchestrator.flush_all().unwrap();
    assert_eq!(scratch.active_lines("fromfile").len(), 1);
}

/// Verifies that registered entries win over a registered file.
#[test]
fn registered_entries_win_over_file() {
    let scratch = ScratchDir::new();
    let path = scratch.write_config("app.conf", "custom_logger_names = fromfile\n");
    let context = Context::new();
    context.set_config_file(&path).unwrap();
    context
        .set_config(scratch.store([("custom_logger_names", "fromcode")]), true)
        .unwrap();

    let orchestrator = context.instance().unwrap();

    assert_eq!(orchestrator.config_source(), ConfigSource::ExtFuncSetting);
    assert_eq!(orchestrator.logger_names(), ["fromcode", "root_logger"]);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

/// Verifies that concurrent first calls all observe one orchestrator.
#[test]
fn concurrent_instance_calls_construct_once() {
    let scratch = ScratchDir::new();
    let context = Arc::new(Context::new());
    context
        .set_config(scratch.store([("custom_logger_names", "a, b, c")]), true)
        .unwrap();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let context = Arc::clone(&context);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                context.instance().unwrap()
            })
        })
        .collect();
    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(instances.iter().all(|o| Arc::ptr_eq(o, &instances[0])));
    assert_eq!(context.registry().len(), 4);
}

/// Verifies that a setter racing construction either applies or fails.
#[test]
fn setter_racing_construction_is_applied_or_rejected() {
    let scratch = ScratchDir::new();
    let context = Arc::new(Context::new());
    context
        .set_config(scratch.store(Vec::<(String, String)>::new()), true)
        .unwrap();
    let barrier = Arc::new(Barrier::new(2));

    let setter = {
        let context = Arc::clone(&context);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            context.set_config([("custom_logger_names", "late")], false)
        })
    };
    barrier.wait();
    let orchestrator = context.instance().unwrap();
    let outcome = setter.join().unwrap();

    match outcome {
        Ok(()) => assert!(orchestrator.logger_names().contains(&"late".to_owned())),
        Err(err) => {
            assert!(matches!(err, InitError::AlreadyInitialized(OverrideKind::ConfigMap)));
            assert!(!orchestrator.logger_names().contains(&"late".to_owned()));
        }
    }
}

// ============================================================================
// Sharing Tests
// ============================================================================

/// Verifies that loggers pointing at one path write to one file.
#[test]
fn loggers_share_file_sinks() {
    let scratch = ScratchDir::new();
    let context = Context::new();
    let shared = scratch.base_str("shared");
    let config = scratch.store([
        ("custom_logger_names", "net, db"),
        ("net_sinks", "netfile"),
        ("db_sinks", "dbfile"),
        ("netfile_full_name", shared.as_str()),
        ("dbfile_full_name", shared.as_str()),
        ("net_format", "%n: %v"),
        ("db_format", "%n: %v"),
    ]);
    let orchestrator = context.instance_with_config(config).unwrap();

    orchestrator.logger("net").unwrap().info("one");
    orchestrator.logger("db").unwrap().info("two");
    orchestrator.flush_all().unwrap();

    assert_eq!(scratch.active_lines("shared"), ["net: one", "db: two"]);
    // defaultLog for the root logger plus the shared file.
    assert_eq!(context.sink_cache().len(), 2);
}

/// Verifies that a failed construction registers nothing and can be retried.
#[test]
fn failed_construction_leaves_registry_empty() {
    let scratch = ScratchDir::new();
    let context = Context::new();
    context
        .set_config(
            scratch.store([
                ("custom_logger_names", "net"),
                ("net_sinks", "bad"),
                ("bad_sink", "RotateFile"),
                ("bad_full_name", scratch.base_str("bad").as_str()),
                ("bad_rotate_num", "many"),
            ]),
            true,
        )
        .unwrap();

    let err = context.instance().unwrap_err();
    assert!(matches!(err, InitError::Sinks { .. }));
    assert!(context.registry().is_empty());

    context.set_config([("bad_rotate_num", "2")], false).unwrap();
    let orchestrator = context.instance().unwrap();
    assert_eq!(orchestrator.logger("net").unwrap().sink_count(), 1);
}
