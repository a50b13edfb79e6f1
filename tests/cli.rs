//! Integration tests for the `logwire` command-line front end.
//!
//! Each test drives [`logwire::cli::run_in`] against a private context so
//! the global orchestrator is never touched.

use logwire::Context;
use logwire::cli::{EXIT_FAILURE, EXIT_SUCCESS, run_in};
use test_support::ScratchDir;

struct Outcome {
    code: i32,
    stdout: String,
    stderr: String,
}

fn run(context: &Context, args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut argv = vec!["logwire"];
    argv.extend_from_slice(args);
    let code = run_in(context, argv, &mut stdout, &mut stderr);
    Outcome {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

// ============================================================================
// Informational Flags
// ============================================================================

/// Verifies that --help prints usage and leaves the context untouched.
#[test]
fn help_prints_usage() {
    let context = Context::new();
    let outcome = run(&context, &["--help"]);

    assert_eq!(outcome.code, EXIT_SUCCESS);
    assert!(outcome.stdout.contains("--config"));
    assert!(outcome.stdout.contains("--set"));
    assert!(!context.is_initialized());
}

/// Verifies that --version prints the package version.
#[test]
fn version_prints_banner() {
    let context = Context::new();
    let outcome = run(&context, &["--version"]);

    assert_eq!(outcome.code, EXIT_SUCCESS);
    assert!(outcome.stdout.starts_with("logwire "));
    assert!(outcome.stderr.is_empty());
}

// ============================================================================
// Configuration Flags
// ============================================================================

/// Verifies that --set entries become the external configuration.
#[test]
fn set_entries_configure_loggers() {
    let scratch = ScratchDir::new();
    let context = Context::new();
    let file_name = format!("file_full_name={}", scratch.base_str("cli"));
    let outcome = run(
        &context,
        &[
            "--set",
            "root_logger_sinks=file",
            "--set",
            &file_name,
            "--set",
            "root_logger_format=%l|%v",
            "--message",
            "hello",
            "--level",
            "warning",
        ],
    );

    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);
    assert!(outcome.stdout.starts_with("config source: external-setting\n"));
    assert!(outcome.stdout.contains("root_logger_format = %l|%v\n"));
    assert_eq!(scratch.active_lines("cli"), ["warning|hello"]);
}

/// Verifies that --config reads a file and --set is laid over it.
#[test]
fn set_entries_override_config_file() {
    let scratch = ScratchDir::new();
    let body = format!(
        "root_logger_sinks = file\n\
         file_full_name = {}\n\
         root_logger_format = %v\n\
         custom_logger_names = net\n",
        scratch.base_str("merged")
    );
    let path = scratch.write_config("cli.conf", &body);
    let context = Context::new();
    let outcome = run(
        &context,
        &[
            "--config",
            path.to_str().unwrap(),
            "--set",
            "custom_logger_names=db",
            "--logger",
            "db",
            "--message",
            "merged",
        ],
    );

    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);
    assert!(outcome.stdout.contains("custom_logger_names = net,db\n"));
    assert_eq!(scratch.active_lines("merged"), ["merged"]);
}

/// Verifies that --config alone is reported as a file source.
#[test]
fn config_file_alone_is_file_source() {
    let scratch = ScratchDir::new();
    let body = format!(
        "root_logger_sinks = file\nfile_full_name = {}\n",
        scratch.base_str("only")
    );
    let path = scratch.write_config("only.conf", &body);
    let context = Context::new();
    let outcome = run(&context, &["--config", path.to_str().unwrap()]);

    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);
    assert!(outcome.stdout.starts_with("config source: external-file\n"));
}

// ============================================================================
// Failures
// ============================================================================

/// Verifies that a malformed --set value is rejected before initialisation.
#[test]
fn malformed_setting_fails() {
    let context = Context::new();
    let outcome = run(&context, &["--set", "no-equals-sign"]);

    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stderr.contains("expected KEY=VALUE"));
    assert!(!context.is_initialized());
}

/// Verifies that an unknown message level is rejected.
#[test]
fn unknown_level_fails() {
    let context = Context::new();
    let outcome = run(&context, &["--message", "x", "--level", "loud"]);

    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stderr.starts_with("logwire: "));
    assert!(!context.is_initialized());
}

/// Verifies that an initialisation failure is reported.
#[test]
fn initialisation_failure_is_reported() {
    let scratch = ScratchDir::new();
    let context = Context::new();
    let file_name = format!("file_full_name={}", scratch.base_str("bad"));
    let outcome = run(
        &context,
        &["--set", "root_logger_sinks=file", "--set", &file_name, "--set", "file_size=big"],
    );

    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stderr.contains("file_size"));
    assert!(context.registry().is_empty());
}
