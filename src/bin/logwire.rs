#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, io, process::ExitCode};

use tracing_subscriber::EnvFilter;

/// Diagnostics of the logging layer itself go to stderr, filtered by
/// `RUST_LOG` (for example `RUST_LOG=logwire::sink=debug`).
fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    // The local offset can only be determined soundly before other threads
    // exist.
    logging::init_local_offset();
    install_tracing();

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = logwire::cli::run(env::args_os(), &mut stdout, &mut stderr);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
