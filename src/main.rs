//! Entry point of the catalog tools.

use std::io::{
    self,
    Write,
};
use std::process::ExitCode;

use i18n_catalog_updater::{
    ToolError,
    ToolRegistry,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the tool result only
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let registry = ToolRegistry::with_default_tools();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match registry.execute(std::env::args_os(), &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ToolError::Usage(err)) => {
            // A failed print has nowhere else to be reported
            let _ = err.print();
            // Help and version requests are not failures
            if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
        }
        Err(err) => {
            // Exiting with failure either way
            let _ = writeln!(io::stderr(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}
