//! Log file setup for the command-line front end
//!
//! stdout and stderr belong to the operation being run (quickfix lines, prompts),
//! so diagnostics go to a file instead. `RUST_LOG` overrides the default level.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default log location: one file per process in the system temp dir
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("rtags-bridge-{}.log", std::process::id()))
}

/// Install the global subscriber writing to `log_file`.
///
/// Fails if the file cannot be created. Installing twice is not an error; the
/// first subscriber stays in place.
pub fn init_global(log_file: &Path) -> io::Result<()> {
    let file = Arc::new(File::create(log_file)?);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .try_init();
    Ok(())
}
