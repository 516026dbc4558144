// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

const LOG_DIR: &str = "connections";
const LOG_FILE: &str = "connections.log";

#[derive(Debug)]
pub enum LogTarget {
    Stderr,
    /// The full-screen interface owns the terminal, so logs go to a file.
    File(PathBuf),
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(LOG_DIR).join(LOG_FILE))
}

/// Install the global logger. `RUST_LOG` overrides the default filter.
pub fn init(target: LogTarget) -> io::Result<()> {
    let default_filter = match target {
        LogTarget::Stderr => "warn",
        LogTarget::File(_) => "info",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogTarget::File(path) = &target {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (tests, embedding); keep it.
    let _ = builder.try_init();
    Ok(())
}
