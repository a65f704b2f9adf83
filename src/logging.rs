use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "CMDARGS_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is off unless `CMDARGS_LOG` names a file, so that parse output
/// on stdout/stderr stays clean. The level comes from `RUST_LOG` (default
/// `info`).
///
/// The file is created as `{path}.{timestamp}.{pid}` so concurrent runs do
/// not overwrite each other.
pub fn init_tracing() {
    let Ok(log_path) = std::env::var(LOG_ENV) else {
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A subscriber may already be installed (e.g., by an embedding tool).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn unique_log_path(log_path: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", log_path, timestamp, pid)
}
