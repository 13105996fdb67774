use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_FILTER: &str = "info";

// Console output goes to stderr so stdout stays free for reports. RUST_LOG
// overrides the default filter for both layers.
pub fn init_tracing_subscriber(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::env::current_dir()?,
            };
            std::fs::create_dir_all(&dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Log file path has no file name: {}", path.display()))?;
            let file_appender = RollingFileAppender::new(Rotation::NEVER, dir, file_name);

            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
