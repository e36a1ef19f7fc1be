use std::fs::{self, OpenOptions};
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

/// Send `tracing` output to the log file; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over `log.level`. If the file cannot be opened the
/// reason goes to stderr and the program runs without logging.
pub fn init(settings: &Settings) {
    let Some(path) = settings.log_file() else {
        eprintln!("lyricbox: no log file location (set log.file or HOME), logging disabled");
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("lyricbox: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();
}
