use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "WARDROBE_LOG";

const LOG_FILE: &str = "wardrobe-explorer.log";

/// Default log file location in the platform cache directory.
pub fn default_log_path() -> Option<PathBuf> {
    crate::config::project_dirs()
        .ok()
        .map(|dirs| dirs.cache_dir().join(LOG_FILE))
}

/// Build the level filter: `WARDROBE_LOG` wins over the configured level.
pub fn env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global subscriber appending to `path`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or stderr.
pub fn init(path: &Path, level: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let file = Arc::new(Mutex::new(file));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(level))
        .with_writer(move || LogWriter(file.clone()))
        .finish();

    // a subscriber may already be installed (tests, repeated init)
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global subscriber already installed");
    }
    tracing::info!(path = %path.display(), "Logging initialised");
    Ok(())
}

struct LogWriter(Arc<Mutex<std::fs::File>>);

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut file) => file.write(buf),
            Err(poisoned) => poisoned.into_inner().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock() {
            Ok(mut file) => file.flush(),
            Err(poisoned) => poisoned.into_inner().flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_falls_back_on_bad_level() {
        // an unparsable directive must not panic
        let filter = env_filter("not a level ===");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_log_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let file = OpenOptions::new().create(true).append(true).open(&path).unwrap();
        let mut writer = LogWriter(Arc::new(Mutex::new(file)));
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
