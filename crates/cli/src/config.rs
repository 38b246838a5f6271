//! Environment-driven CLI configuration.

use std::env;
use std::path::PathBuf;

use crate::dirs;

/// Settings read once at startup.
///
/// | Variable           | Meaning                                   | Default                 |
/// |--------------------|-------------------------------------------|-------------------------|
/// | `HDC_DATA_DIR`     | options.toml + definitions/ overrides     | platform data dir       |
/// | `HDC_LOG_DIR`      | directory for `hdc.log`                   | platform cache dir/logs |
/// | `HDC_LOG`          | `EnvFilter` directive                     | `info`                  |
/// | `HDC_LOG_STDERR`   | also log to stderr                        | `false`                 |
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_filter: String,
    pub log_to_stderr: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir(),
            log_dir: dirs::log_dir(),
            log_filter: "info".to_string(),
            log_to_stderr: false,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("HDC_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(dir) = read_env::<PathBuf>("HDC_LOG_DIR") {
            config.log_dir = dir;
        }
        if let Some(filter) = read_env::<String>("HDC_LOG") {
            config.log_filter = filter;
        }
        if let Some(stderr) = read_env::<bool>("HDC_LOG_STDERR") {
            config.log_to_stderr = stderr;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
