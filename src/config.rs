use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("employees_data.json"),
            log_dir: PathBuf::from("logs"),
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        Self {
            data_file: env::var("PAYROLL_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            log_dir: env::var("PAYROLL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            // unparsable levels keep the default
            log_level: env::var("PAYROLL_LOG_LEVEL")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}
