// Runtime configuration for the vacation finder

use std::path::PathBuf;

use crate::combination::DEFAULT_MAX_WAIT_MINUTES;

pub const DATA_FILE_ENV: &str = "FLIGHT_DATA_FILE";
pub const DEFAULT_DATA_FILE: &str = "data/flight_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    pub data_file: PathBuf,
    pub max_wait_minutes: i64,
    // Number of consecutive departure days scanned, starting today
    pub num_days: u32,
    // How many options the report shows
    pub num_results: usize,
    pub workers: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            max_wait_minutes: DEFAULT_MAX_WAIT_MINUTES,
            num_days: 30,
            num_results: 10,
            workers: 1,
        }
    }
}

impl FinderConfig {
    // Defaults, with the data file taken from FLIGHT_DATA_FILE when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_FILE_ENV).filter(|path| !path.is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        config
    }
}
