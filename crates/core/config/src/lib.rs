mod config;

pub use config::{Config, DEFAULT_SEQUENCE_TIMEOUT_MS};
