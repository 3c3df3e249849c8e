// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads for the runtime; defaults to the core count
    pub workers: Option<usize>,
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Directory served as the static tree root
    pub root_dir: String,
    /// Streaming chunk size in KiB for file and JSON bodies
    pub stream_buffer_kib: usize,
}

impl FilesConfig {
    /// Streaming chunk size in bytes, clamped to at least 1 KiB.
    pub fn chunk_size(&self) -> usize {
        self.stream_buffer_kib.max(1) * 1024
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_access_log_format() -> String {
    "common".to_string()
}

/// The built-in defaults, for embedders that configure in code rather
/// than from a file. Mirrors the `Config::load` builder defaults.
impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            files: FilesConfig {
                root_dir: "public".to_string(),
                stream_buffer_kib: 16,
            },
            logging: LoggingConfig {
                access_log: true,
                access_log_format: default_access_log_format(),
                access_log_file: None,
                error_log_file: None,
            },
        }
    }
}
