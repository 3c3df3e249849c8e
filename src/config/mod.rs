// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from "config.toml" in the working directory,
    /// falling back to built-in defaults when the file is absent.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables override the file, with `__` separating key
    /// path segments: `EMBEDHTTP__SERVER__PORT=9090` sets `server.port`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("EMBEDHTTP").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("files.root_dir", "public")?
            .set_default("files.stream_buffer_kib", 16)?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, PoisonError};

    // load_from reads process environment; tests that call it (or mutate
    // EMBEDHTTP__* variables) serialize on this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_defaults_when_file_absent() {
        let _env = env_guard();
        let config = Config::load_from("definitely-not-a-config-file").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.files.root_dir, "public");
        assert_eq!(config.files.stream_buffer_kib, 16);
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "common");
        assert!(config.logging.access_log_file.is_none());
    }

    #[test]
    fn test_builder_defaults_match_default_impl() {
        let _env = env_guard();
        let loaded = Config::load_from("definitely-not-a-config-file").unwrap();
        let built = Config::default();

        assert_eq!(loaded.server.host, built.server.host);
        assert_eq!(loaded.server.port, built.server.port);
        assert_eq!(loaded.files.root_dir, built.files.root_dir);
        assert_eq!(loaded.files.stream_buffer_kib, built.files.stream_buffer_kib);
        assert_eq!(loaded.logging.access_log, built.logging.access_log);
        assert_eq!(
            loaded.logging.access_log_format,
            built.logging.access_log_format
        );
    }

    #[test]
    fn test_shipped_sample_config_parses() {
        let raw = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml")).unwrap();
        let config: Config = toml::from_str(&raw).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.files.root_dir, "public");
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let _env = env_guard();
        std::env::set_var("EMBEDHTTP__SERVER__PORT", "9999");
        std::env::set_var("EMBEDHTTP__FILES__STREAM_BUFFER_KIB", "4");

        let config = Config::load_from("definitely-not-a-config-file").unwrap();

        std::env::remove_var("EMBEDHTTP__SERVER__PORT");
        std::env::remove_var("EMBEDHTTP__FILES__STREAM_BUFFER_KIB");

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.files.stream_buffer_kib, 4);
        // Untouched keys keep their defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.files.root_dir, "public");
    }

    #[test]
    fn test_load_from_toml_file() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9090

[files]
root_dir = "www"
stream_buffer_kib = 4

[logging]
access_log = false
access_log_format = "json"
"#,
        )
        .unwrap();

        let stem = dir.path().join("config");
        let config = Config::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.files.root_dir, "www");
        assert_eq!(config.files.chunk_size(), 4096);
        assert!(!config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "json");
    }

    #[test]
    fn test_chunk_size_never_zero() {
        let mut config = Config::default();
        config.files.stream_buffer_kib = 0;
        assert_eq!(config.files.chunk_size(), 1024);
    }

    #[test]
    fn test_socket_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8123;

        let addr = config.get_socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8123");
    }
}
