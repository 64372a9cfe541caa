// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PagesConfig, ServerConfig, StorageConfig};

impl Config {
    /// Load configuration from the default "config" file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; environment variables with the `SERVER` prefix
    /// override it, and programmatic defaults fill the rest.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4000)?
            .set_default("storage.data_file", "items.json")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("http.server_name", "Items-Server/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    /// Socket address the server listens on
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_a_config_file() {
        let config = Config::load_from("does-not-exist").expect("defaults");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.storage.data_file, "items.json");
        assert_eq!(config.pages.dir, "static");
        assert_eq!(
            config.pages.files,
            vec!["index.html".to_string(), "random.html".to_string()]
        );
        assert!(config.logging.access_log);
    }

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = Config::load_from("does-not-exist").expect("defaults");
        let addr = config.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 4000);
    }
}
