// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Backing store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file holding the item collection
    pub data_file: String,
}

/// Static page configuration
///
/// The service serves a fixed list of page files; `/` maps to `index`.
#[derive(Debug, Deserialize, Clone)]
pub struct PagesConfig {
    #[serde(default = "default_pages_dir")]
    pub dir: String,
    #[serde(default = "default_index_file")]
    pub index: String,
    #[serde(default = "default_page_files")]
    pub files: Vec<String>,
}

fn default_pages_dir() -> String {
    "static".to_string()
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_page_files() -> Vec<String> {
    vec!["index.html".to_string(), "random.html".to_string()]
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: default_pages_dir(),
            index: default_index_file(),
            files: default_page_files(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}
