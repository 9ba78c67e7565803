//! Configuration management for the DocShare server

use std::env;

use crate::viewer::{ViewerEndpoints, DEFAULT_OFFICE_VIEWER_URL, DEFAULT_PDF_BRIDGE_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub viewer: ViewerConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible base URL, used for share links
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub pdf_bridge_url: String,
    pub office_viewer_url: String,
}

#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Load the bundled sample documents at startup
    pub seed_sample_data: bool,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                public_base_url: "http://localhost:3000".to_string(),
            },
            viewer: ViewerConfig {
                pdf_bridge_url: DEFAULT_PDF_BRIDGE_URL.to_string(),
                office_viewer_url: DEFAULT_OFFICE_VIEWER_URL.to_string(),
            },
            library: LibraryConfig {
                seed_sample_data: true,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("SERVER_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value,
            })?,
            None => defaults.server.port,
        };

        let seed_sample_data = match lookup("SEED_SAMPLE_DATA") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                name: "SEED_SAMPLE_DATA",
                value,
            })?,
            None => defaults.library.seed_sample_data,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
                public_base_url: lookup("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| format!("http://localhost:{}", port)),
            },
            viewer: ViewerConfig {
                pdf_bridge_url: lookup("PDF_BRIDGE_URL").unwrap_or(defaults.viewer.pdf_bridge_url),
                office_viewer_url: lookup("OFFICE_VIEWER_URL")
                    .unwrap_or(defaults.viewer.office_viewer_url),
            },
            library: LibraryConfig { seed_sample_data },
        })
    }

    /// Viewer endpoints for the resolver
    pub fn viewer_endpoints(&self) -> ViewerEndpoints {
        ViewerEndpoints {
            pdf_bridge: self.viewer.pdf_bridge_url.clone(),
            office_viewer: self.viewer.office_viewer_url.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
