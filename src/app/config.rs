//! Service configuration loaded from `helmgen.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Config file looked up in the working directory when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "helmgen.toml";

/// Configuration for chart generation and the HTTP service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Chart output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on one generate request, after which it is cancelled.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Chart output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Chart root; manifests go to `<dir>/templates`.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir() }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("helm")
}

impl ServiceConfig {
    /// Parse TOML config content.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        toml::from_str(content)
            .map_err(|e| AppError::config_error(format!("Failed to parse config: {e}")))
    }

    /// Load configuration: an explicit file if given, otherwise `helmgen.toml`
    /// under `base_dir` when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>, base_dir: &Path) -> Result<Self, AppError> {
        let config = match explicit {
            Some(path) => Self::read(path)?,
            None => {
                let candidate = base_dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() { Self::read(&candidate)? } else { Self::default() }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config_error(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Replace loaded values with those given on the command line.
    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
        output_dir: Option<PathBuf>,
    ) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(dir) = output_dir {
            self.output.dir = dir;
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::config_error("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(AppError::config_error("server.port must be greater than 0"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(AppError::config_error(
                "server.request_timeout_secs must be greater than 0",
            ));
        }
        if self.output.dir.as_os_str().is_empty() {
            return Err(AppError::config_error("output.dir must not be empty"));
        }
        Ok(())
    }

    /// Listener address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
