//! Server configuration from command-line flags and environment.

use clap::Parser;
use taskinbox_core::default_log_level;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;

/// Runtime settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "taskinbox-api", version, about = "In-memory task inbox REST API")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "TASKINBOX_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// TCP port to listen on.
    #[arg(long, env = "TASKINBOX_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "TASKINBOX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "TASKINBOX_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or_else(|| default_log_level())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: None,
            log_dir: None,
        }
    }
}
