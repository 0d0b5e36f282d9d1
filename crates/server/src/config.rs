//! Command-line and environment configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Forest fire burn area predictor web service
#[derive(Parser, Debug, Clone)]
#[command(name = "fire-area-server")]
#[command(about = "Serve burn area predictions from a trained regression model", long_about = None)]
pub struct ServerConfig {
    /// Path to the trained model artifact (JSON)
    #[arg(short, long, env = "FIRE_AREA_MODEL", default_value = "models/forest_fire_model.json")]
    pub model: PathBuf,

    /// Address to listen on
    #[arg(short, long, env = "FIRE_AREA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Directory served under /static (skipped if it does not exist)
    #[arg(long, env = "FIRE_AREA_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is not set (e.g. `info`, `fire_area_core=debug`)
    #[arg(long, env = "FIRE_AREA_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    /// Static asset directory, only if it exists on disk
    pub fn static_dir_if_present(&self) -> Option<&Path> {
        self.static_dir.is_dir().then_some(self.static_dir.as_path())
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["fire-area-server"]).unwrap();
        assert_eq!(config.model, PathBuf::from("models/forest_fire_model.json"));
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "fire-area-server",
            "--model",
            "/srv/model.json",
            "--bind",
            "0.0.0.0:9000",
            "--static-dir",
            "/nonexistent/static",
        ])
        .unwrap();
        assert_eq!(config.model, PathBuf::from("/srv/model.json"));
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.static_dir_if_present(), None);
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let parsed = ServerConfig::try_parse_from(["fire-area-server", "--bind", "not-an-addr"]);
        assert!(parsed.is_err());
    }
}
