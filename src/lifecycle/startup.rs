//! Startup orchestration.
//!
//! # Responsibilities
//! - Merge defaults, config file and command-line/env overrides
//! - Validate the result
//! - Start optional metrics, bind the listener, print the banner
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A missing credential is not a startup error; only the proxy degrades

use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::config::{read_config, validate_config, ConfigError, CredentialSource, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
}

/// Build the effective configuration: defaults, then file, then overrides.
pub fn resolve_config(overrides: &Overrides) -> Result<ServerConfig, ConfigError> {
    let mut config = match &overrides.config_path {
        Some(path) => read_config(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = &overrides.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    if let Some(root) = &overrides.root {
        config.static_files.root = root.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Startup banner text.
pub fn banner(addr: SocketAddr, config: &ServerConfig, credential_present: bool) -> String {
    let proxy = if credential_present {
        "active".to_string()
    } else {
        format!("disabled ({} not set)", config.upstream.credential_env)
    };

    format!(
        "Canopy dev server running at http://localhost:{port}\n   \
         Listening on: {addr}\n   \
         Static root:  {root}\n   \
         AI proxy:     POST {path} -> {proxy}\n   \
         Press Ctrl+C to stop.\n",
        port = addr.port(),
        addr = addr,
        root = config.static_files.root.display(),
        path = config.proxy.path,
        proxy = proxy,
    )
}

/// Run the server with `config` until a shutdown signal arrives.
pub async fn start(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let credentials = CredentialSource::env(config.upstream.credential_env.clone());
    let credential_present = credentials.is_present();
    if !credential_present {
        tracing::warn!(
            source = %credentials.describe(),
            "Upstream credential is not set; static files will work but the AI proxy will return an error"
        );
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    println!("\n{}", banner(local_addr, &config, credential_present));

    let server = HttpServer::new(config, credentials)?;
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    println!("\nStopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[listener]\nhost = \"127.0.0.1\"\nport = 9000\n")
            .unwrap();

        let overrides = Overrides {
            config_path: Some(file.path().to_path_buf()),
            port: Some(7000),
            ..Default::default()
        };

        let config = resolve_config(&overrides).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:7000");
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let config = resolve_config(&Overrides::default()).unwrap();
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_override_is_validated() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let overrides = Overrides {
            root: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(&overrides),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_banner_reports_credential_state() {
        let config = ServerConfig::default();
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();

        let active = banner(addr, &config, true);
        assert!(active.contains("http://localhost:8080"));
        assert!(active.contains("POST /api/claude -> active"));

        let inactive = banner(addr, &config, false);
        assert!(inactive.contains("disabled (ANTHROPIC_API_KEY not set)"));
    }
}
