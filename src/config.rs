//! Configuration types for liveness-probe.
//!
//! Config is optional: with no file every field takes its default. When a
//! file is given it is loaded once at startup and validated before any port
//! is opened. Invalid configs are rejected with a clear error rather than
//! silently falling back to defaults.
//!
//! # Example
//! ```toml
//! [probe]
//! host      = "0.0.0.0"
//! port      = 8080
//! log_level = "liveness_probe=debug"
//! ```

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "LIVENESS_CONFIG";

/// Environment variable overriding `probe.port`.
pub const PORT_ENV: &str = "LIVENESS_PORT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("parsing config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Build the runtime config from the environment.
    ///
    /// Reads the file named by `LIVENESS_CONFIG` if set, otherwise starts from
    /// defaults, then applies `LIVENESS_PORT` on top.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::load(&path)
                    .with_context(|| format!("failed to load config from {}", path.display()))?
            }
            None => Self::default(),
        };

        let port = std::env::var(PORT_ENV).ok();
        config.apply_port_override(port.as_deref())?;
        config.validate()?;
        Ok(config)
    }

    fn apply_port_override(&mut self, raw: Option<&str>) -> anyhow::Result<()> {
        if let Some(raw) = raw {
            self.probe.port = raw
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV}=`{raw}` is not a valid port"))?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        // Port 0 binds an ephemeral port nobody can probe.
        anyhow::ensure!(self.probe.port != 0, "probe.port must not be 0");
        Ok(())
    }
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Address to bind (default: `0.0.0.0`).
    #[serde(default = "defaults::host")]
    pub host: IpAddr,

    /// Port for the liveness endpoint (default: 8080).
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl ProbeConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Where a process on the same host reaches the configured probe.
    pub fn local_url(&self) -> String {
        crate::server::local_url(self.socket_addr())
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            log_level: None,
        }
    }
}

mod defaults {
    use super::*;

    pub fn host() -> IpAddr { IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    pub fn port() -> u16 { 8080 }
}
