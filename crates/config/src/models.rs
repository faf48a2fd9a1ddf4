use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub tunnel: TunnelSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "super::defaults::host")]
    pub host: String,
    #[serde(default = "super::defaults::port")]
    pub port: u16,
    #[serde(default = "super::defaults::root_dir")]
    pub root_dir: String,
    /// Relative to `root_dir`
    #[serde(default = "super::defaults::public_dir")]
    pub public_dir: String,
    #[serde(default = "super::defaults::index_file")]
    pub index_file: String,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
    #[serde(default = "super::defaults::streaming_threshold_mb")]
    pub streaming_threshold_mb: u64,
    #[serde(default = "super::defaults::cache_max_age_secs")]
    pub cache_max_age_secs: u64,
    #[serde(default = "super::defaults::scan_max_depth")]
    pub scan_max_depth: usize,
    #[serde(default = "super::defaults::interactive_port_check")]
    pub interactive_port_check: bool,
    #[serde(default = "super::defaults::port_release_delay_ms")]
    pub port_release_delay_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        use super::defaults;

        Self {
            host: defaults::host(),
            port: defaults::port(),
            root_dir: defaults::root_dir(),
            public_dir: defaults::public_dir(),
            index_file: defaults::index_file(),
            tcp_nodelay: defaults::tcp_nodelay(),
            timeout_secs: defaults::timeout_secs(),
            max_concurrent_requests: defaults::max_concurrent_requests(),
            allowed_origins: defaults::allowed_origins(),
            enable_compression: defaults::enable_compression(),
            streaming_threshold_mb: defaults::streaming_threshold_mb(),
            cache_max_age_secs: defaults::cache_max_age_secs(),
            scan_max_depth: defaults::scan_max_depth(),
            interactive_port_check: defaults::interactive_port_check(),
            port_release_delay_ms: defaults::port_release_delay_ms(),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn local_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TunnelSettings {
    #[serde(default = "super::defaults::tunnel_enabled")]
    pub enabled: bool,
    #[serde(default = "super::defaults::tunnel_provider")]
    pub provider: TunnelProvider,
    #[serde(default = "super::defaults::tunnel_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TunnelSettings {
    fn default() -> Self {
        Self {
            enabled: super::defaults::tunnel_enabled(),
            provider: super::defaults::tunnel_provider(),
            timeout_secs: super::defaults::tunnel_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TunnelProvider {
    /// SSH reverse tunnel, no local install required
    #[serde(rename = "localhost.run")]
    LocalhostRun,
    /// Quick tunnel through the `cloudflared` binary
    #[serde(rename = "cloudflare")]
    Cloudflare,
    /// Tunnel through the `ngrok` agent, authenticated via NGROK_AUTHTOKEN
    #[serde(rename = "ngrok")]
    Ngrok,
}

impl FromStr for TunnelProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "localhost.run" | "localhostrun" | "localhost-run" => Ok(TunnelProvider::LocalhostRun),
            "cloudflare" | "cf" => Ok(TunnelProvider::Cloudflare),
            "ngrok" => Ok(TunnelProvider::Ngrok),
            _ => Err(format!("Unknown tunnel provider: {}", s)),
        }
    }
}

impl fmt::Display for TunnelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TunnelProvider::LocalhostRun => "localhost.run",
            TunnelProvider::Cloudflare => "cloudflare",
            TunnelProvider::Ngrok => "ngrok",
        };
        f.write_str(name)
    }
}
