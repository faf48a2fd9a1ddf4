use super::errors::ConfigError;
use super::models::Config;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the file-based part of the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl Config {
    /// Loads the TOML file when present. A missing file yields the defaults;
    /// the file is never created because the content root is served publicly.
    pub async fn from_file_or_default<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Self, ConfigSource), ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok((Config::default(), ConfigSource::Defaults));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Applies process environment overrides on top of the loaded values.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_overrides(|key| std::env::var(key).ok())
    }

    /// `USE_NGROK` and `USE_TUNNEL` only disable tunneling for the exact
    /// value `false`; `USE_TUNNEL` wins when both are set.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PORT") {
            self.server.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PORT".to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup("HOST") {
            self.server.host = value;
        }

        if let Some(value) = lookup("ROOT_DIR") {
            self.server.root_dir = value;
        }

        for key in ["USE_NGROK", "USE_TUNNEL"] {
            if let Some(value) = lookup(key) {
                self.tunnel.enabled = value != "false";
            }
        }

        if let Some(value) = lookup("TUNNEL_PROVIDER") {
            self.tunnel.provider = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "TUNNEL_PROVIDER".to_string(),
                value: value.clone(),
            })?;
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.scan_max_depth == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.scan_max_depth must be at least 1".to_string(),
            ));
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TunnelProvider;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cache_max_age_secs, 3600);
        assert!(config.tunnel.enabled);
        assert_eq!(config.tunnel.provider, TunnelProvider::LocalhostRun);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[("PORT", "9090"), ("TUNNEL_PROVIDER", "cloudflare")]))
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.tunnel.provider, TunnelProvider::Cloudflare);
        assert_eq!(config.server.local_url(), "http://localhost:9090");
    }

    #[test]
    fn test_tunnel_flag_only_disabled_by_exact_false() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("USE_NGROK", "FALSE")])).unwrap();
        assert!(config.tunnel.enabled);

        config.apply_env_overrides(env(&[("USE_NGROK", "false")])).unwrap();
        assert!(!config.tunnel.enabled);

        config
            .apply_env_overrides(env(&[("USE_NGROK", "false"), ("USE_TUNNEL", "true")]))
            .unwrap();
        assert!(config.tunnel.enabled);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "PORT"));
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let (config, source) = Config::from_file_or_default(temp.path().join("filedock.toml"))
            .await
            .unwrap();

        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.server.port, 8080);
        assert!(!temp.path().join("filedock.toml").exists());
    }

    #[tokio::test]
    async fn test_partial_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("filedock.toml");
        std::fs::write(
            &path,
            "[server]\nport = 3000\n\n[tunnel]\nprovider = \"ngrok\"\n",
        )
        .unwrap();

        let (config, source) = Config::from_file_or_default(&path).await.unwrap();

        assert_eq!(source, ConfigSource::File(path));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.tunnel.enabled);
        assert_eq!(config.tunnel.provider, TunnelProvider::Ngrok);
    }
}
