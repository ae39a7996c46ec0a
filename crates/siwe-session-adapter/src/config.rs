/*
[INPUT]:  YAML configuration file or defaults
[OUTPUT]: Session configuration and the immutable wallet configuration
[POS]:    Configuration layer - app identity, backend and chains
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{ClientConfig, DEFAULT_BASE_URL, Result, SessionError};
use crate::types::{Chain, PageLocation};

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    /// Chains the wallet may connect on
    #[serde(default = "default_chains")]
    pub chains: Vec<Chain>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            backend: BackendConfig::default(),
            chains: default_chains(),
        }
    }
}

/// Application identity and page location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// URL of the page running the sign-in flow
    #[serde(default = "default_app_url")]
    pub url: String,
    #[serde(default = "default_ssr")]
    pub ssr: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            project_id: default_project_id(),
            url: default_app_url(),
            ssr: default_ssr(),
        }
    }
}

/// Session backend location and HTTP timeouts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_app_name() -> String {
    "My RainbowKit App".to_string()
}

fn default_project_id() -> String {
    "YOUR_PROJECT_ID".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_ssr() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_chains() -> Vec<Chain> {
    Chain::ALL.to_vec()
}

impl SessionConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SessionError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| SessionError::Config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chains.is_empty() {
            return Err(SessionError::Config(
                "at least one chain must be configured".to_string(),
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(SessionError::Config("backend.timeout_secs must be > 0".to_string()));
        }
        url::Url::parse(&self.backend.base_url)?;
        PageLocation::parse(&self.app.url)?;
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.backend.timeout_secs),
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs),
        }
    }

    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig::default_config(
            &self.app.name,
            &self.app.project_id,
            &self.chains,
            self.app.ssr,
        )
    }
}

/// Chain and app identity handed to the wallet connector. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    app_name: String,
    project_id: String,
    chains: Vec<Chain>,
    ssr: bool,
}

impl WalletConfig {
    pub fn default_config(app_name: &str, project_id: &str, chains: &[Chain], ssr: bool) -> Self {
        let mut unique = Vec::with_capacity(chains.len());
        for chain in chains {
            if !unique.contains(chain) {
                unique.push(*chain);
            }
        }

        Self {
            app_name: app_name.to_string(),
            project_id: project_id.to_string(),
            chains: unique,
            ssr,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn ssr(&self) -> bool {
        self.ssr
    }

    pub fn supports_chain(&self, chain_id: u64) -> bool {
        self.chains.iter().any(|chain| chain.id() == chain_id)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        SessionConfig::default().wallet_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hardcoded_values() {
        let config = SessionConfig::default();
        assert_eq!(config.app.name, "My RainbowKit App");
        assert_eq!(config.app.project_id, "YOUR_PROJECT_ID");
        assert!(config.app.ssr);
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(
            config.chains,
            vec![Chain::Mainnet, Chain::Polygon, Chain::Optimism, Chain::Arbitrum, Chain::Base]
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
backend:
  base_url: "http://127.0.0.1:9000"
chains: [mainnet, base]
"#;
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.app.url, "http://localhost:3000");

        let wallet = config.wallet_config();
        assert!(wallet.supports_chain(8453));
        assert!(!wallet.supports_chain(137));
    }

    #[test]
    fn test_wallet_config_carries_project_id() {
        let config = SessionConfig::from_yaml_str("app:\n  project_id: abc123\n").unwrap();
        assert_eq!(config.wallet_config().project_id(), "abc123");
        assert_eq!(SessionConfig::default().wallet_config().project_id(), "YOUR_PROJECT_ID");
    }

    #[test]
    fn test_empty_chain_list_rejected() {
        let err = SessionConfig::from_yaml_str("chains: []").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_unknown_chain_rejected() {
        let err = SessionConfig::from_yaml_str("chains: [bsc]").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_wallet_config_dedups_chains() {
        let wallet = WalletConfig::default_config(
            "app",
            "pid",
            &[Chain::Base, Chain::Base, Chain::Mainnet],
            false,
        );
        assert_eq!(wallet.chains(), &[Chain::Base, Chain::Mainnet]);
        assert!(!wallet.ssr());
    }
}
