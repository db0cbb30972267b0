//! Store configuration loaded from the data directory.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration stored in config.yaml.
///
/// The file is entirely optional: with no config (or a broken one) the
/// tracker runs against the local CSV files alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Remote spreadsheet settings; absent means local-only operation
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

/// Connection settings for the remote spreadsheet document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the spreadsheet document's values API
    pub endpoint: String,
    pub credentials: ServiceCredentials,
}

/// Service-account credentials presented to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCredentials {
    /// Identity the token was issued to
    pub account: String,
    /// Bearer token sent on every request
    pub token: String,
    /// Access scopes the token covers
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_scopes() -> Vec<String> {
    vec![
        "https://www.googleapis.com/auth/spreadsheets".to_string(),
        "https://www.googleapis.com/auth/drive".to_string(),
    ]
}

impl TrackerConfig {
    /// Load the configuration from a YAML file.
    ///
    /// A missing, unreadable or malformed file is not an error; it just
    /// means local-only operation.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file at {}, running with local files only", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Could not parse {}: {}. Running with local files only.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Could not read {}: {}. Running with local files only.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Remote settings, provided they are complete enough to use.
    pub fn remote_if_enabled(&self) -> Option<&RemoteConfig> {
        self.remote.as_ref().filter(|remote| {
            !remote.endpoint.trim().is_empty() && !remote.credentials.token.trim().is_empty()
        })
    }
}
