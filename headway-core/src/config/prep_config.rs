use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// run parameters for one batch invocation of the pipeline. constructed
/// once, validated at construction, and passed read-only into each entry
/// point; no component reads configuration from ambient state.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PrepConfig {
    /// shortname of the transit agency whose snapshot is processed (e.g. 'ttc')
    pub agency_tag: String,
    /// maximum great-circle distance in meters for two stops to be
    /// recorded as a connection pair
    pub cluster_distance_meters: f64,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            agency_tag: String::from("ttc"),
            cluster_distance_meters: 100.0,
        }
    }
}

impl PrepConfig {
    pub fn new(agency_tag: &str, cluster_distance_meters: f64) -> Result<PrepConfig, ConfigError> {
        PrepConfig {
            agency_tag: agency_tag.to_string(),
            cluster_distance_meters,
        }
        .validated()
    }

    /// checks the invariants no downstream component re-checks: the
    /// cluster distance gates the neighborhood threshold search, which
    /// does not terminate for non-positive or non-finite values.
    pub fn validated(self) -> Result<PrepConfig, ConfigError> {
        if !self.cluster_distance_meters.is_finite() || self.cluster_distance_meters <= 0.0 {
            return Err(ConfigError::InvalidClusterDistance(
                self.cluster_distance_meters,
            ));
        }
        if self.agency_tag.is_empty() {
            return Err(ConfigError::EmptyAgencyTag);
        }
        Ok(self)
    }
}

impl TryFrom<&String> for PrepConfig {
    type Error = ConfigError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let config: PrepConfig = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f)
                .map_err(|e| ConfigError::ConfigurationError(format!("failure reading {f}: {e}")))?;
            toml::from_str(&s)
                .map_err(|e| ConfigError::ConfigurationError(format!("failure decoding {f}: {e}")))?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f)
                .map_err(|e| ConfigError::ConfigurationError(format!("failure reading {f}: {e}")))?;
            serde_json::from_str(&s)
                .map_err(|e| ConfigError::ConfigurationError(format!("failure decoding {f}: {e}")))?
        } else {
            return Err(ConfigError::UnsupportedFileType(f.to_string()));
        };
        config.validated()
    }
}
