use crate::error::{CoreError, CoreResult};
use crate::xray::model::{FilterBy, SortBy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::macros::format_description;
use time::UtcOffset;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "MEDLENS_CONFIG";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Offset used when formatting report timestamps, e.g. `+05:30`.
    pub display_utc_offset: String,
    pub default_pathology_sort: SortBy,
    pub default_pathology_filter: FilterBy,
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_utc_offset: "+05:30".to_string(),
            default_pathology_sort: SortBy::Probability,
            default_pathology_filter: FilterBy::All,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&raw).map_err(|e| {
            CoreError::ConfigError(format!("{}: {}", path.display(), e))
        })?;
        config.utc_offset()?;
        Ok(config)
    }

    /// Defaults, or the file named by `MEDLENS_CONFIG` when set.
    pub fn from_env() -> CoreResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn utc_offset(&self) -> CoreResult<UtcOffset> {
        UtcOffset::parse(
            &self.display_utc_offset,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .map_err(|e| {
            CoreError::ConfigError(format!(
                "invalid display_utc_offset {:?}: {}",
                self.display_utc_offset, e
            ))
        })
    }
}
