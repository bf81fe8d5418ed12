//! Tracking configuration file, e.g. `reltrack.toml`:
//!
//! ```toml
//! [types.post]
//! only = ["comments", "author"]
//!
//! [types.user]
//! except = "sessions"
//! ```

use crate::error::{ModelError, ModelResult};
use crate::policy::TrackingOptions;
use crate::registry::TypeRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Per-type tracking options read from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub types: BTreeMap<String, TrackingOptions>,
}

impl TrackingConfig {
    pub fn from_toml_str(contents: &str) -> ModelResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads configuration from `path`. A missing file yields an empty config.
    pub fn load_from(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No tracking config found at {:?}, using declared defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(types = config.types.len(), "Loaded tracking config from {:?}", path);
        Ok(config)
    }

    /// Registers every configured type's options. Fails on the first type the
    /// registry does not know, leaving earlier types applied.
    pub fn apply(&self, registry: &mut TypeRegistry) -> ModelResult<()> {
        for (document_type, options) in &self.types {
            registry.track_relations(document_type, options)?;
        }
        Ok(())
    }
}
