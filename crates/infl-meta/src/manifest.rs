//! Top-level manifest: sync settings, networks and the catalog location

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::deployments::Deployments;
use crate::network::NetworkConfig;
use crate::settings::SyncSettings;
use crate::store::ConfigStore;
use crate::{Error, Result};

/// Default manifest file name, looked up in the working directory.
pub const DEFAULT_MANIFEST: &str = "influence.toml";

/// `[catalog]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRef {
    pub path: PathBuf,
}

impl Default for CatalogRef {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalog.toml"),
        }
    }
}

/// Parsed manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub catalog: CatalogRef,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Manifest {
    /// Load and validate a manifest; relative paths inside it resolve
    /// against the manifest's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut manifest: Manifest = ConfigStore::new().load(path)?;
        manifest.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        for (name, network) in manifest.networks.iter_mut() {
            network.name = name.clone();
        }
        manifest.validate(path)?;
        tracing::debug!(
            path = %path.display(),
            networks = manifest.networks.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.sync.max_attempts == 0 {
            return Err(Error::InvalidConfig {
                path: path.to_path_buf(),
                message: "sync.max_attempts must be at least 1".into(),
            });
        }
        for network in self.networks.values() {
            let Some(account) = &network.default_account else {
                continue;
            };
            if !network.accounts.contains_key(account) {
                return Err(Error::InvalidConfig {
                    path: path.to_path_buf(),
                    message: format!(
                        "networks.{}.default_account '{account}' is not a configured account",
                        network.name
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig> {
        self.networks.get(name).ok_or_else(|| Error::NetworkNotFound {
            name: name.to_string(),
            available: self.networks.keys().cloned().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Load and validate the desired-state catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.resolve(&self.catalog.path);
        let catalog: Catalog = ConfigStore::new().load(&path)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the deployment manifest of a network.
    pub fn load_deployments(&self, network: &NetworkConfig) -> Result<Deployments> {
        ConfigStore::new().load(&self.resolve(&network.deployments))
    }
}
