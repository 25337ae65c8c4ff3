//! [`TestWorkspace`]: manifest, catalog and deployments in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fixtures::SAMPLE_CATALOG;

/// Deployment manifest matching [`TestWorkspace::manifest`]'s network.
pub const SAMPLE_DEPLOYMENTS: &str = r#"{
  "dispatcher": "0x100",
  "systems": { "ReadComponent": "0x200", "WriteComponent": "0x201" },
  "contracts": { "Asteroid": "0x300" }
}"#;

/// A temporary directory laid out like an admin checkout.
///
/// ```rust,no_run
/// use infl_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// assert!(ws.manifest_path().exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Workspace with the sample catalog and a `devnet` network.
    pub fn new() -> Self {
        Self::with_catalog(SAMPLE_CATALOG)
    }

    pub fn with_catalog(catalog: &str) -> Self {
        let ws = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        ws.write("influence.toml", &Self::manifest("http://127.0.0.1:1/rpc"));
        ws.write("catalog.toml", catalog);
        ws.write("deployments/devnet.json", SAMPLE_DEPLOYMENTS);
        ws
    }

    /// Manifest text with a single `devnet` network at `rpc_url`.
    pub fn manifest(rpc_url: &str) -> String {
        format!(
            r#"[sync]
max_attempts = 2
confirm_timeout_secs = 5
poll_interval_ms = 10
backoff = {{ kind = "none" }}

[networks.devnet]
rpc_url = "{rpc_url}"
deployments = "deployments/devnet.json"
default_account = "predeployed"
systems = ["ReadComponent", "WriteComponent"]
contracts = ["Asteroid"]

[networks.devnet.accounts.predeployed]
address = "0x64b48806902a367c8598f4f95c305e8c1a1acba5f082d294a43793113115691"
private_key = "0x71d7bb07b9a64f6f78ac4c816aff4da9"

[catalog]
path = "catalog.toml"
"#
        )
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("influence.toml")
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
