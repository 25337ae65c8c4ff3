//! Manifest loading and dispatcher connection for a single invocation

use std::path::Path;
use std::sync::Arc;

use infl_core::{Dispatcher, RetryPolicy, StarknetDispatcher, SyncOptions, Synchronizer};
use infl_meta::{Catalog, Deployments, Manifest, NetworkConfig};
use tracing::debug;

use crate::cli::{Cli, Target};
use crate::error::{CliError, Result};

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct AppContext {
    pub manifest: Manifest,
    pub policy: RetryPolicy,
}

impl AppContext {
    /// Load the manifest named by `--config` and apply command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::from_path(&cli.config, cli.max_attempts, cli.confirm_timeout)
    }

    pub fn from_path(
        path: &Path,
        max_attempts: Option<u32>,
        confirm_timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let mut manifest = Manifest::load(path)?;
        if let Some(attempts) = max_attempts {
            if attempts == 0 {
                return Err(CliError::user("--max-attempts must be at least 1"));
            }
            manifest.sync.max_attempts = attempts;
        }
        if let Some(secs) = confirm_timeout_secs {
            manifest.sync.confirm_timeout_secs = secs;
        }
        let policy = RetryPolicy::from(&manifest.sync);
        debug!(?policy, "Retry policy");
        Ok(Self { manifest, policy })
    }

    pub fn network(&self, target: &Target) -> Result<&NetworkConfig> {
        Ok(self.manifest.network(&target.network)?)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Ok(self.manifest.load_catalog()?)
    }

    pub fn deployments(&self, network: &NetworkConfig) -> Result<Deployments> {
        Ok(self.manifest.load_deployments(network)?)
    }

    /// Connect to the network's node. Dry runs connect read-only and never
    /// resolve an account or its key.
    pub async fn connect(&self, target: &Target, dry_run: bool) -> Result<Arc<dyn Dispatcher>> {
        let network = self.network(target)?;
        let deployments = self.deployments(network)?;
        let address = deployments.dispatcher_address()?;
        let poll_interval = self.manifest.sync.poll_interval();

        let dispatcher = if dry_run {
            StarknetDispatcher::read_only(&network.rpc_url, address, poll_interval).await?
        } else {
            let account = network.resolve_account(target.account.as_deref())?;
            StarknetDispatcher::connect(&network.rpc_url, address, &account, poll_interval).await?
        };
        Ok(Arc::new(dispatcher))
    }

    pub fn synchronizer(&self, dispatcher: Arc<dyn Dispatcher>, dry_run: bool) -> Synchronizer {
        Synchronizer::new(dispatcher, self.policy).with_options(SyncOptions { dry_run })
    }
}
