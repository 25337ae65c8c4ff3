//! Per-network settings and account resolution

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use infl_codec::{Felt, parse_felt};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One `[networks.<name>]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Filled in from the table key when the manifest is loaded
    #[serde(skip)]
    pub name: String,
    /// Starknet JSON-RPC endpoint
    pub rpc_url: String,
    /// Deployment manifest, relative to the manifest file
    pub deployments: PathBuf,
    #[serde(default)]
    pub default_account: Option<String>,
    /// Contracts registered by `register --only contracts`
    #[serde(default)]
    pub contracts: Vec<String>,
    /// Systems registered by `register --only systems`
    #[serde(default)]
    pub systems: Vec<String>,
    #[serde(default)]
    pub accounts: BTreeMap<String, AccountConfig>,
}

/// Where an account's signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub address: String,
    /// Environment variable holding the private key
    #[serde(default)]
    pub private_key_env: Option<String>,
    /// Inline key; only sensible for local devnets
    #[serde(default)]
    pub private_key: Option<String>,
}

/// An account with its address and key parsed.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub name: String,
    pub address: Felt,
    pub private_key: Felt,
}

impl fmt::Debug for ResolvedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAccount")
            .field("name", &self.name)
            .field("address", &format!("{:#x}", self.address))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl NetworkConfig {
    /// Pick the account to sign with: `requested` wins over `default_account`.
    pub fn account_name<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str> {
        let name = requested
            .or(self.default_account.as_deref())
            .ok_or_else(|| Error::NoAccount {
                network: self.name.clone(),
            })?;
        if !self.accounts.contains_key(name) {
            return Err(Error::AccountNotFound {
                network: self.name.clone(),
                account: name.to_string(),
            });
        }
        Ok(name)
    }

    /// Resolve an account, reading its key from the process environment.
    pub fn resolve_account(&self, requested: Option<&str>) -> Result<ResolvedAccount> {
        self.resolve_account_with(requested, |var| std::env::var(var).ok())
    }

    /// Resolve an account with a custom environment lookup.
    pub fn resolve_account_with<F>(&self, requested: Option<&str>, lookup: F) -> Result<ResolvedAccount>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = self.account_name(requested)?;
        let account = &self.accounts[name];

        let raw_key = match (&account.private_key_env, &account.private_key) {
            (Some(var), _) => lookup(var).ok_or_else(|| Error::MissingPrivateKey {
                account: name.to_string(),
                reason: format!("environment variable {var} is not set"),
            })?,
            (None, Some(key)) => key.clone(),
            (None, None) => {
                return Err(Error::MissingPrivateKey {
                    account: name.to_string(),
                    reason: "neither private_key_env nor private_key is set".into(),
                });
            }
        };

        Ok(ResolvedAccount {
            name: name.to_string(),
            address: parse_felt(&account.address)?,
            private_key: parse_felt(&raw_key)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devnet() -> NetworkConfig {
        let mut network: NetworkConfig = toml::from_str(
            r#"
            rpc_url = "http://127.0.0.1:5050/rpc"
            deployments = "deployments/devnet.json"
            default_account = "predeployed"

            [accounts.predeployed]
            address = "0x64b4"
            private_key = "0x71d7"

            [accounts.admin]
            address = "0x1"
            private_key_env = "INFL_ADMIN_KEY"
            "#,
        )
        .unwrap();
        network.name = "devnet".into();
        network
    }

    #[test]
    fn default_account_is_used_when_none_requested() {
        let account = devnet().resolve_account_with(None, |_| None).unwrap();
        assert_eq!(account.name, "predeployed");
        assert_eq!(account.address, Felt::from(0x64b4u64));
        assert_eq!(account.private_key, Felt::from(0x71d7u64));
    }

    #[test]
    fn requested_account_reads_key_from_env() {
        let account = devnet()
            .resolve_account_with(Some("admin"), |var| {
                (var == "INFL_ADMIN_KEY").then(|| "0x2".to_string())
            })
            .unwrap();
        assert_eq!(account.private_key, Felt::from(2u64));
    }

    #[test]
    fn unset_env_var_is_an_error() {
        let result = devnet().resolve_account_with(Some("admin"), |_| None);
        assert!(matches!(result, Err(Error::MissingPrivateKey { .. })));
    }

    #[test]
    fn unknown_account_is_an_error() {
        let result = devnet().resolve_account_with(Some("nobody"), |_| None);
        assert!(matches!(result, Err(Error::AccountNotFound { .. })));
    }

    #[test]
    fn debug_output_hides_private_key() {
        let account = devnet().resolve_account_with(None, |_| None).unwrap();
        let printed = format!("{account:?}");
        assert!(printed.contains("redacted"));
        assert!(!printed.contains("71d7"));
    }
}
