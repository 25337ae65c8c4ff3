//! Dispatcher over a Starknet JSON-RPC node

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use infl_meta::ResolvedAccount;
use starknet::accounts::{Account, AccountError, ConnectedAccount, ExecutionEncoding, SingleOwnerAccount};
use starknet::core::types::{
    BlockId, BlockTag, Call as InvokeCall, ExecutionResult, Felt, FunctionCall, StarknetError,
};
use starknet::core::utils::get_selector_from_name;
use starknet::providers::jsonrpc::{HttpTransport, JsonRpcClient};
use starknet::providers::{Provider, ProviderError, Url};
use starknet::signers::{LocalWallet, SigningKey};
use tracing::debug;

use super::{Dispatcher, TxHash};
use crate::DispatchError;

type RpcClient = JsonRpcClient<HttpTransport>;
type RpcAccount = SingleOwnerAccount<RpcClient, LocalWallet>;

enum Connection {
    /// Calls only; every invocation is rejected
    ReadOnly(RpcClient),
    Signing(RpcAccount),
}

impl Connection {
    fn provider(&self) -> &RpcClient {
        match self {
            Connection::ReadOnly(provider) => provider,
            Connection::Signing(account) => account.provider(),
        }
    }
}

/// Dispatcher contract reached through a node, signing with a single-owner
/// account, or read-only when no account is needed.
pub struct StarknetDispatcher {
    address: Felt,
    connection: Connection,
    poll_interval: Duration,
}

impl fmt::Debug for StarknetDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let account = match &self.connection {
            Connection::ReadOnly(_) => "read-only".to_string(),
            Connection::Signing(account) => format!("{:#x}", account.address()),
        };
        f.debug_struct("StarknetDispatcher")
            .field("address", &format!("{:#x}", self.address))
            .field("account", &account)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl StarknetDispatcher {
    /// Connect to `rpc_url` and fetch the chain id the account signs for.
    pub async fn connect(
        rpc_url: &str,
        address: Felt,
        signer: &ResolvedAccount,
        poll_interval: Duration,
    ) -> Result<Self, DispatchError> {
        let provider = client(rpc_url)?;
        let chain_id = provider.chain_id().await.map_err(transport)?;

        let wallet = LocalWallet::from(SigningKey::from_secret_scalar(signer.private_key));
        let mut account = SingleOwnerAccount::new(
            provider,
            wallet,
            signer.address,
            chain_id,
            ExecutionEncoding::New,
        );
        account.set_block_id(BlockId::Tag(BlockTag::Pending));

        debug!(rpc_url, account = %signer.name, "Connected to dispatcher");
        Ok(Self {
            address,
            connection: Connection::Signing(account),
            poll_interval,
        })
    }

    /// Connect without a signer, for comparisons that never write.
    ///
    /// The node is queried once so an unreachable endpoint fails here
    /// rather than on the first read.
    pub async fn read_only(
        rpc_url: &str,
        address: Felt,
        poll_interval: Duration,
    ) -> Result<Self, DispatchError> {
        let provider = client(rpc_url)?;
        provider.chain_id().await.map_err(transport)?;

        debug!(rpc_url, "Connected to dispatcher (read-only)");
        Ok(Self {
            address,
            connection: Connection::ReadOnly(provider),
            poll_interval,
        })
    }
}

#[async_trait]
impl Dispatcher for StarknetDispatcher {
    async fn call(&self, entrypoint: &str, calldata: Vec<Felt>) -> Result<Vec<Felt>, DispatchError> {
        let request = FunctionCall {
            contract_address: self.address,
            entry_point_selector: selector(entrypoint)?,
            calldata,
        };

        self.connection
            .provider()
            .call(request, BlockId::Tag(BlockTag::Pending))
            .await
            .map_err(|err| {
                if matches!(err, ProviderError::StarknetError(StarknetError::ContractError(_))) {
                    DispatchError::NotFound {
                        entrypoint: entrypoint.to_string(),
                        message: err.to_string(),
                    }
                } else {
                    transport(err)
                }
            })
    }

    async fn invoke(&self, entrypoint: &str, calldata: Vec<Felt>) -> Result<TxHash, DispatchError> {
        let call = InvokeCall {
            to: self.address,
            selector: selector(entrypoint)?,
            calldata,
        };

        let account = match &self.connection {
            Connection::Signing(account) => account,
            Connection::ReadOnly(_) => {
                return Err(DispatchError::Rejected {
                    reason: format!("'{entrypoint}' needs a signing account; connected read-only"),
                });
            }
        };

        let result = account
            .execute_v3(vec![call])
            .send()
            .await
            .map_err(|err| match err {
                AccountError::Provider(ProviderError::StarknetError(e)) => DispatchError::Rejected {
                    reason: e.to_string(),
                },
                AccountError::Provider(other) => transport(other),
                other => DispatchError::Rejected {
                    reason: other.to_string(),
                },
            })?;

        Ok(result.transaction_hash)
    }

    async fn wait_for_transaction(&self, tx: TxHash) -> Result<(), DispatchError> {
        loop {
            match self.connection.provider().get_transaction_receipt(tx).await {
                Ok(receipt) => {
                    return match receipt.receipt.execution_result() {
                        ExecutionResult::Succeeded => Ok(()),
                        ExecutionResult::Reverted { reason } => Err(DispatchError::Reverted {
                            tx,
                            reason: reason.clone(),
                        }),
                    };
                }
                Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {
                    debug!(tx = %format!("{tx:#x}"), "Transaction not yet received");
                }
                Err(err) => return Err(transport(err)),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn client(rpc_url: &str) -> Result<RpcClient, DispatchError> {
    let url = Url::parse(rpc_url)
        .map_err(|e| DispatchError::Transport(format!("invalid RPC URL '{rpc_url}': {e}")))?;
    Ok(JsonRpcClient::new(HttpTransport::new(url)))
}

fn selector(entrypoint: &str) -> Result<Felt, DispatchError> {
    get_selector_from_name(entrypoint)
        .map_err(|e| DispatchError::Transport(format!("invalid entrypoint '{entrypoint}': {e}")))
}

fn transport(err: ProviderError) -> DispatchError {
    DispatchError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::entrypoint;

    fn read_only_dispatcher() -> StarknetDispatcher {
        StarknetDispatcher {
            address: Felt::from(0x100u64),
            connection: Connection::ReadOnly(client("http://127.0.0.1:1/rpc").unwrap()),
            poll_interval: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn read_only_rejects_invocations_without_contacting_the_node() {
        let dispatcher = read_only_dispatcher();
        let err = dispatcher
            .invoke(entrypoint::REGISTER_CONSTANT, vec![Felt::ONE, Felt::TWO])
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Rejected { .. }));
        assert!(format!("{dispatcher:?}").contains("read-only"));
    }

    #[tokio::test]
    async fn read_only_connect_fails_on_unreachable_node() {
        let err = StarknetDispatcher::read_only(
            "http://127.0.0.1:1/rpc",
            Felt::from(0x100u64),
            Duration::from_millis(10),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::Transport(_)));
    }

    #[test]
    fn invalid_url_is_a_transport_error() {
        assert!(matches!(client("not a url"), Err(DispatchError::Transport(_))));
    }
}
