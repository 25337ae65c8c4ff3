//! Access to the on-chain dispatcher contract
//!
//! The [`Dispatcher`] trait is the only seam between the synchronizer and the
//! chain. [`StarknetDispatcher`] talks to a JSON-RPC node; tests use the
//! in-memory implementation from `infl-test-utils`.

mod rpc;

pub use rpc::StarknetDispatcher;

use async_trait::async_trait;
use infl_codec::{Felt, RecordKind, short_string};

use crate::{DispatchError, Result};

/// Transaction hash returned by [`Dispatcher::invoke`]
pub type TxHash = Felt;

/// Dispatcher entrypoints used by the admin tooling.
pub mod entrypoint {
    pub const RUN_SYSTEM: &str = "run_system";
    pub const CONSTANT: &str = "constant";
    pub const REGISTER_CONSTANT: &str = "register_constant";
    pub const SYSTEM: &str = "system";
    pub const REGISTER_SYSTEM: &str = "register_system";
    pub const CONTRACT: &str = "contract";
    pub const REGISTER_CONTRACT: &str = "register_contract";
}

/// Systems run through `run_system` to access components.
pub mod system {
    pub const READ_COMPONENT: &str = "ReadComponent";
    pub const WRITE_COMPONENT: &str = "WriteComponent";
}

/// Remote ledger holding components, constants and the system/contract registry.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Read-only call. Fails with [`DispatchError::NotFound`] when the
    /// contract call itself fails.
    async fn call(&self, entrypoint: &str, calldata: Vec<Felt>) -> std::result::Result<Vec<Felt>, DispatchError>;

    /// Submit a transaction and return its hash without waiting.
    async fn invoke(&self, entrypoint: &str, calldata: Vec<Felt>) -> std::result::Result<TxHash, DispatchError>;

    /// Block until `tx` is accepted, or fail if it reverted.
    async fn wait_for_transaction(&self, tx: TxHash) -> std::result::Result<(), DispatchError>;
}

/// One entrypoint invocation with its serialized arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub entrypoint: &'static str,
    pub calldata: Vec<Felt>,
}

impl Call {
    pub fn new(entrypoint: &'static str, calldata: Vec<Felt>) -> Self {
        Self {
            entrypoint,
            calldata,
        }
    }

    /// `run_system(name, calldata)` with `calldata` serialized as a span.
    pub fn run_system(system: &str, calldata: Vec<Felt>) -> Result<Self> {
        let mut serialized = Vec::with_capacity(calldata.len() + 2);
        serialized.push(short_string(system)?);
        serialized.push(Felt::from(calldata.len() as u64));
        serialized.extend(calldata);
        Ok(Self::new(entrypoint::RUN_SYSTEM, serialized))
    }

    /// `ReadComponent` for a single-key component.
    pub fn read_component(kind: RecordKind, id: u64) -> Result<Self> {
        Self::run_system(
            system::READ_COMPONENT,
            vec![short_string(kind.component_name())?, Felt::ONE, Felt::from(id)],
        )
    }

    /// `WriteComponent` for a single-key component.
    pub fn write_component(kind: RecordKind, id: u64, encoded: &[Felt]) -> Result<Self> {
        let mut calldata = vec![short_string(kind.component_name())?, Felt::ONE, Felt::from(id)];
        calldata.extend_from_slice(encoded);
        Self::run_system(system::WRITE_COMPONENT, calldata)
    }
}
