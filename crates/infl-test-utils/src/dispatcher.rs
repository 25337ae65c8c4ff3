//! In-memory [`Dispatcher`] for synchronizer tests.
//!
//! Holds components, constants and the system/contract registry the way the
//! on-chain dispatcher does: component reads of unwritten records fail,
//! scalar reads of unwritten names return zero, and writes only take effect
//! once their transaction is confirmed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use infl_codec::{Felt, RecordKind, short_string};
use infl_core::dispatcher::{entrypoint, system};
use infl_core::{Call, DispatchError, Dispatcher, TxHash};

/// One interaction with the dispatcher, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    Call { entrypoint: String, calldata: Vec<Felt> },
    Invoke { entrypoint: String, calldata: Vec<Felt>, tx: Option<TxHash> },
    Confirm { tx: TxHash },
}

#[derive(Default)]
struct State {
    components: HashMap<(Felt, Felt), Vec<Felt>>,
    constants: HashMap<Felt, Felt>,
    systems: HashMap<Felt, Felt>,
    contracts: HashMap<Felt, Felt>,
    pending: HashMap<TxHash, Call>,
    journal: Vec<JournalEntry>,
    failing_reads: u32,
    failing_invokes: u32,
    reverting_confirms: u32,
    hanging_confirms: u32,
    next_tx: u64,
}

/// In-memory ledger implementing [`Dispatcher`].
#[derive(Default)]
pub struct MemoryDispatcher {
    state: Mutex<State>,
}

fn key(name: &str) -> Felt {
    short_string(name).unwrap()
}

impl MemoryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Stored encoding of a component, without the span length.
    pub fn component(&self, kind: RecordKind, id: u64) -> Option<Vec<Felt>> {
        self.lock()
            .components
            .get(&(key(kind.component_name()), Felt::from(id)))
            .cloned()
    }

    pub fn set_component(&self, kind: RecordKind, id: u64, encoded: Vec<Felt>) {
        self.lock()
            .components
            .insert((key(kind.component_name()), Felt::from(id)), encoded);
    }

    pub fn constant(&self, name: &str) -> Option<Felt> {
        self.lock().constants.get(&key(name)).copied()
    }

    pub fn set_constant(&self, name: &str, value: Felt) {
        self.lock().constants.insert(key(name), value);
    }

    pub fn system(&self, name: &str) -> Option<Felt> {
        self.lock().systems.get(&key(name)).copied()
    }

    pub fn contract(&self, name: &str) -> Option<Felt> {
        self.lock().contracts.get(&key(name)).copied()
    }

    /// The next `n` reads fail with a transport error.
    pub fn fail_next_reads(&self, n: u32) {
        self.lock().failing_reads = n;
    }

    /// The next `n` invocations are rejected before submission.
    pub fn fail_next_invokes(&self, n: u32) {
        self.lock().failing_invokes = n;
    }

    /// The next `n` confirmations report a reverted transaction.
    pub fn revert_next_confirms(&self, n: u32) {
        self.lock().reverting_confirms = n;
    }

    /// The next `n` confirmations never complete.
    pub fn hang_next_confirms(&self, n: u32) {
        self.lock().hanging_confirms = n;
    }

    pub fn journal(&self) -> Vec<JournalEntry> {
        self.lock().journal.clone()
    }

    /// Number of invocations, successful or not.
    pub fn invocations(&self) -> usize {
        self.lock()
            .journal
            .iter()
            .filter(|e| matches!(e, JournalEntry::Invoke { .. }))
            .count()
    }

    fn read(state: &State, entrypoint: &str, calldata: &[Felt]) -> Result<Vec<Felt>, DispatchError> {
        let not_found = || DispatchError::NotFound {
            entrypoint: entrypoint.to_string(),
            message: "value not set".into(),
        };
        let registry = match entrypoint {
            entrypoint::CONSTANT => &state.constants,
            entrypoint::SYSTEM => &state.systems,
            entrypoint::CONTRACT => &state.contracts,
            entrypoint::RUN_SYSTEM => {
                let [name, _, kind, _, id] = calldata else {
                    return Err(not_found());
                };
                if *name != key(system::READ_COMPONENT) {
                    return Err(not_found());
                }
                let items = state.components.get(&(*kind, *id)).ok_or_else(not_found)?;
                let mut span = vec![Felt::from(items.len() as u64)];
                span.extend_from_slice(items);
                return Ok(span);
            }
            _ => return Err(not_found()),
        };
        let name = calldata.first().ok_or_else(not_found)?;
        Ok(vec![registry.get(name).copied().unwrap_or(Felt::ZERO)])
    }

    fn apply(state: &mut State, call: Call) {
        match (call.entrypoint, call.calldata.as_slice()) {
            (entrypoint::RUN_SYSTEM, [name, _, kind, _, id, encoded @ ..])
                if *name == key(system::WRITE_COMPONENT) =>
            {
                state.components.insert((*kind, *id), encoded.to_vec());
            }
            (entrypoint::REGISTER_CONSTANT, [name, value]) => {
                state.constants.insert(*name, *value);
            }
            (entrypoint::REGISTER_SYSTEM, [name, value]) => {
                state.systems.insert(*name, *value);
            }
            (entrypoint::REGISTER_CONTRACT, [name, value]) => {
                state.contracts.insert(*name, *value);
            }
            (other, _) => panic!("MemoryDispatcher cannot apply {other}"),
        }
    }
}

#[async_trait]
impl Dispatcher for MemoryDispatcher {
    async fn call(&self, entrypoint: &str, calldata: Vec<Felt>) -> Result<Vec<Felt>, DispatchError> {
        let mut state = self.lock();
        state.journal.push(JournalEntry::Call {
            entrypoint: entrypoint.to_string(),
            calldata: calldata.clone(),
        });
        if state.failing_reads > 0 {
            state.failing_reads -= 1;
            return Err(DispatchError::Transport("connection reset".into()));
        }
        Self::read(&state, entrypoint, &calldata)
    }

    async fn invoke(&self, entrypoint: &str, calldata: Vec<Felt>) -> Result<TxHash, DispatchError> {
        let mut state = self.lock();
        if state.failing_invokes > 0 {
            state.failing_invokes -= 1;
            state.journal.push(JournalEntry::Invoke {
                entrypoint: entrypoint.to_string(),
                calldata,
                tx: None,
            });
            return Err(DispatchError::Rejected {
                reason: "insufficient max fee".into(),
            });
        }

        let known = [
            entrypoint::RUN_SYSTEM,
            entrypoint::REGISTER_CONSTANT,
            entrypoint::REGISTER_SYSTEM,
            entrypoint::REGISTER_CONTRACT,
        ];
        let Some(entrypoint) = known.into_iter().find(|e| *e == entrypoint) else {
            return Err(DispatchError::Rejected {
                reason: format!("unknown entrypoint {entrypoint}"),
            });
        };

        state.next_tx += 1;
        let tx = Felt::from(0x1000 + state.next_tx);
        state.journal.push(JournalEntry::Invoke {
            entrypoint: entrypoint.to_string(),
            calldata: calldata.clone(),
            tx: Some(tx),
        });
        state.pending.insert(tx, Call::new(entrypoint, calldata));
        Ok(tx)
    }

    async fn wait_for_transaction(&self, tx: TxHash) -> Result<(), DispatchError> {
        let hang = {
            let mut state = self.lock();
            state.journal.push(JournalEntry::Confirm { tx });
            if state.hanging_confirms > 0 {
                state.hanging_confirms -= 1;
                state.pending.remove(&tx);
                true
            } else if state.reverting_confirms > 0 {
                state.reverting_confirms -= 1;
                state.pending.remove(&tx);
                return Err(DispatchError::Reverted {
                    tx,
                    reason: "Failure reason: 0x756e617574686f72697a6564".into(),
                });
            } else {
                let call = state.pending.remove(&tx).ok_or_else(|| {
                    DispatchError::Transport(format!("unknown transaction {tx:#x}"))
                })?;
                Self::apply(&mut state, call);
                false
            }
        };

        if hang {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}
