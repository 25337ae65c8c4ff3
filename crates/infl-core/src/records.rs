//! Things the synchronizer can converge: component types, constants and
//! registry entries.

use std::fmt;

use infl_codec::{ConstantDef, EncodeContext, Felt, RecordKind, TypeRecord, short_string};
use infl_meta::{Catalog, Deployments, NetworkConfig};

use crate::dispatcher::{Call, entrypoint};
use crate::{Error, Result};

/// A remotely stored entry with a desired value.
pub trait Syncable {
    /// Stored value, compared with structural equality
    type Value: PartialEq + fmt::Debug + Send + Sync;

    /// Human readable name for log lines and reports
    fn label(&self) -> String;

    /// Value the ledger should hold
    fn desired(&self) -> Result<Self::Value>;

    /// Call that reads the stored value
    fn read_call(&self) -> Result<Call>;

    /// Stored value to assume when the read reports nothing was written
    fn absent(&self) -> Self::Value;

    /// Turn a raw read result into a value comparable with [`Syncable::desired`]
    fn decode(&self, raw: Vec<Felt>) -> Result<Self::Value>;

    /// Call that stores `value`
    fn write_call(&self, value: &Self::Value) -> Result<Call>;

    /// One line per field, used to diff stored and desired values
    fn render(&self, value: &Self::Value) -> Vec<String>;
}

/// A game-entity type stored as a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    pub record: TypeRecord,
    pub ctx: EncodeContext,
}

impl ComponentRecord {
    pub fn new(record: TypeRecord, ctx: EncodeContext) -> Self {
        Self { record, ctx }
    }
}

impl Syncable for ComponentRecord {
    type Value = Vec<Felt>;

    fn label(&self) -> String {
        self.record.label()
    }

    fn desired(&self) -> Result<Vec<Felt>> {
        Ok(self.record.encode(&self.ctx)?)
    }

    fn read_call(&self) -> Result<Call> {
        Call::read_component(self.record.kind(), self.record.id())
    }

    fn absent(&self) -> Vec<Felt> {
        Vec::new()
    }

    /// `ReadComponent` returns a span: its length followed by the items.
    fn decode(&self, raw: Vec<Felt>) -> Result<Vec<Felt>> {
        let Some((len, items)) = raw.split_first() else {
            return Err(Error::MalformedResponse {
                record: self.label(),
                reason: "empty response".into(),
            });
        };
        if *len != Felt::from(items.len() as u64) {
            return Err(Error::MalformedResponse {
                record: self.label(),
                reason: format!("span length {len} but {} items", items.len()),
            });
        }
        Ok(items.to_vec())
    }

    fn write_call(&self, value: &Vec<Felt>) -> Result<Call> {
        Call::write_component(self.record.kind(), self.record.id(), value)
    }

    fn render(&self, value: &Vec<Felt>) -> Vec<String> {
        value
            .iter()
            .enumerate()
            .map(|(i, felt)| format!("[{i}] {felt}"))
            .collect()
    }
}

/// A named constant: `constant(name)` / `register_constant(name, value)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantRecord {
    pub def: ConstantDef,
}

impl ConstantRecord {
    pub fn new(def: ConstantDef) -> Self {
        Self { def }
    }
}

impl Syncable for ConstantRecord {
    type Value = Felt;

    fn label(&self) -> String {
        self.def.label()
    }

    fn desired(&self) -> Result<Felt> {
        Ok(self.def.encode()?)
    }

    fn read_call(&self) -> Result<Call> {
        Ok(Call::new(entrypoint::CONSTANT, vec![self.def.key()?]))
    }

    fn absent(&self) -> Felt {
        Felt::ZERO
    }

    fn decode(&self, raw: Vec<Felt>) -> Result<Felt> {
        single(&self.label(), raw)
    }

    fn write_call(&self, value: &Felt) -> Result<Call> {
        Ok(Call::new(
            entrypoint::REGISTER_CONSTANT,
            vec![self.def.key()?, *value],
        ))
    }

    fn render(&self, value: &Felt) -> Vec<String> {
        vec![value.to_string()]
    }
}

/// Which dispatcher registry an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// System name to class hash
    System,
    /// Contract name to address
    Contract,
}

impl RegistryKind {
    fn entrypoints(self) -> (&'static str, &'static str) {
        match self {
            RegistryKind::System => (entrypoint::SYSTEM, entrypoint::REGISTER_SYSTEM),
            RegistryKind::Contract => (entrypoint::CONTRACT, entrypoint::REGISTER_CONTRACT),
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::System => write!(f, "system"),
            RegistryKind::Contract => write!(f, "contract"),
        }
    }
}

/// A system class hash or contract address registered under a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    pub kind: RegistryKind,
    pub name: String,
    pub value: Felt,
}

impl RegistryRecord {
    pub fn system(name: impl Into<String>, class_hash: Felt) -> Self {
        Self {
            kind: RegistryKind::System,
            name: name.into(),
            value: class_hash,
        }
    }

    pub fn contract(name: impl Into<String>, address: Felt) -> Self {
        Self {
            kind: RegistryKind::Contract,
            name: name.into(),
            value: address,
        }
    }

    fn key(&self) -> Result<Felt> {
        Ok(short_string(&self.name)?)
    }
}

impl Syncable for RegistryRecord {
    type Value = Felt;

    fn label(&self) -> String {
        format!("{} {}", self.kind, self.name)
    }

    fn desired(&self) -> Result<Felt> {
        Ok(self.value)
    }

    fn read_call(&self) -> Result<Call> {
        let (read, _) = self.kind.entrypoints();
        Ok(Call::new(read, vec![self.key()?]))
    }

    fn absent(&self) -> Felt {
        Felt::ZERO
    }

    fn decode(&self, raw: Vec<Felt>) -> Result<Felt> {
        single(&self.label(), raw)
    }

    fn write_call(&self, value: &Felt) -> Result<Call> {
        let (_, write) = self.kind.entrypoints();
        Ok(Call::new(write, vec![self.key()?, *value]))
    }

    fn render(&self, value: &Felt) -> Vec<String> {
        vec![format!("{value:#x}")]
    }
}

/// Component records of the given kinds, kinds in the order given.
pub fn component_records(catalog: &Catalog, kinds: &[RecordKind]) -> Vec<ComponentRecord> {
    let ctx = catalog.encode_context();
    kinds
        .iter()
        .flat_map(|kind| catalog.records(*kind))
        .map(|record| ComponentRecord::new(record, ctx))
        .collect()
}

/// Every catalog constant, in catalog order.
pub fn constant_records(catalog: &Catalog) -> Vec<ConstantRecord> {
    catalog
        .constants
        .iter()
        .cloned()
        .map(ConstantRecord::new)
        .collect()
}

/// Registry entries for a network: its systems and contracts, valued from
/// the deployment manifest. `only` restricts to one registry and `name` to
/// a single configured entry.
pub fn registry_records(
    network: &NetworkConfig,
    deployments: &Deployments,
    only: Option<RegistryKind>,
    name: Option<&str>,
) -> Result<Vec<RegistryRecord>> {
    let wanted = |kind: RegistryKind| only.is_none_or(|k| k == kind);
    let named = |candidate: &&String| name.is_none_or(|n| n == candidate.as_str());

    let mut records = Vec::new();
    if wanted(RegistryKind::System) {
        for system in network.systems.iter().filter(named) {
            records.push(RegistryRecord::system(system, deployments.system(system)?));
        }
    }
    if wanted(RegistryKind::Contract) {
        for contract in network.contracts.iter().filter(named) {
            records.push(RegistryRecord::contract(contract, deployments.contract(contract)?));
        }
    }

    if let (Some(name), true) = (name, records.is_empty()) {
        return Err(infl_meta::Error::NotDeployed {
            kind: only.map_or("System or contract".to_string(), |k| k.to_string()),
            name: name.to_string(),
        }
        .into());
    }
    Ok(records)
}

fn single(label: &str, raw: Vec<Felt>) -> Result<Felt> {
    match raw.as_slice() {
        [value] => Ok(*value),
        other => Err(Error::MalformedResponse {
            record: label.to_string(),
            reason: format!("expected one value, got {}", other.len()),
        }),
    }
}
