//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use infl_codec::RecordKind;
use infl_core::RegistryKind;

/// Influence admin - keep on-chain game configuration in sync with the catalog
#[derive(Parser, Debug)]
#[command(name = "infl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "INFL_CONFIG", default_value = infl_meta::DEFAULT_MANIFEST)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override sync.max_attempts from the manifest
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Override sync.confirm_timeout_secs from the manifest
    #[arg(long, global = true, value_name = "SECS")]
    pub confirm_timeout: Option<u64>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Network and signer selection shared by on-chain commands.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Network from the manifest's [networks] table
    #[arg(short, long, env = "INFL_NETWORK")]
    pub network: String,

    /// Account to sign with (defaults to the network's default_account)
    #[arg(short, long, env = "INFL_ACCOUNT")]
    pub account: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write catalog constants and component types that differ on chain
    ///
    /// Examples:
    ///   infl update-configs -n devnet                 # everything
    ///   infl update-configs -n sepolia -k inventories # one kind
    ///   infl update-configs -n mainnet --dry-run      # preview only
    UpdateConfigs {
        #[command(flatten)]
        target: Target,

        /// Which configuration category to synchronize
        #[arg(short, long, value_enum, default_value_t = KindArg::All)]
        kind: KindArg,

        /// Compare only, do not submit transactions
        #[arg(long)]
        dry_run: bool,

        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a single constant to an explicit value
    UpdateConstant {
        #[command(flatten)]
        target: Target,

        /// Constant name (Cairo short string)
        #[arg(long)]
        name: String,

        /// Integer value, decimal or 0x-prefixed hex
        #[arg(long)]
        value: String,
    },

    /// Register system class hashes and contract addresses with the dispatcher
    Register {
        #[command(flatten)]
        target: Target,

        /// Only systems or only contracts
        #[arg(long, value_enum)]
        only: Option<RegistryArg>,

        /// A single system or contract name
        #[arg(long)]
        name: Option<String>,

        /// Compare only, do not submit transactions
        #[arg(long)]
        dry_run: bool,

        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what update-configs would change, with field diffs
    Check {
        #[command(flatten)]
        target: Target,

        /// Which configuration category to check
        #[arg(short, long, value_enum, default_value_t = KindArg::All)]
        kind: KindArg,

        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List record kinds and their component names
    ListKinds,
}

/// Configuration category accepted by `--kind`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    All,
    Constants,
    Buildings,
    Docks,
    DryDocks,
    Exchanges,
    Inventories,
    Modifiers,
    Processes,
    Products,
    Ships,
    ShipVariants,
    Stations,
}

impl KindArg {
    /// Whether catalog constants are part of this selection.
    pub fn includes_constants(self) -> bool {
        matches!(self, KindArg::All | KindArg::Constants)
    }

    /// Component kinds in this selection, in synchronization order.
    pub fn record_kinds(self) -> Vec<RecordKind> {
        let single = match self {
            KindArg::All => return RecordKind::ALL.to_vec(),
            KindArg::Constants => return Vec::new(),
            KindArg::Buildings => RecordKind::Building,
            KindArg::Docks => RecordKind::Dock,
            KindArg::DryDocks => RecordKind::DryDock,
            KindArg::Exchanges => RecordKind::Exchange,
            KindArg::Inventories => RecordKind::Inventory,
            KindArg::Modifiers => RecordKind::Modifier,
            KindArg::Processes => RecordKind::Process,
            KindArg::Products => RecordKind::Product,
            KindArg::Ships => RecordKind::Ship,
            KindArg::ShipVariants => RecordKind::ShipVariant,
            KindArg::Stations => RecordKind::Station,
        };
        vec![single]
    }
}

/// Registry selected by `--only`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryArg {
    Systems,
    Contracts,
}

impl From<RegistryArg> for RegistryKind {
    fn from(arg: RegistryArg) -> Self {
        match arg {
            RegistryArg::Systems => RegistryKind::System,
            RegistryArg::Contracts => RegistryKind::Contract,
        }
    }
}
