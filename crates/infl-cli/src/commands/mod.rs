//! Command implementations for the infl CLI
//!
//! Each on-chain command has a `run_*` entry point that loads what it needs,
//! connects, then hands the dispatcher to code that never touches the network.

pub mod configs;
pub mod constant;
pub mod kinds;
pub mod output;
pub mod register;

pub use configs::run_update_configs;
pub use constant::run_update_constant;
pub use kinds::run_list_kinds;
pub use register::run_register;
