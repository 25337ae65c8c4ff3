//! register

use std::sync::Arc;

use infl_core::{Dispatcher, RegistryKind, RegistryRecord, SyncReport, registry_records};

use super::output::Printer;
use crate::cli::Target;
use crate::context::AppContext;
use crate::error::Result;

pub async fn run_register(
    ctx: &AppContext,
    target: &Target,
    only: Option<RegistryKind>,
    name: Option<&str>,
    dry_run: bool,
    json: bool,
) -> Result<SyncReport> {
    let records = records(ctx, target, only, name)?;
    let dispatcher = ctx.connect(target, dry_run).await?;
    let printer = Printer::new(json);
    printer.header(
        if dry_run { "Checking registrations" } else { "Registering" },
        &target.network,
    );

    let report = execute(ctx, dispatcher, &records, dry_run, printer).await?;
    printer.summary(&report)?;
    Ok(report)
}

/// Registry entries the target network should hold.
pub fn records(
    ctx: &AppContext,
    target: &Target,
    only: Option<RegistryKind>,
    name: Option<&str>,
) -> Result<Vec<RegistryRecord>> {
    let network = ctx.network(target)?;
    let deployments = ctx.deployments(network)?;
    Ok(registry_records(network, &deployments, only, name)?)
}

pub async fn execute(
    ctx: &AppContext,
    dispatcher: Arc<dyn Dispatcher>,
    records: &[RegistryRecord],
    dry_run: bool,
    printer: Printer,
) -> Result<SyncReport> {
    let sync = ctx.synchronizer(dispatcher, dry_run);
    Ok(sync.run_observed(records, |e| printer.entry(e)).await?)
}
