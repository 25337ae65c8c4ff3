//! update-configs and check

use infl_core::{SyncReport, Synchronizer, component_records, constant_records};
use infl_meta::Catalog;

use super::output::Printer;
use crate::cli::{KindArg, Target};
use crate::context::AppContext;
use crate::error::Result;

/// Run update-configs (or check, with `dry_run`) against the target network.
pub async fn run_update_configs(
    ctx: &AppContext,
    target: &Target,
    kind: KindArg,
    dry_run: bool,
    json: bool,
) -> Result<SyncReport> {
    let catalog = ctx.catalog()?;
    let dispatcher = ctx.connect(target, dry_run).await?;
    let printer = Printer::new(json);
    printer.header(if dry_run { "Checking configs" } else { "Updating configs" }, &target.network);

    let sync = ctx.synchronizer(dispatcher, dry_run);
    let report = sync_catalog(&sync, &catalog, kind, printer).await?;
    printer.summary(&report)?;
    Ok(report)
}

/// Constants first, then component kinds in order.
pub async fn sync_catalog(
    sync: &Synchronizer,
    catalog: &Catalog,
    kind: KindArg,
    printer: Printer,
) -> Result<SyncReport> {
    let mut report = SyncReport::start(sync.options().dry_run);

    if kind.includes_constants() {
        let constants = constant_records(catalog);
        report.merge(sync.run_observed(&constants, |e| printer.entry(e)).await?);
    }

    let components = component_records(catalog, &kind.record_kinds());
    report.merge(sync.run_observed(&components, |e| printer.entry(e)).await?);

    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use infl_codec::{Felt, RecordKind};
    use infl_test_utils::fixtures::SAMPLE_COMPONENTS;
    use infl_test_utils::{MemoryDispatcher, TestWorkspace};
    use pretty_assertions::assert_eq;

    async fn execute(
        ws: &TestWorkspace,
        ledger: Arc<MemoryDispatcher>,
        kind: KindArg,
        dry_run: bool,
    ) -> Result<SyncReport> {
        let ctx = AppContext::from_path(&ws.manifest_path(), None, None).unwrap();
        let catalog = ctx.catalog()?;
        let sync = ctx.synchronizer(ledger, dry_run);
        sync_catalog(&sync, &catalog, kind, Printer::new(true)).await
    }

    #[tokio::test]
    async fn all_writes_constants_and_components() {
        let ws = TestWorkspace::new();
        let ledger = Arc::new(MemoryDispatcher::new());

        let report = execute(&ws, ledger.clone(), KindArg::All, false)
            .await
            .unwrap();

        assert_eq!(report.updated(), 2 + SAMPLE_COMPONENTS);
        assert_eq!(ledger.constant("TIME_ACCELERATION"), Some(Felt::from(24u64)));
        assert_eq!(ledger.constant("HOPPER_SPEED"), Some(Felt::from(1800u64 << 32)));
        assert!(ledger.component(RecordKind::Building, 0).is_none());
    }

    #[tokio::test]
    async fn single_kind_leaves_others_alone() {
        let ws = TestWorkspace::new();
        let ledger = Arc::new(MemoryDispatcher::new());

        let report = execute(&ws, ledger.clone(), KindArg::Docks, false)
            .await
            .unwrap();

        assert_eq!(report.updated(), 1);
        assert!(ledger.constant("TIME_ACCELERATION").is_none());
        assert!(ledger.component(RecordKind::Station, 1).is_none());
    }

    #[tokio::test]
    async fn dry_run_submits_nothing() {
        let ws = TestWorkspace::new();
        let ledger = Arc::new(MemoryDispatcher::new());

        let report = execute(&ws, ledger.clone(), KindArg::All, true)
            .await
            .unwrap();

        assert_eq!(report.would_update(), 2 + SAMPLE_COMPONENTS);
        assert_eq!(ledger.invocations(), 0);
    }
}
