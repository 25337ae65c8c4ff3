//! End-to-end synchronization flows
//!
//! Each test lays out a manifest, catalog and deployment file on disk,
//! loads them the way the CLI does and drives the synchronizer against an
//! in-memory ledger.

use std::sync::Arc;

use infl_codec::{Felt, RecordKind};
use infl_core::{
    Outcome, RetryPolicy, SyncOptions, SyncReport, Synchronizer, component_records,
    constant_records, registry_records,
};
use infl_meta::{Catalog, Manifest};
use infl_test_utils::fixtures::SAMPLE_COMPONENTS;
use infl_test_utils::{MemoryDispatcher, TestWorkspace};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A catalog with at least one record of every kind.
const FULL_CATALOG: &str = r#"
management_department = 12

[[constants]]
name = "TIME_ACCELERATION"
value = 24

[[buildings]]
id = 0
name = "Empty Lot"

[[buildings]]
id = 2
name = "Extractor"
process_type = 1
site_slot = 1
site_type = 1

[[docks]]
id = 1
name = "Basic Spaceport"
cap = 5
delay_per_ship = 120

[[dry_docks]]
id = 1
name = "Basic Shipyard"
max_mass = 5000000000
max_volume = 5000000000

[[exchanges]]
id = 1
name = "Basic Marketplace"
product_cap = 0

[[inventories]]
id = 2
name = "Cargo"
mass_constraint = "unbounded"
volume_constraint = 1000
modifiable = true
product_constraints = { "7" = "unbounded", "9" = 50 }

[[modifiers]]
id = 4
name = "Core Sample Quality"
class = 3
departments = { "12" = 0.0125, "6" = 0.05 }
traits = { "31" = 0.1 }

[[processes]]
id = 1
name = "Water Mining"
setup_time = 3600
recipe_time = 0.5
processor_type = 1
outputs = { "1" = 1 }

[[products]]
id = 1
name = "Water"
mass_per_unit = 1000
volume_per_unit = 970

[[ships]]
id = 1
name = "Escape Module"
cargo_inventory_type = 2
exhaust_velocity = 30000
hull_mass = 1000000
emergency_propellant_cap = 0.1
propellant_inventory_type = 2
propellant_type = 1

[[ship_variants]]
id = 1
name = "Standard"

[[ship_variants]]
id = 2
name = "Cobalt Pioneer"
ship_type = 2
exhaust_velocity_modifier = 0.05

[[stations]]
id = 1
name = "Outpost"
cap = 100
efficiency = 0.85
"#;

/// Component records in [`FULL_CATALOG`], the empty lot excluded.
const FULL_COMPONENTS: usize = 12;

struct Harness {
    _ws: TestWorkspace,
    manifest: Manifest,
    catalog: Catalog,
    ledger: Arc<MemoryDispatcher>,
}

impl Harness {
    fn new(catalog: &str) -> Self {
        let ws = TestWorkspace::with_catalog(catalog);
        let manifest = Manifest::load(&ws.manifest_path()).unwrap();
        let catalog = manifest.load_catalog().unwrap();
        Self {
            _ws: ws,
            manifest,
            catalog,
            ledger: Arc::new(MemoryDispatcher::new()),
        }
    }

    fn synchronizer(&self, dry_run: bool) -> Synchronizer {
        Synchronizer::new(self.ledger.clone(), RetryPolicy::from(&self.manifest.sync))
            .with_options(SyncOptions { dry_run })
    }

    /// Constants, then every component kind.
    async fn sync_all(&self, dry_run: bool) -> SyncReport {
        let sync = self.synchronizer(dry_run);
        let mut report = SyncReport::start(dry_run);
        report.merge(sync.run(&constant_records(&self.catalog)).await.unwrap());
        report.merge(
            sync.run(&component_records(&self.catalog, &RecordKind::ALL))
                .await
                .unwrap(),
        );
        report.finish()
    }
}

// =============================================================================
// Convergence
// =============================================================================

#[tokio::test]
async fn every_kind_converges_and_stays_converged() {
    let h = Harness::new(FULL_CATALOG);

    let first = h.sync_all(false).await;
    assert_eq!(first.updated(), 1 + FULL_COMPONENTS);
    assert_eq!(h.ledger.invocations(), 1 + FULL_COMPONENTS);

    let second = h.sync_all(false).await;
    assert!(second.is_converged());
    assert_eq!(second.up_to_date(), 1 + FULL_COMPONENTS);
    assert_eq!(h.ledger.invocations(), 1 + FULL_COMPONENTS);
}

#[tokio::test]
async fn stored_layouts_match_catalog_values() {
    let h = Harness::new(FULL_CATALOG);
    h.sync_all(false).await;

    let felts = |values: &[u64]| values.iter().copied().map(Felt::from).collect::<Vec<_>>();

    assert_eq!(h.ledger.component(RecordKind::Dock, 1), Some(felts(&[2, 5, 120])));
    assert_eq!(
        h.ledger.component(RecordKind::Exchange, 1),
        Some(felts(&[1, 0]))
    );
    assert_eq!(
        h.ledger.component(RecordKind::Station, 1),
        Some(felts(&[4, 100, 0, 3_650_722_202, 0]))
    );
    assert_eq!(
        h.ledger.component(RecordKind::ShipVariant, 1),
        Some(felts(&[3, 1, 0, 0]))
    );
    assert_eq!(h.ledger.component(RecordKind::Building, 0), None);
    assert_eq!(h.ledger.constant("TIME_ACCELERATION"), Some(Felt::from(24u64)));
}

#[tokio::test]
async fn catalog_edit_rewrites_only_the_edited_record() {
    let h = Harness::new(FULL_CATALOG);
    h.sync_all(false).await;
    let before = h.ledger.invocations();

    let edited = FULL_CATALOG.replace("delay_per_ship = 120", "delay_per_ship = 60");
    let h2 = Harness {
        catalog: toml_catalog(&edited),
        ..h
    };
    let report = h2.sync_all(false).await;

    assert_eq!(report.updated(), 1);
    let updated: Vec<_> = report
        .entries
        .iter()
        .filter(|e| e.outcome == Outcome::Updated)
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(updated, vec!["DockType #1 (Basic Spaceport)"]);
    assert_eq!(h2.ledger.invocations(), before + 1);
}

fn toml_catalog(text: &str) -> Catalog {
    let ws = TestWorkspace::with_catalog(text);
    Manifest::load(&ws.manifest_path())
        .unwrap()
        .load_catalog()
        .unwrap()
}

// =============================================================================
// Dry run
// =============================================================================

#[tokio::test]
async fn dry_run_reports_then_real_run_applies() {
    let h = Harness::new(infl_test_utils::fixtures::SAMPLE_CATALOG);

    let preview = h.sync_all(true).await;
    assert_eq!(preview.would_update(), 2 + SAMPLE_COMPONENTS);
    assert_eq!(h.ledger.invocations(), 0);
    assert!(preview.entries.iter().all(|e| e.diff.is_some()));

    let applied = h.sync_all(false).await;
    assert_eq!(applied.updated(), preview.would_update());

    let after = h.sync_all(true).await;
    assert!(after.is_converged());
}

#[tokio::test]
async fn report_serializes_for_json_output() {
    let h = Harness::new(infl_test_utils::fixtures::SAMPLE_CATALOG);
    let report = h.sync_all(true).await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["dry_run"], serde_json::Value::Bool(true));
    assert_eq!(json["entries"][0]["outcome"], "would_update");
    assert_eq!(json["entries"][0]["label"], "constant TIME_ACCELERATION");
}

// =============================================================================
// Registry
// =============================================================================

#[tokio::test]
async fn registry_follows_deployment_manifest() {
    let h = Harness::new(FULL_CATALOG);
    let network = h.manifest.network("devnet").unwrap();
    let deployments = h.manifest.load_deployments(network).unwrap();
    let records = registry_records(network, &deployments, None, None).unwrap();

    let sync = h.synchronizer(false);
    let first = sync.run(&records).await.unwrap();
    let second = sync.run(&records).await.unwrap();

    assert_eq!(first.updated(), 3);
    assert!(second.is_converged());
    assert_eq!(h.ledger.system("WriteComponent"), Some(Felt::from(0x201u64)));
    assert_eq!(h.ledger.contract("Asteroid"), Some(Felt::from(0x300u64)));
}

// =============================================================================
// Failure recovery
// =============================================================================

#[tokio::test]
async fn transient_failures_within_attempt_limit_still_converge() {
    let h = Harness::new(infl_test_utils::fixtures::SAMPLE_CATALOG);
    // The workspace manifest allows two attempts per record.
    h.ledger.fail_next_invokes(1);

    let report = h.sync_all(false).await;

    assert_eq!(report.updated(), 2 + SAMPLE_COMPONENTS);
    assert!(report.entries.iter().any(|e| e.attempts == 2));
    assert!(h.sync_all(false).await.is_converged());
}

#[tokio::test]
async fn exhausted_record_stops_the_run_and_resumes_next_time() {
    let h = Harness::new(infl_test_utils::fixtures::SAMPLE_CATALOG);
    h.ledger.fail_next_invokes(2);

    let sync = h.synchronizer(false);
    let err = sync
        .run(&constant_records(&h.catalog))
        .await
        .unwrap_err();
    assert!(matches!(err, infl_core::Error::RetriesExhausted { attempts: 2, .. }));
    assert_eq!(h.ledger.constant("HOPPER_SPEED"), None);

    let report = h.sync_all(false).await;
    assert_eq!(report.updated(), 2 + SAMPLE_COMPONENTS);
}
