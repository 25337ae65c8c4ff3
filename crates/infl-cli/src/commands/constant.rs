//! update-constant

use std::sync::Arc;

use infl_codec::{ConstantDef, ConstantValue, Rounding};
use infl_core::{ConstantRecord, Dispatcher, SyncReport};

use super::output::Printer;
use crate::cli::Target;
use crate::context::AppContext;
use crate::error::Result;

/// Constant named on the command line, value taken literally.
pub fn constant_def(name: &str, value: &str) -> Result<ConstantDef> {
    let def = ConstantDef {
        name: name.to_string(),
        value: ConstantValue::Literal(value.to_string()),
        multiplier: 1.0,
        fraction_bits: 0,
        rounding: Rounding::Exact,
    };
    def.key()?;
    def.encode()?;
    Ok(def)
}

pub async fn run_update_constant(
    ctx: &AppContext,
    target: &Target,
    name: &str,
    value: &str,
) -> Result<SyncReport> {
    let def = constant_def(name, value)?;
    let dispatcher = ctx.connect(target, false).await?;
    let printer = Printer::new(false);
    printer.header("Updating constant", &target.network);

    let report = execute(ctx, dispatcher, def, printer).await?;
    printer.summary(&report)?;
    Ok(report)
}

pub async fn execute(
    ctx: &AppContext,
    dispatcher: Arc<dyn Dispatcher>,
    def: ConstantDef,
    printer: Printer,
) -> Result<SyncReport> {
    let sync = ctx.synchronizer(dispatcher, false);
    Ok(sync
        .run_observed(&[ConstantRecord::new(def)], |e| printer.entry(e))
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use infl_codec::Felt;
    use infl_test_utils::{MemoryDispatcher, TestWorkspace};

    #[test]
    fn parses_hex_and_decimal_values() {
        assert_eq!(
            constant_def("X", "0x10").unwrap().encode().unwrap(),
            Felt::from(16u64)
        );
        assert_eq!(
            constant_def("X", "42").unwrap().encode().unwrap(),
            Felt::from(42u64)
        );
    }

    #[test]
    fn rejects_bad_values_and_names() {
        assert!(constant_def("X", "forty-two").is_err());
        assert!(constant_def("THIS_NAME_IS_FAR_TOO_LONG_FOR_A_SHORT_STRING", "1").is_err());
    }

    #[tokio::test]
    async fn writes_once_then_reports_up_to_date() {
        let ws = TestWorkspace::new();
        let ctx = AppContext::from_path(&ws.manifest_path(), None, None).unwrap();
        let ledger = Arc::new(MemoryDispatcher::new());
        let def = constant_def("SCANNING_TIME", "3600").unwrap();

        let first = execute(&ctx, ledger.clone(), def.clone(), Printer::new(true))
            .await
            .unwrap();
        let second = execute(&ctx, ledger.clone(), def, Printer::new(true))
            .await
            .unwrap();

        assert_eq!(first.updated(), 1);
        assert_eq!(second.up_to_date(), 1);
        assert_eq!(ledger.constant("SCANNING_TIME"), Some(Felt::from(3600u64)));
        assert_eq!(ledger.invocations(), 1);
    }
}
