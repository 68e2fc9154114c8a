//! CLI command implementations.

mod output;

use motoledger_core::{Contract, ContractConfig};
use motoledger_storage::FileStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One operation invocation built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Operation wire name.
    pub operation: String,
    /// Positional arguments.
    pub args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation.
    pub fn new(operation: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            operation: operation.into(),
            args,
        }
    }

    /// Builds a range listing; the configured range is used unless a bound is given.
    pub fn list(start: Option<String>, end: Option<String>) -> Self {
        if start.is_none() && end.is_none() {
            return Self::new("queryAllRecords", Vec::new());
        }
        let defaults = ContractConfig::default();
        Self::new(
            "queryRecordsByRange",
            vec![
                start.unwrap_or(defaults.scan_start),
                end.unwrap_or(defaults.scan_end),
            ],
        )
    }
}

/// Opens the ledger at `path`, runs the invocation and renders its result.
pub fn run(
    path: &Path,
    invocation: &Invocation,
    pretty: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let store = Arc::new(FileStore::open_with_create_dirs(path)?);
    info!(path = %path.display(), keys = store.len(), "opened ledger");

    let contract = Contract::new(store, ContractConfig::default());
    let response = contract.invoke(&invocation.operation, &invocation.args)?;

    Ok(output::render(response.payload(), pretty)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn list_defaults_to_query_all() {
        assert_eq!(
            Invocation::list(None, None),
            Invocation::new("queryAllRecords", Vec::new())
        );
    }

    #[test]
    fn list_fills_missing_bound() {
        let invocation = Invocation::list(Some("Record3".into()), None);
        assert_eq!(invocation.operation, "queryRecordsByRange");
        assert_eq!(invocation.args, vec!["Record3", "Record999"]);
    }

    #[test]
    fn run_persists_between_invocations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.cbor");

        let out = run(&path, &Invocation::new("initLedger", Vec::new()), false).unwrap();
        assert_eq!(out, "ok");

        run(
            &path,
            &Invocation::new("transferOwner", vec!["Record4".into(), "Vani".into()]),
            false,
        )
        .unwrap();

        let out = run(
            &path,
            &Invocation::new("queryRecord", vec!["Record4".into()]),
            false,
        )
        .unwrap();
        assert!(out.contains(r#""owner":"Vani""#));
        assert!(out.contains(r#""make":"Yamaha""#));
    }

    #[test]
    fn run_reports_unknown_operation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.cbor");

        let err = run(&path, &Invocation::new("dropLedger", Vec::new()), false).unwrap_err();
        assert!(err.to_string().contains("unknown operation"));
    }
}
