//! Property-based test generators using proptest.
//!
//! Provides strategies for generating ledger keys, vehicle records and
//! values that must not decode.

use motoledger_core::VehicleRecord;
use proptest::prelude::*;

/// Strategy for keys inside the default scan range (`Record0..Record999`).
pub fn record_key_strategy() -> impl Strategy<Value = String> {
    (0u32..999).prop_map(|n| format!("Record{n}"))
}

/// Strategy for arbitrary non-empty keys.
pub fn any_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_]{1,16}").expect("Invalid regex")
}

/// Strategy for a single record field.
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 .-]{0,24}").expect("Invalid regex")
}

/// Strategy for vehicle records tagged with the record document type.
pub fn vehicle_record_strategy() -> impl Strategy<Value = VehicleRecord> {
    (
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
    )
        .prop_map(|(make, model, color, vin, engine_cc, owner)| {
            VehicleRecord::new(make, model, color, vin, engine_cc, owner)
        })
}

/// Strategy for a set of distinct keys within the default scan range,
/// each paired with a record.
pub fn keyed_records_strategy(
    max: usize,
) -> impl Strategy<Value = std::collections::BTreeMap<String, VehicleRecord>> {
    prop::collection::btree_map(record_key_strategy(), vehicle_record_strategy(), 0..max)
}

/// Strategy for non-empty values that never decode as a vehicle record.
pub fn malformed_value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        // Not JSON at all.
        prop::string::string_regex("[a-z ]{1,32}")
            .expect("Invalid regex")
            .prop_map(|s| format!("~{s}").into_bytes()),
        // JSON, but not an object.
        any::<i64>().prop_map(|n| n.to_string().into_bytes()),
        // An object without a document type.
        field_strategy().prop_map(|make| serde_json::json!({ "make": make }).to_string().into_bytes()),
        // Truncated object.
        Just(b"{\"docType\":\"Record\",".to_vec()),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
