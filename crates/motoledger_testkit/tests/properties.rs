//! Property tests for the registry operations.

use motoledger_core::{
    CoreError, RecordCodec, RecordEnumerator, RecordStore, ScanEntry, ScanValue, VehicleRecord,
    RECORD_DOC_TYPE, SAMPLE_RECORD_COUNT,
};
use motoledger_storage::LedgerStore;
use motoledger_testkit::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn create_args(key: &str, record: &VehicleRecord) -> Vec<String> {
    vec![
        key.to_string(),
        record.make().to_string(),
        record.model().to_string(),
        record.color().to_string(),
        record.vin().to_string(),
        record.engine_cc().to_string(),
        record.owner().to_string(),
    ]
}

fn parse_scan(payload: &[u8]) -> Vec<ScanEntry<VehicleRecord>> {
    serde_json::from_slice(payload).expect("scan payload is JSON")
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn absent_key_is_not_found(key in any_key_strategy()) {
        let ledger = TestLedger::memory();
        let err = ledger.invoke("queryRecord", &[key.as_str()]).unwrap_err();
        prop_assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[test]
    fn created_record_reads_back(key in record_key_strategy(), record in vehicle_record_strategy()) {
        let ledger = TestLedger::memory();
        ledger.contract.invoke("createRecord", &create_args(&key, &record)).unwrap();

        let response = ledger.invoke("queryRecord", &[key.as_str()]).unwrap();
        let payload = response.payload().unwrap();
        prop_assert_eq!(VehicleRecord::decode(payload).unwrap(), record.clone());
        prop_assert_eq!(payload.to_vec(), record.encode().unwrap());
    }

    #[test]
    fn transfer_changes_only_owner(
        key in record_key_strategy(),
        record in vehicle_record_strategy(),
        new_owner in field_strategy(),
    ) {
        let ledger = TestLedger::memory();
        ledger.contract.invoke("createRecord", &create_args(&key, &record)).unwrap();
        ledger.invoke("transferOwner", &[key.as_str(), new_owner.as_str()]).unwrap();

        let stored = ledger.registry().get_record(&key).unwrap();
        prop_assert_eq!(stored, record.with_owner(new_owner.clone()));
    }

    #[test]
    fn scan_returns_every_key_in_order(records in keyed_records_strategy(40)) {
        let ledger = TestLedger::memory();
        for (key, record) in &records {
            ledger.store.put(key, &record.encode().unwrap()).unwrap();
        }

        let response = ledger.invoke("queryAllRecords", &[]).unwrap();
        let entries = parse_scan(response.payload().unwrap());

        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        let expected: Vec<&str> = records.keys().map(String::as_str).collect();
        prop_assert_eq!(keys, expected);
        for entry in &entries {
            prop_assert_eq!(entry.record(), records.get(&entry.key));
        }
        prop_assert_eq!(ledger.store.stats().open_cursors(), 0);
    }

    #[test]
    fn malformed_value_does_not_stop_scan(
        index in 0usize..SAMPLE_RECORD_COUNT,
        value in malformed_value_strategy(),
    ) {
        let key = format!("Record{index}");
        let ledger = scenarios::ledger_with_malformed(&key, &value);

        let response = ledger.invoke("queryAllRecords", &[]).unwrap();
        let entries = parse_scan(response.payload().unwrap());
        prop_assert_eq!(entries.len(), SAMPLE_RECORD_COUNT);

        for entry in &entries {
            if entry.key == key {
                let expected = String::from_utf8_lossy(&value).into_owned();
                prop_assert_eq!(entry.raw_value(), Some(expected.as_str()));
            } else {
                prop_assert!(entry.record().is_some());
            }
        }
    }

    #[test]
    fn range_scan_stays_inside_bounds(
        records in keyed_records_strategy(40),
        a in record_key_strategy(),
        b in record_key_strategy(),
    ) {
        let ledger = TestLedger::memory();
        for (key, record) in &records {
            ledger.store.put(key, &record.encode().unwrap()).unwrap();
        }

        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let entries = ledger.registry().query_records_by_range(&start, &end).unwrap();

        let expected: Vec<&String> = records
            .keys()
            .filter(|k| k.as_str() >= start.as_str() && k.as_str() < end.as_str())
            .collect();
        let keys: Vec<&String> = entries.iter().map(|e| &e.key).collect();
        prop_assert_eq!(keys, expected);
    }
}

#[test]
fn seeded_ledger_lists_samples() {
    let ledger = TestLedger::seeded();
    let response = ledger.invoke("queryAllRecords", &[]).unwrap();
    let entries = parse_scan(response.payload().unwrap());

    assert_eq!(entries.len(), SAMPLE_RECORD_COUNT);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.key, format!("Record{i}"));
        match &entry.value {
            ScanValue::Record(record) => assert_eq!(record.doc_type, RECORD_DOC_TYPE),
            ScanValue::Raw(raw) => panic!("unexpected raw value {raw}"),
        }
    }
}

#[test]
fn seeding_twice_overwrites() {
    let ledger = TestLedger::seeded();
    ledger.invoke("transferOwner", &["Record3", "Nobody"]).unwrap();
    ledger.invoke("initLedger", &[]).unwrap();

    assert_eq!(ledger.store.len(), SAMPLE_RECORD_COUNT);
    assert_ne!(ledger.registry().get_record("Record3").unwrap().owner(), "Nobody");
}

#[test]
fn empty_value_is_not_found_and_skipped() {
    let ledger = TestLedger::seeded();
    ledger.store.put("Record4", b"").unwrap();

    let err = ledger.invoke("queryRecord", &["Record4"]).unwrap_err();
    assert!(err.is_not_found());

    let enumerator = RecordEnumerator::new(RecordStore::new(Arc::clone(&ledger.store)));
    let (entries, summary) = enumerator
        .scan_all_with_summary::<VehicleRecord>("Record0", "Record999")
        .unwrap();
    assert_eq!(entries.len(), SAMPLE_RECORD_COUNT - 1);
    assert!(entries.iter().all(|e| e.key != "Record4"));
    assert_eq!(summary.skipped_empty, 1);
    assert_eq!(summary.decoded, SAMPLE_RECORD_COUNT - 1);
}

#[test]
fn transfer_of_missing_record_writes_nothing() {
    let ledger = TestLedger::memory();
    let err = ledger.invoke("transferOwner", &["Record1", "Dave"]).unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert!(ledger.store.is_empty());
}

#[test]
fn transfer_keeps_fields_outside_the_schema() {
    let ledger = TestLedger::memory();
    ledger
        .store
        .put(
            "Record1",
            br#"{"docType":"Record","make":"Honda","owner":"A","year":"2019"}"#,
        )
        .unwrap();

    ledger.invoke("transferOwner", &["Record1", "B"]).unwrap();

    let stored = ledger.store.get("Record1").unwrap().unwrap();
    let object: serde_json::Value = serde_json::from_slice(&stored).unwrap();
    assert_eq!(object["year"], "2019");
    assert_eq!(object["owner"], "B");
    assert!(object.get("model").is_none());
    assert!(object.get("EngineCC").is_none());

    let response = ledger.invoke("queryAllRecords", &[]).unwrap();
    let listed: serde_json::Value = serde_json::from_slice(response.payload().unwrap()).unwrap();
    assert_eq!(listed[0]["Record"], object);
}
