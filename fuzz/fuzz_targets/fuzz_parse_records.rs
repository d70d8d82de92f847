#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // This should never crash or panic, even on garbage input
    if let Ok(records) = ndb::parser::parse_records(data) {
        // Records are never empty and attributes are never empty
        for record in &records {
            assert!(!record.is_empty());
            assert!(record.iter().all(|t| !t.attr().is_empty()));
        }
    }
});
