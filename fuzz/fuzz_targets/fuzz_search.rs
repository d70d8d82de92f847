#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&[u8], &str, &str)| {
    let (data, attr, val) = input;
    let Ok(records) = ndb::parser::parse_records(data) else {
        return;
    };

    let found = ndb::search::search([&records], attr, val);
    assert!(found.len() <= records.len());
    for record in &found {
        assert!(record.matches(attr, val));
    }
});
