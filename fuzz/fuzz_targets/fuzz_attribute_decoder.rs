//! Fuzz target: `wire::attributes::decode_manual_level`
//!
//! Drives arbitrary payloads (as they would arrive on the attributes
//! topics) into the decoder and asserts that an accepted value is always
//! one the JSON literally carried.
//!
//! cargo fuzz run fuzz_attribute_decoder

#![no_main]

use ailed::wire::attributes::decode_manual_level;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(level) = decode_manual_level(data) {
        let v: serde_json::Value = serde_json::from_slice(data).expect("accepted payload is JSON");
        let nested = v
            .get("shared")
            .and_then(|s| s.get("led"))
            .and_then(serde_json::Value::as_i64);
        let carried = nested.or_else(|| v.get("led").and_then(serde_json::Value::as_i64));
        assert_eq!(carried, Some(i64::from(level.get())));
    }
});
