//! Fuzz target: inference-server response handling.
//!
//! cargo fuzz run fuzz_prediction_response

#![no_main]

use ailed::wire::prediction::{decode_response, is_ready};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_response(data);
    if is_ready(data) {
        assert_eq!(data.trim_ascii(), b"ready");
    }
});
