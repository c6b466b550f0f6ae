#![no_main]

use corsfix_domain::{CorsHelper, Pipeline};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static PIPELINE: LazyLock<Pipeline> =
    LazyLock::new(|| Pipeline::new(CorsHelper::default()).expect("default helper is valid"));

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    // Arbitrary text, rewritten or not, must go through both passes without panicking.
    let once = PIPELINE.transform(s);
    let twice = PIPELINE.transform(&once.text);
    assert_eq!(once.steps.len(), twice.steps.len());
});
