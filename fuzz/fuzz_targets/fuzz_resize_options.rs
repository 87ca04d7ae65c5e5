#![no_main]

use grip_core::{DEFAULT_EDGE_THRESHOLD, ResizeOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Malformed payloads must be rejected, never panic.
    let Ok(options) = ResizeOptions::from_json(json) else {
        return;
    };
    let config = options.normalize();

    let threshold = config.effective_edge_threshold();
    assert!(
        threshold == DEFAULT_EDGE_THRESHOLD || threshold == config.edge_threshold,
        "threshold {threshold} not derived from config"
    );
    assert!(!threshold.is_nan(), "NaN threshold survived normalization");
    assert!(config.width.min.is_none_or(|v| !v.is_nan()));
    assert!(config.width.max.is_none_or(|v| !v.is_nan()));
    assert!(config.height.min.is_none_or(|v| !v.is_nan()));
    assert!(config.height.max.is_none_or(|v| !v.is_nan()));
    assert!(config.handle.as_deref().is_none_or(|h| !h.is_empty()));
    assert!(config.active_class.as_deref().is_none_or(|c| !c.is_empty()));

    // Normalization is a pure function of the options.
    assert_eq!(config, options.normalize());
});
