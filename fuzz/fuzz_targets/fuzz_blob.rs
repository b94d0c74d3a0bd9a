//! Fuzz target: provisioning blob decoder
//!
//! `ResolvedConfig::from_bytes` must never panic on arbitrary bytes, any
//! blob it accepts must satisfy the policy-independent resolver rules, and
//! an accepted blob must re-encode without loss.
//!
//! cargo fuzz run fuzz_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use panforge::resolver::{PanPolicy, ResolvedConfig, resolve_with_policy};

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = ResolvedConfig::from_bytes(data) {
        // Anything the decoder hands out must pass resolution again
        // (coexistence off: the PAN policy is not part of the blob).
        let policy = PanPolicy {
            wifi_coexistence: false,
        };
        assert!(
            resolve_with_policy(&config.radio, &config.features, policy).is_ok(),
            "decoded blob violates resolver invariants"
        );

        let bytes = config
            .to_bytes()
            .expect("re-encoding a decoded blob must succeed");
        let again = ResolvedConfig::from_bytes(&bytes).expect("re-encoded blob must decode");
        assert_eq!(again, config);
    }
});
