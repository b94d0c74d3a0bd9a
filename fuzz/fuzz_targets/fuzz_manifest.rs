//! Fuzz target: manifest parsing and resolution
//!
//! Feeds arbitrary bytes through the full compile path and verifies:
//! - No panics on arbitrary (possibly non-UTF-8, non-JSON) input
//! - Every rejection is a typed parse or config error
//! - Accepted configs always render a header containing the radio guard
//!
//! cargo fuzz run fuzz_manifest

#![no_main]

use libfuzzer_sys::fuzz_target;
use panforge::emit::render_header;
use panforge::manifest::NodeManifest;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let Ok(manifest) = NodeManifest::from_json(text) else {
        return;
    };

    match manifest.resolve() {
        Ok(resolved) => {
            let header = render_header(&resolved, manifest.name.as_deref());
            assert!(
                header.contains("#define MY_RADIO_RF24"),
                "resolved config must always emit the radio transport define"
            );
        }
        Err(e) => {
            // Rejections must carry a non-empty description.
            assert!(!e.to_string().is_empty());
        }
    }
});
