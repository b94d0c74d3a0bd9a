//! Macro surface emitter.
//!
//! Renders a [`ResolvedConfig`] into the preprocessor header consumed by
//! the MySensors build. This is the compiler's contract with the node
//! sketch: symbol names and value domains exactly as the radio library
//! expects them, emitted in a fixed order so regenerated headers diff
//! cleanly.
//!
//! The include-order guard is kept from the hand-written headers this
//! replaces: defining `MY_RF24_BASE_RADIO_ID` after `MySensors.h` has been
//! included silently configures the wrong PAN, so the header refuses to be
//! second.

use core::fmt::Write;

use crate::config::{PowerSource, SensorMode};
use crate::resolver::ResolvedConfig;

/// Render the node configuration header.
///
/// Output is deterministic for a given config; `node_name` only appears in
/// the banner comment.
pub fn render_header(resolved: &ResolvedConfig, node_name: Option<&str>) -> String {
    let mut out = String::with_capacity(1024);
    let radio = &resolved.radio;
    let features = &resolved.features;

    // Infallible: fmt::Write on String cannot fail.
    let _ = writeln!(out, "// Generated by panforge — do not edit.");
    if let Some(name) = node_name {
        let _ = writeln!(out, "// Node: {name}");
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "#define SKETCH_VERSION \"{}\"",
        features.sketch_version
    );
    let _ = writeln!(out);

    // ── Radio transport (must precede MySensors.h) ───────────
    let _ = writeln!(out, "#ifdef MY_RF24_BASE_RADIO_ID");
    let _ = writeln!(
        out,
        "#error Node configuration header must be included before MySensors.h"
    );
    let _ = writeln!(out, "#endif");
    let _ = writeln!(out, "#define MY_RADIO_RF24");
    let addr = radio.base_address;
    let _ = writeln!(
        out,
        "#define MY_RF24_BASE_RADIO_ID {:#04x},{:#04x},{:#04x},{:#04x},{:#04x}",
        addr[0], addr[1], addr[2], addr[3], addr[4]
    );
    let _ = writeln!(out, "#define MY_RF24_CHANNEL {}", radio.channel);
    let _ = writeln!(
        out,
        "#define MY_RF24_DATARATE {}",
        radio.data_rate.macro_token()
    );
    let _ = writeln!(
        out,
        "#define MY_RF24_PA_LEVEL {}",
        radio.power_level.macro_token()
    );
    if let Some(irq) = radio.irq_pin {
        let _ = writeln!(out, "#define MY_RF24_IRQ_PIN ({irq})");
    }
    let _ = writeln!(out, "#define MY_BAUD_RATE {}", features.baud_rate);

    // ── Transport options ────────────────────────────────────
    if features.repeater {
        let _ = writeln!(out, "#define MY_REPEATER_FEATURE");
    }
    if let Some(id) = features.node_id {
        let _ = writeln!(out, "#define MY_NODE_ID {id}");
    }

    // ── Node features ────────────────────────────────────────
    let _ = writeln!(out);
    match features.sensor_mode {
        SensorMode::Pir => {
            let _ = writeln!(out, "#define PIR");
        }
        SensorMode::WireTrip => {}
    }
    if features.status_toggle {
        let _ = writeln!(out, "#define STATUS_TOGGLE");
    }
    if features.power_source == PowerSource::Ac {
        let _ = writeln!(out, "#define AC_POWERED");
    }
    let _ = writeln!(out, "#define SENSOR_PIN {}", resolved.sensor_pin);
    let _ = writeln!(out, "#define CHILD_1 {}", resolved.sensor_child);
    if let (Some(pin), Some(child)) = (resolved.relay_pin, resolved.relay_child) {
        let _ = writeln!(out, "#define WITH_SWITCH");
        let _ = writeln!(out, "#define RELAY_PIN {pin}");
        let _ = writeln!(out, "#define CHILD_2 {child}");
    }

    // ── Debug output ─────────────────────────────────────────
    if features.debug.library || features.debug.radio_verbose || features.debug.special {
        let _ = writeln!(out);
    }
    if features.debug.library {
        let _ = writeln!(out, "#define MY_DEBUG");
    }
    if features.debug.radio_verbose {
        let _ = writeln!(out, "#define MY_DEBUG_VERBOSE_RF24");
    }
    if features.debug.special {
        let _ = writeln!(out, "#define MY_SPECIAL_DEBUG");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NodeFeatureSet, PowerSource, RadioProfile, SensorMode};
    use crate::resolver::resolve;

    fn render_default() -> String {
        let resolved = resolve(&RadioProfile::default(), &NodeFeatureSet::default()).unwrap();
        render_header(&resolved, Some("test-node"))
    }

    #[test]
    fn header_carries_the_pan_profile() {
        let header = render_default();
        assert!(header.contains("#define MY_RADIO_RF24\n"));
        assert!(header.contains("#define MY_RF24_BASE_RADIO_ID 0x00,0x71,0x0f,0xfe,0xca\n"));
        assert!(header.contains("#define MY_RF24_CHANNEL 112\n"));
        assert!(header.contains("#define MY_RF24_DATARATE RF24_250KBPS\n"));
        assert!(header.contains("#define MY_RF24_PA_LEVEL RF24_PA_MAX\n"));
        assert!(header.contains("#define MY_RF24_IRQ_PIN (2)\n"));
        assert!(header.contains("#define MY_BAUD_RATE 57600\n"));
    }

    #[test]
    fn include_order_guard_precedes_the_base_id() {
        let header = render_default();
        let guard = header.find("#ifdef MY_RF24_BASE_RADIO_ID").unwrap();
        let define = header.find("#define MY_RF24_BASE_RADIO_ID").unwrap();
        assert!(guard < define);
        assert!(header.contains("#error"));
    }

    #[test]
    fn battery_wiretrip_node_has_no_feature_toggles() {
        let header = render_default();
        assert!(!header.contains("#define PIR"));
        assert!(!header.contains("#define AC_POWERED"));
        assert!(!header.contains("#define WITH_SWITCH"));
        assert!(!header.contains("#define STATUS_TOGGLE"));
        assert!(!header.contains("MY_DEBUG"));
    }

    #[test]
    fn relay_node_emits_switch_block() {
        let features = NodeFeatureSet {
            has_relay: true,
            power_source: PowerSource::Ac,
            ..NodeFeatureSet::default()
        };
        let resolved = resolve(&RadioProfile::default(), &features).unwrap();
        let header = render_header(&resolved, None);
        assert!(header.contains("#define AC_POWERED\n"));
        assert!(header.contains("#define WITH_SWITCH\n"));
        assert!(header.contains("#define RELAY_PIN 17\n"));
        assert!(header.contains("#define CHILD_2 2\n"));
    }

    #[test]
    fn pir_node_emits_pir_define() {
        let features = NodeFeatureSet {
            sensor_mode: SensorMode::Pir,
            ..NodeFeatureSet::default()
        };
        let resolved = resolve(&RadioProfile::default(), &features).unwrap();
        assert!(render_header(&resolved, None).contains("#define PIR\n"));
    }

    #[test]
    fn pinned_node_id_and_repeater_are_emitted() {
        let features = NodeFeatureSet {
            repeater: true,
            node_id: Some(4),
            power_source: PowerSource::Ac,
            ..NodeFeatureSet::default()
        };
        let resolved = resolve(&RadioProfile::default(), &features).unwrap();
        let header = render_header(&resolved, None);
        assert!(header.contains("#define MY_REPEATER_FEATURE\n"));
        assert!(header.contains("#define MY_NODE_ID 4\n"));
    }

    #[test]
    fn no_irq_pin_means_no_irq_define() {
        let profile = RadioProfile {
            irq_pin: None,
            ..RadioProfile::default()
        };
        let resolved = resolve(&profile, &NodeFeatureSet::default()).unwrap();
        assert!(!render_header(&resolved, None).contains("MY_RF24_IRQ_PIN"));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(render_default(), render_default());
    }
}
