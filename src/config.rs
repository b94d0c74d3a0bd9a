//! Configuration value objects for one PAN node.
//!
//! [`RadioProfile`] describes the nRF24 transport parameters shared across
//! the PAN; [`NodeFeatureSet`] describes the per-node feature selection.
//! Both are fixed once a node image is resolved — there is no runtime
//! mutation path. Defaults mirror the production PAN profile.

use serde::{Deserialize, Serialize};

use crate::pins;

/// Highest channel the nRF24 hardware accepts (2400 + 125 = 2525 MHz).
pub const MAX_CHANNEL: u8 = 125;

/// First channel fully clear of the 2.4 GHz Wi-Fi band (2400–2483.5 MHz).
/// PANs that coexist with Wi-Fi must sit at or above this.
pub const WIFI_CLEAR_CHANNEL: u8 = 84;

/// UART rates the bootloader and debug console support. Battery nodes run
/// the MCU at 8 MHz, where 115200 has a marginal clock error.
pub const SUPPORTED_BAUD_RATES: [u32; 4] = [9_600, 38_400, 57_600, 115_200];

// ---------------------------------------------------------------------------
// Radio profile (PAN-wide)
// ---------------------------------------------------------------------------

/// nRF24 air data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataRate {
    /// Slowest rate, longest range. The PAN default.
    #[serde(rename = "250kbps")]
    Rate250Kbps,
    #[serde(rename = "1mbps")]
    Rate1Mbps,
    #[serde(rename = "2mbps")]
    Rate2Mbps,
}

impl DataRate {
    /// Token the radio library expects in `MY_RF24_DATARATE`.
    pub const fn macro_token(self) -> &'static str {
        match self {
            Self::Rate250Kbps => "RF24_250KBPS",
            Self::Rate1Mbps => "RF24_1MBPS",
            Self::Rate2Mbps => "RF24_2MBPS",
        }
    }
}

/// nRF24 power-amplifier level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerLevel {
    Min,
    Low,
    High,
    Max,
}

impl PowerLevel {
    /// Token the radio library expects in `MY_RF24_PA_LEVEL`.
    pub const fn macro_token(self) -> &'static str {
        match self {
            Self::Min => "RF24_PA_MIN",
            Self::Low => "RF24_PA_LOW",
            Self::High => "RF24_PA_HIGH",
            Self::Max => "RF24_PA_MAX",
        }
    }
}

/// PAN-wide radio transport parameters.
///
/// Every node on the PAN shares the base address and channel; the length
/// of the base address is fixed at 5 bytes by the nRF24 address width and
/// enforced here by the array type rather than by a runtime check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioProfile {
    /// 5-byte PAN base address (first byte is the node-id slot).
    pub base_address: [u8; 5],
    /// RF channel, 0–125 (2400 + n MHz).
    pub channel: u8,
    pub data_rate: DataRate,
    pub power_level: PowerLevel,
    /// MCU pin wired to the radio IRQ line, or `None` for nodes where the
    /// IRQ trace is not connected.
    pub irq_pin: Option<u8>,
}

impl Default for RadioProfile {
    fn default() -> Self {
        Self {
            // Production PAN-ID.
            base_address: [0x00, 0x71, 0x0f, 0xfe, 0xca],
            // 2512 MHz — above the Wi-Fi band.
            channel: 112,
            data_rate: DataRate::Rate250Kbps,
            power_level: PowerLevel::Max,
            irq_pin: Some(pins::RADIO_IRQ_PIN),
        }
    }
}

// ---------------------------------------------------------------------------
// Node feature set (per node)
// ---------------------------------------------------------------------------

/// Which sensor front-end the node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorMode {
    /// Passive-infrared motion sensor with a built-in on-delay.
    Pir,
    /// Normally-closed wire loop (door contact, IR barrier).
    WireTrip,
}

/// How the node is powered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSource {
    /// Battery node: 8 MHz / 3.3 V, sleeps between pin-change wakes.
    Battery,
    /// Mains-powered node: 16 MHz / 5 V, never sleeps.
    Ac,
}

/// Debug output selection for the generated image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFlags {
    /// Transport-library debug prints on the serial console.
    #[serde(default)]
    pub library: bool,
    /// Verbose radio-driver tracing (very chatty).
    #[serde(default)]
    pub radio_verbose: bool,
    /// Extended diagnostics commands over the air.
    #[serde(default)]
    pub special: bool,
}

/// Per-node feature selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFeatureSet {
    /// Sketch version string reported to the controller.
    pub sketch_version: heapless::String<16>,
    pub sensor_mode: SensorMode,
    /// Fitted with a relay output (siren, strobe).
    #[serde(default)]
    pub has_relay: bool,
    pub power_source: PowerSource,
    /// Transmit a transition on every contact change instead of a latched
    /// tripped/armed state. For fast, noisy switches such as IR barriers
    /// where the contact pulse is only a few milliseconds long.
    #[serde(default)]
    pub status_toggle: bool,
    /// Route traffic for out-of-range neighbours.
    #[serde(default)]
    pub repeater: bool,
    /// Pinned transport node ID, or `None` for controller assignment.
    #[serde(default)]
    pub node_id: Option<u8>,
    /// Serial console baud rate.
    pub baud_rate: u32,
    #[serde(default)]
    pub debug: DebugFlags,
}

impl Default for NodeFeatureSet {
    fn default() -> Self {
        let mut sketch_version = heapless::String::new();
        let _ = sketch_version.push_str("1.0");
        Self {
            sketch_version,
            sensor_mode: SensorMode::WireTrip,
            has_relay: false,
            power_source: PowerSource::Battery,
            status_toggle: false,
            repeater: false,
            node_id: None,
            baud_rate: 57_600,
            debug: DebugFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_pan() {
        let p = RadioProfile::default();
        assert_eq!(p.base_address, [0x00, 0x71, 0x0f, 0xfe, 0xca]);
        assert_eq!(p.channel, 112);
        assert_eq!(p.data_rate, DataRate::Rate250Kbps);
        assert_eq!(p.power_level, PowerLevel::Max);
        assert_eq!(p.irq_pin, Some(2));
    }

    #[test]
    fn default_channel_is_wifi_clear() {
        assert!(RadioProfile::default().channel >= WIFI_CLEAR_CHANNEL);
        assert!(RadioProfile::default().channel <= MAX_CHANNEL);
    }

    #[test]
    fn default_features_are_sane() {
        let f = NodeFeatureSet::default();
        assert!(!f.has_relay);
        assert!(!f.status_toggle);
        assert!(SUPPORTED_BAUD_RATES.contains(&f.baud_rate));
    }

    #[test]
    fn serde_roundtrip() {
        let p = RadioProfile::default();
        let json = serde_json::to_string(&p).unwrap();
        let p2: RadioProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, p2);

        let f = NodeFeatureSet::default();
        let json = serde_json::to_string(&f).unwrap();
        let f2: NodeFeatureSet = serde_json::from_str(&json).unwrap();
        assert_eq!(f, f2);
    }

    #[test]
    fn data_rate_json_names_are_stable() {
        assert_eq!(
            serde_json::to_string(&DataRate::Rate250Kbps).unwrap(),
            "\"250kbps\""
        );
        assert_eq!(serde_json::to_string(&PowerLevel::Max).unwrap(), "\"max\"");
    }

    #[test]
    fn base_address_rejects_wrong_length() {
        let err = serde_json::from_str::<RadioProfile>(
            r#"{"base_address":[0,113,15,254],"channel":112,
                "data_rate":"250kbps","power_level":"max","irq_pin":2}"#,
        );
        assert!(err.is_err(), "4-byte base address must not deserialize");
    }

    #[test]
    fn macro_tokens_match_radio_library() {
        assert_eq!(DataRate::Rate250Kbps.macro_token(), "RF24_250KBPS");
        assert_eq!(DataRate::Rate2Mbps.macro_token(), "RF24_2MBPS");
        assert_eq!(PowerLevel::Min.macro_token(), "RF24_PA_MIN");
        assert_eq!(PowerLevel::Max.macro_token(), "RF24_PA_MAX");
    }
}
