//! Node configuration resolver.
//!
//! Takes a [`RadioProfile`] + [`NodeFeatureSet`] pair and either produces an
//! immutable [`ResolvedConfig`] or rejects the combination with a typed
//! [`ConfigError`]. Resolution runs once per node image; nothing downstream
//! ever sees a half-validated configuration.
//!
//! ```text
//!   NodeManifest ──▶ resolve() ──▶ ResolvedConfig ──▶ emit / pack
//!                        │
//!                        └──▶ ConfigError (build stops)
//! ```
//!
//! Rules are checked in a fixed order and the first failure wins. Advisory
//! findings that do not block the build (marginal baud rate, PA level vs.
//! battery budget) are collected as warnings on the resolved config.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{
    MAX_CHANNEL, NodeFeatureSet, PowerLevel, PowerSource, RadioProfile, SUPPORTED_BAUD_RATES,
    SensorMode, WIFI_CLEAR_CHANNEL,
};
use crate::error::{ConfigError, Result};
use crate::pins;

/// Child sensor ID of the primary sensor (PIR or wire trip).
pub const CHILD_ID_SENSOR: u8 = 1;
/// Child sensor ID of the relay output, on nodes that have one.
pub const CHILD_ID_RELAY: u8 = 2;

/// Maximum advisory warnings a single resolution can accumulate.
const MAX_WARNINGS: usize = 4;

// ---------------------------------------------------------------------------
// PAN policy
// ---------------------------------------------------------------------------

/// PAN-level resolution policy, shared by every node on the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanPolicy {
    /// Require the RF channel to sit clear of the 2.4 GHz Wi-Fi band.
    #[serde(default = "default_true")]
    pub wifi_coexistence: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PanPolicy {
    fn default() -> Self {
        Self {
            wifi_coexistence: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// A fully validated node configuration.
///
/// Constructed only by [`resolve`]; fields are public for the emitter and
/// tests but the struct is treated as immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub radio: RadioProfile,
    pub features: NodeFeatureSet,
    /// Pin carrying the PIR output or wire-trip loop.
    pub sensor_pin: u8,
    /// Relay driver pin, on nodes that have one.
    pub relay_pin: Option<u8>,
    pub sensor_child: u8,
    pub relay_child: Option<u8>,
    /// Advisory findings from resolution. Not part of the provisioning
    /// blob — they matter to the person running the compiler, not the node.
    #[serde(skip)]
    pub warnings: heapless::Vec<&'static str, MAX_WARNINGS>,
}

impl ResolvedConfig {
    /// Serialize into the compact provisioning blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self)
            .map_err(|_| ConfigError::Manifest("provisioning blob encode failed"))
    }

    /// Deserialize a provisioning blob.
    ///
    /// The decoded config is re-validated against every policy-independent
    /// rule before it is handed out: a tampered or stale blob must not
    /// smuggle a rejected combination past the resolver.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded: Self = postcard::from_bytes(bytes)
            .map_err(|_| ConfigError::Manifest("provisioning blob corrupt"))?;
        decoded.revalidate()?;
        Ok(decoded)
    }

    /// Re-run the resolution rules that do not depend on PAN policy.
    /// The Wi-Fi coexistence check is skipped: the policy is not part of
    /// the blob, and a blob packed for a non-coexistent PAN stays valid.
    fn revalidate(&self) -> Result<()> {
        if self.radio.channel > MAX_CHANNEL {
            return Err(ConfigError::ChannelOutOfRange(self.radio.channel));
        }
        check_features(&self.features)?;
        check_node_id(&self.features)?;
        let (sensor_pin, relay_pin) = assign_pins(&self.radio, &self.features)?;
        if self.sensor_pin != sensor_pin
            || self.relay_pin != relay_pin
            || self.relay_pin.is_some() != self.relay_child.is_some()
        {
            return Err(ConfigError::Manifest("provisioning blob pin table inconsistent"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve under the default PAN policy (Wi-Fi coexistence on).
pub fn resolve(profile: &RadioProfile, features: &NodeFeatureSet) -> Result<ResolvedConfig> {
    resolve_with_policy(profile, features, PanPolicy::default())
}

/// Validate a profile + feature-set combination and produce the concrete
/// parameter set. First rule failure wins; the build must not proceed.
pub fn resolve_with_policy(
    profile: &RadioProfile,
    features: &NodeFeatureSet,
    policy: PanPolicy,
) -> Result<ResolvedConfig> {
    check_radio(profile, policy)?;
    check_features(features)?;
    check_node_id(features)?;
    let (sensor_pin, relay_pin) = assign_pins(profile, features)?;

    let mut warnings: heapless::Vec<&'static str, MAX_WARNINGS> = heapless::Vec::new();
    collect_warnings(profile, features, &mut warnings);

    debug!(
        "resolved node config: channel {}, {:?}, relay={}, power={:?}",
        profile.channel, features.sensor_mode, features.has_relay, features.power_source
    );

    Ok(ResolvedConfig {
        radio: profile.clone(),
        features: features.clone(),
        sensor_pin,
        relay_pin,
        sensor_child: CHILD_ID_SENSOR,
        relay_child: relay_pin.map(|_| CHILD_ID_RELAY),
        warnings,
    })
}

// ── Rule checks ───────────────────────────────────────────────

fn check_radio(profile: &RadioProfile, policy: PanPolicy) -> Result<()> {
    if profile.channel > MAX_CHANNEL {
        return Err(ConfigError::ChannelOutOfRange(profile.channel));
    }
    if policy.wifi_coexistence && profile.channel < WIFI_CLEAR_CHANNEL {
        return Err(ConfigError::ReservedChannel(profile.channel));
    }
    Ok(())
}

fn check_features(features: &NodeFeatureSet) -> Result<()> {
    // A switched load cannot ride a sleeping node: the relay must hold its
    // state while battery nodes spend their life in power-down.
    if features.has_relay && features.power_source == PowerSource::Battery {
        return Err(ConfigError::IncompatibleFeatures("relay requires AC power"));
    }
    // The PIR front-end has its own on-delay (potentiometer-adjustable);
    // transient open/closed toggling never reaches the MCU.
    if features.sensor_mode == SensorMode::Pir && features.status_toggle {
        return Err(ConfigError::IncompatibleFeatures(
            "PIR mode excludes status toggle",
        ));
    }
    // Repeaters must keep the radio in listen mode around the clock.
    if features.repeater && features.power_source == PowerSource::Battery {
        return Err(ConfigError::IncompatibleFeatures(
            "repeater requires AC power",
        ));
    }
    if !SUPPORTED_BAUD_RATES.contains(&features.baud_rate) {
        return Err(ConfigError::InvalidBaudRate(features.baud_rate));
    }
    Ok(())
}

fn check_node_id(features: &NodeFeatureSet) -> Result<()> {
    match features.node_id {
        Some(id) if id == 0 || id == 255 => Err(ConfigError::InvalidNodeId(id)),
        _ => Ok(()),
    }
}

fn assign_pins(profile: &RadioProfile, features: &NodeFeatureSet) -> Result<(u8, Option<u8>)> {
    if let Some(irq) = profile.irq_pin {
        if !pins::is_assignable(irq) {
            return Err(ConfigError::PinConflict("radio IRQ pin outside D2-D19"));
        }
        if irq == pins::SENSOR_INPUT_PIN {
            return Err(ConfigError::PinConflict(
                "radio IRQ and sensor input share a pin",
            ));
        }
    }

    let relay_pin = if features.has_relay {
        if profile.irq_pin == Some(pins::RELAY_PIN) {
            return Err(ConfigError::PinConflict(
                "radio IRQ and relay driver share a pin",
            ));
        }
        Some(pins::RELAY_PIN)
    } else {
        None
    };

    Ok((pins::SENSOR_INPUT_PIN, relay_pin))
}

fn collect_warnings(
    profile: &RadioProfile,
    features: &NodeFeatureSet,
    warnings: &mut heapless::Vec<&'static str, MAX_WARNINGS>,
) {
    if features.power_source == PowerSource::Battery && features.baud_rate == 115_200 {
        let _ = warnings.push("115200 baud is marginal at 8 MHz; prefer 57600 on battery nodes");
    }
    if features.power_source == PowerSource::Battery && profile.power_level == PowerLevel::Max {
        let _ = warnings.push("PA max on a battery node; check the transmit current budget");
    }
    if profile.irq_pin.is_none() && features.repeater {
        let _ = warnings.push("repeater without radio IRQ falls back to polled receive");
    }
}
