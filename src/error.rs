//! Unified error types for the configuration compiler.
//!
//! A single `ConfigError` enum that every validation rule funnels into,
//! keeping the CLI's error handling uniform. All variants are `Copy` so
//! they can be cheaply passed around and matched on without allocation.
//! Every error is fatal: a node image must never be built from a
//! configuration that failed resolution.

use core::fmt;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Every way a node configuration can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Two requested features cannot coexist on one node.
    /// The `&'static str` names the pair and the reason.
    IncompatibleFeatures(&'static str),
    /// RF channel outside the nRF24 hardware range (0–125).
    ChannelOutOfRange(u8),
    /// RF channel collides with the 2.4 GHz Wi-Fi band while the PAN
    /// requests Wi-Fi coexistence.
    ReservedChannel(u8),
    /// UART baud rate is not one of the supported rates.
    InvalidBaudRate(u32),
    /// Two functions were assigned the same pin, or a pin is outside the
    /// usable range for the target MCU.
    PinConflict(&'static str),
    /// Pinned node ID is reserved by the transport (0 = gateway, 255 =
    /// auto-assignment sentinel).
    InvalidNodeId(u8),
    /// The manifest is structurally unusable.
    Manifest(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleFeatures(msg) => write!(f, "incompatible features: {msg}"),
            Self::ChannelOutOfRange(ch) => {
                write!(f, "channel {ch} outside nRF24 range 0-125")
            }
            Self::ReservedChannel(ch) => write!(
                f,
                "channel {ch} ({} MHz) overlaps the 2.4 GHz Wi-Fi band",
                2400 + u16::from(*ch)
            ),
            Self::InvalidBaudRate(rate) => write!(f, "unsupported baud rate {rate}"),
            Self::PinConflict(msg) => write!(f, "pin conflict: {msg}"),
            Self::InvalidNodeId(id) => write!(f, "node ID {id} is reserved"),
            Self::Manifest(msg) => write!(f, "manifest: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_channel_frequency() {
        let msg = ConfigError::ReservedChannel(40).to_string();
        assert!(msg.contains("2440 MHz"), "got: {msg}");
    }

    #[test]
    fn display_is_descriptive() {
        let msg = ConfigError::IncompatibleFeatures("relay requires AC power").to_string();
        assert_eq!(msg, "incompatible features: relay requires AC power");
    }
}
