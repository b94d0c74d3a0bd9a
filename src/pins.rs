//! Pin assignments for the ATmega328-based sensor-node board.
//!
//! Single source of truth — the resolver and the header emitter reference
//! this module rather than hard-coding pin numbers. Change a pin here and
//! it propagates to every generated node image.
//!
//! Numbering follows the Arduino digital pin map for the ATmega328
//! (D0–D19, where D14–D19 double as A0–A5).

// ---------------------------------------------------------------------------
// Radio (nRF24L01+ on the SPI bus)
// ---------------------------------------------------------------------------

/// Radio IRQ line — must sit on INT0 so the MCU can wake from sleep on
/// incoming traffic. D2 on every board revision.
pub const RADIO_IRQ_PIN: u8 = 2;

// ---------------------------------------------------------------------------
// Sensor input
// ---------------------------------------------------------------------------

/// PIR output or wire-trip loop input. D3 (INT1) so battery nodes can use
/// a pin-change wake instead of polling.
pub const SENSOR_INPUT_PIN: u8 = 3;

// ---------------------------------------------------------------------------
// Relay driver (alarm siren, strobe, etc.)
// ---------------------------------------------------------------------------

/// Relay driver output. D17, aka A3 / PC3 / ADC3 — chip pin 26 on the DIP
/// package. Keeps the low digital pins free for the radio and sensor.
pub const RELAY_PIN: u8 = 17;

// ---------------------------------------------------------------------------
// Usable pin range
// ---------------------------------------------------------------------------

/// Lowest assignable digital pin. D0/D1 are the UART and stay reserved for
/// serial debug output.
pub const MIN_DIGITAL_PIN: u8 = 2;
/// Highest assignable digital pin (A5 on the analog header).
pub const MAX_DIGITAL_PIN: u8 = 19;

/// Whether `pin` is assignable on this board.
pub const fn is_assignable(pin: u8) -> bool {
    pin >= MIN_DIGITAL_PIN && pin <= MAX_DIGITAL_PIN
}
