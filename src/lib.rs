//! panforge — node configuration compiler for nRF24 sensor-node PANs.
//!
//! Replaces the per-sketch `#define` headers with a declarative manifest:
//! a node's radio profile and feature set are parsed, validated against the
//! PAN's invariants, and compiled into the macro header and provisioning
//! blob the node build consumes. Invalid combinations (a relay on a battery
//! node, a PIR sensor with status-toggle) stop the build with a typed error
//! instead of surviving as a code comment.

#![deny(unused_must_use)]

pub mod config;
pub mod emit;
pub mod manifest;
pub mod resolver;

pub mod error;
pub mod pins;

pub use config::{NodeFeatureSet, RadioProfile};
pub use error::ConfigError;
pub use manifest::NodeManifest;
pub use resolver::{ResolvedConfig, resolve};
