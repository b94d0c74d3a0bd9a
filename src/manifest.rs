//! Declarative node manifest.
//!
//! The JSON input describing one node build. The radio section and PAN
//! policy are optional and default to the production PAN profile, so a
//! minimal manifest only names the node and its feature selection:
//!
//! ```json
//! {
//!   "name": "hallway-pir",
//!   "features": {
//!     "sketch_version": "1.7",
//!     "sensor_mode": "pir",
//!     "power_source": "battery",
//!     "baud_rate": 57600
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{NodeFeatureSet, RadioProfile};
use crate::error;
use crate::resolver::{PanPolicy, ResolvedConfig, resolve_with_policy};

/// One node build, as declared by the person maintaining the PAN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeManifest {
    /// Human-readable node name, used in generated-file banners.
    #[serde(default)]
    pub name: Option<String>,
    /// Radio transport parameters; defaults to the PAN profile.
    #[serde(default)]
    pub radio: RadioProfile,
    pub features: NodeFeatureSet,
    #[serde(default)]
    pub policy: PanPolicy,
}

impl NodeManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Run the resolver on this manifest.
    pub fn resolve(&self) -> error::Result<ResolvedConfig> {
        resolve_with_policy(&self.radio, &self.features, self.policy)
    }

    /// Split into the resolver's inputs.
    pub fn into_parts(self) -> (RadioProfile, NodeFeatureSet, PanPolicy) {
        (self.radio, self.features, self.policy)
    }
}
