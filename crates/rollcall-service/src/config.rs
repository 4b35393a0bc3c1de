//! Service configuration.

use serde::{Deserialize, Serialize};

/// Tunable behavior of the service layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// When set, authorization denials are reported as `NotFound` so a
    /// caller cannot probe for the existence of teams it cannot see. Off by
    /// default: denials surface as `Unauthorized`, distinguishable from a
    /// genuinely missing resource.
    #[serde(default)]
    pub conceal_denials: bool,
}
