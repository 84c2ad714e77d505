//! Knobs for an unlock session.

use std::time::Duration;

use crate::{gate::UNLOCK_RADIUS_METERS, notify::Presentation};

/// Settings shared by every unlock session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    /// Distance in meters within which a listing can be unlocked.
    pub radius: f64,
    /// Time between the unlock request and the unlock taking effect.
    pub unlock_delay: Duration,
    /// Upper bound on each call to the location provider.
    pub location_timeout: Duration,
    /// How notifications are presented.
    pub presentation: Presentation,
}

impl GateConfig {
    const DEFAULT_UNLOCK_DELAY_MS: u64 = 1_000;
    const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            radius: UNLOCK_RADIUS_METERS,
            unlock_delay: Duration::from_millis(Self::DEFAULT_UNLOCK_DELAY_MS),
            location_timeout: Duration::from_secs(Self::DEFAULT_LOCATION_TIMEOUT_SECS),
            presentation: Presentation::default(),
        }
    }
}
