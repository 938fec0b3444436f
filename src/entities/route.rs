use serde::{Deserialize, Serialize};

/// Normalized answer of a routing provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_seconds: f64,
}

impl RouteSummary {
    pub fn new(distance_km: f64, duration_seconds: f64) -> Self {
        Self {
            distance_km,
            duration_seconds,
        }
    }
}
