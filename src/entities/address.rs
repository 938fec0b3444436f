use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// A resolved postal code, in the shape the form expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Address {
    pub fn new(street: String, city: String, state: String, coordinates: Coordinates) -> Self {
        Self {
            street,
            city,
            state,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}
