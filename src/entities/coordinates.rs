use serde::{Deserialize, Serialize};

/// A point on the map. Travels on the wire as `[longitude, latitude]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coordinates: Coordinates) -> Self {
        [coordinates.longitude, coordinates.latitude]
    }
}

#[test]
fn coordinates_serialize_longitude_first() {
    let coordinates = Coordinates::new(-46.63, -23.55);
    let value = serde_json::to_value(coordinates).unwrap();
    assert_eq!(value, serde_json::json!([-46.63, -23.55]));

    let parsed: Coordinates = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.latitude, -23.55);
}
