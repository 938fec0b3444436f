use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Moto,
    Pequeno,
    Medio,
    Grande,
}

impl VehicleType {
    /// Maps the `bodyType` query parameter used by the catalogue pages.
    pub fn from_body_type(body_type: &str) -> Option<Self> {
        match body_type {
            "Moto" => Some(Self::Moto),
            "Hatch" => Some(Self::Pequeno),
            "Sedan" | "SUV" => Some(Self::Medio),
            "Utilitario" => Some(Self::Grande),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Moto => "moto",
            Self::Pequeno => "pequeno",
            Self::Medio => "medio",
            Self::Grande => "grande",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "moto" => Some(Self::Moto),
            "pequeno" => Some(Self::Pequeno),
            "medio" => Some(Self::Medio),
            "grande" => Some(Self::Grande),
            _ => None,
        }
    }
}

#[test]
fn body_types_map_to_vehicle_sizes() {
    assert_eq!(VehicleType::from_body_type("Moto"), Some(VehicleType::Moto));
    assert_eq!(VehicleType::from_body_type("Hatch"), Some(VehicleType::Pequeno));
    assert_eq!(VehicleType::from_body_type("Sedan"), Some(VehicleType::Medio));
    assert_eq!(VehicleType::from_body_type("SUV"), Some(VehicleType::Medio));
    assert_eq!(VehicleType::from_body_type("Utilitario"), Some(VehicleType::Grande));
    assert_eq!(VehicleType::from_body_type("moto"), None);
    assert_eq!(VehicleType::from_body_type("Caminhao"), None);
}
