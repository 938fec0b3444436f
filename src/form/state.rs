use crate::entities::{Address, Coordinates, VehicleType};
use crate::form::masks;

pub const TOTAL_STEPS: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Vehicle,
    PostalCode,
    Number,
    Name,
    Phone,
}

/// Everything the wizard has collected so far.
///
/// Coordinates are only ever present for the postal code currently typed:
/// `set_postal_code` drops them and `apply_address` refuses an address that
/// was looked up for a different code.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub current_step: u8,
    pub vehicle: Option<VehicleType>,
    postal_code: String,
    pub street: String,
    pub city: String,
    pub state: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    pub number: String,
    pub name: String,
    phone: String,
    pub coupon: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            current_step: 1,
            vehicle: None,
            postal_code: String::new(),
            street: String::new(),
            city: String::new(),
            state: String::new(),
            latitude: None,
            longitude: None,
            number: String::new(),
            name: String::new(),
            phone: String::new(),
            coupon: String::new(),
        }
    }
}

impl FormState {
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn postal_code_digits(&self) -> String {
        masks::digits(&self.postal_code)
    }

    pub fn set_postal_code(&mut self, raw: &str) {
        self.postal_code = masks::mask_postal_code(raw);
        self.clear_address();
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = masks::mask_phone(raw);
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.longitude, self.latitude) {
            (Some(longitude), Some(latitude)) => Some(Coordinates::new(longitude, latitude)),
            _ => None,
        }
    }

    /// Returns false, leaving the state untouched, when the field has been
    /// edited since `postal_code` was looked up.
    pub fn apply_address(&mut self, postal_code: &str, address: &Address) -> bool {
        if self.postal_code_digits() != postal_code {
            return false;
        }

        self.street = address.street.clone();
        self.city = address.city.clone();
        self.state = address.state.clone();
        self.latitude = Some(address.latitude);
        self.longitude = Some(address.longitude);

        true
    }

    pub fn clear_coordinates(&mut self) {
        self.latitude = None;
        self.longitude = None;
    }

    pub fn clear_address(&mut self) {
        self.clear_coordinates();
        self.street.clear();
        self.city.clear();
        self.state.clear();
    }

    /// `"<city>/<state>"`, as shown on the ticket and in the WhatsApp text.
    pub fn destination(&self) -> String {
        format!("{}/{}", self.city, self.state)
    }
}

#[cfg(test)]
fn sample_address() -> Address {
    Address::new(
        "Praça da Sé".into(),
        "São Paulo".into(),
        "SP".into(),
        Coordinates::new(-46.6339, -23.5503),
    )
}

#[test]
fn editing_postal_code_clears_coordinates() {
    let mut state = FormState::default();
    state.set_postal_code("01001000");
    assert!(state.apply_address("01001000", &sample_address()));
    assert!(state.coordinates().is_some());

    state.set_postal_code("01001-00");

    assert_eq!(state.coordinates(), None);
    assert_eq!(state.street, "");
    assert_eq!(state.city, "");
}

#[test]
fn stale_lookup_is_rejected() {
    let mut state = FormState::default();
    state.set_postal_code("01001000");
    state.set_postal_code("18035000");

    assert!(!state.apply_address("01001000", &sample_address()));
    assert_eq!(state.coordinates(), None);
}

#[test]
fn setters_apply_masks() {
    let mut state = FormState::default();
    state.set_postal_code("18035-0001");
    state.set_phone("15996452232");

    assert_eq!(state.postal_code(), "18035-000");
    assert_eq!(state.postal_code_digits(), "18035000");
    assert_eq!(state.phone(), "(15) 99645-2232");
}
