use crate::form::masks::{MIN_PHONE_LENGTH, POSTAL_CODE_DIGITS};
use crate::form::state::{Field, FormState};

pub const VEHICLE_REQUIRED: &str = "Selecione o tipo de veículo";
pub const NUMBER_REQUIRED: &str = "Digite o número";
pub const INVALID_POSTAL_CODE: &str = "CEP inválido";
pub const MISSING_COORDINATES: &str = "CEP não encontrado ou sem coordenadas. Verifique o CEP.";
pub const NAME_REQUIRED: &str = "Preencha seu nome";
pub const INVALID_PHONE: &str = "WhatsApp inválido";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

/// Checks the fields owned by `step`. Steps without fields always pass.
pub fn validate_step(state: &FormState, step: u8) -> ValidationResult {
    let mut result = ValidationResult::default();

    match step {
        2 => {
            if state.vehicle.is_none() {
                result.push(Field::Vehicle, VEHICLE_REQUIRED);
            }
        }
        3 => {
            if state.number.trim().is_empty() {
                result.push(Field::Number, NUMBER_REQUIRED);
            }

            if state.postal_code_digits().len() != POSTAL_CODE_DIGITS {
                result.push(Field::PostalCode, INVALID_POSTAL_CODE);
            } else if state.coordinates().is_none() {
                result.push(Field::PostalCode, MISSING_COORDINATES);
            }
        }
        4 => {
            if state.name.trim().is_empty() {
                result.push(Field::Name, NAME_REQUIRED);
            }
            if state.phone().chars().count() < MIN_PHONE_LENGTH {
                result.push(Field::Phone, INVALID_PHONE);
            }
        }
        _ => {}
    }

    result
}

#[test]
fn step_two_requires_vehicle() {
    use crate::entities::VehicleType;

    let mut state = FormState::default();
    assert_eq!(
        validate_step(&state, 2).error_for(Field::Vehicle),
        Some(VEHICLE_REQUIRED)
    );

    state.vehicle = Some(VehicleType::Medio);
    assert!(validate_step(&state, 2).is_valid());
}

#[test]
fn step_three_fails_without_coordinates() {
    let mut state = FormState::default();
    state.number = "100".into();
    state.set_postal_code("01001000");

    let result = validate_step(&state, 3);

    assert_eq!(result.error_for(Field::PostalCode), Some(MISSING_COORDINATES));
    assert_eq!(result.error_for(Field::Number), None);
}

#[test]
fn step_three_checks_format_before_coordinates() {
    let mut state = FormState::default();
    state.set_postal_code("0100");

    let result = validate_step(&state, 3);

    assert_eq!(result.error_for(Field::PostalCode), Some(INVALID_POSTAL_CODE));
    assert_eq!(result.error_for(Field::Number), Some(NUMBER_REQUIRED));
}

#[test]
fn step_three_passes_after_lookup() {
    use crate::entities::{Address, Coordinates};

    let mut state = FormState::default();
    state.number = "42".into();
    state.set_postal_code("01001000");
    let address = Address::new(
        "Praça da Sé".into(),
        "São Paulo".into(),
        "SP".into(),
        Coordinates::new(-46.6339, -23.5503),
    );
    state.apply_address("01001000", &address);

    assert!(validate_step(&state, 3).is_valid());
}

#[test]
fn step_four_requires_name_and_full_phone() {
    let mut state = FormState::default();
    state.set_phone("1599645");

    let result = validate_step(&state, 4);
    assert_eq!(result.error_for(Field::Name), Some(NAME_REQUIRED));
    assert_eq!(result.error_for(Field::Phone), Some(INVALID_PHONE));

    state.name = "Maria".into();
    state.set_phone("15996452232");
    assert!(validate_step(&state, 4).is_valid());
}

#[test]
fn step_one_has_nothing_to_check() {
    assert!(validate_step(&FormState::default(), 1).is_valid());
}
