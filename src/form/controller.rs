use std::collections::BTreeMap;

use reqwest::Url;

use crate::entities::VehicleType;
use crate::error::Error;
use crate::form::client::QuoteClient;
use crate::form::masks::POSTAL_CODE_DIGITS;
use crate::form::state::{Field, FormState, TOTAL_STEPS};
use crate::form::validation::{
    validate_step, ValidationResult, INVALID_POSTAL_CODE, MISSING_COORDINATES,
};
use crate::form::view::{CouponFeedback, QuoteView};

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Hidden,
    Loading,
    Approved(QuoteView),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Invalid(ValidationResult),
    Quoted(QuoteView),
    Failed(String),
}

/// The submit button. `on_submit` borrows the controller mutably, so only
/// one submit runs at a time; the `SubmitGuard` re-enables the button on
/// every way out of it, including a dropped future.
#[derive(Debug, Default)]
pub struct SubmitControl {
    disabled: bool,
}

pub struct SubmitGuard<'a> {
    control: &'a mut SubmitControl,
}

impl SubmitControl {
    pub fn acquire(&mut self) -> SubmitGuard<'_> {
        self.disabled = true;
        SubmitGuard { control: self }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.control.disabled = false;
    }
}

/// Drives the four step quote wizard.
pub struct FormController<C> {
    client: C,
    state: FormState,
    field_errors: BTreeMap<Field, String>,
    address_visible: bool,
    submit: SubmitControl,
    modal: Modal,
    coupon_feedback: Option<CouponFeedback>,
    alert: Option<String>,
}

impl<C: QuoteClient> FormController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: FormState::default(),
            field_errors: BTreeMap::new(),
            address_visible: false,
            submit: SubmitControl::default(),
            modal: Modal::Hidden,
            coupon_feedback: None,
            alert: None,
        }
    }

    /// Honors `?bodyType=` from the page URL: a known body type preselects
    /// the vehicle and skips straight to the address step.
    pub fn from_page_url(client: C, page_url: &str) -> Self {
        let mut controller = Self::new(client);

        let body_type = Url::parse(page_url).ok().and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "bodyType")
                .map(|(_, value)| value.into_owned())
        });

        if let Some(vehicle) = body_type.as_deref().and_then(VehicleType::from_body_type) {
            controller.select_vehicle(vehicle);
            controller.state.current_step = 3;
        }

        controller
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn current_step(&self) -> u8 {
        self.state.current_step
    }

    /// Width of the progress bar, 0 on the first step and 100 on the last.
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.state.current_step - 1) / f64::from(TOTAL_STEPS - 1) * 100.0
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn is_address_visible(&self) -> bool {
        self.address_visible
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_disabled()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn coupon_feedback(&self) -> Option<CouponFeedback> {
        self.coupon_feedback
    }

    /// Blocking message left by a failed quote, cleared once read.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn select_vehicle(&mut self, vehicle: VehicleType) {
        self.state.vehicle = Some(vehicle);
        self.field_errors.remove(&Field::Vehicle);
    }

    /// Value of the checked vehicle radio. Anything unknown leaves no vehicle
    /// selected, so step 2 keeps failing.
    pub fn on_vehicle_input(&mut self, value: &str) {
        match VehicleType::parse(value) {
            Some(vehicle) => self.select_vehicle(vehicle),
            None => self.state.vehicle = None,
        }
    }

    pub fn set_number(&mut self, number: &str) {
        self.state.number = number.to_string();
    }

    pub fn set_name(&mut self, name: &str) {
        self.state.name = name.to_string();
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.state.set_phone(raw);
    }

    pub fn set_coupon(&mut self, coupon: &str) {
        self.state.coupon = coupon.to_string();
    }

    /// Validates the current step and moves forward when it passes.
    pub fn advance(&mut self) -> ValidationResult {
        let step = self.state.current_step;
        let result = validate_step(&self.state, step);

        self.show_errors(step, &result);

        if result.is_valid() && step < TOTAL_STEPS {
            self.state.current_step += 1;
        }

        result
    }

    pub fn back(&mut self) {
        if self.state.current_step > 1 {
            self.state.current_step -= 1;
        }
    }

    pub fn on_postal_code_input(&mut self, raw: &str) {
        self.state.set_postal_code(raw);
        self.field_errors.remove(&Field::PostalCode);
        self.address_visible = false;
    }

    pub async fn on_postal_code_blur(&mut self) {
        let postal_code = self.state.postal_code_digits();
        if postal_code.len() != POSTAL_CODE_DIGITS {
            return;
        }

        match self.client.lookup_postal_code(&postal_code).await {
            Ok(address) => {
                if self.state.apply_address(&postal_code, &address) {
                    self.address_visible = true;
                    self.field_errors.remove(&Field::PostalCode);
                }
            }
            Err(Error { message, .. }) => {
                tracing::debug!(%postal_code, %message, "postal code lookup failed");
                self.state.clear_coordinates();
                self.field_errors.insert(Field::PostalCode, message);
                self.address_visible = false;
            }
        }
    }

    pub async fn on_submit(&mut self) -> SubmitOutcome {
        let result = validate_step(&self.state, TOTAL_STEPS);
        self.show_errors(TOTAL_STEPS, &result);
        if !result.is_valid() {
            return SubmitOutcome::Invalid(result);
        }

        let destination = match self.state.coordinates() {
            Some(destination) => destination,
            None => {
                let message = MISSING_COORDINATES.to_string();
                self.alert = Some(alert_message(&message));
                return SubmitOutcome::Failed(message);
            }
        };

        let _guard = self.submit.acquire();

        self.modal = Modal::Loading;
        self.coupon_feedback = None;

        match self
            .client
            .request_quote(destination, &self.state.coupon)
            .await
        {
            Ok(quote) => {
                self.coupon_feedback = CouponFeedback::for_quote(&self.state.coupon, &quote);

                let view = QuoteView::new(&self.state, &quote);
                self.modal = Modal::Approved(view.clone());

                SubmitOutcome::Quoted(view)
            }
            Err(Error { message, .. }) => {
                tracing::warn!(%message, "quote request failed");
                self.alert = Some(alert_message(&message));
                self.modal = Modal::Hidden;

                SubmitOutcome::Failed(message)
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Hidden;
        self.state.coupon.clear();
        self.coupon_feedback = None;
    }

    fn show_errors(&mut self, step: u8, result: &ValidationResult) {
        match step {
            3 => {
                // A lookup error already on the postal code says more than
                // the generic missing-coordinates message, so it stays.
                self.field_errors.remove(&Field::Number);
                if self.field_error(Field::PostalCode) == Some(INVALID_POSTAL_CODE) {
                    self.field_errors.remove(&Field::PostalCode);
                }

                for error in &result.errors {
                    if error.message == MISSING_COORDINATES
                        && self.field_errors.contains_key(&error.field)
                    {
                        continue;
                    }
                    self.field_errors
                        .insert(error.field, error.message.to_string());
                }
            }
            2 | 4 => {
                self.field_errors.clear();
                for error in &result.errors {
                    self.field_errors
                        .insert(error.field, error.message.to_string());
                }
            }
            _ => {}
        }
    }
}

fn alert_message(message: &str) -> String {
    format!("Erro ao calcular o frete: {}. Tente novamente.", message)
}

#[cfg(test)]
mod fake {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::entities::{Address, Coordinates, FormattedQuote};
    use crate::error::{postal_code_not_found_error, route_upstream_error, Error};
    use crate::form::client::QuoteClient;

    pub struct FakeClient {
        pub address: Result<Address, Error>,
        pub quote: Result<FormattedQuote, Error>,
        pub quote_requests: Mutex<Vec<(Coordinates, String)>>,
        pub stall: bool,
    }

    impl FakeClient {
        pub fn ok() -> Self {
            Self {
                address: Ok(Address::new(
                    "Praça da Sé".into(),
                    "São Paulo".into(),
                    "SP".into(),
                    Coordinates::new(-46.6339, -23.5503),
                )),
                quote: Ok(FormattedQuote {
                    valor_base: "R$\u{a0}250,00".into(),
                    desconto: "R$\u{a0}25,00".into(),
                    valor_final: "R$\u{a0}225,00".into(),
                    cupom_aplicado: true,
                    prazo: "Aprox. 3 dias".into(),
                }),
                quote_requests: Mutex::new(vec![]),
                stall: false,
            }
        }

        pub fn unknown_postal_code() -> Self {
            Self {
                address: Err(postal_code_not_found_error()),
                ..Self::ok()
            }
        }

        pub fn route_down() -> Self {
            Self {
                quote: Err(route_upstream_error("quota exceeded")),
                ..Self::ok()
            }
        }

        /// Quote requests never answer.
        pub fn stalled() -> Self {
            Self {
                stall: true,
                ..Self::ok()
            }
        }
    }

    #[async_trait]
    impl QuoteClient for FakeClient {
        async fn lookup_postal_code(&self, _postal_code: &str) -> Result<Address, Error> {
            self.address.clone()
        }

        async fn request_quote(
            &self,
            destination: Coordinates,
            coupon: &str,
        ) -> Result<FormattedQuote, Error> {
            self.quote_requests
                .lock()
                .unwrap()
                .push((destination, coupon.to_string()));
            if self.stall {
                std::future::pending::<()>().await;
            }
            self.quote.clone()
        }
    }
}

#[cfg(test)]
fn filled_controller(client: fake::FakeClient) -> FormController<fake::FakeClient> {
    use tokio_test::block_on;

    let mut controller = FormController::new(client);
    controller.advance();
    controller.select_vehicle(VehicleType::Medio);
    controller.advance();
    controller.set_number("100");
    controller.on_postal_code_input("01001000");
    block_on(controller.on_postal_code_blur());
    controller.advance();
    controller.set_name("Maria");
    controller.set_phone("15996452232");
    controller
}

#[test]
fn walks_all_steps() {
    let controller = filled_controller(fake::FakeClient::ok());

    assert_eq!(controller.current_step(), 4);
    assert_eq!(controller.progress_percent(), 100.0);
    assert!(controller.is_address_visible());
    assert_eq!(controller.state().street, "Praça da Sé");
}

#[test]
fn failed_step_keeps_position_and_marks_fields() {
    let mut controller = FormController::new(fake::FakeClient::ok());
    controller.advance();

    let result = controller.advance();

    assert!(!result.is_valid());
    assert_eq!(controller.current_step(), 2);
    assert!(controller.field_error(Field::Vehicle).is_some());
}

#[test]
fn back_never_validates() {
    let mut controller = FormController::new(fake::FakeClient::ok());
    controller.advance();
    controller.back();
    controller.back();

    assert_eq!(controller.current_step(), 1);
    assert!(controller.field_error(Field::Vehicle).is_none());
}

#[test]
fn postal_code_edit_after_lookup_clears_coordinates() {
    use tokio_test::block_on;

    let mut controller = FormController::new(fake::FakeClient::ok());
    controller.on_postal_code_input("01001000");
    block_on(controller.on_postal_code_blur());
    assert!(controller.state().coordinates().is_some());

    controller.on_postal_code_input("01001-00");

    assert_eq!(controller.state().coordinates(), None);
    assert!(!controller.is_address_visible());
    assert_eq!(controller.field_error(Field::PostalCode), None);
}

#[test]
fn failed_lookup_shows_server_message_and_blocks_step() {
    use tokio_test::block_on;

    let mut controller = FormController::new(fake::FakeClient::unknown_postal_code());
    controller.state.current_step = 3;
    controller.set_number("10");
    controller.on_postal_code_input("99999999");
    block_on(controller.on_postal_code_blur());

    assert_eq!(controller.field_error(Field::PostalCode), Some("CEP não encontrado"));
    assert!(!controller.is_address_visible());

    let result = controller.advance();

    assert!(!result.is_valid());
    assert_eq!(controller.current_step(), 3);
    assert_eq!(controller.field_error(Field::PostalCode), Some("CEP não encontrado"));
}

#[test]
fn short_postal_code_skips_lookup() {
    use tokio_test::block_on;

    let mut controller = FormController::new(fake::FakeClient::unknown_postal_code());
    controller.on_postal_code_input("0100");
    block_on(controller.on_postal_code_blur());

    assert_eq!(controller.field_error(Field::PostalCode), None);
}

#[test]
fn submit_renders_quote_and_releases_control() {
    use crate::entities::Coordinates;
    use tokio_test::block_on;

    let mut controller = filled_controller(fake::FakeClient::ok());
    controller.set_coupon(" desconto10 ");

    let outcome = block_on(controller.on_submit());

    let view = match outcome {
        SubmitOutcome::Quoted(view) => view,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(view.vehicle, "MEDIO");
    assert_eq!(view.discount.as_deref(), Some("- R$\u{a0}25,00"));
    assert_eq!(controller.modal(), &Modal::Approved(view));
    assert_eq!(controller.coupon_feedback(), Some(CouponFeedback::Applied));
    assert!(!controller.is_submitting());

    let requests = controller.client.quote_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![(Coordinates::new(-46.6339, -23.5503), " desconto10 ".to_string())]
    );
}

#[test]
fn submit_failure_alerts_and_closes_modal() {
    use tokio_test::block_on;

    let mut controller = filled_controller(fake::FakeClient::route_down());

    let outcome = block_on(controller.on_submit());

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("Erro da API de Rota: quota exceeded".into())
    );
    assert_eq!(controller.modal(), &Modal::Hidden);
    assert!(!controller.is_submitting());
    assert_eq!(
        controller.take_alert().as_deref(),
        Some("Erro ao calcular o frete: Erro da API de Rota: quota exceeded. Tente novamente.")
    );
}

#[test]
fn invalid_step_four_does_not_submit() {
    use tokio_test::block_on;

    let mut controller = filled_controller(fake::FakeClient::ok());
    controller.set_phone("1599");

    let outcome = block_on(controller.on_submit());

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(controller.client.quote_requests.lock().unwrap().is_empty());
}

#[test]
fn close_modal_resets_coupon() {
    use tokio_test::block_on;

    let mut controller = filled_controller(fake::FakeClient::ok());
    controller.set_coupon("DESCONTO10");
    block_on(controller.on_submit());

    controller.close_modal();

    assert_eq!(controller.modal(), &Modal::Hidden);
    assert_eq!(controller.state().coupon, "");
    assert_eq!(controller.coupon_feedback(), None);
}

#[test]
fn submit_control_is_released_when_the_guard_drops() {
    let mut control = SubmitControl::default();

    {
        let guard = control.acquire();
        assert!(guard.control.disabled);
    }
    assert!(!control.is_disabled());
}

#[test]
fn abandoned_submit_re_enables_the_button() {
    use tokio_test::{assert_pending, task};

    let mut controller = filled_controller(fake::FakeClient::stalled());

    {
        let mut submit = task::spawn(controller.on_submit());
        assert_pending!(submit.poll());
    }

    assert!(!controller.is_submitting());
    assert_eq!(controller.client.quote_requests.lock().unwrap().len(), 1);
}

#[test]
fn vehicle_radio_values_select_the_vehicle() {
    let mut controller = FormController::new(fake::FakeClient::ok());
    controller.advance();

    controller.on_vehicle_input("grande");
    assert_eq!(controller.state().vehicle, Some(VehicleType::Grande));
    assert!(controller.advance().is_valid());

    controller.back();
    controller.on_vehicle_input("caminhao");
    assert_eq!(controller.state().vehicle, None);
    assert!(!controller.advance().is_valid());
    assert!(controller.field_error(Field::Vehicle).is_some());
}

#[test]
fn body_type_jumps_to_address_step() {
    let controller = FormController::from_page_url(
        fake::FakeClient::ok(),
        "https://topcar.example/frete.html?bodyType=SUV",
    );
    assert_eq!(controller.current_step(), 3);
    assert_eq!(controller.state().vehicle, Some(VehicleType::Medio));

    let controller = FormController::from_page_url(
        fake::FakeClient::ok(),
        "https://topcar.example/frete.html?bodyType=Trator",
    );
    assert_eq!(controller.current_step(), 1);
    assert_eq!(controller.state().vehicle, None);
}
