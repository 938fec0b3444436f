use serde::{Deserialize, Serialize};

use crate::entities::coupon::{self, COUPON_DISCOUNT_RATE};
use crate::entities::currency::format_brl;
use crate::entities::{Coordinates, RouteSummary};

pub const RATE_PER_KM: f64 = 2.50;

/// Days added on top of the driving time to cover pickup and handling.
pub const HANDLING_DAYS: u32 = 2;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub route: RouteSummary,
    pub base_value: f64,
    pub discount: f64,
    pub final_value: f64,
    pub coupon_applied: bool,
    pub eta_days: u32,
}

impl Quote {
    pub fn new(route: RouteSummary, coupon: Option<&str>) -> Self {
        let base_value = route.distance_km * RATE_PER_KM;
        let coupon_applied = coupon::applies(coupon);
        let discount = if coupon_applied {
            base_value * COUPON_DISCOUNT_RATE
        } else {
            0.0
        };

        Self {
            route,
            base_value,
            discount,
            final_value: base_value - discount,
            coupon_applied,
            eta_days: eta_days(route.duration_seconds),
        }
    }

    pub fn eta(&self) -> String {
        format!("Aprox. {} dias", self.eta_days)
    }
}

pub fn eta_days(duration_seconds: f64) -> u32 {
    let driving_days = (duration_seconds / SECONDS_PER_DAY).ceil() as u32;

    driving_days.saturating_add(HANDLING_DAYS)
}

/// Body of `POST /api/calcular-frete`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub destino_coords: Coordinates,
    #[serde(default)]
    pub cupom: Option<String>,
}

/// What `/api/calcular-frete` answers with: every amount already formatted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedQuote {
    pub valor_base: String,
    pub desconto: String,
    pub valor_final: String,
    pub cupom_aplicado: bool,
    pub prazo: String,
}

impl From<Quote> for FormattedQuote {
    fn from(quote: Quote) -> Self {
        Self {
            valor_base: format_brl(quote.base_value),
            desconto: format_brl(quote.discount),
            valor_final: format_brl(quote.final_value),
            cupom_aplicado: quote.coupon_applied,
            prazo: quote.eta(),
        }
    }
}

#[test]
fn pricing_is_linear_in_distance() {
    let quote = Quote::new(RouteSummary::new(100.0, 3600.0), None);
    assert_eq!(quote.base_value, 250.0);
    assert_eq!(quote.discount, 0.0);
    assert_eq!(quote.final_value, 250.0);
    assert!(!quote.coupon_applied);
}

#[test]
fn coupon_takes_ten_percent_off() {
    let quote = Quote::new(RouteSummary::new(100.0, 3600.0), Some(" desconto10 "));
    assert_eq!(quote.base_value, 250.0);
    assert_eq!(quote.discount, 25.0);
    assert_eq!(quote.final_value, 225.0);
    assert!(quote.coupon_applied);
}

#[test]
fn invalid_coupon_quotes_full_price() {
    let quote = Quote::new(RouteSummary::new(100.0, 3600.0), Some("DESCONTO20"));
    assert_eq!(quote.final_value, quote.base_value);
    assert!(!quote.coupon_applied);
}

#[test]
fn eta_rounds_driving_days_up() {
    assert_eq!(eta_days(86_400.0), 3);
    assert_eq!(eta_days(90_000.0), 4);
    assert_eq!(eta_days(0.0), 2);
    assert_eq!(eta_days(1.0), 3);
}

#[test]
fn eta_saturates_on_absurd_durations() {
    let quote = Quote::new(RouteSummary::new(10.0, 1.0e15), None);
    assert_eq!(quote.eta_days, u32::MAX);

    assert_eq!(eta_days(-5_000.0), HANDLING_DAYS);
    assert_eq!(eta_days(f64::NAN), HANDLING_DAYS);
}

#[test]
fn quote_request_reads_wire_shape() {
    let request: QuoteRequest =
        serde_json::from_str(r#"{"destinoCoords":[-46.63,-23.55],"cupom":"DESCONTO10"}"#).unwrap();
    assert_eq!(request.destino_coords, Coordinates::new(-46.63, -23.55));
    assert_eq!(request.cupom.as_deref(), Some("DESCONTO10"));

    let request: QuoteRequest = serde_json::from_str(r#"{"destinoCoords":[-46.63,-23.55]}"#).unwrap();
    assert_eq!(request.cupom, None);
}

#[test]
fn formatted_quote_uses_wire_names() {
    let quote = Quote::new(RouteSummary::new(100.0, 86_400.0), Some("DESCONTO10"));
    let value = serde_json::to_value(FormattedQuote::from(quote)).unwrap();

    assert_eq!(value["valorBase"], "R$\u{a0}250,00");
    assert_eq!(value["desconto"], "R$\u{a0}25,00");
    assert_eq!(value["valorFinal"], "R$\u{a0}225,00");
    assert_eq!(value["cupomAplicado"], true);
    assert_eq!(value["prazo"], "Aprox. 3 dias");
}
