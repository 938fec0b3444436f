use reqwest::Url;

use crate::entities::FormattedQuote;
use crate::form::state::FormState;

pub const WHATSAPP_URL: &str = "https://wa.me/5515996452232";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CouponFeedback {
    Applied,
    Invalid,
}

impl CouponFeedback {
    /// Nothing is shown when no coupon was typed.
    pub fn for_quote(coupon: &str, quote: &FormattedQuote) -> Option<Self> {
        if coupon.is_empty() {
            None
        } else if quote.cupom_aplicado {
            Some(Self::Applied)
        } else {
            Some(Self::Invalid)
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Applied => "Cupom aplicado com sucesso!",
            Self::Invalid => "Cupom inválido",
        }
    }
}

/// The approved ticket shown once a quote comes back.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteView {
    pub destination: String,
    pub city: String,
    pub vehicle: String,
    pub eta: String,
    pub base_value: String,
    pub final_value: String,
    /// Only present when the coupon applied, already prefixed with `- `.
    pub discount: Option<String>,
    pub whatsapp_url: String,
}

impl QuoteView {
    pub fn new(state: &FormState, quote: &FormattedQuote) -> Self {
        let destination = state.destination();
        let vehicle = state.vehicle.map(|v| v.name()).unwrap_or_default();

        let city = destination
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();

        let discount = if quote.cupom_aplicado {
            Some(format!("- {}", quote.desconto))
        } else {
            None
        };

        Self {
            whatsapp_url: whatsapp_url(vehicle, &destination, &quote.valor_final),
            destination,
            city,
            vehicle: vehicle.to_uppercase(),
            eta: quote.prazo.clone(),
            base_value: quote.valor_base.clone(),
            final_value: quote.valor_final.clone(),
            discount,
        }
    }
}

pub fn whatsapp_text(vehicle: &str, destination: &str, final_value: &str) -> String {
    format!(
        "Olá! Fiz uma cotação no site TOPCAR.\nVeículo: {}\nDestino: {}\nValor: {}",
        vehicle, destination, final_value
    )
}

pub fn whatsapp_url(vehicle: &str, destination: &str, final_value: &str) -> String {
    let text = whatsapp_text(vehicle, destination, final_value);

    match Url::parse_with_params(WHATSAPP_URL, &[("text", text)]) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::warn!(error = %e, "could not build whatsapp link");
            WHATSAPP_URL.to_string()
        }
    }
}

#[cfg(test)]
fn quote(cupom_aplicado: bool) -> FormattedQuote {
    FormattedQuote {
        valor_base: "R$\u{a0}250,00".into(),
        desconto: if cupom_aplicado { "R$\u{a0}25,00" } else { "R$\u{a0}0,00" }.into(),
        valor_final: if cupom_aplicado { "R$\u{a0}225,00" } else { "R$\u{a0}250,00" }.into(),
        cupom_aplicado,
        prazo: "Aprox. 3 dias".into(),
    }
}

#[test]
fn renders_ticket_with_discount_line() {
    use crate::entities::VehicleType;

    let mut state = FormState::default();
    state.vehicle = Some(VehicleType::Medio);
    state.city = "São Paulo".into();
    state.state = "SP".into();

    let view = QuoteView::new(&state, &quote(true));

    assert_eq!(view.destination, "São Paulo/SP");
    assert_eq!(view.city, "São Paulo");
    assert_eq!(view.vehicle, "MEDIO");
    assert_eq!(view.discount.as_deref(), Some("- R$\u{a0}25,00"));
    assert_eq!(view.final_value, "R$\u{a0}225,00");
    assert!(view.whatsapp_url.starts_with("https://wa.me/5515996452232?text="));
}

#[test]
fn hides_discount_line_without_coupon() {
    let view = QuoteView::new(&FormState::default(), &quote(false));
    assert_eq!(view.discount, None);
}

#[test]
fn whatsapp_link_carries_the_quote() {
    let url = whatsapp_url("medio", "Sorocaba/SP", "R$\u{a0}250,00");
    let parsed = Url::parse(&url).unwrap();
    let (_, text) = parsed.query_pairs().find(|(k, _)| k == "text").unwrap();

    assert_eq!(
        text,
        "Olá! Fiz uma cotação no site TOPCAR.\nVeículo: medio\nDestino: Sorocaba/SP\nValor: R$\u{a0}250,00"
    );
}

#[test]
fn coupon_feedback_only_when_typed() {
    assert_eq!(CouponFeedback::for_quote("", &quote(false)), None);
    assert_eq!(
        CouponFeedback::for_quote("desconto10", &quote(true)),
        Some(CouponFeedback::Applied)
    );
    assert_eq!(
        CouponFeedback::for_quote("DESCONTO20", &quote(false)),
        Some(CouponFeedback::Invalid)
    );
}
