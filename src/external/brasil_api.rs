use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    entities::{Address, Coordinates},
    error::{missing_coordinates_error, postal_code_not_found_error, upstream_error, Error},
    external::{http, GeocodeProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";

/// Postal code lookup through BrasilAPI's CEP v2 endpoint. Needs no key.
#[derive(Clone, Debug)]
pub struct BrasilApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Response {
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    coordinates: Option<RawCoordinates>,
}

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    latitude: Option<Value>,
    longitude: Option<Value>,
}

impl BrasilApi {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url<S: Into<String>>(client: reqwest::Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for BrasilApi {
    fn name(&self) -> &'static str {
        "brasilapi"
    }

    #[tracing::instrument(skip(self))]
    async fn resolve(&self, postal_code: &str) -> Result<Address, Error> {
        let url = format!("{}/api/cep/v2/{}", self.base_url, postal_code);

        let res = self.client.get(url).send().await?;

        let status_code = res.status().as_u16();
        let body = res.text().await?;

        if status_code == 404 || status_code == 400 {
            return Err(postal_code_not_found_error());
        } else if status_code != 200 {
            let message = http::upstream_message(&body);
            tracing::warn!(status_code, %message, "brasilapi lookup failed");
            return Err(upstream_error(message));
        }

        parse_address(&body)
    }
}

pub fn parse_address(body: &str) -> Result<Address, Error> {
    let data: Response = serde_json::from_str(body)?;

    let coordinates = data
        .location
        .and_then(|location| location.coordinates)
        .and_then(|raw| {
            let latitude = http::number(raw.latitude.as_ref())?;
            let longitude = http::number(raw.longitude.as_ref())?;
            Some(Coordinates::new(longitude, latitude))
        })
        .ok_or_else(missing_coordinates_error)?;

    Ok(Address::new(
        data.street.unwrap_or_default(),
        data.city.unwrap_or_default(),
        data.state.unwrap_or_default(),
        coordinates,
    ))
}

#[test]
fn parses_v2_response() {
    let body = r#"{
        "cep": "01001000",
        "state": "SP",
        "city": "São Paulo",
        "neighborhood": "Sé",
        "street": "Praça da Sé",
        "service": "open-cep",
        "location": {
            "type": "Point",
            "coordinates": { "longitude": "-46.6339", "latitude": "-23.5503" }
        }
    }"#;

    let address = parse_address(body).unwrap();

    assert_eq!(address.street, "Praça da Sé");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.state, "SP");
    assert_eq!(address.latitude, -23.5503);
    assert_eq!(address.longitude, -46.6339);
}

#[test]
fn empty_coordinates_are_reported() {
    let body = r#"{
        "cep": "89010025",
        "state": "SC",
        "city": "Blumenau",
        "street": "Rua Doutor Luiz de Freitas Melro",
        "location": { "type": "Point", "coordinates": {} }
    }"#;

    let err = parse_address(body).unwrap_err();
    assert_eq!(err, missing_coordinates_error());
}

#[test]
fn missing_street_becomes_empty() {
    let body = r#"{
        "state": "SP",
        "city": "Sorocaba",
        "location": { "coordinates": { "longitude": -47.45, "latitude": -23.5 } }
    }"#;

    let address = parse_address(body).unwrap();
    assert_eq!(address.street, "");
    assert_eq!(address.city, "Sorocaba");
}
