use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    entities::{Address, Coordinates},
    error::{missing_coordinates_error, postal_code_not_found_error, upstream_error, Error},
    external::{http, GeocodeProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://www.cepaberto.com";

/// Postal code lookup through CEP Aberto. Requires an account token.
#[derive(Clone, Debug)]
pub struct CepAberto {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct Response {
    cep: Option<String>,
    logradouro: Option<String>,
    cidade: Option<Named>,
    estado: Option<State>,
    latitude: Option<Value>,
    longitude: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Named {
    nome: Option<String>,
}

#[derive(Debug, Deserialize)]
struct State {
    sigla: Option<String>,
}

impl CepAberto {
    pub fn new(client: reqwest::Client, token: String) -> Self {
        Self::with_base_url(client, token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url<S: Into<String>>(
        client: reqwest::Client,
        token: String,
        base_url: S,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }
}

#[async_trait]
impl GeocodeProvider for CepAberto {
    fn name(&self) -> &'static str {
        "cepaberto"
    }

    #[tracing::instrument(skip(self))]
    async fn resolve(&self, postal_code: &str) -> Result<Address, Error> {
        let url = format!("{}/api/v3/cep", self.base_url);

        let res = self
            .client
            .get(url)
            .header("Authorization", format!("Token token={}", self.token))
            .query(&[("cep", postal_code)])
            .send()
            .await?;

        let status_code = res.status().as_u16();
        let body = res.text().await?;

        if status_code == 404 {
            return Err(postal_code_not_found_error());
        } else if status_code != 200 {
            let message = http::upstream_message(&body);
            tracing::warn!(status_code, %message, "cepaberto lookup failed");
            return Err(upstream_error(message));
        }

        parse_address(&body)
    }
}

/// CEP Aberto answers an unknown code with `200 {}`.
pub fn parse_address(body: &str) -> Result<Address, Error> {
    let data: Response = serde_json::from_str(body)?;

    if data.cep.is_none() {
        return Err(postal_code_not_found_error());
    }

    let latitude = http::number(data.latitude.as_ref());
    let longitude = http::number(data.longitude.as_ref());

    let coordinates = match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Coordinates::new(longitude, latitude),
        _ => return Err(missing_coordinates_error()),
    };

    Ok(Address::new(
        data.logradouro.unwrap_or_default(),
        data.cidade.and_then(|c| c.nome).unwrap_or_default(),
        data.estado.and_then(|e| e.sigla).unwrap_or_default(),
        coordinates,
    ))
}

#[test]
fn parses_v3_response() {
    let body = r#"{
        "altitude": 760.0,
        "cep": "01001000",
        "latitude": "-23.5502784",
        "longitude": "-46.6342179",
        "logradouro": "Praça da Sé",
        "bairro": "Sé",
        "cidade": { "ddd": 11, "ibge": "3550308", "nome": "São Paulo" },
        "estado": { "sigla": "SP" }
    }"#;

    let address = parse_address(body).unwrap();

    assert_eq!(address.street, "Praça da Sé");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.state, "SP");
    assert_eq!(address.latitude, -23.5502784);
    assert_eq!(address.longitude, -46.6342179);
}

#[test]
fn empty_object_means_not_found() {
    assert_eq!(parse_address("{}").unwrap_err(), postal_code_not_found_error());
}

#[test]
fn match_without_coordinates() {
    let body = r#"{ "cep": "18000000", "cidade": { "nome": "Sorocaba" }, "estado": { "sigla": "SP" } }"#;
    assert_eq!(parse_address(body).unwrap_err(), missing_coordinates_error());
}
