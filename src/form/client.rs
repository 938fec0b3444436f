use async_trait::async_trait;
use serde::Deserialize;

use crate::entities::{Address, Coordinates, FormattedQuote, QuoteRequest};
use crate::error::{Error, BAD_REQUEST, UPSTREAM};

pub const POSTAL_CODE_FALLBACK: &str = "CEP não encontrado";
pub const QUOTE_FALLBACK: &str = "Não foi possível calcular a distância.";

/// The two calls the form makes to the quote service.
#[async_trait]
pub trait QuoteClient {
    async fn lookup_postal_code(&self, postal_code: &str) -> Result<Address, Error>;

    async fn request_quote(
        &self,
        destination: Coordinates,
        coupon: &str,
    ) -> Result<FormattedQuote, Error>;
}

#[derive(Clone, Debug)]
pub struct HttpQuoteClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpQuoteClient {
    pub fn new<S: Into<String>>(client: reqwest::Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuoteClient for HttpQuoteClient {
    #[tracing::instrument(skip(self))]
    async fn lookup_postal_code(&self, postal_code: &str) -> Result<Address, Error> {
        let res = self
            .client
            .get(format!("{}/api/cep", self.base_url))
            .query(&[("cep", postal_code)])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(server_error(res, POSTAL_CODE_FALLBACK).await);
        }

        Ok(res.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn request_quote(
        &self,
        destination: Coordinates,
        coupon: &str,
    ) -> Result<FormattedQuote, Error> {
        let body = QuoteRequest {
            destino_coords: destination,
            cupom: Some(coupon.to_string()),
        };

        let res = self
            .client
            .post(format!("{}/api/calcular-frete", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(server_error(res, QUOTE_FALLBACK).await);
        }

        Ok(res.json().await?)
    }
}

/// Surfaces the server's `error` string, or `fallback` when there is none.
async fn server_error(res: reqwest::Response, fallback: &str) -> Error {
    let code = if res.status().is_client_error() {
        BAD_REQUEST
    } else {
        UPSTREAM
    };

    let message = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    Error { code, message }
}
