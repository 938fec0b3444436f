use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Error carried across the quote pipeline.
///
/// `code` selects the kind of failure, `message` is what the caller gets to
/// see. Codes in `100..=199` are the caller's fault and map to 400, every
/// other code maps to 500.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

pub const CONFIGURATION: i32 = 1;
pub const NOT_FOUND: i32 = 2;
pub const REQWEST: i32 = 3;
pub const UPSTREAM: i32 = 4;
pub const MALFORMED_UPSTREAM_RESPONSE: i32 = 5;
pub const UNEXPECTED: i32 = 6;
pub const BAD_REQUEST: i32 = 100;

impl Error {
    pub fn is_bad_request(&self) -> bool {
        (100..=199).contains(&self.code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        upstream_error(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        // Only a flat string ever leaves the server.
        let body = Json(json!({
            "error": self.message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_postal_code_error() -> Error {
    Error {
        code: BAD_REQUEST,
        message: "CEP inválido".into(),
    }
}

pub fn postal_code_not_found_error() -> Error {
    Error {
        code: NOT_FOUND,
        message: "CEP não encontrado".into(),
    }
}

pub fn missing_coordinates_error() -> Error {
    Error {
        code: NOT_FOUND,
        message: "API não retornou coordenadas para este CEP.".into(),
    }
}

pub fn not_configured_error(credential: &str) -> Error {
    Error {
        code: CONFIGURATION,
        message: format!("Chave {} não configurada", credential),
    }
}

pub fn service_not_configured_error() -> Error {
    Error {
        code: CONFIGURATION,
        message: "Serviço de rotas não configurado".into(),
    }
}

pub fn invalid_request_error<M: fmt::Display>(message: M) -> Error {
    Error {
        code: BAD_REQUEST,
        message: format!("Requisição inválida: {}", message),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: REQWEST,
        message: err.to_string(),
    }
}

pub fn upstream_error<M: Into<String>>(message: M) -> Error {
    Error {
        code: UPSTREAM,
        message: message.into(),
    }
}

pub fn route_upstream_error<M: fmt::Display>(message: M) -> Error {
    upstream_error(format!("Erro da API de Rota: {}", message))
}

pub fn invalid_route_response_error() -> Error {
    Error {
        code: MALFORMED_UPSTREAM_RESPONSE,
        message: "Resposta da API de Rota inválida.".into(),
    }
}

pub fn unexpected_error<M: fmt::Display>(message: M) -> Error {
    Error {
        code: UNEXPECTED,
        message: message.to_string(),
    }
}

#[test]
fn bad_request_maps_to_400() {
    let response = invalid_postal_code_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn upstream_failures_keep_their_message() {
    let err = route_upstream_error("quota exceeded");
    assert!(!err.is_bad_request());
    assert_eq!(err.message, "Erro da API de Rota: quota exceeded");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn not_found_is_a_server_error() {
    let response = postal_code_not_found_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
