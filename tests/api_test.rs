//! Tests for the HTTP endpoints

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{api, StubGeocoder, StubRouter};
use frete::error::{
    invalid_route_response_error, missing_coordinates_error, postal_code_not_found_error,
    route_upstream_error,
};
use frete::server::router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(api(StubGeocoder::sao_paulo(), Some(StubRouter::km(100.0, 86_400.0))))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_cep_resolves_address() {
    let (status, body) = send(app(), get("/api/cep?cep=01001-000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "logradouro": "Praça da Sé",
            "cidade": "São Paulo",
            "estado": "SP",
            "latitude": -23.5503,
            "longitude": -46.6339,
        })
    );
}

#[tokio::test]
async fn test_cep_rejects_malformed_code() {
    for uri in ["/api/cep?cep=123", "/api/cep?cep=", "/api/cep"] {
        let (status, body) = send(app(), get(uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({ "error": "CEP inválido" }));
    }
}

#[tokio::test]
async fn test_cep_unreadable_query_keeps_json_errors() {
    let (status, body) = send(app(), get("/api/cep?cep=01001000&cep=18000000")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "CEP inválido" }));
}

#[tokio::test]
async fn test_cep_lookup_failures_are_server_errors() {
    let cases = [
        (postal_code_not_found_error(), "CEP não encontrado"),
        (
            missing_coordinates_error(),
            "API não retornou coordenadas para este CEP.",
        ),
    ];

    for (err, message) in cases {
        let app = router(api(StubGeocoder::returning(Err(err)), None));
        let (status, body) = send(app, get("/api/cep?cep=99999999")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_quote_without_coupon() {
    let request = post_json(
        "/api/calcular-frete",
        json!({ "destinoCoords": [-46.6339, -23.5503] }),
    );

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cupomAplicado"], false);
    assert_eq!(body["desconto"], "R$\u{a0}0,00");
    assert_eq!(body["valorBase"], "R$\u{a0}250,00");
    assert_eq!(body["valorFinal"], body["valorBase"]);
    assert_eq!(body["prazo"], "Aprox. 3 dias");
}

#[tokio::test]
async fn test_quote_with_coupon() {
    let request = post_json(
        "/api/calcular-frete",
        json!({ "destinoCoords": [-46.6339, -23.5503], "cupom": " desconto10" }),
    );

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "valorBase": "R$\u{a0}250,00",
            "desconto": "R$\u{a0}25,00",
            "valorFinal": "R$\u{a0}225,00",
            "cupomAplicado": true,
            "prazo": "Aprox. 3 dias",
        })
    );
}

#[tokio::test]
async fn test_quote_with_unknown_coupon_is_full_price() {
    let request = post_json(
        "/api/calcular-frete",
        json!({ "destinoCoords": [-46.6339, -23.5503], "cupom": "DESCONTO20" }),
    );

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cupomAplicado"], false);
    assert_eq!(body["valorFinal"], "R$\u{a0}250,00");
}

#[tokio::test]
async fn test_quote_without_router_is_not_configured() {
    let app = router(api(StubGeocoder::sao_paulo(), None));
    let request = post_json(
        "/api/calcular-frete",
        json!({ "destinoCoords": [-46.6339, -23.5503] }),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Serviço de rotas não configurado" }));
}

#[tokio::test]
async fn test_quote_surfaces_route_errors_as_strings() {
    let cases = [
        (
            route_upstream_error("Could not find routable point"),
            "Erro da API de Rota: Could not find routable point",
        ),
        (
            invalid_route_response_error(),
            "Resposta da API de Rota inválida.",
        ),
    ];

    for (err, message) in cases {
        let app = router(api(StubGeocoder::sao_paulo(), Some(StubRouter::failing(err))));
        let request = post_json(
            "/api/calcular-frete",
            json!({ "destinoCoords": [-46.6339, -23.5503] }),
        );

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_quote_rejects_malformed_body() {
    let request = post_json("/api/calcular-frete", json!({ "destinoCoords": "here" }));

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
