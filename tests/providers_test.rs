//! Provider adapters against local stand-ins for the vendor APIs

mod common;

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query, RawQuery},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use common::spawn;
use frete::entities::Coordinates;
use frete::error::{
    invalid_route_response_error, missing_coordinates_error, postal_code_not_found_error,
};
use frete::external::{
    http, BrasilApi, CepAberto, GeocodeProvider, GraphHopper, Mapbox, OpenRoute, RouteProvider,
};
use serde_json::{json, Value};

const ORIGIN: Coordinates = Coordinates {
    longitude: -47.49,
    latitude: -23.51,
};
const DESTINATION: Coordinates = Coordinates {
    longitude: -46.63,
    latitude: -23.55,
};

fn client() -> reqwest::Client {
    http::client(Duration::from_secs(5)).unwrap()
}

fn brasil_api_stub() -> Router {
    Router::new().route(
        "/api/cep/v2/:cep",
        get(|Path(cep): Path<String>| async move {
            match cep.as_str() {
                "01001000" => (
                    StatusCode::OK,
                    Json(json!({
                        "cep": "01001000",
                        "state": "SP",
                        "city": "São Paulo",
                        "street": "Praça da Sé",
                        "location": {
                            "type": "Point",
                            "coordinates": { "longitude": "-46.6339", "latitude": "-23.5503" }
                        }
                    })),
                ),
                "89010025" => (
                    StatusCode::OK,
                    Json(json!({
                        "cep": "89010025",
                        "state": "SC",
                        "city": "Blumenau",
                        "location": { "type": "Point", "coordinates": {} }
                    })),
                ),
                "50000000" => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Todos os serviços de CEP retornaram erro." })),
                ),
                _ => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "CEP não encontrado", "type": "service_error" })),
                ),
            }
        }),
    )
}

#[tokio::test]
async fn brasil_api_resolves_and_classifies_failures() {
    let base_url = spawn(brasil_api_stub());
    let provider = BrasilApi::with_base_url(client(), base_url);

    let address = provider.resolve("01001000").await.unwrap();
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.latitude, -23.5503);

    let err = provider.resolve("89010025").await.unwrap_err();
    assert_eq!(err, missing_coordinates_error());

    let err = provider.resolve("99999999").await.unwrap_err();
    assert_eq!(err, postal_code_not_found_error());

    let err = provider.resolve("50000000").await.unwrap_err();
    assert_eq!(err.message, "Todos os serviços de CEP retornaram erro.");
}

#[tokio::test]
async fn cep_aberto_sends_token() {
    let app = Router::new().route(
        "/api/v3/cep",
        get(
            |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Token token=secret");

                if !authorized {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "error": "HTTP Token: Access denied." })),
                    );
                }

                match params.get("cep").map(String::as_str) {
                    Some("01001000") => (
                        StatusCode::OK,
                        Json(json!({
                            "cep": "01001000",
                            "latitude": "-23.5502784",
                            "longitude": "-46.6342179",
                            "logradouro": "Praça da Sé",
                            "cidade": { "nome": "São Paulo" },
                            "estado": { "sigla": "SP" }
                        })),
                    ),
                    _ => (StatusCode::OK, Json(json!({}))),
                }
            },
        ),
    );
    let base_url = spawn(app);

    let provider = CepAberto::with_base_url(client(), "secret".into(), base_url.clone());
    let address = provider.resolve("01001000").await.unwrap();
    assert_eq!(address.state, "SP");
    assert_eq!(address.longitude, -46.6342179);

    let err = provider.resolve("99999999").await.unwrap_err();
    assert_eq!(err, postal_code_not_found_error());

    let provider = CepAberto::with_base_url(client(), "wrong".into(), base_url);
    let err = provider.resolve("01001000").await.unwrap_err();
    assert_eq!(err.message, "HTTP Token: Access denied.");
}

#[tokio::test]
async fn openroute_posts_matrix_request() {
    let app = Router::new().route(
        "/v2/matrix/driving-car",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("ors-key") {
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": { "code": 403, "message": "Access to this API has been disallowed" } })),
                );
            }

            assert_eq!(body["locations"], json!([[-47.49, -23.51], [-46.63, -23.55]]));
            assert_eq!(body["units"], "km");

            (
                StatusCode::OK,
                Json(json!({
                    "distances": [[0.0, 104.5], [104.1, 0.0]],
                    "durations": [[0.0, 5400.0], [5380.0, 0.0]]
                })),
            )
        }),
    );
    let base_url = spawn(app);

    let provider = OpenRoute::with_base_url(client(), "ors-key".into(), base_url.clone());
    let route = provider.route(ORIGIN, DESTINATION).await.unwrap();
    assert_eq!(route.distance_km, 104.5);
    assert_eq!(route.duration_seconds, 5400.0);

    let provider = OpenRoute::with_base_url(client(), "bad-key".into(), base_url);
    let err = provider.route(ORIGIN, DESTINATION).await.unwrap_err();
    assert_eq!(
        err.message,
        "Erro da API de Rota: Access to this API has been disallowed"
    );
}

#[tokio::test]
async fn mapbox_reads_first_route() {
    let app = Router::new().route(
        "/directions/v5/mapbox/driving/:coordinates",
        get(
            |Path(coordinates): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(coordinates, "-47.49,-23.51;-46.63,-23.55");
                assert_eq!(params.get("overview").map(String::as_str), Some("false"));

                if params.get("access_token").map(String::as_str) != Some("pk.test") {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Not Authorized - Invalid Token" })),
                    );
                }

                (
                    StatusCode::OK,
                    Json(json!({ "code": "Ok", "routes": [{ "distance": 104500.0, "duration": 5400.0 }] })),
                )
            },
        ),
    );
    let base_url = spawn(app);

    let provider = Mapbox::with_base_url(client(), "pk.test".into(), base_url.clone());
    let route = provider.route(ORIGIN, DESTINATION).await.unwrap();
    assert_eq!(route.distance_km, 104.5);

    let provider = Mapbox::with_base_url(client(), "pk.other".into(), base_url);
    let err = provider.route(ORIGIN, DESTINATION).await.unwrap_err();
    assert_eq!(err.message, "Erro da API de Rota: Not Authorized - Invalid Token");
}

#[tokio::test]
async fn graphhopper_sends_lat_lon_points() {
    let app = Router::new().route(
        "/api/1/route",
        get(|RawQuery(query): RawQuery| async move {
            let query = query.unwrap_or_default();
            assert!(query.contains("point=-23.51%2C-47.49"), "{}", query);
            assert!(query.contains("point=-23.55%2C-46.63"), "{}", query);
            assert!(query.contains("key=gh-key"), "{}", query);

            (StatusCode::OK, Json(json!({ "paths": [] })))
        }),
    );
    let base_url = spawn(app);

    let provider = GraphHopper::with_base_url(client(), "gh-key".into(), base_url);
    let err = provider.route(ORIGIN, DESTINATION).await.unwrap_err();

    assert_eq!(err, invalid_route_response_error());
}
