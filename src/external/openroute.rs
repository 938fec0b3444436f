use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{
    entities::{Coordinates, RouteSummary},
    error::{invalid_route_response_error, route_upstream_error, Error},
    external::{http, RouteProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Distance matrix between origin and destination on the `driving-car` profile.
#[derive(Clone, Debug)]
pub struct OpenRoute {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    distances: Option<Vec<Vec<Option<f64>>>>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

impl OpenRoute {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url<S: Into<String>>(
        client: reqwest::Client,
        api_key: String,
        base_url: S,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl RouteProvider for OpenRoute {
    fn name(&self) -> &'static str {
        "openroute"
    }

    #[tracing::instrument(skip(self))]
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, Error> {
        let url = format!("{}/v2/matrix/driving-car", self.base_url);
        let body = json!({
            "locations": [origin, destination],
            "metrics": ["distance", "duration"],
            "units": "km",
        });

        let res = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = http::upstream_message(&text);
            tracing::error!(%status, %message, "openroute matrix request failed");
            return Err(route_upstream_error(message));
        }

        parse_matrix(&text)
    }
}

/// Reads the origin→destination cell. Distances are already in km.
pub fn parse_matrix(body: &str) -> Result<RouteSummary, Error> {
    let data: MatrixResponse =
        serde_json::from_str(body).map_err(|_| invalid_route_response_error())?;

    let cell = |matrix: Option<Vec<Vec<Option<f64>>>>| -> Option<f64> {
        matrix?.first()?.get(1).copied().flatten()
    };

    match (cell(data.distances), cell(data.durations)) {
        (Some(distance_km), Some(duration_seconds)) => {
            Ok(RouteSummary::new(distance_km, duration_seconds))
        }
        _ => Err(invalid_route_response_error()),
    }
}

#[test]
fn parses_matrix_cell() {
    let body = r#"{
        "distances": [[0.0, 105.23], [104.9, 0.0]],
        "durations": [[0.0, 5320.4], [5301.2, 0.0]],
        "metadata": { "service": "matrix" }
    }"#;

    let route = parse_matrix(body).unwrap();
    assert_eq!(route.distance_km, 105.23);
    assert_eq!(route.duration_seconds, 5320.4);
}

#[test]
fn unroutable_cell_is_invalid() {
    let body = r#"{ "distances": [[0.0, null]], "durations": [[0.0, null]] }"#;
    assert_eq!(parse_matrix(body).unwrap_err(), invalid_route_response_error());
}

#[test]
fn missing_metrics_are_invalid() {
    assert_eq!(parse_matrix("{}").unwrap_err(), invalid_route_response_error());
    assert_eq!(
        parse_matrix(r#"{ "distances": [[0.0, 10.0]] }"#).unwrap_err(),
        invalid_route_response_error()
    );
    assert_eq!(parse_matrix("not json").unwrap_err(), invalid_route_response_error());
}
