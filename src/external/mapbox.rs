use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    entities::{Coordinates, RouteSummary},
    error::{invalid_route_response_error, route_upstream_error, Error},
    external::{http, RouteProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

#[derive(Clone, Debug)]
pub struct Mapbox {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    distance: Option<f64>,
    duration: Option<f64>,
}

impl Mapbox {
    pub fn new(client: reqwest::Client, access_token: String) -> Self {
        Self::with_base_url(client, access_token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url<S: Into<String>>(
        client: reqwest::Client,
        access_token: String,
        base_url: S,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            access_token,
        }
    }
}

#[async_trait]
impl RouteProvider for Mapbox {
    fn name(&self) -> &'static str {
        "mapbox"
    }

    #[tracing::instrument(skip(self))]
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, Error> {
        let url = format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let res = self
            .client
            .get(url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(&[("overview", "false")])
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = http::upstream_message(&text);
            tracing::error!(%status, %message, "mapbox directions request failed");
            return Err(route_upstream_error(message));
        }

        parse_directions(&text)
    }
}

/// Mapbox reports meters and seconds.
pub fn parse_directions(body: &str) -> Result<RouteSummary, Error> {
    let data: DirectionsResponse =
        serde_json::from_str(body).map_err(|_| invalid_route_response_error())?;

    let route = data
        .routes
        .first()
        .ok_or_else(invalid_route_response_error)?;

    match (route.distance, route.duration) {
        (Some(meters), Some(seconds)) => Ok(RouteSummary::new(meters / 1000.0, seconds)),
        _ => Err(invalid_route_response_error()),
    }
}

#[test]
fn parses_first_route() {
    let body = r#"{
        "code": "Ok",
        "routes": [
            { "distance": 104500.0, "duration": 5400.0, "weight": 5600.2 },
            { "distance": 120000.0, "duration": 6000.0, "weight": 6100.0 }
        ],
        "waypoints": []
    }"#;

    let route = parse_directions(body).unwrap();
    assert_eq!(route.distance_km, 104.5);
    assert_eq!(route.duration_seconds, 5400.0);
}

#[test]
fn no_route_is_invalid() {
    let body = r#"{ "code": "NoRoute", "message": "No route found", "routes": [] }"#;
    assert_eq!(parse_directions(body).unwrap_err(), invalid_route_response_error());
}
