use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    entities::{Coordinates, RouteSummary},
    error::{invalid_route_response_error, route_upstream_error, Error},
    external::{http, RouteProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://graphhopper.com";

#[derive(Clone, Debug)]
pub struct GraphHopper {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    paths: Vec<Path>,
}

#[derive(Debug, Deserialize)]
struct Path {
    distance: Option<f64>,
    time: Option<f64>,
}

impl GraphHopper {
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
impl RouteProvider for GraphHopper {
    fn name(&self) -> &'static str {
        "graphhopper"
    }

    #[tracing::instrument(skip(self))]
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, Error> {
        let url = format!("{}/api/1/route", self.base_url);

        // GraphHopper takes points as `lat,lon`.
        let from = format!("{},{}", origin.latitude, origin.longitude);
        let to = format!("{},{}", destination.latitude, destination.longitude);

        let res = self
            .client
            .get(url)
            .query(&[("point", from.as_str()), ("point", to.as_str())])
            .query(&[("profile", "car"), ("calc_points", "false")])
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = http::upstream_message(&text);
            tracing::error!(%status, %message, "graphhopper route request failed");
            return Err(route_upstream_error(message));
        }

        parse_route(&text)
    }
}

/// Distance comes in meters, time in milliseconds.
pub fn parse_route(body: &str) -> Result<RouteSummary, Error> {
    let data: RouteResponse =
        serde_json::from_str(body).map_err(|_| invalid_route_response_error())?;

    let path = data.paths.first().ok_or_else(invalid_route_response_error)?;

    match (path.distance, path.time) {
        (Some(meters), Some(millis)) => Ok(RouteSummary::new(meters / 1000.0, millis / 1000.0)),
        _ => Err(invalid_route_response_error()),
    }
}

#[test]
fn parses_first_path() {
    let body = r#"{
        "hints": { "visited_nodes.sum": 58 },
        "paths": [{ "distance": 98500.0, "time": 4200000, "weight": 5000.1 }]
    }"#;

    let route = parse_route(body).unwrap();
    assert_eq!(route.distance_km, 98.5);
    assert_eq!(route.duration_seconds, 4200.0);
}

#[test]
fn empty_paths_are_invalid() {
    assert_eq!(parse_route(r#"{ "paths": [] }"#).unwrap_err(), invalid_route_response_error());
    assert_eq!(
        parse_route(r#"{ "paths": [{ "distance": 10.0 }] }"#).unwrap_err(),
        invalid_route_response_error()
    );
}
