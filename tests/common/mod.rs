#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use frete::api::DynAPI;
use frete::engine::Engine;
use frete::entities::{Address, Coordinates, RouteSummary};
use frete::error::Error;
use frete::external::{GeocodeProvider, RouteProvider};

pub struct StubGeocoder {
    pub result: Result<Address, Error>,
    pub requests: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn sao_paulo() -> Self {
        Self::returning(Ok(Address::new(
            "Praça da Sé".into(),
            "São Paulo".into(),
            "SP".into(),
            Coordinates::new(-46.6339, -23.5503),
        )))
    }

    pub fn returning(result: Result<Address, Error>) -> Self {
        Self {
            result,
            requests: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl GeocodeProvider for StubGeocoder {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn resolve(&self, postal_code: &str) -> Result<Address, Error> {
        self.requests.lock().unwrap().push(postal_code.to_string());
        self.result.clone()
    }
}

pub struct StubRouter {
    pub result: Result<RouteSummary, Error>,
}

impl StubRouter {
    pub fn km(distance_km: f64, duration_seconds: f64) -> Self {
        Self {
            result: Ok(RouteSummary::new(distance_km, duration_seconds)),
        }
    }

    pub fn failing(err: Error) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl RouteProvider for StubRouter {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn route(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
    ) -> Result<RouteSummary, Error> {
        self.result.clone()
    }
}

pub fn api(geocoder: StubGeocoder, router: Option<StubRouter>) -> DynAPI {
    let engine = Engine::new(Arc::new(geocoder));

    let engine = match router {
        Some(router) => engine.with_router(Arc::new(router)),
        None => engine,
    };

    Arc::new(engine) as DynAPI
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub fn spawn(app: Router) -> String {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = axum::Server::bind(&addr).serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    format!("http://{}", addr)
}
