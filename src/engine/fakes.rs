use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    entities::{Address, Coordinates, RouteSummary},
    error::Error,
    external::{GeocodeProvider, RouteProvider},
};

pub struct FakeGeocoder {
    result: Result<Address, Error>,
    requests: Mutex<Vec<String>>,
}

impl Default for FakeGeocoder {
    fn default() -> Self {
        Self {
            result: Ok(Address::new(
                "Praça da Sé".into(),
                "São Paulo".into(),
                "SP".into(),
                Coordinates::new(-46.6339, -23.5503),
            )),
            requests: Mutex::new(vec![]),
        }
    }
}

impl FakeGeocoder {
    pub fn failing(err: Error) -> Self {
        Self {
            result: Err(err),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodeProvider for FakeGeocoder {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn resolve(&self, postal_code: &str) -> Result<Address, Error> {
        self.requests.lock().unwrap().push(postal_code.to_string());
        self.result.clone()
    }
}

pub struct FakeRouter {
    result: Result<RouteSummary, Error>,
    requests: Mutex<Vec<(Coordinates, Coordinates)>>,
}

impl FakeRouter {
    pub fn km(distance_km: f64) -> Self {
        Self {
            result: Ok(RouteSummary::new(distance_km, 3600.0)),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn failing(err: Error) -> Self {
        Self {
            result: Err(err),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<(Coordinates, Coordinates)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteProvider for FakeRouter {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, Error> {
        self.requests.lock().unwrap().push((origin, destination));
        self.result.clone()
    }
}
