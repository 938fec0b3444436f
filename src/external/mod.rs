pub mod brasil_api;
pub mod cep_aberto;
pub mod graphhopper;
pub mod http;
pub mod mapbox;
pub mod openroute;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, GeocodeProviderKind, RouteProviderKind};
use crate::entities::{Address, Coordinates, RouteSummary};
use crate::error::Error;

pub use brasil_api::BrasilApi;
pub use cep_aberto::CepAberto;
pub use graphhopper::GraphHopper;
pub use mapbox::Mapbox;
pub use openroute::OpenRoute;

/// Resolves an 8-digit postal code to an address with coordinates.
///
/// Implementations report "no match" with `postal_code_not_found_error` and a
/// match without coordinates with `missing_coordinates_error`.
#[async_trait]
pub trait GeocodeProvider {
    fn name(&self) -> &'static str;

    async fn resolve(&self, postal_code: &str) -> Result<Address, Error>;
}

/// Driving distance and duration between two points.
#[async_trait]
pub trait RouteProvider {
    fn name(&self) -> &'static str;

    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, Error>;
}

pub type DynGeocodeProvider = Arc<dyn GeocodeProvider + Send + Sync>;
pub type DynRouteProvider = Arc<dyn RouteProvider + Send + Sync>;

pub fn geocode_provider(config: &Config) -> Result<DynGeocodeProvider, Error> {
    let client = http::client(config.http_timeout)?;

    let provider: DynGeocodeProvider = match &config.geocode_provider {
        GeocodeProviderKind::BrasilApi => Arc::new(BrasilApi::new(client)),
        GeocodeProviderKind::CepAberto { token } => {
            Arc::new(CepAberto::new(client, token.clone()))
        }
    };

    Ok(provider)
}

pub fn route_provider(config: &Config) -> Result<DynRouteProvider, Error> {
    let client = http::client(config.http_timeout)?;

    let provider: DynRouteProvider = match &config.route_provider {
        RouteProviderKind::OpenRoute { api_key } => {
            Arc::new(OpenRoute::new(client, api_key.clone()))
        }
        RouteProviderKind::Mapbox { access_token } => {
            Arc::new(Mapbox::new(client, access_token.clone()))
        }
        RouteProviderKind::GraphHopper { api_key } => {
            Arc::new(GraphHopper::new(client, api_key.clone()))
        }
    };

    Ok(provider)
}
