mod geocode_api;
#[cfg(test)]
mod fakes;
mod helpers;
mod quote_api;

use crate::{
    api::API,
    entities::Coordinates,
    external::{DynGeocodeProvider, DynRouteProvider},
};

/// Pickup point every quote is routed from, `[longitude, latitude]`.
pub const ORIGIN: Coordinates = Coordinates {
    longitude: -47.49056581938401,
    latitude: -23.518172000706706,
};

pub struct Engine {
    geocoder: DynGeocodeProvider,
    router: Option<DynRouteProvider>,
    origin: Coordinates,
}

impl Engine {
    pub fn new(geocoder: DynGeocodeProvider) -> Self {
        Self {
            geocoder,
            router: None,
            origin: ORIGIN,
        }
    }

    pub fn with_router(mut self, router: DynRouteProvider) -> Self {
        self.router = Some(router);
        self
    }
}

impl API for Engine {}
