use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Address, Coordinates, Quote};
use crate::error::Error;

#[async_trait]
pub trait GeocodeAPI {
    async fn find_address(&self, postal_code: String) -> Result<Address, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(
        &self,
        destination: Coordinates,
        coupon: Option<String>,
    ) -> Result<Quote, Error>;
}

pub trait API: GeocodeAPI + QuoteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
