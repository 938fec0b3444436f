use super::helpers::postal_code_digits;
use super::Engine;

use async_trait::async_trait;

use crate::{api::GeocodeAPI, entities::Address, error::Error};

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_address(&self, postal_code: String) -> Result<Address, Error> {
        let postal_code = postal_code_digits(&postal_code)?;

        let address = self.geocoder.resolve(&postal_code).await.map_err(|e| {
            tracing::warn!(provider = self.geocoder.name(), error = %e, "postal code lookup failed");
            e
        })?;

        Ok(address)
    }
}

#[test]
fn resolves_masked_postal_code() {
    use super::fakes::{FakeGeocoder, FakeRouter};
    use std::sync::Arc;
    use tokio_test::block_on;

    let geocoder = Arc::new(FakeGeocoder::default());
    let engine = Engine::new(geocoder.clone()).with_router(Arc::new(FakeRouter::km(10.0)));

    let address = block_on(engine.find_address("01001-000".into())).unwrap();

    assert_eq!(address.city, "São Paulo");
    assert_eq!(geocoder.requests(), vec!["01001000".to_string()]);
}

#[test]
fn malformed_postal_code_never_reaches_provider() {
    use super::fakes::FakeGeocoder;
    use crate::error::invalid_postal_code_error;
    use std::sync::Arc;
    use tokio_test::block_on;

    let geocoder = Arc::new(FakeGeocoder::default());
    let engine = Engine::new(geocoder.clone());

    let err = block_on(engine.find_address("1234".into())).unwrap_err();

    assert_eq!(err, invalid_postal_code_error());
    assert!(geocoder.requests().is_empty());
}

#[test]
fn provider_errors_pass_through() {
    use super::fakes::FakeGeocoder;
    use crate::error::{missing_coordinates_error, postal_code_not_found_error};
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Arc::new(FakeGeocoder::failing(postal_code_not_found_error())));
    let err = block_on(engine.find_address("99999999".into())).unwrap_err();
    assert_eq!(err, postal_code_not_found_error());

    let engine = Engine::new(Arc::new(FakeGeocoder::failing(missing_coordinates_error())));
    let err = block_on(engine.find_address("89010025".into())).unwrap_err();
    assert_eq!(err, missing_coordinates_error());
}
