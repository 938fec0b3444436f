use super::Engine;

use async_trait::async_trait;

use crate::{
    api::QuoteAPI,
    entities::{Coordinates, Quote},
    error::{service_not_configured_error, Error},
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(
        &self,
        destination: Coordinates,
        coupon: Option<String>,
    ) -> Result<Quote, Error> {
        let router = self
            .router
            .as_ref()
            .ok_or_else(service_not_configured_error)?;

        let route = router.route(self.origin, destination).await.map_err(|e| {
            tracing::error!(provider = router.name(), error = %e, "route lookup failed");
            e
        })?;

        let quote = Quote::new(route, coupon.as_deref());

        tracing::info!(
            distance_km = quote.route.distance_km,
            final_value = quote.final_value,
            coupon_applied = quote.coupon_applied,
            "quote computed"
        );

        Ok(quote)
    }
}

#[test]
fn routes_from_origin_and_prices_distance() {
    use super::fakes::{FakeGeocoder, FakeRouter};
    use super::ORIGIN;
    use std::sync::Arc;
    use tokio_test::block_on;

    let router = Arc::new(FakeRouter::km(100.0));
    let engine = Engine::new(Arc::new(FakeGeocoder::default())).with_router(router.clone());
    let destination = Coordinates::new(-46.63, -23.55);

    let quote = block_on(engine.create_quote(destination, Some("desconto10".into()))).unwrap();

    assert_eq!(quote.base_value, 250.0);
    assert_eq!(quote.discount, 25.0);
    assert_eq!(quote.final_value, 225.0);
    assert!(quote.coupon_applied);
    assert_eq!(router.requests(), vec![(ORIGIN, destination)]);
}

#[test]
fn missing_router_is_a_configuration_error() {
    use super::fakes::FakeGeocoder;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Arc::new(FakeGeocoder::default()));

    let err = block_on(engine.create_quote(Coordinates::new(-46.63, -23.55), None)).unwrap_err();

    assert_eq!(err, service_not_configured_error());
}

#[test]
fn invalid_route_response_is_not_a_parse_panic() {
    use super::fakes::{FakeGeocoder, FakeRouter};
    use crate::error::invalid_route_response_error;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Arc::new(FakeGeocoder::default()))
        .with_router(Arc::new(FakeRouter::failing(invalid_route_response_error())));

    let err = block_on(engine.create_quote(Coordinates::new(-46.63, -23.55), None)).unwrap_err();

    assert_eq!(err, invalid_route_response_error());
}
