mod handlers;

use std::net::SocketAddr;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::DynAPI;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{cep, health, quotes};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route("/api/cep", get(cep::find))
        .route("/api/calcular-frete", post(quotes::create))
        .layer(Extension(api))
}

pub async fn serve(api: DynAPI, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(unexpected_error)
}
