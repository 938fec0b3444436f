use axum::extract::{rejection::QueryRejection, Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::Address;
use crate::error::{invalid_postal_code_error, Error};

#[derive(Serialize, Deserialize)]
pub struct FindParams {
    cep: Option<String>,
}

/// `GET /api/cep?cep=01001000`
pub async fn find(
    Extension(api): Extension<DynAPI>,
    params: Result<Query<FindParams>, QueryRejection>,
) -> Result<Json<Address>, Error> {
    let Query(params) = params.map_err(|err| {
        tracing::debug!(error = %err, "unreadable postal code query");
        invalid_postal_code_error()
    })?;

    let address = api.find_address(params.cep.unwrap_or_default()).await?;

    Ok(address.into())
}
