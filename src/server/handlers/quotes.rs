use axum::extract::{rejection::JsonRejection, Extension, Json};

use crate::api::DynAPI;
use crate::entities::{FormattedQuote, QuoteRequest};
use crate::error::{invalid_request_error, Error};

/// `POST /api/calcular-frete`
pub async fn create(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<FormattedQuote>, Error> {
    let Json(params) = params.map_err(invalid_request_error)?;

    let quote = api.create_quote(params.destino_coords, params.cupom).await?;

    Ok(Json(quote.into()))
}
