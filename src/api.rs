//! HTTP front end: a single GET endpoint mirroring the CLI conversion.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::converter::{ConversionResult, Converter};
use crate::currencies::IsoCurrencies;
use crate::error::ConvertError;
use crate::rate_provider::RateProvider;
use crate::symbols::SymbolTable;

pub struct AppState {
    pub rates: Box<dyn RateProvider>,
    pub codes: IsoCurrencies,
    pub symbols: SymbolTable,
}

#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    amount: f64,
    input_currency: String,
    /// Absent means "convert to all known currencies".
    #[serde(default)]
    output_currency: String,
}

async fn currency_converter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> Result<Json<ConversionResult>, ApiError> {
    let converter = Converter::new(&state.codes, &state.symbols, state.rates.as_ref());
    let result = converter
        .convert(
            params.amount,
            &params.input_currency,
            &params.output_currency,
            None,
        )
        .await?;
    Ok(Json(result))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/currency_converter", get(currency_converter))
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, listen_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("Listening on {listen_addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

struct ApiError(ConvertError);

impl From<ConvertError> for ApiError {
    fn from(e: ConvertError) -> Self {
        ApiError(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ConvertError::CurrencyNotRecognized(_) => StatusCode::BAD_REQUEST,
            ConvertError::RatesNotAvailable { .. } | ConvertError::RateUnavailable { .. } => {
                StatusCode::NOT_FOUND
            }
            ConvertError::Request(_) => StatusCode::BAD_GATEWAY,
            ConvertError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
