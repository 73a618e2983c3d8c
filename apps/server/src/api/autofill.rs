use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::{error::ApiResult, main_lib::AppState};
use autofill_core::autofill::{AutofillRequest, AutofillResult};

/// Pre-fill a listing from a plate or VIN.
async fn autofill_vehicle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AutofillRequest>,
) -> ApiResult<Json<AutofillResult>> {
    let result = state.autofill_service.autofill(request).await?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/vehicles/autofill", post(autofill_vehicle))
}
