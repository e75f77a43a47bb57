use axum::{
    extract::{rejection::FormRejection, Query, State},
    Form, Json,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::filters::FilterSet;
use crate::models::{CreateSmashingRequest, CreateSmashingResponse, ResultCode, Smashing};
use crate::state::SharedState;

/// `GET /api/smashings`: every record satisfying all supplied filter keys.
pub async fn list_smashings(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Smashing>>, AppError> {
    let filters = FilterSet::from_pairs(params)?;

    let smashings = state.store.find(&filters).await.map_err(|e| {
        warn!("Failed to list smashings: {e:#}");
        AppError::Storage(e)
    })?;

    debug!(filters = filters.len(), results = smashings.len(), "listed smashings");
    Ok(Json(smashings))
}

/// `POST /api/smashing`: stores one record; persistence failures come back as `_code: ERROR`.
pub async fn create_smashing(
    State(state): State<SharedState>,
    payload: Result<Form<CreateSmashingRequest>, FormRejection>,
) -> Result<Json<CreateSmashingResponse>, AppError> {
    let Form(payload) = payload?;

    let text = payload
        .smashing_text
        .ok_or(AppError::MissingField("smashingText"))?;

    let smashing = Smashing::new(text);
    let length = smashing.length;

    let code = match state.store.insert(smashing).await {
        Ok(()) => {
            debug!(length, "stored smashing");
            ResultCode::Ok
        }
        Err(e) => {
            warn!("Failed to save smashing: {e:#}");
            ResultCode::Error
        }
    };

    Ok(Json(CreateSmashingResponse { code }))
}
