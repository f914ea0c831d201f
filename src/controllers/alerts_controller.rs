use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    errors::AppError,
    models::Alert,
    schema::{self, ValidationError},
    AppState,
};

// GET /api/alerts
pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, AppError> {
    let alerts = state.store.list().await?;
    Ok(Json(alerts))
}

// POST /api/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Alert>), AppError> {
    // Take the body as raw JSON so every bad input goes through the schema
    // and comes back as a 400 with a field, rather than an extractor 422.
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "rejected alert body");
        ValidationError::new("Invalid JSON body", None)
    })?;

    let input = schema::parse_new_alert(&body)?;
    let alert = state.store.create(input).await?;

    tracing::info!(
        id = alert.id,
        commodity = %alert.commodity_id,
        mandi = %alert.mandi_id,
        condition = %alert.condition,
        "alert created"
    );

    Ok((StatusCode::CREATED, Json(alert)))
}

// DELETE /api/alerts/:id
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("Invalid alert id", Some("id")))?;

    if !state.store.delete(id).await? {
        return Err(AppError::NotFound("Alert not found".to_string()));
    }

    tracing::info!(id, "alert deleted");
    Ok(StatusCode::NO_CONTENT)
}
