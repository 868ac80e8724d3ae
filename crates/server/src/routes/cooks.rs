use axum::extract::{Path, State};
use axum::Json;

use service::{dishes, users};

use crate::errors::ApiError;
use crate::state::AppState;

pub async fn list_cooks(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cooks = users::list_cooks(&state.store, &state.resolver).await?;
    let count = cooks.len();
    Ok(Json(serde_json::json!({ "cooks": cooks, "count": count })))
}

pub async fn get_cook(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cook = users::get_cook(&state.store, &state.resolver, &email).await?;
    Ok(Json(serde_json::json!({ "cook": cook })))
}

pub async fn get_cook_dishes(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dishes = dishes::dishes_for_cook(&state.store, &state.resolver, &email).await?;
    let count = dishes.len();
    Ok(Json(serde_json::json!({ "dishes": dishes, "count": count })))
}
