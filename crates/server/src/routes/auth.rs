use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use models::form::{self, Fields};
use models::{RegisterInput, UserRole};
use service::assets::Upload;
use service::errors::ServiceError;
use service::users;

use crate::errors::ApiError;
use crate::routes::dishes::read_upload;
use crate::state::AppState;

/// Accepts either multipart form data (with an optional `profileImage` file)
/// or a plain JSON body.
pub async fn register(
    State(state): State<AppState>,
    req: Request,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let (fields, profile_image) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        read_register_form(multipart).await?
    } else {
        let Json(body) = Json::<serde_json::Value>::from_request(req, &state)
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        (form::fields_from_json(&body), None)
    };

    let input = RegisterInput::from_fields(&fields).map_err(ServiceError::from)?;
    let name = input.name.clone();
    let user =
        users::register(&state.store, &state.assets, &state.resolver, input, profile_image).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("Welcome to HomeMeals Connect, {name}!"),
            "user": user,
        })),
    ))
}

async fn read_register_form(
    mut multipart: Multipart,
) -> Result<(Fields, Option<Upload>), ApiError> {
    let mut fields = Fields::new();
    let mut profile_image: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "profileImage" {
            profile_image = read_upload(field).await?;
        } else {
            let value = field.text().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
            fields.insert(name, value);
        }
    }
    Ok((fields, profile_image))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let fields = form::fields_from_json(&body);
    let email = form::optional_str(&fields, "email")
        .ok_or_else(|| ApiError::bad_request("email and user type are required"))?;
    let role = form::optional_str(&fields, "userType")
        .ok_or_else(|| ApiError::bad_request("email and user type are required"))?;
    let role = UserRole::parse(&role).map_err(ServiceError::from)?;

    let user = users::login(&state.store, &state.resolver, &email, role).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Welcome back, {}!", user.name),
        "user": user,
    })))
}
