use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use models::form::Fields;
use models::DishDraft;
use service::assets::Upload;
use service::dishes;
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::state::AppState;

/// Drain one multipart file field. Empty file slots (no filename or no
/// bytes) count as "no upload".
pub(crate) async fn read_upload(field: Field<'_>) -> Result<Option<Upload>, ApiError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
    if filename.is_empty() || bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload { filename, bytes: bytes.to_vec() }))
}

pub async fn add_dish(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut fields = Fields::new();
    let mut image: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "dishImage" {
            image = read_upload(field).await?;
        } else {
            let value = field.text().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
            fields.insert(name, value);
        }
    }

    let draft = DishDraft::from_fields(&fields).map_err(ServiceError::from)?;
    let dish = dishes::add_dish(&state.store, &state.assets, &state.resolver, draft, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Dish added successfully!", "dish": dish })),
    ))
}

pub async fn bulk_upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut cook_email = String::new();
    let mut names: Vec<String> = Vec::new();
    let mut files: Vec<Upload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "cookEmail" => {
                cook_email =
                    field.text().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
            }
            "dishNames" | "dishNames[]" => {
                names.push(field.text().await.map_err(|e| ApiError::bad_request(e.to_string()))?);
            }
            "foodImages" | "foodImages[]" => {
                if let Some(upload) = read_upload(field).await? {
                    files.push(upload);
                }
            }
            _ => {}
        }
    }

    if cook_email.is_empty() || files.is_empty() {
        return Err(ApiError::bad_request("cook email and images are required"));
    }

    let items: Vec<(String, Upload)> = files
        .into_iter()
        .enumerate()
        .map(|(i, upload)| {
            let hint = names.get(i).cloned().unwrap_or_else(|| format!("dish_{}", i + 1));
            (hint, upload)
        })
        .collect();

    let images =
        dishes::bulk_upload_images(&state.store, &state.assets, &state.resolver, &cook_email, items)
            .await?;
    Ok(Json(serde_json::json!({
        "message": format!("Successfully uploaded {} food images", images.len()),
        "images": images,
    })))
}
