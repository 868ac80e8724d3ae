//! Dish operations: creation, per-cook listing and bulk image uploads.

use serde::Serialize;
use tracing::{info, instrument};

use models::{Dish, DishDraft, UserRole};

use crate::assets::{owner_key, AssetCategory, AssetStore, StoredAsset, Upload, UrlResolver};
use crate::errors::ServiceError;
use crate::store::{Filter, Store};

/// One accepted item of a bulk image upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub dish_name: String,
    pub filename: String,
    pub url: String,
}

/// Create a dish for an existing cook. The stored record carries both the
/// raw image reference and its resolved URL.
#[instrument(skip(store, assets, resolver, draft, image), fields(cook = %draft.cook_email))]
pub async fn add_dish(
    store: &Store,
    assets: &AssetStore,
    resolver: &UrlResolver,
    draft: DishDraft,
    image: Option<Upload>,
) -> Result<Dish, ServiceError> {
    let cook = store
        .users()
        .find_one(
            &Filter::new()
                .eq("email", draft.cook_email.as_str())
                .eq("type", UserRole::Cook.as_str()),
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("cook"))?;

    let mut dish = draft.into_dish(cook.name);
    match image {
        Some(upload) => {
            let filename = assets
                .store(AssetCategory::Food, &upload, &owner_key(&dish.cook_email))
                .await?;
            dish.image_url = Some(resolver.resolve(Some(&filename), AssetCategory::Food).await);
            dish.image = Some(filename);
        }
        None => {
            dish.image_url = Some(AssetCategory::Food.placeholder_url().to_string());
        }
    }

    let created = store.dishes().insert(&dish).await?;
    info!(dish = %created.name, "dish added");
    Ok(created)
}

/// All dishes of one cook, in insertion order, with image URLs re-resolved
/// against current disk state.
pub async fn dishes_for_cook(
    store: &Store,
    resolver: &UrlResolver,
    cook_email: &str,
) -> Result<Vec<Dish>, ServiceError> {
    let email = cook_email.trim().to_lowercase();
    let mut dishes = store
        .dishes()
        .find_all(&Filter::new().eq("cookEmail", email.as_str()))
        .await?;
    for dish in &mut dishes {
        refresh_image_url(resolver, dish).await;
    }
    Ok(dishes)
}

/// Store a batch of dish images for one cook. Items that fail validation are
/// skipped; the result lists only what was stored.
pub async fn bulk_upload_images(
    store: &Store,
    assets: &AssetStore,
    resolver: &UrlResolver,
    cook_email: &str,
    items: Vec<(String, Upload)>,
) -> Result<Vec<UploadedImage>, ServiceError> {
    let email = cook_email.trim().to_lowercase();
    store
        .users()
        .find_one(
            &Filter::new().eq("email", email.as_str()).eq("type", UserRole::Cook.as_str()),
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("cook"))?;

    let stored = assets.store_many(AssetCategory::Food, &items, &owner_key(&email)).await;
    info!(cook = %email, accepted = stored.len(), submitted = items.len(), "bulk images stored");
    let mut uploaded = Vec::with_capacity(stored.len());
    for StoredAsset { name_hint, filename } in stored {
        let url = resolver.resolve(Some(&filename), AssetCategory::Food).await;
        uploaded.push(UploadedImage { dish_name: name_hint, filename, url });
    }
    Ok(uploaded)
}

async fn refresh_image_url(resolver: &UrlResolver, dish: &mut Dish) {
    if let Some(image) = dish.image.clone() {
        dish.image_url = Some(resolver.resolve(Some(&image), AssetCategory::Food).await);
    } else if dish.image_url.is_none() {
        dish.image_url = Some(AssetCategory::Food.placeholder_url().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::{CookProfile, User};

    async fn fixture() -> (tempfile::TempDir, Store, AssetStore, UrlResolver) {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetStore::open(dir.path()).await.unwrap();
        let resolver = UrlResolver::new(dir.path(), "http://localhost:5000");
        (dir, Store::in_memory(), assets, resolver)
    }

    async fn seed_cook(store: &Store, email: &str) {
        let user = User {
            id: None,
            name: "Kavya Reddy".into(),
            email: email.into(),
            phone: "+91-1".into(),
            address: "Hyderabad".into(),
            role: UserRole::Cook,
            registration_date: Utc::now(),
            is_available: true,
            cook: Some(CookProfile::new("Andhra".into(), 7)),
        };
        store.users().insert(&user).await.unwrap();
    }

    fn draft(cook_email: &str, name: &str) -> DishDraft {
        DishDraft {
            name: name.into(),
            description: "Spicy".into(),
            price: 25000,
            cook_email: cook_email.into(),
            category: "lunch".into(),
            cuisine: "Andhra".into(),
            prep_time: 40,
            spice_level: "hot".into(),
            is_vegetarian: true,
            calories: 450,
        }
    }

    fn jpeg_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 40, 40]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Jpeg)
            .unwrap();
        out
    }

    #[tokio::test]
    async fn unknown_cook_is_rejected_before_any_write() {
        let (_dir, store, assets, resolver) = fixture().await;
        let err = add_dish(&store, &assets, &resolver, draft("ghost@x.com", "Dosa"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(store.dishes().count(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn dish_without_image_gets_food_placeholder() {
        let (_dir, store, assets, resolver) = fixture().await;
        seed_cook(&store, "kavya@x.com").await;

        let dish =
            add_dish(&store, &assets, &resolver, draft("kavya@x.com", "Dosa"), None).await.unwrap();
        assert!(dish.id.is_some());
        assert_eq!(dish.cook_name, "Kavya Reddy");
        assert!(dish.image.is_none());
        assert_eq!(dish.image_url.as_deref(), Some(AssetCategory::Food.placeholder_url()));
    }

    #[tokio::test]
    async fn uploaded_dish_image_yields_servable_url() {
        let (dir, store, assets, resolver) = fixture().await;
        seed_cook(&store, "kavya@x.com").await;

        let upload = Upload { filename: "dosa.jpg".into(), bytes: jpeg_bytes() };
        let dish = add_dish(&store, &assets, &resolver, draft("kavya@x.com", "Dosa"), Some(upload))
            .await
            .unwrap();

        let image = dish.image.expect("stored reference");
        assert!(image.starts_with("food_kavya_") && image.ends_with(".jpg"));
        assert!(dir.path().join("food").join(&image).is_file());
        assert_eq!(
            dish.image_url.unwrap(),
            format!("http://localhost:5000/static/food/{image}")
        );
    }

    #[tokio::test]
    async fn invalid_image_rejects_the_dish_entirely() {
        let (_dir, store, assets, resolver) = fixture().await;
        seed_cook(&store, "kavya@x.com").await;

        let upload = Upload { filename: "menu.pdf".into(), bytes: b"%PDF-1.4".to_vec() };
        let err = add_dish(&store, &assets, &resolver, draft("kavya@x.com", "Dosa"), Some(upload))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedMedia(_)));
        assert_eq!(store.dishes().count(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn listing_filters_by_cook_and_keeps_insertion_order() {
        let (_dir, store, assets, resolver) = fixture().await;
        seed_cook(&store, "kavya@x.com").await;
        seed_cook(&store, "meera@x.com").await;

        for name in ["Dosa", "Idli"] {
            add_dish(&store, &assets, &resolver, draft("kavya@x.com", name), None).await.unwrap();
        }
        add_dish(&store, &assets, &resolver, draft("meera@x.com", "Thali"), None).await.unwrap();

        let dishes = dishes_for_cook(&store, &resolver, "Kavya@X.com").await.unwrap();
        let names: Vec<_> = dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Dosa", "Idli"]);
    }

    #[tokio::test]
    async fn bulk_upload_skips_invalid_items_and_resolves_the_rest() {
        let (_dir, store, assets, resolver) = fixture().await;
        seed_cook(&store, "sneha@x.com").await;

        let items = vec![
            ("Masala Dosa".to_string(), Upload { filename: "a.jpg".into(), bytes: jpeg_bytes() }),
            ("Menu Card".to_string(), Upload { filename: "menu.txt".into(), bytes: b"x".to_vec() }),
        ];
        let uploaded =
            bulk_upload_images(&store, &assets, &resolver, "sneha@x.com", items).await.unwrap();

        assert_eq!(uploaded.len(), 1);
        assert_eq!(uploaded[0].dish_name, "Masala Dosa");
        assert!(uploaded[0].filename.starts_with("food_sneha_masala_dosa_"));
        assert!(uploaded[0].url.contains("/static/food/"));
    }

    #[tokio::test]
    async fn bulk_upload_requires_an_existing_cook() {
        let (_dir, store, assets, resolver) = fixture().await;
        let err = bulk_upload_images(&store, &assets, &resolver, "ghost@x.com", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
