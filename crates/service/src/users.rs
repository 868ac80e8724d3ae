//! Account operations: registration, login-by-lookup, cook listings.

use chrono::Utc;
use tracing::{info, instrument};

use models::{CookProfile, RegisterInput, User, UserRole};

use crate::assets::{owner_key, AssetCategory, AssetStore, Upload, UrlResolver};
use crate::errors::ServiceError;
use crate::store::{Filter, Store};

/// Register a new account. Exactly one user may exist per normalized email,
/// regardless of role.
#[instrument(skip(store, assets, resolver, input, profile_image), fields(email = %input.email))]
pub async fn register(
    store: &Store,
    assets: &AssetStore,
    resolver: &UrlResolver,
    input: RegisterInput,
    profile_image: Option<Upload>,
) -> Result<User, ServiceError> {
    let users = store.users();

    if users.find_one(&Filter::new().eq("email", input.email.as_str())).await?.is_some() {
        return Err(ServiceError::Conflict("email already registered".into()));
    }

    let cook = match input.role {
        UserRole::Cook => {
            let (Some(specialties), Some(experience)) = (input.specialties.clone(), input.experience)
            else {
                return Err(ServiceError::Validation(
                    "specialties and experience are required for cooks".into(),
                ));
            };
            let mut profile = CookProfile::new(specialties, experience);
            match profile_image {
                Some(upload) => {
                    let filename = assets
                        .store(AssetCategory::Profiles, &upload, &owner_key(&input.email))
                        .await?;
                    profile.profile_pic_url =
                        Some(resolver.resolve(Some(&filename), AssetCategory::Profiles).await);
                    profile.profile_pic = Some(filename);
                }
                None => {
                    let initial = input
                        .name
                        .chars()
                        .next()
                        .map(|c| c.to_uppercase().to_string())
                        .unwrap_or_else(|| "C".to_string());
                    profile.profile_pic_url = Some(format!(
                        "https://via.placeholder.com/300x300/ff6347/white?text={initial}"
                    ));
                }
            }
            Some(profile)
        }
        UserRole::Customer => None,
    };

    let user = User {
        id: None,
        name: input.name,
        email: input.email,
        phone: input.phone,
        address: input.address,
        role: input.role,
        registration_date: Utc::now(),
        is_available: true,
        cook,
    };

    let created = users.insert(&user).await?;
    info!(role = user.role.as_str(), "user registered");
    Ok(created)
}

/// Login is a lookup by normalized email and role; there are no credentials.
pub async fn login(
    store: &Store,
    resolver: &UrlResolver,
    email: &str,
    role: UserRole,
) -> Result<User, ServiceError> {
    let email = email.trim().to_lowercase();
    let mut user = store
        .users()
        .find_one(&Filter::new().eq("email", email.as_str()).eq("type", role.as_str()))
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    refresh_profile_url(resolver, &mut user).await;
    Ok(user)
}

pub async fn list_cooks(store: &Store, resolver: &UrlResolver) -> Result<Vec<User>, ServiceError> {
    let mut cooks = store
        .users()
        .find_all(&Filter::new().eq("type", UserRole::Cook.as_str()))
        .await?;
    for cook in &mut cooks {
        refresh_profile_url(resolver, cook).await;
    }
    Ok(cooks)
}

pub async fn get_cook(
    store: &Store,
    resolver: &UrlResolver,
    email: &str,
) -> Result<User, ServiceError> {
    let email = email.trim().to_lowercase();
    let mut cook = store
        .users()
        .find_one(
            &Filter::new().eq("email", email.as_str()).eq("type", UserRole::Cook.as_str()),
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("cook"))?;
    refresh_profile_url(resolver, &mut cook).await;
    Ok(cook)
}

/// Re-resolve the stored reference on every read so the URL reflects current
/// disk state. A stored external URL (including the initial-letter
/// placeholder) is kept as-is.
async fn refresh_profile_url(resolver: &UrlResolver, user: &mut User) {
    if let Some(profile) = user.cook.as_mut() {
        if let Some(pic) = profile.profile_pic.clone() {
            profile.profile_pic_url =
                Some(resolver.resolve(Some(&pic), AssetCategory::Profiles).await);
        } else if profile.profile_pic_url.is_none() {
            profile.profile_pic_url = Some(AssetCategory::Profiles.placeholder_url().to_string());
        }
    }
}
