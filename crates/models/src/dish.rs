use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::form::{self, Fields};

/// A dish offered by a cook. `cook_email` must reference an existing cook at
/// creation time; the check lives in the service layer, not in the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub cook_email: String,
    pub cook_name: String,
    pub name: String,
    pub description: String,
    /// Price in currency minor units.
    pub price: i64,
    pub category: String,
    pub cuisine: String,
    pub prep_time: u32,
    pub spice_level: String,
    pub is_available: bool,
    pub is_vegetarian: bool,
    pub calories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: u64,
    pub date_added: DateTime<Utc>,
}

/// Validated dish-creation input, coerced from loosely-typed form fields.
#[derive(Clone, Debug)]
pub struct DishDraft {
    pub cook_email: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub cuisine: String,
    pub prep_time: u32,
    pub spice_level: String,
    pub is_vegetarian: bool,
    pub calories: u32,
}

impl DishDraft {
    pub fn from_fields(fields: &Fields) -> Result<Self, ModelError> {
        let cook_email = form::required_str(fields, "cookEmail")?.to_lowercase();
        let name = form::required_str(fields, "name")?;
        let description = form::required_str(fields, "description")?;
        let price = form::parse_i64("price", &form::required_str(fields, "price")?)?;
        let category = form::required_str(fields, "category")?;
        let cuisine = form::required_str(fields, "cuisine")?;
        let prep_time = form::parse_u32("prepTime", &form::required_str(fields, "prepTime")?)?;
        let spice_level = form::required_str(fields, "spiceLevel")?;
        let is_vegetarian = fields
            .get("isVegetarian")
            .map(|raw| form::parse_bool(raw))
            .unwrap_or(false);
        let calories = match form::optional_str(fields, "calories") {
            Some(raw) => form::parse_u32("calories", &raw)?,
            None => 0,
        };

        if price < 0 {
            return Err(ModelError::Validation("price must be non-negative".into()));
        }

        Ok(Self {
            cook_email,
            name,
            description,
            price,
            category,
            cuisine,
            prep_time,
            spice_level,
            is_vegetarian,
            calories,
        })
    }

    /// Turn the draft into a storable dish: ratings zeroed, marked available,
    /// stamped now. The image reference is attached by the caller after the
    /// asset pipeline has run.
    pub fn into_dish(self, cook_name: String) -> Dish {
        Dish {
            id: None,
            cook_email: self.cook_email,
            cook_name,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            cuisine: self.cuisine,
            prep_time: self.prep_time,
            spice_level: self.spice_level,
            is_available: true,
            is_vegetarian: self.is_vegetarian,
            calories: self.calories,
            image: None,
            image_url: None,
            average_rating: 0.0,
            total_ratings: 0,
            date_added: Utc::now(),
        }
    }
}
