use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;
use crate::form::{self, Fields};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Cook,
    Customer,
}

impl UserRole {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        match raw.trim().to_lowercase().as_str() {
            "cook" => Ok(Self::Cook),
            "customer" => Ok(Self::Customer),
            other => Err(ModelError::Validation(format!("unknown user type: {other}"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cook => "cook",
            Self::Customer => "customer",
        }
    }
}

/// Marketplace account. Identity key is the normalized email; the store id is
/// assigned on insert and opaque to callers.
///
/// Cook-only fields are flattened into the document, so both backends store
/// and return the historical flat shape.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub registration_date: DateTime<Utc>,
    pub is_available: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub cook: Option<CookProfile>,
}

/// Extra fields carried only by cook accounts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookProfile {
    pub specialties: String,
    pub experience: u32,
    pub description: String,
    pub average_rating: f64,
    pub total_orders: u64,
    pub total_ratings: u64,
    pub delivery_radius: u32,
    pub preparation_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
}

impl CookProfile {
    /// Profile for a freshly registered cook: counters zeroed, defaults from
    /// the marketplace policy.
    pub fn new(specialties: String, experience: u32) -> Self {
        let description = format!("Home cook specializing in {specialties}.");
        Self {
            specialties,
            experience,
            description,
            average_rating: 0.0,
            total_orders: 0,
            total_ratings: 0,
            delivery_radius: 10,
            preparation_time: "30-45 mins".to_string(),
            profile_pic: None,
            profile_pic_url: None,
        }
    }
}

impl User {
    pub fn is_cook(&self) -> bool {
        self.role == UserRole::Cook
    }
}

// A flattened `Option<CookProfile>` does not round-trip through serde when the
// cook fields are absent, so deserialization goes through a raw mirror with
// every cook field optional; the role decides whether a profile is attached.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    id: Option<String>,
    name: String,
    email: String,
    phone: String,
    address: String,
    #[serde(rename = "type")]
    role: UserRole,
    registration_date: DateTime<Utc>,
    is_available: bool,
    #[serde(flatten)]
    cook: RawCookProfile,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCookProfile {
    specialties: Option<String>,
    experience: Option<u32>,
    description: Option<String>,
    average_rating: Option<f64>,
    total_orders: Option<u64>,
    total_ratings: Option<u64>,
    delivery_radius: Option<u32>,
    preparation_time: Option<String>,
    profile_pic: Option<String>,
    profile_pic_url: Option<String>,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawUser::deserialize(deserializer)?;
        let cook = match raw.role {
            UserRole::Cook => Some(CookProfile {
                specialties: raw.cook.specialties.unwrap_or_default(),
                experience: raw.cook.experience.unwrap_or_default(),
                description: raw.cook.description.unwrap_or_default(),
                average_rating: raw.cook.average_rating.unwrap_or_default(),
                total_orders: raw.cook.total_orders.unwrap_or_default(),
                total_ratings: raw.cook.total_ratings.unwrap_or_default(),
                delivery_radius: raw.cook.delivery_radius.unwrap_or_default(),
                preparation_time: raw.cook.preparation_time.unwrap_or_default(),
                profile_pic: raw.cook.profile_pic,
                profile_pic_url: raw.cook.profile_pic_url,
            }),
            UserRole::Customer => None,
        };
        Ok(User {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            address: raw.address,
            role: raw.role,
            registration_date: raw.registration_date,
            is_available: raw.is_available,
            cook,
        })
    }
}

/// Validated registration input. Email is lower-cased and trimmed here so
/// uniqueness checks always compare normalized keys.
#[derive(Clone, Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: UserRole,
    pub specialties: Option<String>,
    pub experience: Option<u32>,
}

impl RegisterInput {
    pub fn from_fields(fields: &Fields) -> Result<Self, ModelError> {
        let name = form::required_str(fields, "name")?;
        let email = form::required_str(fields, "email")?;
        let phone = form::required_str(fields, "phone")?;
        let address = form::required_str(fields, "address")?;
        let role = UserRole::parse(&form::required_str(fields, "type")?)?;

        validate_email(&email)?;

        let specialties = form::optional_str(fields, "specialties");
        let experience = match form::optional_str(fields, "experience") {
            Some(raw) => Some(form::parse_u32("experience", &raw)?),
            None => None,
        };

        Ok(Self {
            name,
            email: email.to_lowercase(),
            phone,
            address,
            role,
            specialties,
            experience,
        })
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> Fields {
        [
            ("name", "Kavya Reddy"),
            ("email", "Kavya@X.com"),
            ("phone", "+91-1"),
            ("address", "Hyderabad"),
            ("type", "cook"),
            ("specialties", "Andhra"),
            ("experience", "7"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn register_input_normalizes_email() {
        let input = RegisterInput::from_fields(&base_fields()).unwrap();
        assert_eq!(input.email, "kavya@x.com");
        assert_eq!(input.role, UserRole::Cook);
        assert_eq!(input.experience, Some(7));
    }

    #[test]
    fn register_input_rejects_missing_required_field() {
        let mut fields = base_fields();
        fields.remove("phone");
        assert!(RegisterInput::from_fields(&fields).is_err());
    }

    #[test]
    fn register_input_rejects_unknown_role() {
        let mut fields = base_fields();
        fields.insert("type".into(), "admin".into());
        assert!(RegisterInput::from_fields(&fields).is_err());
    }

    #[test]
    fn cook_fields_flatten_into_document() {
        let mut user = User {
            id: None,
            name: "A".into(),
            email: "a@b.com".into(),
            phone: "1".into(),
            address: "x".into(),
            role: UserRole::Cook,
            registration_date: Utc::now(),
            is_available: true,
            cook: Some(CookProfile::new("Punjabi".into(), 9)),
        };
        user.cook.as_mut().unwrap().profile_pic = Some("boy1.jpg".into());
        let doc = serde_json::to_value(&user).unwrap();
        assert_eq!(doc["type"], "cook");
        assert_eq!(doc["specialties"], "Punjabi");
        assert_eq!(doc["profilePic"], "boy1.jpg");
        assert!(doc.get("cook").is_none());

        let back: User = serde_json::from_value(doc).unwrap();
        assert_eq!(back.cook.unwrap().experience, 9);
    }

    #[test]
    fn customer_document_has_no_cook_fields() {
        let user = User {
            id: None,
            name: "B".into(),
            email: "b@b.com".into(),
            phone: "1".into(),
            address: "y".into(),
            role: UserRole::Customer,
            registration_date: Utc::now(),
            is_available: true,
            cook: None,
        };
        let doc = serde_json::to_value(&user).unwrap();
        assert!(doc.get("specialties").is_none());
        let back: User = serde_json::from_value(doc).unwrap();
        assert!(back.cook.is_none());
    }
}
