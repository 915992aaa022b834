// src/models/photo.rs
// DOCUMENTATION: Photo entity and request payloads
// PURPOSE: Serialization models shared by handlers and stores

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Name of the identifier field; failures on it are reported as "not found"
pub const ID_FIELD: &str = "id";

/// Largest page size the list endpoint accepts
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Stored photo record
/// DOCUMENTATION: Maps directly to the photos table in PostgreSQL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Photo {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    pub price: f64,

    /// Location of the image itself
    pub url: String,

    /// When the picture was taken
    pub date: DateTime<Utc>,

    pub theme: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for create and full replace
/// DOCUMENTATION: Every field is required; a replace overwrites all of them
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPhoto {
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 100, message = "theme must be 1-100 characters"))]
    pub theme: String,
}

/// Payload for partial update
/// DOCUMENTATION: Absent fields keep their stored value; an explicit null is rejected
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PhotoPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "theme must be 1-100 characters"))]
    pub theme: Option<String>,
}

/// A key that is present must carry a value; `null` fails like any other wrong type
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PhotoPatch {
    /// Apply the present fields onto an existing record
    pub fn apply_to(&self, photo: &mut Photo) {
        if let Some(price) = self.price {
            photo.price = price;
        }
        if let Some(ref url) = self.url {
            photo.url = url.clone();
        }
        if let Some(date) = self.date {
            photo.date = date;
        }
        if let Some(ref theme) = self.theme {
            photo.theme = theme.clone();
        }
    }
}

/// Query parameters for GET /photos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    /// Page number, 1-based (default 1)
    pub page: Option<i64>,
    /// Page size (default and maximum 100)
    pub limit: Option<i64>,
}

impl PaginationQuery {
    /// Requested page, clamped to at least 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Requested page size, clamped to at least 1
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(MAX_PAGE_LIMIT).max(1)
    }

    pub fn exceeds_max_limit(&self) -> bool {
        self.limit() > MAX_PAGE_LIMIT
    }
}

/// Number of records to skip for a page
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_photo() -> Photo {
        let now = Utc::now();
        Photo {
            id: Uuid::new_v4(),
            price: 12.5,
            url: "https://example.com/a.jpg".to_string(),
            date: now,
            theme: "mountain".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_photo_validation() {
        let valid = NewPhoto {
            price: 9.99,
            url: "https://example.com/cat.png".to_string(),
            date: Utc::now(),
            theme: "cat".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = NewPhoto {
            url: "not a url".to_string(),
            ..valid.clone()
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));

        let negative = NewPhoto { price: -1.0, ..valid };
        let errors = negative.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_patch_deserialization() {
        let patch: PhotoPatch = serde_json::from_str(r#"{"unknown": 1}"#).unwrap();
        assert!(patch.price.is_none() && patch.url.is_none() && patch.theme.is_none());

        let patch: PhotoPatch = serde_json::from_str(r#"{"theme": "sea"}"#).unwrap();
        assert_eq!(patch.theme.as_deref(), Some("sea"));
        assert!(patch.price.is_none());

        assert!(serde_json::from_str::<PhotoPatch>(r#"{"price": null}"#).is_err());
        assert!(serde_json::from_str::<PhotoPatch>(r#"{"theme": null}"#).is_err());
    }

    #[test]
    fn test_patch_apply_keeps_absent_fields() {
        let mut photo = sample_photo();
        let original_url = photo.url.clone();

        let patch = PhotoPatch {
            price: Some(42.0),
            theme: Some("forest".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut photo);

        assert_eq!(photo.price, 42.0);
        assert_eq!(photo.theme, "forest");
        assert_eq!(photo.url, original_url);
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let query = PaginationQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);
        assert!(!query.exceeds_max_limit());

        let query = PaginationQuery {
            page: Some(0),
            limit: Some(-5),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);

        let query = PaginationQuery {
            page: None,
            limit: Some(101),
        };
        assert!(query.exceeds_max_limit());
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 50), 100);
        assert_eq!(page_offset(0, 10), 0);
    }
}
