// src/db/photo_store.rs
// DOCUMENTATION: Data-access interface for photos
// PURPOSE: The seam between HTTP handlers and persistence

use crate::errors::ModelError;
use crate::models::{NewPhoto, Photo, PhotoPatch};
use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

/// Photo persistence operations
/// DOCUMENTATION: Implementations validate payloads and parse ids themselves,
/// so callers can forward request data untouched
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Insert a new photo and return the stored record
    async fn create(&self, req: NewPhoto) -> Result<Photo, ModelError>;

    /// One page of photos in creation order
    async fn get_filtered(&self, page: i64, limit: i64) -> Result<Vec<Photo>, ModelError>;

    async fn get_one(&self, id: &str) -> Result<Photo, ModelError>;

    /// Change only the fields present in the patch
    async fn update_one(&self, id: &str, patch: PhotoPatch) -> Result<Photo, ModelError>;

    /// Overwrite every field of an existing photo
    async fn replace_one(&self, id: &str, req: NewPhoto) -> Result<Photo, ModelError>;

    async fn delete_one(&self, id: &str) -> Result<(), ModelError>;
}

/// Parse a route identifier
/// DOCUMENTATION: A malformed id is reported on the id field, like a missing one
pub fn parse_photo_id(id: &str) -> Result<Uuid, ModelError> {
    Uuid::parse_str(id.trim()).map_err(|_| ModelError::InvalidId(id.to_string()))
}

/// Run field validation and convert failures into a ModelError
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ModelError> {
    payload.validate().map_err(ModelError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ID_FIELD;

    #[test]
    fn test_parse_photo_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_photo_id(&id.to_string()).unwrap(), id);

        let err = parse_photo_id("42").unwrap_err();
        assert_eq!(err.path(), Some(ID_FIELD));
    }

    #[test]
    fn test_validate_payload_reports_field() {
        let patch = PhotoPatch {
            theme: Some(String::new()),
            ..Default::default()
        };
        let err = validate_payload(&patch).unwrap_err();
        assert_eq!(err.path(), Some("theme"));

        assert!(validate_payload(&PhotoPatch::default()).is_ok());
    }
}
