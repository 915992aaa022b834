// src/db/memory_store.rs
// DOCUMENTATION: In-memory photo store
// PURPOSE: Run the service without PostgreSQL (PHOTO_STORE=memory) and back the handler tests

use crate::db::{parse_photo_id, validate_payload, PhotoStore};
use crate::errors::ModelError;
use crate::models::{page_offset, NewPhoto, Photo, PhotoPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe photo store kept in process memory
#[derive(Clone, Default)]
pub struct MemoryPhotoStore {
    store: Arc<RwLock<HashMap<Uuid, Photo>>>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn create(&self, req: NewPhoto) -> Result<Photo, ModelError> {
        validate_payload(&req)?;

        let now = Utc::now();
        let photo = Photo {
            id: Uuid::new_v4(),
            price: req.price,
            url: req.url,
            date: req.date,
            theme: req.theme,
            created_at: now,
            updated_at: now,
        };

        self.store.write().await.insert(photo.id, photo.clone());
        log::debug!("Stored photo {} in memory", photo.id);
        Ok(photo)
    }

    async fn get_filtered(&self, page: i64, limit: i64) -> Result<Vec<Photo>, ModelError> {
        let store = self.store.read().await;

        let mut photos: Vec<&Photo> = store.values().collect();
        photos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(page_offset(page, limit)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);

        Ok(photos
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_one(&self, id: &str) -> Result<Photo, ModelError> {
        let photo_id = parse_photo_id(id)?;

        self.store
            .read()
            .await
            .get(&photo_id)
            .cloned()
            .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))
    }

    async fn update_one(&self, id: &str, patch: PhotoPatch) -> Result<Photo, ModelError> {
        let photo_id = parse_photo_id(id)?;
        validate_payload(&patch)?;

        let mut store = self.store.write().await;
        let photo = store
            .get_mut(&photo_id)
            .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))?;

        patch.apply_to(photo);
        photo.updated_at = Utc::now();
        Ok(photo.clone())
    }

    async fn replace_one(&self, id: &str, req: NewPhoto) -> Result<Photo, ModelError> {
        let photo_id = parse_photo_id(id)?;
        validate_payload(&req)?;

        let mut store = self.store.write().await;
        let photo = store
            .get_mut(&photo_id)
            .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))?;

        photo.price = req.price;
        photo.url = req.url;
        photo.date = req.date;
        photo.theme = req.theme;
        photo.updated_at = Utc::now();
        Ok(photo.clone())
    }

    async fn delete_one(&self, id: &str) -> Result<(), ModelError> {
        let photo_id = parse_photo_id(id)?;

        self.store
            .write()
            .await
            .remove(&photo_id)
            .map(|_| ())
            .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ID_FIELD;
    use tokio_test::{assert_err, assert_ok};

    fn new_photo(theme: &str) -> NewPhoto {
        NewPhoto {
            price: 10.0,
            url: format!("https://example.com/{}.jpg", theme),
            date: Utc::now(),
            theme: theme.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryPhotoStore::new();
        let created = assert_ok!(store.create(new_photo("beach")).await);

        let fetched = assert_ok!(store.get_one(&created.id.to_string()).await);
        assert_eq!(fetched, created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let store = MemoryPhotoStore::new();
        let mut req = new_photo("beach");
        req.url = "nope".to_string();

        let err = assert_err!(store.create(req).await);
        assert_eq!(err.path(), Some("url"));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_get_filtered_pages_in_creation_order() {
        let store = MemoryPhotoStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            let photo = store.create(new_photo(&format!("t{}", i))).await.unwrap();
            ids.push(photo.id);
            // Distinct creation timestamps
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let first = store.get_filtered(1, 2).await.unwrap();
        let second = store.get_filtered(2, 2).await.unwrap();
        let third = store.get_filtered(3, 2).await.unwrap();
        let beyond = store.get_filtered(4, 2).await.unwrap();

        assert_eq!(first.iter().map(|p| p.id).collect::<Vec<_>>(), ids[0..2].to_vec());
        assert_eq!(second.iter().map(|p| p.id).collect::<Vec<_>>(), ids[2..4].to_vec());
        assert_eq!(third.len(), 1);
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_update_replace_delete() {
        let store = MemoryPhotoStore::new();
        let created = store.create(new_photo("lake")).await.unwrap();
        let id = created.id.to_string();

        let patch = PhotoPatch {
            price: Some(99.0),
            ..Default::default()
        };
        let updated = store.update_one(&id, patch).await.unwrap();
        assert_eq!(updated.price, 99.0);
        assert_eq!(updated.theme, "lake");

        let replaced = store.replace_one(&id, new_photo("desert")).await.unwrap();
        assert_eq!(replaced.theme, "desert");
        assert_eq!(replaced.price, 10.0);
        assert_eq!(replaced.created_at, created.created_at);

        assert_ok!(store.delete_one(&id).await);
        let err = assert_err!(store.get_one(&id).await);
        assert_eq!(err.path(), Some(ID_FIELD));
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_fail_on_id() {
        let store = MemoryPhotoStore::new();

        let err = assert_err!(store.delete_one(&Uuid::new_v4().to_string()).await);
        assert!(matches!(err, ModelError::NotFound(_)));

        let err = assert_err!(store.get_one("not-a-uuid").await);
        assert!(matches!(err, ModelError::InvalidId(_)));
        assert_eq!(err.path(), Some(ID_FIELD));
    }
}
