// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for photo operations
// PURPOSE: Forward requests to the photo store and pick the status code

use crate::db::PhotoStore;
use crate::errors::PhotoApiError;
use crate::models::{NewPhoto, PaginationQuery, PhotoPatch, MAX_PAGE_LIMIT};
use crate::services::fake_photo;
use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use serde_json::Value;

/// POST /photos
/// Create a new photo
pub async fn create_photo(
    store: web::Data<dyn PhotoStore>,
    req: web::Json<NewPhoto>,
) -> Result<impl Responder, PhotoApiError> {
    let photo = store.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(photo))
}

/// GET /photos?page=&limit=
/// List one page of photos
pub async fn get_all_photos(
    store: web::Data<dyn PhotoStore>,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, PhotoApiError> {
    if query.exceeds_max_limit() {
        return Err(PhotoApiError::BadInput {
            field: Some("limit".to_string()),
            detail: format!("Maximum limit is {}", MAX_PAGE_LIMIT),
        });
    }

    let photos = store.get_filtered(query.page(), query.limit()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /photos/{id}
pub async fn get_photo(
    store: web::Data<dyn PhotoStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PhotoApiError> {
    let photo = store.get_one(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// PATCH /photos/{id}
/// Partial update; an empty body is a no-op answered with 204
pub async fn update_photo(
    store: web::Data<dyn PhotoStore>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, PhotoApiError> {
    let patch = match parse_patch(&body)? {
        Some(patch) => patch,
        None => return Ok(HttpResponse::NoContent().finish()),
    };

    let photo = store.update_one(&path.into_inner(), patch).await?;
    Ok(HttpResponse::Created().json(photo))
}

/// PUT /photos/{id}
/// Replace every field of a photo
pub async fn replace_photo(
    store: web::Data<dyn PhotoStore>,
    path: web::Path<String>,
    req: web::Json<NewPhoto>,
) -> Result<impl Responder, PhotoApiError> {
    let photo = store
        .replace_one(&path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(photo))
}

/// DELETE /photos/{id}
pub async fn delete_photo(
    store: web::Data<dyn PhotoStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PhotoApiError> {
    store.delete_one(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /photos/fake
/// Store a randomly generated photo (development helper)
pub async fn create_fake_photo(
    store: web::Data<dyn PhotoStore>,
) -> Result<impl Responder, PhotoApiError> {
    let photo = store.create(fake_photo()).await?;
    log::debug!("Generated fake photo {}", photo.id);
    Ok(HttpResponse::Created().json(photo))
}

/// Decode a PATCH body
/// DOCUMENTATION: Ok(None) only when the body is blank or an object with zero keys
fn parse_patch(body: &[u8]) -> Result<Option<PhotoPatch>, PhotoApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PhotoApiError::bad_input(format!("Invalid JSON body: {}", e)))?;
    match value.as_object() {
        Some(fields) if fields.is_empty() => return Ok(None),
        Some(_) => {}
        None => return Err(PhotoApiError::bad_input("Request body must be a JSON object")),
    }

    let patch: PhotoPatch = serde_json::from_value(value)
        .map_err(|e| PhotoApiError::bad_input(format!("Invalid JSON body: {}", e)))?;

    Ok(Some(patch))
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    PhotoApiError::bad_input(err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    PhotoApiError::bad_input(err.to_string()).into()
}

/// Configuration for photo routes
/// DOCUMENTATION: /fake is registered ahead of /{id} so it is not taken for an id
pub fn config(cfg: &mut web::ServiceConfig, enable_fake: bool) {
    let mut scope = web::scope("/photos")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("", web::post().to(create_photo))
        .route("", web::get().to(get_all_photos));

    if enable_fake {
        scope = scope.route("/fake", web::post().to(create_fake_photo));
    }

    cfg.service(
        scope
            .route("/{id}", web::get().to(get_photo))
            .route("/{id}", web::patch().to(update_photo))
            .route("/{id}", web::put().to(replace_photo))
            .route("/{id}", web::delete().to(delete_photo)),
    );
}


#[cfg(test)]
mod parse_patch_tests {
    use super::parse_patch;

    #[test]
    fn test_blank_and_keyless_bodies_are_empty() {
        assert!(parse_patch(b"").unwrap().is_none());
        assert!(parse_patch(b"  \n").unwrap().is_none());
        assert!(parse_patch(b"{}").unwrap().is_none());
        assert!(parse_patch(b" { } ").unwrap().is_none());
    }

    #[test]
    fn test_any_key_makes_a_patch() {
        let patch = parse_patch(br#"{"other": true}"#).unwrap().unwrap();
        assert!(patch.price.is_none() && patch.theme.is_none());

        let patch = parse_patch(br#"{"theme": "x"}"#).unwrap().unwrap();
        assert_eq!(patch.theme.as_deref(), Some("x"));
    }

    #[test]
    fn test_malformed_bodies_are_rejected() {
        assert!(parse_patch(b"42").is_err());
        assert!(parse_patch(b"[1, 2]").is_err());
        assert!(parse_patch(b"{").is_err());
        assert!(parse_patch(br#"{"price": null}"#).is_err());
    }
}
