// src/services/fake_data.rs
// DOCUMENTATION: Random photo payloads for development
// PURPOSE: Fill an empty database without typing records by hand

use crate::models::NewPhoto;
use chrono::{DateTime, Utc};
use fake::faker::chrono::en::DateTimeBefore;
use fake::faker::lorem::en::Word;
use fake::Fake;

/// Random image service used for fake URLs
const IMAGE_HOST: &str = "https://loremflickr.com";
const IMAGE_WIDTH: u32 = 1234;
const IMAGE_HEIGHT: u32 = 2345;

/// Build a random but valid photo payload
/// DOCUMENTATION: price in 1.00..1000.00, a randomized image URL,
/// a date in the past, and a single word as theme
pub fn fake_photo() -> NewPhoto {
    let cents: u32 = (100..100_000).fake();
    let lock: u32 = (1..1_000_000).fake();
    let date: DateTime<Utc> = DateTimeBefore(Utc::now()).fake();
    let theme: String = Word().fake();

    NewPhoto {
        price: f64::from(cents) / 100.0,
        url: format!("{}/{}/{}?lock={}", IMAGE_HOST, IMAGE_WIDTH, IMAGE_HEIGHT, lock),
        date,
        theme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_fake_photo_is_valid() {
        for _ in 0..50 {
            let photo = fake_photo();
            assert!(photo.validate().is_ok(), "invalid fake photo: {:?}", photo);
        }
    }

    #[test]
    fn test_fake_photo_fields() {
        let photo = fake_photo();

        assert!(photo.price >= 1.0 && photo.price < 1000.0);
        assert!(photo.url.starts_with("https://loremflickr.com/1234/2345"));
        assert!(photo.date < Utc::now());
        assert!(!photo.theme.is_empty());
    }
}
