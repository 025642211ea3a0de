use std::sync::Arc;

use image::imageops::FilterType;

use crate::media::{ApiError, Poster, PosterSize};
use crate::tmdb::TmdbApi;

/// Downloads `poster_path` from the image CDN and stretches it to exactly
/// `size`. An empty path is still requested and fails like any missing image.
pub async fn load_poster(
    api: Arc<dyn TmdbApi>,
    poster_path: String,
    size: PosterSize,
) -> Result<Poster, ApiError> {
    let bytes = api
        .fetch_image_bytes(&poster_path)
        .await
        .map_err(|e| ApiError::Image(format!("{}: {}", poster_path, e)))?;

    tokio::task::spawn_blocking(move || decode_and_resize(&bytes, size))
        .await
        .map_err(|e| ApiError::Image(e.to_string()))?
}

pub fn decode_and_resize(bytes: &[u8], size: PosterSize) -> Result<Poster, ApiError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ApiError::Image(e.to_string()))?;
    let resized = decoded
        .resize_exact(size.width, size.height, FilterType::Lanczos3)
        .into_rgba8();
    let (width, height) = resized.dimensions();

    Ok(Poster {
        width,
        height,
        handle: iced::widget::image::Handle::from_rgba(width, height, resized.into_raw()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::fake::{png_bytes, FakeTmdb};

    #[test]
    fn resize_ignores_aspect_ratio() {
        let poster = decode_and_resize(&png_bytes(500, 500), PosterSize::THUMBNAIL).unwrap();
        assert_eq!((poster.width, poster.height), (150, 225));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = decode_and_resize(b"<html>404</html>", PosterSize::DETAIL).unwrap_err();
        assert!(matches!(err, ApiError::Image(_)));
    }

    #[tokio::test]
    async fn loads_detail_size() {
        let api: Arc<dyn TmdbApi> = Arc::new(FakeTmdb::default());
        let poster = load_poster(api, String::from("/p.jpg"), PosterSize::DETAIL)
            .await
            .unwrap();
        assert_eq!((poster.width, poster.height), (400, 600));
    }

    #[tokio::test]
    async fn empty_path_still_requests_and_fails() {
        let fake = Arc::new(FakeTmdb::default());
        let api: Arc<dyn TmdbApi> = fake.clone();
        let result = load_poster(api, String::new(), PosterSize::THUMBNAIL).await;
        assert!(matches!(result, Err(ApiError::Image(_))));
        assert_eq!(fake.call_count(), 1);
    }
}
