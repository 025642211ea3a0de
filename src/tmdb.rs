use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::mapper::{extract_cast_names, extract_titles, join_names, movies_from_response};
use crate::media::{ApiError, GridRequest, Movie, MovieId, ACTORS_ERROR, SIMILAR_ERROR};
use crate::settings::AppSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Popular,
    Search(String),
    Credits(MovieId),
    Similar(MovieId),
}

impl Endpoint {
    fn path(&self) -> String {
        match self {
            Endpoint::Popular => String::from("/movie/popular"),
            Endpoint::Search(_) => String::from("/search/movie"),
            Endpoint::Credits(id) => format!("/movie/{}/credits", id),
            Endpoint::Similar(id) => format!("/movie/{}/similar", id),
        }
    }
}

impl From<&GridRequest> for Endpoint {
    fn from(request: &GridRequest) -> Self {
        match request {
            GridRequest::Popular => Endpoint::Popular,
            GridRequest::Search(query) => Endpoint::Search(query.clone()),
        }
    }
}

/// Everything the controllers need from TMDB.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn fetch_json(&self, endpoint: &Endpoint) -> Result<Value, ApiError>;
    async fn fetch_image_bytes(&self, poster_path: &str) -> Result<Vec<u8>, ApiError>;
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            image_base_url: settings.image_base_url.clone(),
            language: settings.language.clone(),
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }

    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        let base = format!("{}{}?api_key={}", self.base_url, endpoint.path(), self.api_key);
        match endpoint {
            Endpoint::Popular | Endpoint::Similar(_) => {
                format!("{}&language={}&page=1", base, self.language)
            }
            Endpoint::Search(query) => format!(
                "{}&language={}&query={}",
                base,
                self.language,
                urlencoding::encode(query)
            ),
            Endpoint::Credits(_) => base,
        }
    }

    async fn fetch_response(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(network_error)?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            429 => Err(ApiError::RateLimit),
            s if s >= 400 => Err(ApiError::Network(format!("HTTP error: {}", s))),
            _ => Ok(response),
        }
    }
}

/// Request URLs carry the api key, so reqwest's error text must not keep them.
fn network_error(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.without_url().to_string())
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn fetch_json(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        debug!("GET {:?}", endpoint);
        self.fetch_response(&self.endpoint_url(endpoint))
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.without_url().to_string()))
    }

    async fn fetch_image_bytes(&self, poster_path: &str) -> Result<Vec<u8>, ApiError> {
        self.fetch_response(&self.image_url(poster_path))
            .await?
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(network_error)
    }
}

pub async fn fetch_movies(
    api: Arc<dyn TmdbApi>,
    request: GridRequest,
) -> Result<Vec<Movie>, ApiError> {
    let json = api.fetch_json(&Endpoint::from(&request)).await?;
    movies_from_response(&json)
}

/// Cast names joined for display. Errors degrade to a fixed message.
pub async fn fetch_actors(api: Arc<dyn TmdbApi>, id: MovieId) -> String {
    let names = api
        .fetch_json(&Endpoint::Credits(id))
        .await
        .and_then(|json| extract_cast_names(&json));
    match names {
        Ok(names) => join_names(&names),
        Err(e) => {
            warn!("Failed to fetch actors for movie {}: {}", id, e);
            String::from(ACTORS_ERROR)
        }
    }
}

pub async fn fetch_similar(api: Arc<dyn TmdbApi>, id: MovieId) -> String {
    let titles = api
        .fetch_json(&Endpoint::Similar(id))
        .await
        .and_then(|json| extract_titles(&json));
    match titles {
        Ok(titles) => join_names(&titles),
        Err(e) => {
            warn!("Failed to fetch similar movies for {}: {}", id, e);
            String::from(SIMILAR_ERROR)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeTmdb;
    use super::*;
    use crate::media::NO_ACTORS;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> TmdbClient {
        TmdbClient::from_settings(&AppSettings {
            api_key: String::from("KEY"),
            ..AppSettings::default()
        })
    }

    #[test]
    fn popular_url() {
        assert_eq!(
            client().endpoint_url(&Endpoint::Popular),
            "https://api.themoviedb.org/3/movie/popular?api_key=KEY&language=es-ES&page=1"
        );
    }

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            client().endpoint_url(&Endpoint::Search(String::from("star wars & co"))),
            "https://api.themoviedb.org/3/search/movie?api_key=KEY&language=es-ES&query=star%20wars%20%26%20co"
        );
    }

    #[test]
    fn credits_url_has_no_language() {
        assert_eq!(
            client().endpoint_url(&Endpoint::Credits(42)),
            "https://api.themoviedb.org/3/movie/42/credits?api_key=KEY"
        );
    }

    #[test]
    fn similar_url() {
        assert_eq!(
            client().endpoint_url(&Endpoint::Similar(42)),
            "https://api.themoviedb.org/3/movie/42/similar?api_key=KEY&language=es-ES&page=1"
        );
    }

    #[test]
    fn image_url_appends_path_even_when_empty() {
        let client = client();
        assert_eq!(
            client.image_url("/p.jpg"),
            "https://image.tmdb.org/t/p/w500/p.jpg"
        );
        assert_eq!(client.image_url(""), "https://image.tmdb.org/t/p/w500");
    }

    #[test]
    fn custom_base_url_drops_trailing_slash() {
        let client = TmdbClient::from_settings(&AppSettings {
            api_key: String::from("K"),
            api_base_url: String::from("http://localhost:8080/3/"),
            ..AppSettings::default()
        });
        assert_eq!(
            client.endpoint_url(&Endpoint::Credits(1)),
            "http://localhost:8080/3/movie/1/credits?api_key=K"
        );
    }

    fn local_client(base_url: &str) -> TmdbClient {
        TmdbClient {
            http_client: Arc::new(reqwest::Client::builder().no_proxy().build().unwrap()),
            ..TmdbClient::from_settings(&AppSettings {
                api_key: String::from("SECRETKEY123"),
                api_base_url: base_url.to_string(),
                ..AppSettings::default()
            })
        }
    }

    /// Answers a single request with `status` and `body`, returning the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/3", addr)
    }

    #[tokio::test]
    async fn unauthorized_status_maps_to_unauthorized() {
        let base = serve_once("401 Unauthorized", "{}").await;
        let result = local_client(&base).fetch_json(&Endpoint::Popular).await;
        assert_eq!(result, Err(ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn too_many_requests_maps_to_rate_limit() {
        let base = serve_once("429 Too Many Requests", "{}").await;
        let result = local_client(&base).fetch_json(&Endpoint::Popular).await;
        assert_eq!(result, Err(ApiError::RateLimit));
    }

    #[tokio::test]
    async fn other_error_status_maps_to_network() {
        let base = serve_once("500 Internal Server Error", "{}").await;
        let result = local_client(&base).fetch_json(&Endpoint::Credits(3)).await;
        assert_eq!(
            result,
            Err(ApiError::Network(String::from("HTTP error: 500")))
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error_without_the_key() {
        let base = serve_once("200 OK", "<html>nope</html>").await;
        let result = local_client(&base).fetch_json(&Endpoint::Popular).await;
        match result {
            Err(ApiError::Parse(message)) => assert!(!message.contains("SECRETKEY123")),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn ok_json_body_is_returned() {
        let base = serve_once("200 OK", r#"{"results": []}"#).await;
        let json = local_client(&base)
            .fetch_json(&Endpoint::Popular)
            .await
            .unwrap();
        assert_eq!(json, json!({"results": []}));
    }

    #[tokio::test]
    async fn connection_errors_do_not_leak_the_api_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(&format!("http://{}/3", addr));
        let err = client.fetch_json(&Endpoint::Popular).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!err.to_string().contains("SECRETKEY123"), "{}", err);
    }

    #[tokio::test]
    async fn actors_are_joined_in_order() {
        let api = FakeTmdb::default().with_response(
            Endpoint::Credits(5),
            Ok(json!({"cast": [{"name": "Ana"}, {"name": "Luis"}]})),
        );
        assert_eq!(fetch_actors(Arc::new(api), 5).await, "Ana, Luis");
    }

    #[tokio::test]
    async fn empty_cast_shows_placeholder() {
        let api = FakeTmdb::default().with_response(Endpoint::Credits(5), Ok(json!({"cast": []})));
        assert_eq!(fetch_actors(Arc::new(api), 5).await, NO_ACTORS);
    }

    #[tokio::test]
    async fn actor_errors_degrade_to_message() {
        let api = FakeTmdb::default();
        assert_eq!(fetch_actors(Arc::new(api), 5).await, ACTORS_ERROR);
    }

    #[tokio::test]
    async fn malformed_similar_degrades_to_message() {
        let api = FakeTmdb::default().with_response(Endpoint::Similar(9), Ok(json!({"oops": 1})));
        assert_eq!(fetch_similar(Arc::new(api), 9).await, SIMILAR_ERROR);
    }

    #[tokio::test]
    async fn search_maps_results() {
        let api = FakeTmdb::default().with_response(
            Endpoint::Search(String::from("x")),
            Ok(json!({"results": [{"id": 1, "title": "X"}]})),
        );
        let movies = fetch_movies(Arc::new(api), GridRequest::Search(String::from("x")))
            .await
            .unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "X");
    }

    #[tokio::test]
    async fn list_errors_propagate() {
        let api = FakeTmdb::default().with_response(Endpoint::Popular, Err(ApiError::Unauthorized));
        let result = fetch_movies(Arc::new(api), GridRequest::Popular).await;
        assert_eq!(result, Err(ApiError::Unauthorized));
    }
}
