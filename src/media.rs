use iced::widget::image::Handle;
use iced::Color;

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_OVERVIEW: &str = "No Overview";
pub const DEFAULT_RELEASE_DATE: &str = "Release Date: N/A";
pub const NO_ACTORS: &str = "No Actors";
pub const NO_SIMILAR_MOVIES: &str = "No Similar Movies";
pub const ACTORS_ERROR: &str = "Error fetching actors";
pub const SIMILAR_ERROR: &str = "Error fetching similar movies";

pub type MovieId = i64;

/// A movie as listed by the popular/search/similar endpoints.
///
/// Every text field is already resolved to its display default, so views
/// never deal with missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub poster_path: String,
    pub overview: String,
    pub release_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterSize {
    pub width: u32,
    pub height: u32,
}

impl PosterSize {
    pub const THUMBNAIL: PosterSize = PosterSize {
        width: 150,
        height: 225,
    };
    pub const DETAIL: PosterSize = PosterSize {
        width: 400,
        height: 600,
    };
}

/// Decoded poster, resized to exactly `width`×`height`.
#[derive(Debug, Clone)]
pub struct Poster {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub slot: usize,
    pub movie: Movie,
    pub poster: Poster,
}

/// Identifies one grid load. Only the newest generation is ever displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Identifies one opening of the detail dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRequest {
    Popular,
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("problem parsing response: {0}")]
    Parse(String),
    #[error("problem loading image: {0}")]
    Image(String),
    #[error("rate limited by the API")]
    RateLimit,
    #[error("problem authenticating, check your api key")]
    Unauthorized,
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(crate::settings::SetupMessage),
    LoadPopular,
    SearchQueryChanged(String),
    SearchSubmit,
    MoviesLoaded(Generation, Result<Vec<Movie>, ApiError>),
    ThumbnailLoaded(Generation, usize, Movie, Result<Poster, ApiError>),
    OpenDetail(Movie),
    CloseDetail,
    DetailPosterLoaded(DetailId, Result<Poster, ApiError>),
    DetailActorsLoaded(DetailId, String),
    DetailSimilarLoaded(DetailId, String),
}
