use tracing::{debug, info, warn};

use crate::media::{ApiError, Generation, GridRequest, LoadingState, Movie, Poster, Thumbnail};

/// The set of thumbnails produced by one load. Replaced wholesale whenever a
/// new load starts.
#[derive(Debug, Clone)]
pub struct ResultGeneration {
    pub id: Generation,
    pub request: Option<GridRequest>,
    pub state: LoadingState,
    pub thumbnails: Vec<Thumbnail>,
    pending_posters: usize,
}

impl ResultGeneration {
    fn new(id: Generation, request: Option<GridRequest>) -> Self {
        let state = if request.is_some() {
            LoadingState::Loading
        } else {
            LoadingState::Idle
        };
        Self {
            id,
            request,
            state,
            thumbnails: Vec::new(),
            pending_posters: 0,
        }
    }

    fn insert(&mut self, thumbnail: Thumbnail) {
        let at = self
            .thumbnails
            .partition_point(|existing| existing.slot < thumbnail.slot);
        self.thumbnails.insert(at, thumbnail);
    }

    fn poster_settled(&mut self) {
        self.pending_posters = self.pending_posters.saturating_sub(1);
        if self.pending_posters == 0 {
            self.state = LoadingState::Idle;
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridController {
    current: ResultGeneration,
}

impl Default for GridController {
    fn default() -> Self {
        Self {
            current: ResultGeneration::new(Generation::default(), None),
        }
    }
}

impl GridController {
    pub fn current(&self) -> &ResultGeneration {
        &self.current
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.current.thumbnails
    }

    pub fn is_loading(&self) -> bool {
        self.current.state == LoadingState::Loading
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.id == generation
    }

    pub fn load_popular(&mut self) -> (Generation, GridRequest) {
        self.begin(GridRequest::Popular)
    }

    /// Starts a search for `term`, or returns `None` for a blank term, in which
    /// case nothing changes.
    pub fn search(&mut self, term: &str) -> Option<(Generation, GridRequest)> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(self.begin(GridRequest::Search(term.to_string())))
    }

    fn begin(&mut self, request: GridRequest) -> (Generation, GridRequest) {
        let id = self.current.id.next();
        info!("Starting load {:?} as generation {}", request, id.0);
        self.current = ResultGeneration::new(id, Some(request.clone()));
        (id, request)
    }

    /// Records the movie list for `generation`. Returns the movies whose posters
    /// should now be loaded, or `None` when the result is stale or failed.
    pub fn accept_movies(
        &mut self,
        generation: Generation,
        result: Result<Vec<Movie>, ApiError>,
    ) -> Option<Vec<Movie>> {
        if !self.is_current(generation) {
            debug!("Discarding movie list from stale generation {}", generation.0);
            return None;
        }
        match result {
            Ok(movies) => {
                info!("Generation {} returned {} movies", generation.0, movies.len());
                self.current.pending_posters = movies.len();
                if movies.is_empty() {
                    self.current.state = LoadingState::Idle;
                }
                Some(movies)
            }
            Err(e) => {
                warn!("Failed to load movies for {:?}: {}", self.current.request, e);
                self.current.state = LoadingState::Idle;
                None
            }
        }
    }

    /// Adds a thumbnail to the current generation. Failed posters are skipped.
    pub fn accept_thumbnail(
        &mut self,
        generation: Generation,
        slot: usize,
        movie: Movie,
        result: Result<Poster, ApiError>,
    ) -> bool {
        if !self.is_current(generation) {
            debug!("Discarding poster for '{}' from stale generation", movie.title);
            return false;
        }
        self.current.poster_settled();
        match result {
            Ok(poster) => {
                self.current.insert(Thumbnail {
                    slot,
                    movie,
                    poster,
                });
                true
            }
            Err(e) => {
                warn!("Error loading poster for movie '{}': {}", movie.title, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::media::PosterSize;
    use crate::poster::{decode_and_resize, load_poster};
    use crate::tmdb::fake::{png_bytes, FakeTmdb};
    use crate::tmdb::{fetch_movies, Endpoint, TmdbApi};

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: format!("/{}.jpg", id),
            overview: String::from("O"),
            release_date: String::from("2020-01-01"),
        }
    }

    fn poster() -> Poster {
        decode_and_resize(&png_bytes(4, 6), PosterSize::THUMBNAIL).unwrap()
    }

    /// Drives one generation through the real fetch/poster pipeline.
    async fn run_load(
        grid: &mut GridController,
        api: Arc<dyn TmdbApi>,
        generation: Generation,
        request: GridRequest,
    ) {
        let result = fetch_movies(api.clone(), request).await;
        let Some(movies) = grid.accept_movies(generation, result) else {
            return;
        };
        for (slot, movie) in movies.into_iter().enumerate() {
            let poster =
                load_poster(api.clone(), movie.poster_path.clone(), PosterSize::THUMBNAIL).await;
            grid.accept_thumbnail(generation, slot, movie, poster);
        }
    }

    #[test]
    fn blank_search_is_a_noop() {
        let mut grid = GridController::default();
        let (generation, _) = grid.load_popular();
        grid.accept_movies(generation, Ok(vec![movie(1, "A")]));
        grid.accept_thumbnail(generation, 0, movie(1, "A"), Ok(poster()));

        assert!(grid.search("").is_none());
        assert!(grid.search("   \t").is_none());
        assert!(grid.is_current(generation));
        assert_eq!(grid.thumbnails().len(), 1);
    }

    #[tokio::test]
    async fn blank_search_makes_no_requests() {
        let fake = Arc::new(FakeTmdb::default());
        let mut grid = GridController::default();
        if let Some((generation, request)) = grid.search("  ") {
            run_load(&mut grid, fake.clone(), generation, request).await;
        }
        assert_eq!(fake.call_count(), 0);
        assert!(grid.thumbnails().is_empty());
    }

    #[test]
    fn search_trims_and_clears_grid() {
        let mut grid = GridController::default();
        let (first, _) = grid.load_popular();
        grid.accept_movies(first, Ok(vec![movie(1, "A")]));
        grid.accept_thumbnail(first, 0, movie(1, "A"), Ok(poster()));

        let (second, request) = grid.search("  dune ").unwrap();
        assert_eq!(request, GridRequest::Search(String::from("dune")));
        assert!(second > first);
        assert!(grid.thumbnails().is_empty());
        assert!(grid.is_loading());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut grid = GridController::default();
        let (a, _) = grid.search("a").unwrap();
        let (b, _) = grid.search("b").unwrap();

        assert!(grid.accept_movies(a, Ok(vec![movie(1, "from a")])).is_none());
        assert!(!grid.accept_thumbnail(a, 0, movie(1, "from a"), Ok(poster())));

        let movies = grid.accept_movies(b, Ok(vec![movie(2, "from b")])).unwrap();
        for (slot, m) in movies.into_iter().enumerate() {
            grid.accept_thumbnail(b, slot, m, Ok(poster()));
        }
        // a late poster from "a" must not leak in after "b" settled
        grid.accept_thumbnail(a, 1, movie(3, "late a"), Ok(poster()));

        let titles: Vec<_> = grid.thumbnails().iter().map(|t| t.movie.title.as_str()).collect();
        assert_eq!(titles, vec!["from b"]);
        assert!(!grid.is_loading());
    }

    #[test]
    fn thumbnails_keep_result_order() {
        let mut grid = GridController::default();
        let (g, _) = grid.load_popular();
        grid.accept_movies(g, Ok(vec![movie(1, "A"), movie(2, "B"), movie(3, "C")]));
        grid.accept_thumbnail(g, 2, movie(3, "C"), Ok(poster()));
        grid.accept_thumbnail(g, 0, movie(1, "A"), Ok(poster()));
        grid.accept_thumbnail(g, 1, movie(2, "B"), Ok(poster()));

        let ids: Vec<_> = grid.thumbnails().iter().map(|t| t.movie.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn list_error_leaves_grid_empty_and_idle() {
        let mut grid = GridController::default();
        let (g, _) = grid.load_popular();
        assert!(grid
            .accept_movies(g, Err(ApiError::Network(String::from("down"))))
            .is_none());
        assert!(grid.thumbnails().is_empty());
        assert!(!grid.is_loading());
    }

    #[tokio::test]
    async fn one_broken_poster_out_of_ten_leaves_nine() {
        let results: Vec<_> = (1..=10)
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("M{}", id),
                    "poster_path": format!("/{}.jpg", id)
                })
            })
            .collect();
        let mut fake = FakeTmdb::default()
            .with_response(Endpoint::Popular, Ok(json!({ "results": results })));
        fake.broken_posters.insert(String::from("/4.jpg"));

        let mut grid = GridController::default();
        let (generation, request) = grid.load_popular();
        run_load(&mut grid, Arc::new(fake), generation, request).await;

        assert_eq!(grid.thumbnails().len(), 9);
        assert!(grid.thumbnails().iter().all(|t| t.movie.id != 4));
        assert!(!grid.is_loading());
    }

    #[tokio::test]
    async fn second_search_wins_over_first() {
        let fake: Arc<dyn TmdbApi> = Arc::new(
            FakeTmdb::default()
                .with_response(
                    Endpoint::Search(String::from("a")),
                    Ok(json!({"results": [{"id": 1, "title": "A1", "poster_path": "/a.jpg"}]})),
                )
                .with_response(
                    Endpoint::Search(String::from("b")),
                    Ok(json!({"results": [{"id": 2, "title": "B1", "poster_path": "/b.jpg"}]})),
                ),
        );

        let mut grid = GridController::default();
        let (first, first_request) = grid.search("a").unwrap();
        let (second, second_request) = grid.search("b").unwrap();

        // "b" completes first, then the slow "a" response arrives
        run_load(&mut grid, fake.clone(), second, second_request).await;
        run_load(&mut grid, fake, first, first_request).await;

        let titles: Vec<_> = grid.thumbnails().iter().map(|t| t.movie.title.clone()).collect();
        assert_eq!(titles, vec![String::from("B1")]);
    }
}
