use tracing::{debug, warn};

use crate::media::{ApiError, DetailId, Movie, Poster};

pub const PENDING_TEXT: &str = "Loading…";

/// State of the open detail dialog. Text regions stay `None` until their
/// fetch settles.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub id: DetailId,
    pub movie: Movie,
    pub poster: Option<Poster>,
    pub actors: Option<String>,
    pub similar: Option<String>,
}

impl DetailView {
    pub fn new(id: DetailId, movie: Movie) -> Self {
        Self {
            id,
            movie,
            poster: None,
            actors: None,
            similar: None,
        }
    }

    pub fn summary_text(&self) -> String {
        format!(
            "Title: {}\n\nOverview: {}\n\nRelease Date: {}",
            self.movie.title, self.movie.overview, self.movie.release_date
        )
    }

    pub fn actors_text(&self) -> String {
        format!("Actors: {}", self.actors.as_deref().unwrap_or(PENDING_TEXT))
    }

    pub fn similar_text(&self) -> String {
        format!(
            "Similar Movies: {}",
            self.similar.as_deref().unwrap_or(PENDING_TEXT)
        )
    }
}

/// Holds at most one open dialog and hands out a fresh [`DetailId`] per
/// opening, so late results for a closed dialog are dropped.
#[derive(Debug, Clone, Default)]
pub struct DetailController {
    last_id: DetailId,
    open: Option<DetailView>,
}

impl DetailController {
    pub fn view(&self) -> Option<&DetailView> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open(&mut self, movie: Movie) -> DetailId {
        self.last_id = DetailId(self.last_id.0 + 1);
        self.open = Some(DetailView::new(self.last_id, movie));
        self.last_id
    }

    pub fn close(&mut self) {
        if let Some(view) = self.open.take() {
            debug!("Closed detail for '{}'", view.movie.title);
        }
    }

    fn current_mut(&mut self, id: DetailId) -> Option<&mut DetailView> {
        let view = self.open.as_mut().filter(|view| view.id == id);
        if view.is_none() {
            debug!("Discarding detail result for closed dialog {}", id.0);
        }
        view
    }

    pub fn accept_poster(&mut self, id: DetailId, result: Result<Poster, ApiError>) {
        let Some(view) = self.current_mut(id) else {
            return;
        };
        match result {
            Ok(poster) => view.poster = Some(poster),
            Err(e) => warn!("Error loading detail poster for '{}': {}", view.movie.title, e),
        }
    }

    pub fn accept_actors(&mut self, id: DetailId, actors: String) {
        if let Some(view) = self.current_mut(id) {
            view.actors = Some(actors);
        }
    }

    pub fn accept_similar(&mut self, id: DetailId, similar: String) {
        if let Some(view) = self.current_mut(id) {
            view.similar = Some(similar);
        }
    }
}
