use iced::Task;
use tracing::info;

use crate::media::{ApiError, DetailId, Message, Movie, Poster, PosterSize};
use crate::poster::load_poster;
use crate::tmdb::{fetch_actors, fetch_similar};
use crate::CineGrid;

pub fn handle_open_detail(app: &mut CineGrid, movie: Movie) -> Task<Message> {
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };

    info!("Opening detail for '{}' ({})", movie.title, movie.id);
    let movie_id = movie.id;
    let poster_path = movie.poster_path.clone();
    let id = app.detail.open(movie);

    let poster_task = Task::perform(
        load_poster(client.clone(), poster_path, PosterSize::DETAIL),
        move |result| Message::DetailPosterLoaded(id, result),
    );
    let actors_task = Task::perform(fetch_actors(client.clone(), movie_id), move |actors| {
        Message::DetailActorsLoaded(id, actors)
    });
    let similar_task = Task::perform(fetch_similar(client, movie_id), move |similar| {
        Message::DetailSimilarLoaded(id, similar)
    });

    Task::batch([poster_task, actors_task, similar_task])
}

pub fn handle_close_detail(app: &mut CineGrid) -> Task<Message> {
    app.detail.close();
    Task::none()
}

pub fn handle_detail_poster_loaded(
    app: &mut CineGrid,
    id: DetailId,
    result: Result<Poster, ApiError>,
) -> Task<Message> {
    app.detail.accept_poster(id, result);
    Task::none()
}

pub fn handle_detail_actors_loaded(app: &mut CineGrid, id: DetailId, actors: String) -> Task<Message> {
    app.detail.accept_actors(id, actors);
    Task::none()
}

pub fn handle_detail_similar_loaded(
    app: &mut CineGrid,
    id: DetailId,
    similar: String,
) -> Task<Message> {
    app.detail.accept_similar(id, similar);
    Task::none()
}
