use iced::Task;
use tracing::debug;

use crate::detail_handlers;
use crate::media::{ApiError, Generation, GridRequest, Movie, Message, PosterSize};
use crate::poster::load_poster;
use crate::tmdb::fetch_movies;
use crate::CineGrid;

pub fn handle_message(app: &mut CineGrid, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::LoadPopular => handle_load_popular(app),
        Message::SearchQueryChanged(query) => {
            app.search_query = query;
            Task::none()
        }
        Message::SearchSubmit => handle_search_submit(app),
        Message::MoviesLoaded(generation, result) => {
            handle_movies_loaded(app, generation, result)
        }
        Message::ThumbnailLoaded(generation, slot, movie, result) => {
            app.grid.accept_thumbnail(generation, slot, movie, result);
            Task::none()
        }
        Message::OpenDetail(movie) => detail_handlers::handle_open_detail(app, movie),
        Message::CloseDetail => detail_handlers::handle_close_detail(app),
        Message::DetailPosterLoaded(id, result) => {
            detail_handlers::handle_detail_poster_loaded(app, id, result)
        }
        Message::DetailActorsLoaded(id, actors) => {
            detail_handlers::handle_detail_actors_loaded(app, id, actors)
        }
        Message::DetailSimilarLoaded(id, similar) => {
            detail_handlers::handle_detail_similar_loaded(app, id, similar)
        }
    }
}

fn handle_load_popular(app: &mut CineGrid) -> Task<Message> {
    if app.tmdb_client.is_none() {
        return Task::none();
    }
    let (generation, request) = app.grid.load_popular();
    fetch_grid(app, generation, request)
}

fn handle_search_submit(app: &mut CineGrid) -> Task<Message> {
    if app.tmdb_client.is_none() {
        return Task::none();
    }
    let Some((generation, request)) = app.grid.search(&app.search_query) else {
        debug!("Ignoring blank search");
        return Task::none();
    };
    fetch_grid(app, generation, request)
}

fn fetch_grid(app: &CineGrid, generation: Generation, request: GridRequest) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    Task::perform(fetch_movies(client.clone(), request), move |result| {
        Message::MoviesLoaded(generation, result)
    })
}

fn handle_movies_loaded(
    app: &mut CineGrid,
    generation: Generation,
    result: Result<Vec<Movie>, ApiError>,
) -> Task<Message> {
    let Some(movies) = app.grid.accept_movies(generation, result) else {
        return Task::none();
    };
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };

    let tasks = movies.into_iter().enumerate().map(|(slot, movie)| {
        let poster = load_poster(
            client.clone(),
            movie.poster_path.clone(),
            PosterSize::THUMBNAIL,
        );
        Task::perform(poster, move |result| {
            Message::ThumbnailLoaded(generation, slot, movie, result)
        })
    });

    Task::batch(tasks)
}
