use serde_json::Value;
use tracing::warn;

use crate::media::{
    ApiError, Movie, DEFAULT_OVERVIEW, DEFAULT_RELEASE_DATE, DEFAULT_TITLE, NO_ACTORS,
    NO_SIMILAR_MOVIES,
};

/// Reads `key` as display text, falling back to `default` when the field is
/// absent, null, or not a scalar.
fn string_or_default(json: &Value, key: &str, default: &str) -> String {
    match json.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

fn results_array<'a>(json: &'a Value, key: &str) -> Result<&'a Vec<Value>, ApiError> {
    json.get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ApiError::Parse(format!("missing `{}` array", key)))
}

pub fn to_movie(json: &Value) -> Movie {
    Movie {
        id: json.get("id").and_then(|v| v.as_i64()).unwrap_or(0),
        title: string_or_default(json, "title", DEFAULT_TITLE),
        poster_path: string_or_default(json, "poster_path", ""),
        overview: string_or_default(json, "overview", DEFAULT_OVERVIEW),
        release_date: string_or_default(json, "release_date", DEFAULT_RELEASE_DATE),
    }
}

pub fn movies_from_response(json: &Value) -> Result<Vec<Movie>, ApiError> {
    let results = results_array(json, "results")?;
    Ok(results
        .iter()
        .filter(|entry| {
            let has_id = entry.get("id").and_then(|v| v.as_i64()).is_some();
            if !has_id {
                warn!("Skipping result without a usable id: {}", entry);
            }
            has_id
        })
        .map(to_movie)
        .collect())
}

pub fn extract_cast_names(credits: &Value) -> Result<Vec<String>, ApiError> {
    let names: Vec<String> = results_array(credits, "cast")?
        .iter()
        .filter_map(|member| member.get("name")?.as_str().map(String::from))
        .collect();
    Ok(or_placeholder(names, NO_ACTORS))
}

pub fn extract_titles(similar: &Value) -> Result<Vec<String>, ApiError> {
    let titles: Vec<String> = results_array(similar, "results")?
        .iter()
        .map(|movie| string_or_default(movie, "title", DEFAULT_TITLE))
        .collect();
    Ok(or_placeholder(titles, NO_SIMILAR_MOVIES))
}

fn or_placeholder(values: Vec<String>, placeholder: &str) -> Vec<String> {
    if values.is_empty() {
        vec![placeholder.to_string()]
    } else {
        values
    }
}

pub fn join_names(names: &[String]) -> String {
    names.join(", ")
}
