use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt::Display;

/// Backend movie identifier
pub type MovieId = u64;

/// A movie id as it appears in loosely-typed payloads: either a JSON number or
/// a numeric string. Comparisons go through [`MovieKey::as_number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieKey {
    Number(Number),
    Text(String),
}

impl MovieKey {
    /// Numeric value of the key, coerced the way a browser's `Number()` would:
    /// surrounding whitespace is ignored, an empty string is zero, and anything
    /// non-numeric yields `None` (and therefore never matches).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MovieKey::Number(n) => n.as_f64(),
            MovieKey::Text(s) => coerce_numeric(s),
        }
    }
}

fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    // Rust accepts "inf"/"nan" spellings that a browser does not
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Display for MovieKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieKey::Number(n) => write!(f, "{}", n),
            MovieKey::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for MovieKey {
    fn from(id: u64) -> Self {
        MovieKey::Number(Number::from(id))
    }
}

impl From<i64> for MovieKey {
    fn from(id: i64) -> Self {
        MovieKey::Number(Number::from(id))
    }
}

impl From<i32> for MovieKey {
    fn from(id: i32) -> Self {
        MovieKey::Number(Number::from(id))
    }
}

impl From<&str> for MovieKey {
    fn from(id: &str) -> Self {
        MovieKey::Text(id.to_string())
    }
}

impl From<String> for MovieKey {
    fn from(id: String) -> Self {
        MovieKey::Text(id)
    }
}

/// Anything that may carry a backdrop image path
pub trait Backdrop {
    fn backdrop_path(&self) -> Option<&str>;
}

/// A movie as returned in listings
///
/// The schema belongs to the backend; only `id` and `backdrop_path` are
/// projected, everything else is kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieKey,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieRecord {
    pub fn new(id: impl Into<MovieKey>) -> Self {
        Self {
            id: id.into(),
            backdrop_path: None,
            extra: Map::new(),
        }
    }

    pub fn with_backdrop(mut self, path: impl Into<String>) -> Self {
        self.backdrop_path = Some(path.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }

    pub fn released_on(&self) -> Option<NaiveDate> {
        self.extra
            .get("release_date")
            .and_then(Value::as_str)
            .and_then(parse_release_date)
    }
}

impl Backdrop for MovieRecord {
    fn backdrop_path(&self) -> Option<&str> {
        self.backdrop_path.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Full movie details from GET /api/movie/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
}

impl MovieDetails {
    pub fn released_on(&self) -> Option<NaiveDate> {
        self.release_date.as_deref().and_then(parse_release_date)
    }
}

impl Backdrop for MovieDetails {
    fn backdrop_path(&self) -> Option<&str> {
        self.backdrop_path.as_deref()
    }
}

// TMDB sends "" for unreleased titles
fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// One credited cast member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Average score chart for a set of movies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageScores {
    /// Rendered chart URL
    pub chart: String,
    pub movies: Vec<MovieDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_from_number_and_string() {
        assert_eq!(MovieKey::from(7u64).as_number(), Some(7.0));
        assert_eq!(MovieKey::from("3").as_number(), Some(3.0));
        assert_eq!(MovieKey::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(MovieKey::from("").as_number(), Some(0.0));
    }

    #[test]
    fn test_key_non_numeric_strings() {
        assert_eq!(MovieKey::from("abc").as_number(), None);
        assert_eq!(MovieKey::from("inf").as_number(), None);
        assert_eq!(MovieKey::from("NaN").as_number(), None);
        assert_eq!(MovieKey::from("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let record: MovieRecord = serde_json::from_value(json!({
            "id": "550",
            "backdrop_path": "/fight.jpg",
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "vote_average": 8.4
        }))
        .unwrap();

        assert_eq!(record.id, MovieKey::Text("550".to_string()));
        assert_eq!(record.backdrop_path(), Some("/fight.jpg"));
        assert_eq!(record.title(), Some("Fight Club"));
        assert_eq!(record.released_on(), NaiveDate::from_ymd_opt(1999, 10, 15));
        assert_eq!(record.extra["vote_average"], json!(8.4));
    }

    #[test]
    fn test_record_without_backdrop() {
        let record: MovieRecord = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(record.backdrop_path(), None);
        assert_eq!(record.released_on(), None);
    }

    #[test]
    fn test_details_with_empty_release_date() {
        let details: MovieDetails = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "genres": [{ "id": 28, "name": "Action" }],
            "runtime": 136,
            "release_date": ""
        }))
        .unwrap();

        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.released_on(), None);
    }
}
