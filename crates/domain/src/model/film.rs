//! Film and character resources of the film API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A film entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Film title.
    pub title: String,
    /// Episode number within the saga.
    #[serde(default)]
    pub episode_id: u32,
    /// Theatrical release date (`YYYY-MM-DD`).
    pub release_date: NaiveDate,
    /// Absolute URLs of the characters appearing in the film.
    #[serde(default)]
    pub characters: Vec<String>,
    /// Self URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// A character (person) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Character name.
    pub name: String,
    /// Height in centimetres, or a marker such as `"unknown"`.
    pub height: String,
    /// Mass in kilograms, or a marker such as `"unknown"`.
    #[serde(default)]
    pub mass: Option<String>,
    /// Gender as reported by the service.
    #[serde(default)]
    pub gender: Option<String>,
    /// Self URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of entries across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Entries on this page.
    pub results: Vec<T>,
}

/// Title and release date of a film, as compared by the film scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmSummary {
    /// Film title.
    pub title: String,
    /// Release date.
    pub release_date: NaiveDate,
}

impl From<&Film> for FilmSummary {
    fn from(film: &Film) -> Self {
        Self {
            title: film.title.clone(),
            release_date: film.release_date,
        }
    }
}

/// Name and height of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterHeight {
    /// Character name.
    pub name: String,
    /// Height in centimetres.
    pub height: u32,
}

impl std::fmt::Display for CharacterHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} cm)", self.name, self.height)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_film_page() {
        let json = r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "title": "A New Hope",
                "episode_id": 4,
                "opening_crawl": "It is a period of civil war.",
                "release_date": "1977-05-25",
                "characters": ["https://swapi.dev/api/people/1/"]
            }]
        }"#;
        let page: Page<Film> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1);
        let film = &page.results[0];
        assert_eq!(film.release_date, NaiveDate::from_ymd_opt(1977, 5, 25).unwrap());
        assert_eq!(film.characters.len(), 1);
    }

    #[test]
    fn test_bad_release_date_is_rejected() {
        let json = r#"{"title": "x", "release_date": "25/05/1977"}"#;
        assert!(serde_json::from_str::<Film>(json).is_err());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = FilmSummary {
            title: "Revenge of the Sith".to_string(),
            release_date: NaiveDate::from_ymd_opt(2005, 5, 19).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"title":"Revenge of the Sith","releaseDate":"2005-05-19"}"#
        );
    }
}
