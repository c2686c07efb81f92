//! Film fixtures.

use chrono::NaiveDate;
use restcheck_domain::{CharacterHeight, FilmSummary};

/// Most recently released film.
#[must_use]
pub fn latest_release() -> FilmSummary {
    FilmSummary {
        title: "Revenge of the Sith".to_string(),
        release_date: NaiveDate::from_ymd_opt(2005, 5, 19).unwrap_or_default(),
    }
}

/// Tallest character appearing in the most recent film.
#[must_use]
pub fn tallest_in_latest() -> CharacterHeight {
    CharacterHeight {
        name: "Tarfful".to_string(),
        height: 234,
    }
}

/// Tallest character across every film.
#[must_use]
pub fn tallest_overall() -> CharacterHeight {
    CharacterHeight {
        name: "Yarael Poof".to_string(),
        height: 264,
    }
}
