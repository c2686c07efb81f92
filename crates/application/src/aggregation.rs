//! Client-side aggregation over film API data.

use std::collections::HashSet;

use restcheck_domain::{CharacterHeight, Film, Person};

/// Returns the element with the greatest key. Ties keep the earliest element.
pub fn max_by_key_first<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Option<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    items.into_iter().fold(None, |best, item| match best {
        Some((best_key, best_item)) => {
            let item_key = key(&item);
            if item_key > best_key {
                Some((item_key, item))
            } else {
                Some((best_key, best_item))
            }
        }
        None => {
            let item_key = key(&item);
            Some((item_key, item))
        }
    })
    .map(|(_, item)| item)
}

/// The film with the latest release date.
#[must_use]
pub fn latest_release(films: &[Film]) -> Option<&Film> {
    max_by_key_first(films, |film| film.release_date)
}

/// Character URLs of `films`, in order of first appearance, without duplicates.
#[must_use]
pub fn character_urls<'a>(films: impl IntoIterator<Item = &'a Film>) -> Vec<String> {
    let mut seen = HashSet::new();
    films
        .into_iter()
        .flat_map(|film| film.characters.iter())
        .filter(|url| seen.insert(*url))
        .cloned()
        .collect()
}

/// Height in centimetres, if the service reported a number of at least two digits.
///
/// Values such as `"unknown"` or `"n/a"` are skipped.
#[must_use]
pub fn height_cm(person: &Person) -> Option<u32> {
    let height = person.height.as_str();
    if height.len() >= 2 && height.bytes().all(|b| b.is_ascii_digit()) {
        height.parse().ok()
    } else {
        None
    }
}

/// The tallest person with a known height. Ties keep the earliest person.
#[must_use]
pub fn tallest<'a>(people: impl IntoIterator<Item = &'a Person>) -> Option<CharacterHeight> {
    let measured = people
        .into_iter()
        .filter_map(|person| height_cm(person).map(|height| (person, height)));
    max_by_key_first(measured, |(_, height)| *height).map(|(person, height)| CharacterHeight {
        name: person.name.clone(),
        height,
    })
}
