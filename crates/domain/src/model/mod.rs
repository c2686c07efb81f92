//! Resources exposed by the services under test.

mod comment;
mod film;
mod post;

pub use comment::Comment;
pub use film::{CharacterHeight, Film, FilmSummary, Page, Person};
pub use post::Post;
