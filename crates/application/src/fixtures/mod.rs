//! Literal inputs and expected outputs for the verification scenarios.
//!
//! Every provider is a pure function returning rows in a fixed order. The
//! values match the fixed datasets served by the blog and film APIs.

mod comments;
mod films;
mod posts;

pub use comments::{COMMENTS_POST_ID, comment_1, comment_idempotence_rows};
pub use films::{latest_release, tallest_in_latest, tallest_overall};
pub use posts::{
    PATCHED_TITLE, UPDATE_NOT_FOUND_FRAGMENT, creation_payload, post_1, post_9,
    post_creation_rows, post_idempotence_rows, post_lookup_rows, post_update_rows,
    update_payload,
};

/// One (input, expected output) tuple driving a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRow<P, E> {
    /// Short name used in failure messages.
    pub label: &'static str,
    /// Request input.
    pub params: P,
    /// Expected status code.
    pub status: u16,
    /// Expected output.
    pub expected: E,
}

impl<P, E> FixtureRow<P, E> {
    /// Creates a row.
    #[must_use]
    pub const fn new(label: &'static str, params: P, status: u16, expected: E) -> Self {
        Self {
            label,
            params,
            status,
            expected,
        }
    }
}
