//! Post fixtures.

use restcheck_domain::Post;

use super::FixtureRow;

/// Title sent by the partial update.
pub const PATCHED_TITLE: &str = "updated title";

/// Error text returned when updating a post that does not exist.
pub const UPDATE_NOT_FOUND_FRAGMENT: &str =
    "TypeError: Cannot read properties of undefined (reading 'id')";

/// Post 1 as served by the blog API.
#[must_use]
pub fn post_1() -> Post {
    Post::complete(
        1,
        1,
        "sunt aut facere repellat provident occaecati excepturi optio reprehenderit",
        "quia et suscipit\nsuscipit recusandae consequuntur expedita et cum\nreprehenderit molestiae ut ut quas totam\nnostrum rerum est autem sunt rem eveniet architecto",
    )
}

/// Post 9 as served by the blog API.
#[must_use]
pub fn post_9() -> Post {
    Post::complete(
        1,
        9,
        "nesciunt iure omnis dolorem tempora et accusantium",
        "consectetur animi nesciunt iure dolore\nenim quia ad\nveniam autem ut quam aut nobis\net est aut quod aut provident voluptas autem voluptas",
    )
}

/// Single post lookups: an existing post and a missing one.
#[must_use]
pub fn post_lookup_rows() -> Vec<FixtureRow<u64, Post>> {
    vec![
        FixtureRow::new("existing post", 9, 200, post_9()),
        FixtureRow::new("missing post", 999, 404, Post::absent()),
    ]
}

/// Posts fetched repeatedly by the idempotence check.
#[must_use]
pub fn post_idempotence_rows() -> Vec<FixtureRow<u64, Post>> {
    vec![FixtureRow::new("post 1", 1, 200, post_1())]
}

/// Payload sent by the creation rows.
#[must_use]
pub fn creation_payload() -> Post {
    Post::complete(20, 121, "Post id 101", "Text for body")
}

/// Creation attempts: `params` is appended to the posts path, `expected` is
/// the whitespace-free response body.
#[must_use]
pub fn post_creation_rows() -> Vec<FixtureRow<&'static str, &'static str>> {
    vec![
        FixtureRow::new("create in collection", "", 201, r#"{"id":101}"#),
        FixtureRow::new("create on existing post", "/1", 404, "{}"),
    ]
}

/// Payload sent by the update rows.
#[must_use]
pub fn update_payload() -> Post {
    Post::complete(1, 1, "Put id 1", "Text for body")
}

/// Full updates: `expected` is a fragment of the response body.
#[must_use]
pub fn post_update_rows() -> Vec<FixtureRow<u64, &'static str>> {
    vec![
        FixtureRow::new("update existing post", 1, 200, r#""id": 1"#),
        FixtureRow::new("update missing post", 999, 500, UPDATE_NOT_FOUND_FRAGMENT),
    ]
}
