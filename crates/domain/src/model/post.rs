//! Blog post resource.

use serde::{Deserialize, Serialize};

/// A blog post as served by the posts endpoint.
///
/// Every field is optional: the service answers a lookup for an unknown id
/// with `{}`, which decodes to a post with all fields unset. Such a post is
/// the canonical "not found" value (see [`Post::absent`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Author id.
    pub user_id: Option<u64>,
    /// Post id.
    pub id: Option<u64>,
    /// Title line.
    pub title: Option<String>,
    /// Body text.
    pub body: Option<String>,
}

impl Post {
    /// Creates a post from optional field values.
    #[must_use]
    pub fn new(
        user_id: Option<u64>,
        id: Option<u64>,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Self {
        Self {
            user_id,
            id,
            title: title.map(str::to_string),
            body: body.map(str::to_string),
        }
    }

    /// Creates a post with every field set.
    #[must_use]
    pub fn complete(user_id: u64, id: u64, title: &str, body: &str) -> Self {
        Self::new(Some(user_id), Some(id), Some(title), Some(body))
    }

    /// The all-unset post that stands for "resource not found".
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            user_id: None,
            id: None,
            title: None,
            body: None,
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.user_id.is_none() && self.id.is_none() && self.title.is_none() && self.body.is_none()
    }
}
