//! Comment resource.

use serde::{Deserialize, Serialize};

/// A comment attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Id of the parent post.
    pub post_id: Option<u64>,
    /// Comment id.
    pub id: Option<u64>,
    /// Comment subject.
    pub name: Option<String>,
    /// Author email.
    pub email: Option<String>,
    /// Comment text.
    pub body: Option<String>,
}

impl Comment {
    /// Creates a comment with every field set.
    #[must_use]
    pub fn complete(post_id: u64, id: u64, name: &str, email: &str, body: &str) -> Self {
        Self {
            post_id: Some(post_id),
            id: Some(id),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            body: Some(body.to_string()),
        }
    }

    /// The all-unset comment that stands for "resource not found".
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            post_id: None,
            id: None,
            name: None,
            email: None,
            body: None,
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.post_id.is_none()
            && self.id.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.body.is_none()
    }
}
