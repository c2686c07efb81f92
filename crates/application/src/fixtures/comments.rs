//! Comment fixtures.

use restcheck_domain::Comment;

use super::FixtureRow;

/// Post whose comments the comment scenarios inspect.
pub const COMMENTS_POST_ID: u64 = 1;

/// Comment 1 of post 1 as served by the blog API.
#[must_use]
pub fn comment_1() -> Comment {
    Comment::complete(
        1,
        1,
        "id labore ex et quam laborum",
        "Eliseo@gardner.biz",
        "laudantium enim quasi est quidem magnam voluptate ipsam eos\ntempora quo necessitatibus\ndolor quam autem quasi\nreiciendis et nam sapiente accusantium",
    )
}

/// Comments fetched repeatedly by the idempotence check; `params` is
/// `(post id, comment id)`.
#[must_use]
pub fn comment_idempotence_rows() -> Vec<FixtureRow<(u64, u64), Comment>> {
    vec![FixtureRow::new("comment 1 of post 1", (1, 1), 200, comment_1())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comment_row_matches_post() {
        let rows = comment_idempotence_rows();
        assert_eq!(rows[0].params.0, COMMENTS_POST_ID);
        assert_eq!(rows[0].expected.post_id, Some(COMMENTS_POST_ID));
        assert_eq!(rows[0].expected.email.as_deref(), Some("Eliseo@gardner.biz"));
    }
}
