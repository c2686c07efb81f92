//! Scenarios against the comments of the blog API.

use restcheck_application::fixtures::{COMMENTS_POST_ID, comment_idempotence_rows};
use restcheck_application::{ApplicationResult, AssertionFailure, RestClient, ensure, ensure_eq};
use restcheck_domain::{Assertion, Comment, ScenarioGroup};

use super::{NO_CACHE, ScenarioDef, blog_header_assertions, check, scenario};
use crate::context::SuiteContext;

const COMMENTS_SCHEMA: &str = "comments-schema.json";

pub(super) fn scenarios() -> Vec<ScenarioDef> {
    let group = ScenarioGroup::Comments;
    vec![
        scenario!(group, comments_schema, "comments_schema"),
        scenario!(group, comments_response_time, "comments_response_time"),
        scenario!(group, comments_post_id, "comments_post_id"),
        scenario!(group, comments_equivalent_paths, "comments_equivalent_paths"),
        scenario!(group, comments_sequential_ids, "comments_sequential_ids"),
        scenario!(group, comment_idempotence, "comment_idempotence"),
        scenario!(group, comments_headers, "comments_headers"),
    ]
}

/// Fetches the comments of `post_id` through the nested path.
async fn post_comments(ctx: &SuiteContext, post_id: u64) -> ApplicationResult<Vec<Comment>> {
    let response = ctx
        .blog
        .get(&ctx.settings.post_comments_path(), &[&post_id])
        .await?;
    check(ctx, &response, &[Assertion::status(200)])?;
    RestClient::extract(&response)
}

/// Fetches the comments of `post_id` through the `postId` query filter.
async fn filtered_comments(ctx: &SuiteContext, post_id: u64) -> ApplicationResult<Vec<Comment>> {
    let response = ctx
        .blog
        .build_request()
        .query("postId", post_id)
        .get(&ctx.settings.comments_path, &[])
        .await?;
    check(ctx, &response, &[Assertion::status(200)])?;
    RestClient::extract(&response)
}

async fn comments_schema(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx
        .blog
        .get(&ctx.settings.post_comments_path(), &[&COMMENTS_POST_ID])
        .await?;
    check(
        ctx,
        &response,
        &[Assertion::status(200), Assertion::schema(COMMENTS_SCHEMA)],
    )
}

async fn comments_response_time(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx
        .blog
        .build_request()
        .header("Cache-Control", NO_CACHE)
        .get(&ctx.settings.post_comments_path(), &[&COMMENTS_POST_ID])
        .await?;
    check(
        ctx,
        &response,
        &[
            Assertion::status(200),
            Assertion::faster_than(ctx.settings.response_time_limit_ms),
        ],
    )
}

async fn comments_post_id(ctx: &SuiteContext) -> ApplicationResult<()> {
    let comments = post_comments(ctx, COMMENTS_POST_ID).await?;
    ensure(!comments.is_empty(), format!("post {COMMENTS_POST_ID} has comments"))?;

    for comment in &comments {
        ensure_eq(
            format!("postId of comment {:?}", comment.id),
            &Some(COMMENTS_POST_ID),
            &comment.post_id,
        )?;
    }
    Ok(())
}

async fn comments_equivalent_paths(ctx: &SuiteContext) -> ApplicationResult<()> {
    let nested = post_comments(ctx, COMMENTS_POST_ID).await?;
    let filtered = filtered_comments(ctx, COMMENTS_POST_ID).await?;

    ensure(!nested.is_empty(), format!("post {COMMENTS_POST_ID} has comments"))?;
    ensure_eq("comments by nested path and by query", &nested, &filtered)
}

async fn comments_sequential_ids(ctx: &SuiteContext) -> ApplicationResult<()> {
    let comments = filtered_comments(ctx, COMMENTS_POST_ID).await?;
    ensure(!comments.is_empty(), format!("post {COMMENTS_POST_ID} has comments"))?;

    for (index, comment) in (1_u64..).zip(&comments) {
        ensure_eq(format!("id of comment #{index}"), &Some(index), &comment.id)?;
    }
    Ok(())
}

async fn comment_idempotence(ctx: &SuiteContext) -> ApplicationResult<()> {
    let path = ctx.settings.post_comments_path();

    for row in comment_idempotence_rows() {
        let (post_id, comment_id) = row.params;
        let mut first_body: Option<String> = None;

        for attempt in 1..=ctx.settings.idempotence_repetitions {
            let response = ctx
                .blog
                .build_request()
                .query("id", comment_id)
                .get(&path, &[&post_id])
                .await?;
            check(ctx, &response, &[Assertion::status(row.status)])?;

            let comments: Vec<Comment> = RestClient::extract(&response)?;
            let Some(first) = comments.first() else {
                return Err(AssertionFailure::new(format!(
                    "{}: attempt {attempt} returned no comments",
                    row.label
                ))
                .into());
            };
            ensure_eq(format!("{}: attempt {attempt}", row.label), &row.expected, first)?;

            let first_seen = first_body.get_or_insert_with(|| response.body.clone());
            ensure_eq(
                format!("{}: body of attempt {attempt} differs from the first", row.label),
                first_seen.as_str(),
                response.body.as_str(),
            )?;
        }
    }
    Ok(())
}

async fn comments_headers(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx
        .blog
        .build_request()
        .query("postId", COMMENTS_POST_ID)
        .get(&ctx.settings.comments_path, &[])
        .await?;
    check(ctx, &response, &blog_header_assertions())
}
