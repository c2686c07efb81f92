//! Scenarios against the posts resource of the blog API.

use restcheck_application::fixtures::{
    PATCHED_TITLE, creation_payload, post_creation_rows, post_idempotence_rows, post_lookup_rows,
    post_update_rows, update_payload,
};
use restcheck_application::{ApplicationResult, AssertionFailure, RestClient, ensure, ensure_eq};
use restcheck_domain::{Assertion, Post, RequestBody, ScenarioGroup};
use serde_json::json;
use tracing::debug;

use super::{NO_CACHE, ScenarioDef, blog_header_assertions, check, scenario};
use crate::context::SuiteContext;

const POSTS_SCHEMA: &str = "posts-schema.json";

pub(super) fn scenarios() -> Vec<ScenarioDef> {
    let group = ScenarioGroup::Posts;
    vec![
        scenario!(group, posts_schema, "posts_schema"),
        scenario!(group, posts_response_time, "posts_response_time"),
        scenario!(group, post_data, "post_data"),
        scenario!(group, post_idempotence, "post_idempotence"),
        scenario!(group, post_creation, "post_creation"),
        scenario!(group, post_creation_not_persisted, "post_creation_not_persisted"),
        scenario!(group, post_update, "post_update"),
        scenario!(group, post_patch, "post_patch"),
        scenario!(group, post_delete, "post_delete"),
        scenario!(group, last_post_response_time, "last_post_response_time"),
        scenario!(group, posts_headers, "posts_headers"),
        scenario!(group, relaxed_tls_root, "relaxed_tls_root"),
    ]
}

/// Post payloads travel as plain text holding the JSON of the post.
fn text_payload(post: &Post) -> ApplicationResult<RequestBody> {
    Ok(RequestBody::text(serde_json::to_string(post)?))
}

async fn posts_schema(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx.blog.get(&ctx.settings.post_path, &[]).await?;
    check(
        ctx,
        &response,
        &[Assertion::status(200), Assertion::schema(POSTS_SCHEMA)],
    )
}

async fn posts_response_time(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx.blog.get(&ctx.settings.post_path, &[]).await?;
    check(
        ctx,
        &response,
        &[
            Assertion::status(200),
            Assertion::faster_than(ctx.settings.response_time_limit_ms),
        ],
    )
}

async fn post_data(ctx: &SuiteContext) -> ApplicationResult<()> {
    for row in post_lookup_rows() {
        let response = ctx
            .blog
            .get(&ctx.settings.post_id_formatter, &[&row.params])
            .await?;
        check(ctx, &response, &[Assertion::status(row.status)])?;

        let post: Post = RestClient::extract(&response)?;
        ensure_eq(format!("{}: post {}", row.label, row.params), &row.expected, &post)?;
    }
    Ok(())
}

async fn post_idempotence(ctx: &SuiteContext) -> ApplicationResult<()> {
    for row in post_idempotence_rows() {
        let mut first_body: Option<String> = None;

        for attempt in 1..=ctx.settings.idempotence_repetitions {
            let response = ctx
                .blog
                .get(&ctx.settings.post_id_formatter, &[&row.params])
                .await?;
            check(ctx, &response, &[Assertion::status(row.status)])?;

            let post: Post = RestClient::extract(&response)?;
            ensure_eq(format!("{}: attempt {attempt}", row.label), &row.expected, &post)?;

            let first = first_body.get_or_insert_with(|| response.body.clone());
            ensure_eq(
                format!("{}: body of attempt {attempt} differs from the first", row.label),
                first.as_str(),
                response.body.as_str(),
            )?;
        }
    }
    Ok(())
}

async fn post_creation(ctx: &SuiteContext) -> ApplicationResult<()> {
    for row in post_creation_rows() {
        let path = format!("{}{}", ctx.settings.post_path, row.params);
        let response = ctx
            .blog
            .post(text_payload(&creation_payload())?, &path, &[])
            .await?;
        check(
            ctx,
            &response,
            &[
                Assertion::status(row.status),
                Assertion::BodyEquals {
                    expected: row.expected.to_string(),
                    ignore_whitespace: true,
                },
            ],
        )?;
    }
    Ok(())
}

async fn post_creation_not_persisted(ctx: &SuiteContext) -> ApplicationResult<()> {
    let settings = &ctx.settings;
    let created = ctx
        .blog
        .post(text_payload(&creation_payload())?, &settings.post_path, &[])
        .await?;
    check(ctx, &created, &[Assertion::status(201)])?;

    let Some(id) = RestClient::extract::<Post>(&created)?.id else {
        return Err(AssertionFailure::new("created post carries no id").into());
    };
    debug!(id, "post created, looking it up");

    let lookup = ctx.blog.get(&settings.post_id_formatter, &[&id]).await?;
    check(ctx, &lookup, &[Assertion::status(404)])?;
    ensure_eq(
        format!("post {id} after creation"),
        &Post::absent(),
        &RestClient::extract::<Post>(&lookup)?,
    )
}

async fn post_update(ctx: &SuiteContext) -> ApplicationResult<()> {
    let formatter = &ctx.settings.post_id_formatter;

    for row in post_update_rows() {
        let before = if row.status == 200 {
            Some(RestClient::extract::<Post>(&ctx.blog.get(formatter, &[&row.params]).await?)?)
        } else {
            None
        };

        let response = ctx
            .blog
            .put(text_payload(&update_payload())?, formatter, &[&row.params])
            .await?;
        check(
            ctx,
            &response,
            &[
                Assertion::status(row.status),
                Assertion::BodyContains {
                    text: row.expected.to_string(),
                },
            ],
        )?;

        if let Some(before) = before {
            let after = ctx.blog.get(formatter, &[&row.params]).await?;
            check(ctx, &after, &[Assertion::status(200)])?;
            ensure_eq(
                format!("{}: post {} after update", row.label, row.params),
                &before,
                &RestClient::extract::<Post>(&after)?,
            )?;
        }
    }
    Ok(())
}

async fn post_patch(ctx: &SuiteContext) -> ApplicationResult<()> {
    let body = RequestBody::json_value(&json!({ "title": PATCHED_TITLE }))?;
    let response = ctx
        .blog
        .patch(body, &ctx.settings.post_id_formatter, &[&1])
        .await?;
    check(
        ctx,
        &response,
        &[
            Assertion::status(200),
            Assertion::JsonPath {
                path: "$.title".to_string(),
                expected: Some(json!(PATCHED_TITLE)),
            },
        ],
    )
}

async fn post_delete(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx
        .blog
        .delete(&ctx.settings.post_id_formatter, &[&1])
        .await?;
    check(
        ctx,
        &response,
        &[
            Assertion::status(200),
            Assertion::BodyEquals {
                expected: "{}".to_string(),
                ignore_whitespace: true,
            },
        ],
    )
}

async fn last_post_response_time(ctx: &SuiteContext) -> ApplicationResult<()> {
    let settings = &ctx.settings;
    let list = ctx.blog.get(&settings.post_path, &[]).await?;
    check(ctx, &list, &[Assertion::status(200)])?;

    let posts: Vec<Post> = RestClient::extract(&list)?;
    ensure(!posts.is_empty(), "posts list is not empty")?;
    let last = posts.len();

    let response = ctx
        .blog
        .build_request()
        .header("Cache-Control", NO_CACHE)
        .get(&settings.post_id_formatter, &[&last])
        .await?;
    check(
        ctx,
        &response,
        &[
            Assertion::status(200),
            Assertion::faster_than(settings.response_time_limit_ms),
            Assertion::JsonPath {
                path: "$.id".to_string(),
                expected: Some(json!(last)),
            },
        ],
    )
}

async fn posts_headers(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx.blog.get(&ctx.settings.post_path, &[]).await?;
    check(ctx, &response, &blog_header_assertions())
}

async fn relaxed_tls_root(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx.relaxed_blog.get("", &[]).await?;
    check(ctx, &response, &[Assertion::status(200)])
}
