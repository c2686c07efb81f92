//! In-process stand-in for the blog and film APIs.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, missing_docs)]

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use restcheck::SuiteContext;
use restcheck_application::fixtures;
use restcheck_domain::{Comment, Post};
use restcheck_infrastructure::load_config_str;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// How faithfully the server imitates the real services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Same data, headers and quirks as the public services.
    Faithful,
    /// Wrong caching headers, a tampered post 9 and `/comments?postId=`
    /// listing in reverse order.
    Broken,
}

pub struct MockServer {
    pub url: String,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(flavor: Flavor) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let data = Arc::new(Dataset::new(&url, flavor));

        let app = Router::new()
            .route("/", get(root))
            .route("/posts", get(list_posts).post(create_post))
            .route(
                "/posts/{id}",
                get(get_post)
                    .post(create_on_post)
                    .put(update_post)
                    .patch(patch_post)
                    .delete(delete_post),
            )
            .route("/posts/{id}/comments", get(post_comments))
            .route("/comments", get(comments))
            .route("/films/", get(films))
            .route("/people/", get(people))
            .route("/people/{id}/", get(person))
            .layer(middleware::map_response_with_state(data.clone(), service_headers))
            .with_state(data);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url, handle }
    }

    /// Suite context pointing both APIs at this server.
    pub fn context(&self) -> SuiteContext {
        let config = load_config_str(&config_yaml(&self.url)).unwrap();
        SuiteContext::new(&config).unwrap()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A complete configuration targeting `url`.
pub fn config_yaml(url: &str) -> String {
    format!(
        "base_url: {url}
post_path: /posts
post_id_formatter: /posts/{{postId}}
comments_path: /comments
films_base_url: {url}
films_path: /films/
people_path: /people/
response_time_limit_ms: 2000
idempotence_repetitions: 3
connection:
  idle_timeout_ms: 5000
  max_idle_per_host: 4
  user_agent: restcheck-test
"
    )
}

struct Dataset {
    flavor: Flavor,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    films: Vec<Value>,
    people: Vec<Value>,
}

impl Dataset {
    fn new(base: &str, flavor: Flavor) -> Self {
        let mut posts: Vec<Post> = (1..=100_u64)
            .map(|id| match id {
                1 => fixtures::post_1(),
                9 => fixtures::post_9(),
                _ => Post::complete(
                    (id - 1) / 10 + 1,
                    id,
                    &format!("title of post {id}"),
                    &format!("body of post {id}"),
                ),
            })
            .collect();
        if flavor == Flavor::Broken {
            posts[8].title = Some("tampered".to_string());
        }

        let comments = (1..=100_u64)
            .flat_map(|post_id| (1..=5_u64).map(move |k| (post_id, (post_id - 1) * 5 + k)))
            .map(|(post_id, id)| {
                if id == 1 {
                    fixtures::comment_1()
                } else {
                    Comment::complete(
                        post_id,
                        id,
                        &format!("comment {id}"),
                        &format!("user{id}@example.com"),
                        &format!("text of comment {id}"),
                    )
                }
            })
            .collect();

        let people_rows = [
            ("Luke Skywalker", "172", "male"),
            ("C-3PO", "167", "n/a"),
            ("Chewbacca", "228", "male"),
            ("Yoda", "66", "male"),
            ("Yarael Poof", "264", "male"),
            ("Tarfful", "234", "male"),
            ("R2-D2", "96", "n/a"),
            ("Unknown Trooper", "unknown", "n/a"),
            ("IG-88", "200", "none"),
            ("Bail Prestor Organa", "191", "male"),
        ];
        let person_url = |id: usize| format!("{base}/people/{id}/");
        let people = people_rows
            .iter()
            .zip(1..)
            .map(|((name, height, gender), id)| {
                json!({
                    "name": name,
                    "height": height,
                    "mass": "unknown",
                    "gender": gender,
                    "films": [],
                    "url": person_url(id),
                })
            })
            .collect();

        // Listed in catalog order, so the latest release is not the last entry.
        let film_rows: [(&str, u32, &str, &[usize]); 4] = [
            ("A New Hope", 4, "1977-05-25", &[1, 2, 7, 8, 10]),
            ("The Empire Strikes Back", 5, "1980-05-17", &[1, 3, 4, 8, 9]),
            ("Revenge of the Sith", 3, "2005-05-19", &[1, 2, 3, 4, 6, 7, 10]),
            ("The Phantom Menace", 1, "1999-05-19", &[2, 4, 5, 7]),
        ];
        let films = film_rows
            .iter()
            .zip(1..)
            .map(|((title, episode, date, cast), id)| {
                json!({
                    "title": title,
                    "episode_id": episode,
                    "release_date": date,
                    "characters": cast.iter().map(|p| person_url(*p)).collect::<Vec<_>>(),
                    "url": format!("{base}/films/{id}/"),
                })
            })
            .collect();

        Self {
            flavor,
            posts,
            comments,
            films,
            people,
        }
    }

    fn post(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == Some(id))
    }
}

type Shared = State<Arc<Dataset>>;

async fn service_headers(State(data): Shared, mut response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let headers = response.headers_mut();
    if is_json {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
    }
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    match data.flavor {
        Flavor::Faithful => {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=43200"));
            headers.insert(header::EXPIRES, HeaderValue::from_static("-1"));
        }
        Flavor::Broken => {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }
    }
    response
}

fn empty_object(status: StatusCode) -> Response {
    (status, Json(json!({}))).into_response()
}

fn is_json_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Echoes JSON payloads with `id` set; any other payload yields `{"id": id}`.
fn echo_with_id(headers: &HeaderMap, body: &str, id: u64) -> Value {
    let mut value = if is_json_request(headers) {
        serde_json::from_str::<Value>(body).unwrap_or_else(|_| json!({}))
    } else {
        json!({})
    };
    if let Some(object) = value.as_object_mut() {
        object.insert("id".to_string(), json!(id));
    }
    value
}

async fn root() -> Response {
    (
        [(header::CONTENT_TYPE, "text/html; charset=UTF-8")],
        "<!DOCTYPE html><title>blog API</title>",
    )
        .into_response()
}

async fn list_posts(State(data): Shared) -> Response {
    Json(&data.posts).into_response()
}

async fn get_post(State(data): Shared, Path(id): Path<u64>) -> Response {
    match data.post(id) {
        Some(post) => Json(post).into_response(),
        None => empty_object(StatusCode::NOT_FOUND),
    }
}

async fn create_post(State(data): Shared, headers: HeaderMap, body: String) -> Response {
    let id = data.posts.len() as u64 + 1;
    (StatusCode::CREATED, Json(echo_with_id(&headers, &body, id))).into_response()
}

async fn create_on_post() -> Response {
    empty_object(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(data): Shared,
    Path(id): Path<u64>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if data.post(id).is_none() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            format!(
                "{}<br> &nbsp; &nbsp;at update (/app/node_modules/json-server/lib/server/router/plural.js:262:24)",
                fixtures::UPDATE_NOT_FOUND_FRAGMENT
            ),
        )
            .into_response();
    }
    let pretty = serde_json::to_string_pretty(&echo_with_id(&headers, &body, id)).unwrap();
    ([(header::CONTENT_TYPE, "application/json")], pretty).into_response()
}

async fn patch_post(State(data): Shared, Path(id): Path<u64>, Json(patch): Json<Value>) -> Response {
    let Some(post) = data.post(id) else {
        return empty_object(StatusCode::NOT_FOUND);
    };
    let mut merged = serde_json::to_value(post).unwrap();
    if let (Some(target), Some(changes)) = (merged.as_object_mut(), patch.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(merged).into_response()
}

async fn delete_post() -> Response {
    empty_object(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentQuery {
    post_id: Option<u64>,
    id: Option<u64>,
}

fn filter_comments(data: &Dataset, post_id: Option<u64>, id: Option<u64>) -> Vec<Comment> {
    data.comments
        .iter()
        .filter(|c| post_id.is_none_or(|p| c.post_id == Some(p)))
        .filter(|c| id.is_none_or(|i| c.id == Some(i)))
        .cloned()
        .collect()
}

async fn post_comments(
    State(data): Shared,
    Path(post_id): Path<u64>,
    Query(query): Query<CommentQuery>,
) -> Response {
    Json(filter_comments(&data, Some(post_id), query.id)).into_response()
}

async fn comments(State(data): Shared, Query(query): Query<CommentQuery>) -> Response {
    let mut found = filter_comments(&data, query.post_id, query.id);
    if data.flavor == Flavor::Broken && query.post_id.is_some() {
        found.reverse();
    }
    Json(found).into_response()
}

fn page(results: &[Value]) -> Value {
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}

async fn films(State(data): Shared) -> Response {
    Json(page(&data.films)).into_response()
}

async fn people(State(data): Shared) -> Response {
    Json(page(&data.people)).into_response()
}

async fn person(State(data): Shared, Path(id): Path<usize>) -> Response {
    match id.checked_sub(1).and_then(|i| data.people.get(i)) {
        Some(person) => Json(person).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" }))).into_response(),
    }
}
