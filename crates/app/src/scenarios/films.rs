//! Scenarios against the film API.
//!
//! Aggregates (latest film, tallest character) are computed client-side from
//! the film list and the individually fetched character records.

use restcheck_application::aggregation::{character_urls, latest_release, tallest};
use restcheck_application::fixtures;
use restcheck_application::{ApplicationResult, AssertionFailure, RestClient, ensure_eq};
use restcheck_domain::{Assertion, Film, FilmSummary, Page, Person, ScenarioGroup};
use tracing::debug;

use super::{ScenarioDef, check, scenario};
use crate::context::SuiteContext;

const PEOPLE_SCHEMA: &str = "people-schema.json";

fn json_content() -> Assertion {
    Assertion::ContentType {
        expected: "application/json".to_string(),
    }
}

pub(super) fn scenarios() -> Vec<ScenarioDef> {
    let group = ScenarioGroup::Films;
    vec![
        scenario!(group, films_latest_release, "films_latest_release"),
        scenario!(group, films_tallest_in_latest, "films_tallest_in_latest"),
        scenario!(group, films_tallest_overall, "films_tallest_overall"),
        scenario!(group, people_schema, "people_schema"),
    ]
}

async fn list_films(ctx: &SuiteContext) -> ApplicationResult<Vec<Film>> {
    let response = ctx.films.get(&ctx.settings.films_path, &[]).await?;
    check(ctx, &response, &[Assertion::status(200), json_content()])?;
    let page: Page<Film> = RestClient::extract(&response)?;
    Ok(page.results)
}

fn pick_latest(films: &[Film]) -> ApplicationResult<&Film> {
    latest_release(films).ok_or_else(|| AssertionFailure::new("film list is empty").into())
}

/// Fetches each character record in turn.
async fn fetch_people(ctx: &SuiteContext, urls: &[String]) -> ApplicationResult<Vec<Person>> {
    debug!(count = urls.len(), "fetching characters");
    let mut people = Vec::with_capacity(urls.len());
    for url in urls {
        let response = ctx.films.get(url, &[]).await?;
        check(ctx, &response, &[Assertion::status(200)])?;
        people.push(RestClient::extract::<Person>(&response)?);
    }
    Ok(people)
}

async fn films_latest_release(ctx: &SuiteContext) -> ApplicationResult<()> {
    let films = list_films(ctx).await?;
    let latest = pick_latest(&films)?;
    ensure_eq(
        "latest film",
        &fixtures::latest_release(),
        &FilmSummary::from(latest),
    )
}

async fn films_tallest_in_latest(ctx: &SuiteContext) -> ApplicationResult<()> {
    let films = list_films(ctx).await?;
    let latest = pick_latest(&films)?;

    let people = fetch_people(ctx, &character_urls([latest])).await?;
    ensure_eq(
        format!("tallest character of {}", latest.title),
        &Some(fixtures::tallest_in_latest()),
        &tallest(&people),
    )
}

async fn films_tallest_overall(ctx: &SuiteContext) -> ApplicationResult<()> {
    let films = list_films(ctx).await?;

    let people = fetch_people(ctx, &character_urls(&films)).await?;
    ensure_eq(
        "tallest character across all films",
        &Some(fixtures::tallest_overall()),
        &tallest(&people),
    )
}

async fn people_schema(ctx: &SuiteContext) -> ApplicationResult<()> {
    let response = ctx.films.get(&ctx.settings.people_path, &[]).await?;
    check(
        ctx,
        &response,
        &[
            Assertion::status(200),
            json_content(),
            Assertion::schema(PEOPLE_SCHEMA),
        ],
    )
}
