use champscope_core::{
    filter_champions, result_summary, Catalog, Champion, FacetReport, FilterState,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    ok: bool,
    error: &'a str,
}

#[derive(Serialize)]
struct CatalogBody<'a> {
    ok: bool,
    data_version: &'a str,
    base_locale: &'a str,
    local_locale: &'a str,
    total: usize,
    champions: &'a [Champion],
}

#[derive(Serialize)]
struct ChampionBody<'a> {
    ok: bool,
    champion: &'a Champion,
}

#[derive(Serialize)]
struct FilterBody<'a> {
    ok: bool,
    summary: String,
    /// The filter actually applied, after pruning.
    filter: &'a FilterState,
    matches: Vec<&'a str>,
    facets: FacetReport,
}

fn json<T: Serialize>(status: u16, body: &T) -> ApiReply {
    match serde_json::to_vec(body) {
        Ok(body) => ApiReply { status, body },
        Err(err) => error(500, &err.to_string()),
    }
}

fn error(status: u16, message: &str) -> ApiReply {
    let body = serde_json::to_vec(&ErrorBody {
        ok: false,
        error: message,
    })
    .unwrap_or_default();
    ApiReply { status, body }
}

fn split_query(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

fn query_flag(query: &str, name: &str) -> bool {
    query.split('&').any(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
        key == name && !matches!(value, "0" | "false" | "")
    })
}

fn filter_reply(catalog: &Catalog, body: &str, prune: bool) -> ApiReply {
    let mut filter: FilterState = if body.trim().is_empty() {
        FilterState::default()
    } else {
        match serde_json::from_str(body) {
            Ok(filter) => filter,
            Err(err) => return error(400, &format!("invalid filter: {err}")),
        }
    };
    let mut facets = FacetReport::compute(&catalog.champions, &filter);
    if prune && facets.apply_to(&mut filter) {
        debug!("pruned filter controls with no match");
        facets = FacetReport::compute(&catalog.champions, &filter);
    }
    let matches: Vec<&str> = filter_champions(&catalog.champions, &filter)
        .into_iter()
        .map(|champion| champion.id.as_str())
        .collect();
    json(
        200,
        &FilterBody {
            ok: true,
            summary: result_summary(matches.len(), catalog.champions.len()),
            filter: &filter,
            matches,
            facets,
        },
    )
}

pub fn route(catalog: &Catalog, method: ApiMethod, url: &str, body: &str) -> ApiReply {
    let (path, query) = split_query(url);
    match (method, path) {
        (ApiMethod::Get, "/api/catalog") => json(
            200,
            &CatalogBody {
                ok: true,
                data_version: &catalog.data_version,
                base_locale: &catalog.base_locale,
                local_locale: &catalog.local_locale,
                total: catalog.champions.len(),
                champions: &catalog.champions,
            },
        ),
        (ApiMethod::Get, path) if path.starts_with("/api/champion/") => {
            let raw = &path["/api/champion/".len()..];
            let id = match urlencoding::decode(raw) {
                Ok(id) => id,
                Err(_) => return error(400, "champion id is not valid UTF-8"),
            };
            match catalog.find(&id) {
                Some(champion) => json(
                    200,
                    &ChampionBody {
                        ok: true,
                        champion,
                    },
                ),
                None => error(404, &format!("no champion with id {id}")),
            }
        }
        (ApiMethod::Post, "/api/filter") => {
            filter_reply(catalog, body, query_flag(query, "prune"))
        }
        (_, "/api/catalog" | "/api/filter") => error(405, "method not allowed"),
        _ => error(404, "not found"),
    }
}
