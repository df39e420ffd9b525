use askama::Template;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::web::error::AppResult;
use crate::web::flash::{Flash, FlashMessage};
use crate::web::state::AppState;
use crate::web::templates::{HomeTemplate, NotFoundTemplate};

pub mod artists;
pub mod shows;
pub mod venues;

/// `search_term` from either the query string or a posted form.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

/// Path ids are positive integers; anything else is treated as an unknown record.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// The home page with `message` added to whatever arrived in the cookie.
pub(crate) fn home_with(flash: &Flash, message: FlashMessage) -> AppResult<Response> {
    let page = HomeTemplate {
        flashes: flash.with(message),
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub(crate) fn record_not_found(flash: &Flash) -> AppResult<Response> {
    let page = NotFoundTemplate {
        flashes: flash.with(FlashMessage::error("Record not found")),
    };
    Ok(flash.page(StatusCode::NOT_FOUND, page.render()?))
}

pub async fn index(flash: Flash) -> AppResult<Response> {
    let page = HomeTemplate {
        flashes: flash.messages(),
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn not_found(flash: Flash) -> AppResult<Response> {
    let page = NotFoundTemplate {
        flashes: flash.messages(),
    };
    Ok(flash.page(StatusCode::NOT_FOUND, page.render()?))
}

pub async fn health(State(state): State<AppState>) -> Response {
    match state.storage.get_all_venues().await {
        Ok(venues) => Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "venues": venues.len(),
        }))
        .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn metrics() -> Response {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::render(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("the-musical-hop"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }
}
