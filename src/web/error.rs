use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::error::FyyurError;
use crate::web::templates::ServerErrorTemplate;

/// Failures a handler cannot turn into a page of its own. Rendered as the 500 page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] FyyurError),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let page = ServerErrorTemplate { flashes: Vec::new() };
        match page.render() {
            Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
