//! One-shot status messages carried across a redirect in a cookie.
//!
//! A response that wants the next page to show a message sets the
//! `fyyur_flash` cookie; the next page renders it and expires the cookie.
//! The payload is hex-encoded JSON so it never needs cookie escaping.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        request::Parts,
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::warn;

pub const FLASH_COOKIE: &str = "fyyur_flash";

/// Messages are cut to this many characters, so a single one always fits a cookie.
pub const MAX_MESSAGE_CHARS: usize = 200;

/// Upper bound on the encoded cookie value; browsers drop cookies over 4 KB.
const MAX_COOKIE_VALUE: usize = 3800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

impl FlashLevel {
    /// Bootstrap alert modifier.
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Info => "info",
            FlashLevel::Success => "success",
            FlashLevel::Error => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    fn new(level: FlashLevel, message: String) -> Self {
        let message = if message.chars().count() > MAX_MESSAGE_CHARS {
            let mut cut: String = message.chars().take(MAX_MESSAGE_CHARS - 3).collect();
            cut.push_str("...");
            cut
        } else {
            message
        };
        Self { level, message }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, message.into())
    }
}

pub fn encode(messages: &[FlashMessage]) -> String {
    hex::encode(serde_json::to_vec(messages).unwrap_or_default())
}

/// Tampered or stale cookies decode to no messages.
pub fn decode(value: &str) -> Vec<FlashMessage> {
    hex::decode(value.trim())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn cookie_value(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == FLASH_COOKIE).then(|| value.to_string())
        })
        .last()
}

/// Oldest messages are dropped until the payload fits.
fn set_cookie(messages: &[FlashMessage]) -> String {
    let mut kept = messages;
    let mut value = encode(kept);
    while value.len() > MAX_COOKIE_VALUE && !kept.is_empty() {
        kept = &kept[1..];
        value = encode(kept);
    }
    if kept.len() < messages.len() {
        warn!("Dropped {} flash message(s) to fit the cookie", messages.len() - kept.len());
    }
    format!("{FLASH_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax")
}

fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Messages left for this request by the previous response.
#[derive(Debug, Clone, Default)]
pub struct Flash {
    messages: Vec<FlashMessage>,
    had_cookie: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match cookie_value(parts) {
            Some(value) => Flash {
                messages: decode(&value),
                had_cookie: true,
            },
            None => Flash::default(),
        })
    }
}

impl Flash {
    /// Incoming messages, for templates.
    pub fn messages(&self) -> Vec<FlashMessage> {
        self.messages.clone()
    }

    /// Incoming messages followed by `extra`.
    pub fn with(&self, extra: FlashMessage) -> Vec<FlashMessage> {
        let mut messages = self.messages();
        messages.push(extra);
        messages
    }

    /// A rendered page. Consumes the incoming cookie so its messages show once.
    pub fn page(&self, status: StatusCode, html: String) -> Response {
        let mut response = (status, Html(html)).into_response();
        if self.had_cookie {
            append_cookie(&mut response, clear_cookie());
        }
        response
    }

    /// 303 to `location`, carrying `message` to the page there.
    pub fn redirect(&self, location: &str, message: FlashMessage) -> Response {
        let mut response = StatusCode::SEE_OTHER.into_response();
        match HeaderValue::from_str(location) {
            Ok(value) => {
                response.headers_mut().insert(LOCATION, value);
            }
            Err(e) => warn!("Dropping redirect to invalid location '{}': {}", location, e),
        }
        append_cookie(&mut response, set_cookie(&self.with(message)));
        response
    }
}

fn append_cookie(response: &mut Response, cookie: String) {
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => warn!("Could not encode flash cookie: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(cookie: Option<&str>) -> Flash {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Flash::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn cookie_round_trips_through_request() {
        let sent = vec![FlashMessage::success("Venue The Musical Hop was successfully listed!")];
        let header = format!("theme=dark; {}={}", FLASH_COOKIE, encode(&sent));

        let flash = extract(Some(&header)).await;
        assert_eq!(flash.messages(), sent);
    }

    #[tokio::test]
    async fn missing_or_garbled_cookie_has_no_messages() {
        assert!(extract(None).await.messages().is_empty());
        let flash = extract(Some("fyyur_flash=zz-not-hex")).await;
        assert!(flash.messages().is_empty());
    }

    #[tokio::test]
    async fn page_clears_cookie_only_when_one_arrived() {
        let fresh = extract(None).await.page(StatusCode::OK, "<p>hi</p>".to_string());
        assert!(fresh.headers().get(SET_COOKIE).is_none());

        let header = format!("{}={}", FLASH_COOKIE, encode(&[FlashMessage::info("hello")]));
        let seen = extract(Some(&header)).await.page(StatusCode::OK, String::new());
        let cookie = seen.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("fyyur_flash=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn redirect_sets_location_and_message() {
        let response = Flash::default().redirect("/venues/3", FlashMessage::success("Venue updated"));

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/venues/3");
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        let value = cookie
            .strip_prefix("fyyur_flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert_eq!(decode(value), vec![FlashMessage::success("Venue updated")]);
    }

    #[test]
    fn long_messages_are_cut_to_fit_a_cookie() {
        let name = "É".repeat(2_000);
        let message = FlashMessage::success(format!("Venue {name} was successfully updated!"));
        assert_eq!(message.message.chars().count(), MAX_MESSAGE_CHARS);
        assert!(message.message.ends_with("..."));

        let response = Flash::default().redirect("/venues/1", message.clone());
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.len() < 4096);
        let value = cookie
            .strip_prefix("fyyur_flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert_eq!(decode(value), vec![message]);

        assert_eq!(FlashMessage::info("short").message, "short");
    }

    #[test]
    fn oversized_payload_keeps_newest_messages() {
        let messages: Vec<FlashMessage> = (0..20)
            .map(|i| FlashMessage::info(format!("{i:02} {}", "x".repeat(150))))
            .collect();
        let cookie = set_cookie(&messages);
        assert!(cookie.len() < 4096);
        let value = cookie
            .strip_prefix("fyyur_flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let kept = decode(value);
        assert!(!kept.is_empty() && kept.len() < messages.len());
        assert_eq!(kept.last(), messages.last());
    }

    #[test]
    fn levels_map_to_alert_classes() {
        assert_eq!(FlashLevel::Error.css_class(), "danger");
        assert_eq!(FlashMessage::info("x").level.css_class(), "info");
    }
}
