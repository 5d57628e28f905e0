//! One-shot flash messages carried in a cookie across a redirect

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

fn encode(flashes: &[Flash]) -> String {
    // Serializing plain strings and enums cannot fail
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Queue messages for the next rendered page
pub fn push(jar: CookieJar, flashes: Vec<Flash>) -> CookieJar {
    if flashes.is_empty() {
        return jar;
    }
    let mut pending = peek(&jar);
    pending.extend(flashes);

    jar.add(
        Cookie::build((FLASH_COOKIE, encode(&pending)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Read pending messages without consuming them
pub fn peek(jar: &CookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Read and consume pending messages
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let flashes = peek(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, flashes);
    }
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));
    (jar, flashes)
}
