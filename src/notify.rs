//! One-shot notifications that survive a redirect.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// Queues a notice for the next rendered page.
pub fn flash(jar: CookieJar, notice: Notice, secure: bool) -> CookieJar {
    let mut pending = read(&jar);
    pending.push(notice);

    match serde_json::to_vec(&pending) {
        Ok(bytes) => jar.add(
            Cookie::build((FLASH_COOKIE, BASE64_URL_SAFE_NO_PAD.encode(bytes)))
                .path("/")
                .http_only(true)
                .secure(secure)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            warn!("dropping flash notice: {}", e);
            jar
        }
    }
}

/// Returns the pending notices and clears them.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Notice>) {
    let pending = read(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, pending);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), pending)
}

fn read(jar: &CookieJar) -> Vec<Notice> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };

    BASE64_URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_else(|| {
            warn!("ignoring malformed flash cookie");
            Vec::new()
        })
}
