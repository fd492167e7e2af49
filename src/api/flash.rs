//! One-shot confirmation messages carried across a redirect in a cookie.
//!
//! The message is base64url-encoded so it only uses cookie-safe characters.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

pub const FLASH_COOKIE: &str = "flash";

fn encode(message: &str) -> String {
    URL_SAFE_NO_PAD.encode(message)
}

fn decode(value: &str) -> Option<String> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// Store a message for the next rendered page
pub fn set(jar: CookieJar, message: impl AsRef<str>) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, encode(message.as_ref())))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Read the pending message, if any, and clear it
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(message) = jar.get(FLASH_COOKIE).map(|c| decode(c.value())) else {
        return (jar, None);
    };
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
