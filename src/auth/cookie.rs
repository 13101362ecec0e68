use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

pub const AUTH_COOKIE: &str = "auth_token";
const REFRESH_COOKIE: &str = "refresh_token";
const SESSION_COOKIE: &str = "session_id";

/// HTTP-only session cookie carrying the access token for browser clients.
pub fn auth_cookie(token: &str, ttl: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

pub fn set_auth_cookie(token: &str, ttl: chrono::Duration, secure: bool) -> CookieJar {
    CookieJar::new().add(auth_cookie(token, ttl, secure))
}

fn expired(name: &'static str, path: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

pub fn clear_auth_cookie() -> CookieJar {
    CookieJar::new().add(expired(AUTH_COOKIE, "/"))
}

/// Expire every cookie a browser session may hold.
pub fn clear_session_cookies() -> CookieJar {
    CookieJar::new()
        .add(expired(AUTH_COOKIE, "/"))
        .add(expired(REFRESH_COOKIE, "/api/v1/auth/refresh"))
        .add(expired(SESSION_COOKIE, "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_attributes() {
        let cookie = auth_cookie("tok", chrono::Duration::hours(24), false);
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
    }

    #[test]
    fn logout_expires_all_session_cookies() {
        let jar = clear_session_cookies();
        for name in [AUTH_COOKIE, REFRESH_COOKIE, SESSION_COOKIE] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        }
    }
}
