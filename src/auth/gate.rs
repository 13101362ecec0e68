//! Per-request access control: authenticate a bearer credential, then
//! optionally authorize its role against a route's allowed set.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::auth::cookie::{AUTH_COOKIE, clear_auth_cookie};
use crate::auth::jwt::{self, Claims};
use crate::error::AppError;
use crate::models::Role;

/// Authentication failure. Carries whether the auth cookie must be expired
/// alongside the 401.
#[derive(Debug)]
pub struct AuthRejection {
    pub error: AppError,
    pub clear_cookie: bool,
}

impl AuthRejection {
    fn missing(msg: &str) -> Self {
        Self {
            error: AppError::Unauthorized(msg.to_string()),
            clear_cookie: false,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        if self.clear_cookie {
            (clear_auth_cookie(), self.error).into_response()
        } else {
            self.error.into_response()
        }
    }
}

/// Locate the raw token. The cookie takes precedence over the header.
pub fn extract_token(headers: &HeaderMap) -> Result<String, AuthRejection> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE).filter(|c| !c.value().is_empty()) {
        return Ok(cookie.value().to_string());
    }

    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthRejection::missing("Authentication required"))?;

    let value = header
        .to_str()
        .map_err(|_| AuthRejection::missing("Invalid authorization header format"))?;

    // An empty token after "Bearer " is well-formed and fails validation instead.
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token.to_string()),
        _ => Err(AuthRejection::missing("Invalid authorization header format")),
    }
}

pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Claims, AuthRejection> {
    let token = extract_token(headers)?;
    jwt::validate(&token, secret).map_err(|kind| {
        tracing::debug!("Rejected token: {kind}");
        AuthRejection {
            error: AppError::Unauthorized("Invalid or expired token".to_string()),
            clear_cookie: true,
        }
    })
}

/// `None` means the authenticate stage never ran for this request.
pub fn authorize(role: Option<Role>, allowed: &[Role]) -> Result<(), AppError> {
    let role = role.ok_or_else(|| AppError::Unauthorized("User role not found".to_string()))?;
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Insufficient permissions".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::http::header::COOKIE;
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;

    const SECRET: &str = "gate-test-secret";

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    fn token(role: Role) -> String {
        jwt::issue(Uuid::now_v7(), "gate@test.com", role, SECRET, Duration::hours(1)).unwrap()
    }

    #[test]
    fn no_credentials_is_unauthorized() {
        let err = extract_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err.error, AppError::Unauthorized(ref m) if m == "Authentication required"));
        assert!(!err.clear_cookie);
    }

    #[test]
    fn bearer_header_is_accepted() {
        let h = headers(&[(AUTHORIZATION, "Bearer abc.def.ghi")]);
        assert_eq!(extract_token(&h).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn malformed_header_is_rejected() {
        for bad in ["abc", "Basic abc", "Bearer", "Bearer a b", "bearer abc"] {
            let h = headers(&[(AUTHORIZATION, bad)]);
            let err = extract_token(&h).unwrap_err();
            assert!(
                matches!(err.error, AppError::Unauthorized(ref m) if m == "Invalid authorization header format"),
                "{bad}"
            );
        }
    }

    #[test]
    fn cookie_wins_over_header() {
        let h = headers(&[
            (COOKIE, "auth_token=from-cookie"),
            (AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&h).unwrap(), "from-cookie");
    }

    #[test]
    fn invalid_token_clears_cookie() {
        let h = headers(&[(COOKIE, "auth_token=garbage")]);
        let err = authenticate(&h, SECRET).unwrap_err();
        assert!(err.clear_cookie);
        assert!(matches!(err.error, AppError::Unauthorized(_)));

        let response = err.into_response();
        let set_cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("auth_token="));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[test]
    fn empty_bearer_token_is_invalid_and_clears_cookie() {
        let h = headers(&[(AUTHORIZATION, "Bearer ")]);
        let err = authenticate(&h, SECRET).unwrap_err();
        assert!(err.clear_cookie);
        assert!(matches!(err.error, AppError::Unauthorized(ref m) if m == "Invalid or expired token"));
    }

    #[test]
    fn valid_token_authenticates() {
        let value = format!("Bearer {}", token(Role::Developer));
        let h = headers(&[(AUTHORIZATION, value.as_str())]);
        let claims = authenticate(&h, SECRET).unwrap();
        assert_eq!(claims.role, Role::Developer);
        assert_eq!(claims.email, "gate@test.com");
    }

    #[test]
    fn authorize_distinguishes_missing_from_insufficient() {
        assert!(matches!(
            authorize(None, &[Role::Admin]),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            authorize(Some(Role::Developer), &[Role::Admin]),
            Err(AppError::Forbidden(_))
        ));
        assert!(authorize(Some(Role::Company), &[Role::Company, Role::Admin]).is_ok());
    }
}
