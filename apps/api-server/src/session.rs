//! Session transport: cookies, bearer tokens and the client-facing view.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::header;
use chrono::TimeDelta;

use insighto_core::auth::SessionClaims;
use insighto_shared::{Session, SessionUser};

/// HTTP-only cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "insighto.session-token";

/// CSRF state for an in-flight provider sign-in.
pub const STATE_COOKIE: &str = "insighto.oauth-state";

/// Where to land once a provider sign-in completes.
pub const CALLBACK_COOKIE: &str = "insighto.callback-url";

/// Provider round trips longer than this are abandoned.
const FLOW_COOKIE_MAX_AGE_MINUTES: i64 = 15;

pub fn session_cookie(token: String, max_age: TimeDelta, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(CookieDuration::seconds(max_age.num_seconds()))
        .finish()
}

pub fn flow_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/api/auth")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(CookieDuration::minutes(FLOW_COOKIE_MAX_AGE_MINUTES))
        .finish()
}

/// Expired cookie that makes the browser drop `name`.
pub fn removal_cookie(name: &'static str, path: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path(path).finish();
    cookie.make_removal();
    cookie
}

/// The token presented with a request.
///
/// `Authorization: Bearer` wins over the cookie so API clients are never
/// shadowed by a stale browser session.
pub fn presented_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match bearer {
        Some(token) => Some(token.to_string()),
        None => req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()),
    }
}

/// Project decoded claims into the shape the browser sees.
pub fn session_view(claims: &SessionClaims) -> Session {
    Session {
        user: SessionUser {
            id: claims.user_id.to_string(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            image: claims.image.clone(),
        },
        provider: claims.provider.clone(),
        access_token: claims.access_token.clone(),
        expires: claims.expires_at,
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_bearer_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer from-header"))
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(presented_token(&req).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_cookie_used_without_bearer() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(presented_token(&req).as_deref(), Some("from-cookie"));
        assert!(presented_token(&TestRequest::default().to_http_request()).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string(), TimeDelta::days(30), false);

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(30)));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_session_view_serializes_camel_case() {
        let now = Utc::now();
        let claims = SessionClaims {
            user_id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            name: None,
            image: None,
            provider: Some("github".to_string()),
            access_token: Some("gho_123".to_string()),
            issued_at: now,
            expires_at: now + TimeDelta::days(30),
        };

        let json = serde_json::to_value(session_view(&claims)).unwrap();
        assert_eq!(json["user"]["id"], claims.user_id.to_string());
        assert_eq!(json["accessToken"], "gho_123");
        assert_eq!(json["provider"], "github");
    }
}
