//! End-to-end handler tests against in-memory state.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use insighto_core::auth::{AuthenticatedUser, ProviderGrant, SessionClaims};
use insighto_core::domain::{NewUser, User};
use insighto_core::ports::{
    AuthError, BaseRepository, IdentityProvider, PasswordService, ProviderProfile,
};
use insighto_infra::Argon2PasswordService;

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::session::{CALLBACK_COOKIE, SESSION_COOKIE, STATE_COOKIE};
use crate::state::AppState;

fn test_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .app_data(web::Data::new(state))
        .configure(configure_routes)
}

async fn seed_user(state: &AppState, email: &str, password: &str) -> User {
    let hash = Argon2PasswordService::new().hash(password).unwrap();
    state
        .users
        .insert(User::new(NewUser {
            email: email.to_string(),
            password_hash: Some(hash),
            ..Default::default()
        }))
        .await
        .unwrap()
}

fn token_for(state: &AppState, user: &User, issued_at: chrono::DateTime<Utc>) -> String {
    let claims = SessionClaims::on_sign_in(
        &AuthenticatedUser::from(user.clone()),
        ProviderGrant::credentials(),
        issued_at,
        state.sessions.max_age(),
    );
    state.sessions.issue(&claims).unwrap()
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn response_cookie(res: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

fn location(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_rt::test]
async fn test_health_without_database() {
    let app = actix_test::init_service(test_app(AppState::for_tests())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "disconnected");
    assert!(body["timestamp"].is_string());
}

#[actix_rt::test]
async fn test_credentials_sign_in_correct_password() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/callback/credentials")
            .set_json(json!({ "email": "a@b.com", "password": "correct" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = response_cookie(&res, SESSION_COOKIE).expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["session"]["user"]["id"], user.id.to_string());
    assert_eq!(body["session"]["provider"], "credentials");
    assert_eq!(body["url"], "http://localhost:3000/dashboard");
    assert_eq!(body["token_type"], "Bearer");
}

#[rstest]
#[case::wrong_password(json!({ "email": "a@b.com", "password": "wrong" }))]
#[case::unknown_email(json!({ "email": "nobody@b.com", "password": "correct" }))]
#[case::missing_password(json!({ "email": "a@b.com" }))]
#[actix_rt::test]
async fn test_credentials_sign_in_rejected(#[case] payload: Value) {
    let state = AppState::for_tests();
    seed_user(&state, "a@b.com", "correct").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/callback/credentials")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(response_cookie(&res, SESSION_COOKIE).is_none());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["title"], "CredentialsSignin");
    assert_eq!(body["detail"], "Invalid email or password");
}

#[actix_rt::test]
async fn test_credentials_callback_url_is_resolved() {
    let state = AppState::for_tests();
    seed_user(&state, "a@b.com", "correct").await;
    let app = actix_test::init_service(test_app(state)).await;

    let sign_in = |callback: &str| {
        actix_test::TestRequest::post()
            .uri("/api/auth/callback/credentials")
            .set_form([
                ("email", "a@b.com"),
                ("password", "correct"),
                ("callbackUrl", callback),
            ])
            .to_request()
    };

    let res = actix_test::call_service(&app, sign_in("/insights")).await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["url"], "http://localhost:3000/insights");

    let res = actix_test::call_service(&app, sign_in("https://evil.example.com/phish")).await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["url"], "http://localhost:3000/dashboard");
}

#[actix_rt::test]
async fn test_register_then_duplicate() {
    let app = actix_test::init_service(test_app(AppState::for_tests())).await;
    let register = || {
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "email": "new@b.com",
                "password": "long-enough",
                "timezone": "Asia/Tokyo"
            }))
            .to_request()
    };

    let res = actix_test::call_service(&app, register()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(response_cookie(&res, SESSION_COOKIE).is_some());

    let res = actix_test::call_service(&app, register()).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "short@b.com", "password": "short" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_session_endpoint() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let token = token_for(&state, &user, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/auth/session").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, "null");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/session")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request(),
    )
    .await;
    // No sliding renewal.
    assert!(response_cookie(&res, SESSION_COOKIE).is_none());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["user"]["email"], "a@b.com");
    assert!(body["expires"].is_string());
}

#[actix_rt::test]
async fn test_guard_redirects_without_session() {
    let app = actix_test::init_service(test_app(AppState::for_tests())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/dashboard").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/auth/signin?callbackUrl=%2Fdashboard");
}

#[rstest]
#[case("/dashboard", "Dashboard")]
#[case("/accounts", "Accounts")]
#[case("/insights/best-time", "Insights")]
#[case("/analytics", "Analytics")]
#[actix_rt::test]
async fn test_guard_renders_with_session(#[case] path: &str, #[case] title: &str) {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let token = token_for(&state, &user, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(path)
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["title"], title);
    assert_eq!(body["session"]["user"]["id"], user.id.to_string());
}

#[actix_rt::test]
async fn test_guard_treats_expired_session_as_absent() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let stale = token_for(&state, &user, Utc::now() - TimeDelta::days(31));
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/analytics?range=30d")
            .cookie(Cookie::new(SESSION_COOKIE, stale.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&res),
        "/auth/signin?callbackUrl=%2Fanalytics%3Frange%3D30d"
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(bearer(&stale))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["title"], "Session Expired");
}

#[actix_rt::test]
async fn test_me_requires_session() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let token = token_for(&state, &user, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/me").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["timezone"], "UTC");
    assert_eq!(body["social_account_count"], 0);
    assert!(body.get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_problem_bodies_carry_request_id() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let token = token_for(&state, &user, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("X-Request-ID", "edge-123"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "edge-123");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["title"], "Authentication Required");
    assert_eq!(body["request_id"], "edge-123");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/accounts/{}", uuid::Uuid::new_v4()))
            .insert_header(bearer(&token))
            .insert_header(("X-Request-ID", "edge-456"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["request_id"], "edge-456");

    // Without an incoming id the generated one is used.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/callback/credentials")
            .set_json(json!({ "email": "a@b.com", "password": "wrong" }))
            .to_request(),
    )
    .await;
    let generated = res
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["title"], "CredentialsSignin");
    assert_eq!(body["request_id"], generated.as_str());
}

#[actix_rt::test]
async fn test_account_lifecycle() {
    let state = AppState::for_tests();
    let owner = seed_user(&state, "a@b.com", "correct").await;
    let other = seed_user(&state, "c@d.com", "correct").await;
    let owner_token = token_for(&state, &owner, Utc::now());
    let other_token = token_for(&state, &other, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let connect = |token: &str| {
        actix_test::TestRequest::post()
            .uri("/api/accounts")
            .insert_header(bearer(token))
            .set_json(json!({
                "platform": "INSTAGRAM",
                "account_id": "ig-1",
                "username": "ada",
                "access_token": "ig-token"
            }))
            .to_request()
    };

    let res = actix_test::call_service(&app, connect(&owner_token)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let account: Value = actix_test::read_body_json(res).await;
    let account_id = account["id"].as_str().unwrap().to_string();
    assert_eq!(account["platform"], "instagram");
    assert!(account.get("access_token").is_none());

    let res = actix_test::call_service(&app, connect(&owner_token)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Another user cannot see or touch the account.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/accounts/{account_id}/tokens"))
            .insert_header(bearer(&other_token))
            .set_json(json!({ "access_token": "stolen" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/accounts/{account_id}/tokens"))
            .insert_header(bearer(&owner_token))
            .set_json(json!({ "access_token": "fresh" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(res).await;
    assert!(updated["last_sync_at"].is_string());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/accounts/{account_id}"))
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    let profile: Value = actix_test::read_body_json(res).await;
    assert_eq!(profile["social_accounts"].as_array().unwrap().len(), 0);
    assert_eq!(profile["social_account_count"], 1);

    // Reconnecting reactivates the same row.
    let res = actix_test::call_service(&app, connect(&owner_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let reconnected: Value = actix_test::read_body_json(res).await;
    assert_eq!(reconnected["id"], account_id.as_str());
    assert_eq!(reconnected["is_active"], true);
}

#[actix_rt::test]
async fn test_connect_rejects_unknown_platform() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let token = token_for(&state, &user, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/accounts")
            .insert_header(bearer(&token))
            .set_json(json!({
                "platform": "myspace",
                "account_id": "1",
                "access_token": "t"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_post_upsert_and_listing() {
    let state = AppState::for_tests();
    let user = seed_user(&state, "a@b.com", "correct").await;
    let token = token_for(&state, &user, Utc::now());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/accounts")
            .insert_header(bearer(&token))
            .set_json(json!({
                "platform": "youtube",
                "account_id": "UC123",
                "access_token": "yt"
            }))
            .to_request(),
    )
    .await;
    let account: Value = actix_test::read_body_json(res).await;
    let posts_uri = format!("/api/accounts/{}/posts", account["id"].as_str().unwrap());

    let upsert = |likes: i64, content: &str| {
        actix_test::TestRequest::put()
            .uri(&posts_uri)
            .insert_header(bearer(&token))
            .set_json(json!({
                "post_id": "vid-1",
                "content": content,
                "post_date": "2026-10-01T12:00:00Z",
                "likes_count": likes,
                "post_type": "VIDEO"
            }))
            .to_request()
    };

    let res = actix_test::call_service(&app, upsert(3, "First cut")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let first: Value = actix_test::read_body_json(res).await;

    let res = actix_test::call_service(&app, upsert(40, "Edited title")).await;
    let second: Value = actix_test::read_body_json(res).await;
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["likes_count"], 40);
    assert_eq!(second["comments_count"], 0);
    assert_eq!(second["content"], "First cut");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("{posts_uri}?limit=10"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let posts: Value = actix_test::read_body_json(res).await;
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["post_type"], "video");
}

#[actix_rt::test]
async fn test_sign_out_clears_cookie() {
    let app = actix_test::init_service(test_app(AppState::for_tests())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/api/auth/signout").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = response_cookie(&res, SESSION_COOKIE).expect("removal cookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::ZERO)
    );
}

/// Provider that accepts any code and derives the profile from it.
struct FakeProvider;

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn id(&self) -> &'static str {
        "fake"
    }

    fn name(&self) -> &'static str {
        "Fake"
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> Result<String, AuthError> {
        Ok(format!(
            "https://id.example.com/authorize?state={state}&redirect_uri={redirect_uri}"
        ))
    }

    async fn exchange_code(
        &self,
        code: &str,
        _redirect_uri: &str,
    ) -> Result<ProviderProfile, AuthError> {
        if code == "bad" {
            return Err(AuthError::Provider("invalid_grant".to_string()));
        }
        Ok(ProviderProfile {
            provider: "fake".to_string(),
            provider_account_id: code.to_string(),
            email: Some(format!("{code}@example.com")),
            name: Some("Fake User".to_string()),
            image: None,
            access_token: Some(format!("fake-token-{code}")),
        })
    }
}

fn state_with_fake_provider() -> AppState {
    let mut state = AppState::for_tests();
    state.providers.push(Arc::new(FakeProvider));
    state
}

#[actix_rt::test]
async fn test_providers_listing() {
    let app = actix_test::init_service(test_app(state_with_fake_provider())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/auth/providers").to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();

    assert_eq!(ids, vec!["credentials", "fake"]);
    assert_eq!(
        body[1]["callback_url"],
        "http://localhost:3000/api/auth/callback/fake"
    );
}

#[actix_rt::test]
async fn test_provider_round_trip() {
    let app = actix_test::init_service(test_app(state_with_fake_provider())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/signin/fake?callbackUrl=%2Finsights")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(location(&res).starts_with("https://id.example.com/authorize?state="));
    let state_cookie = response_cookie(&res, STATE_COOKIE).expect("state cookie");
    let callback_cookie = response_cookie(&res, CALLBACK_COOKIE).expect("callback cookie");
    assert_eq!(callback_cookie.value(), "http://localhost:3000/insights");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!(
                "/api/auth/callback/fake?code=alice&state={}",
                state_cookie.value()
            ))
            .cookie(state_cookie)
            .cookie(callback_cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "http://localhost:3000/insights");
    let session = response_cookie(&res, SESSION_COOKIE).expect("session cookie");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/session")
            .cookie(session)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["provider"], "fake");
    assert_eq!(body["accessToken"], "fake-token-alice");
}

#[rstest]
#[case::state_mismatch("code=alice&state=forged", "OAuthCallback")]
#[case::denied("error=access_denied&state=s1", "AccessDenied")]
#[case::provider_error("error=server_error&state=s1", "OAuthCallback")]
#[case::failed_exchange("code=bad&state=s1", "OAuthCallback")]
#[case::missing_code("state=s1", "OAuthCallback")]
#[actix_rt::test]
async fn test_provider_callback_failures(#[case] query: &str, #[case] code: &str) {
    let app = actix_test::init_service(test_app(state_with_fake_provider())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/auth/callback/fake?{query}"))
            .cookie(Cookie::new(STATE_COOKIE, "s1"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&res),
        format!("http://localhost:3000/auth/error?error={code}")
    );
    assert!(response_cookie(&res, SESSION_COOKIE).is_none());
}

#[actix_rt::test]
async fn test_provider_email_collision_is_not_linked() {
    let state = state_with_fake_provider();
    seed_user(&state, "taken@example.com", "correct").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/callback/fake?code=taken&state=s1")
            .cookie(Cookie::new(STATE_COOKIE, "s1"))
            .to_request(),
    )
    .await;

    assert_eq!(
        location(&res),
        "http://localhost:3000/auth/error?error=OAuthAccountNotLinked"
    );
}

#[actix_rt::test]
async fn test_unknown_provider_is_not_found() {
    let app = actix_test::init_service(test_app(AppState::for_tests())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/auth/signin/myspace").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
