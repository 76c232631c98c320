//! Sign-in, registration and session handlers.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use insighto_core::auth::{
    AuthenticatedUser, CREDENTIALS_PROVIDER, DEFAULT_REDIRECT_PATH, ProviderGrant, SessionClaims,
    resolve_redirect,
};
use insighto_core::ports::AuthError;
use insighto_shared::dto::{
    CredentialsRequest, OAuthCallbackQuery, ProviderInfo, RegisterRequest, SessionResponse,
    SignInQuery,
};
use insighto_shared::guard::SIGN_IN_PATH;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::guard::sign_in_redirect;
use crate::session::{
    CALLBACK_COOKIE, SESSION_COOKIE, STATE_COOKIE, flow_cookie, removal_cookie, session_cookie,
    session_view,
};
use crate::state::AppState;

/// Page that explains a failed provider sign-in.
const AUTH_ERROR_PATH: &str = "/auth/error";

/// Mint a session for a freshly authenticated user.
fn start_session(
    state: &AppState,
    user: &AuthenticatedUser,
    grant: ProviderGrant,
) -> Result<(String, SessionClaims), AuthError> {
    let claims = SessionClaims::on_sign_in(user, grant, Utc::now(), state.sessions.max_age());
    let token = state.sessions.issue(&claims)?;
    Ok((token, claims))
}

fn session_response(
    mut builder: HttpResponseBuilder,
    state: &AppState,
    token: String,
    claims: &SessionClaims,
    url: String,
) -> HttpResponse {
    let max_age = state.sessions.max_age();
    builder
        .cookie(session_cookie(token.clone(), max_age, state.secure_cookies))
        .json(SessionResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: max_age.num_seconds().max(0) as u64,
            session: session_view(claims),
            url,
        })
}

fn callback_uri(base_url: &str, provider: &str) -> String {
    format!("{base_url}/api/auth/callback/{provider}")
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .authenticator
        .register(&req.email, &req.password, req.name, req.timezone)
        .await?;
    let (token, claims) = start_session(&state, &user, ProviderGrant::credentials())?;
    let url = resolve_redirect(DEFAULT_REDIRECT_PATH, &state.base_url);

    Ok(session_response(
        HttpResponse::Created(),
        &state,
        token,
        &claims,
        url,
    ))
}

/// POST /api/auth/callback/credentials
///
/// Accepts a JSON body or a form post.
pub async fn credentials_callback(
    state: web::Data<AppState>,
    body: web::Either<web::Json<CredentialsRequest>, web::Form<CredentialsRequest>>,
) -> AppResult<HttpResponse> {
    let req = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    let user = state
        .authenticator
        .authorize_credentials(req.email.as_deref(), req.password.as_deref())
        .await?
        .ok_or(AppError::CredentialsSignin)?;

    let (token, claims) = start_session(&state, &user, ProviderGrant::credentials())?;
    let target = req.callback_url.as_deref().unwrap_or(DEFAULT_REDIRECT_PATH);
    let url = resolve_redirect(target, &state.base_url);

    Ok(session_response(HttpResponse::Ok(), &state, token, &claims, url))
}

/// GET /api/auth/signin/{provider}
pub async fn provider_sign_in(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SignInQuery>,
) -> AppResult<HttpResponse> {
    let provider_id = path.into_inner();
    let target = resolve_redirect(
        query.callback_url.as_deref().unwrap_or(DEFAULT_REDIRECT_PATH),
        &state.base_url,
    );

    // Credentials have no consent screen; send the visitor to the form.
    if provider_id == CREDENTIALS_PROVIDER {
        let location = format!("{}{}", state.base_url, sign_in_redirect(&target));
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, location))
            .finish());
    }

    let provider = state
        .provider(&provider_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown sign-in provider: {provider_id}")))?;

    let csrf = Uuid::new_v4().simple().to_string();
    let location = provider.authorization_url(&csrf, &callback_uri(&state.base_url, provider.id()))?;

    tracing::debug!(provider = provider.id(), "Starting provider sign-in");

    Ok(HttpResponse::SeeOther()
        .cookie(flow_cookie(STATE_COOKIE, csrf, state.secure_cookies))
        .cookie(flow_cookie(CALLBACK_COOKIE, target, state.secure_cookies))
        .insert_header((header::LOCATION, location))
        .finish())
}

/// Codes shown on the sign-in error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderFailure {
    /// The provider reported an error or the round trip was tampered with.
    OAuthCallback,
    AccessDenied,
    /// The email already belongs to an account signed in another way.
    OAuthAccountNotLinked,
    /// Sign-in failed on our side.
    Callback,
}

impl ProviderFailure {
    fn code(self) -> &'static str {
        match self {
            Self::OAuthCallback => "OAuthCallback",
            Self::AccessDenied => "AccessDenied",
            Self::OAuthAccountNotLinked => "OAuthAccountNotLinked",
            Self::Callback => "Callback",
        }
    }
}

struct ProviderSignIn {
    token: String,
    target: String,
}

async fn complete_provider_sign_in(
    req: &HttpRequest,
    state: &AppState,
    provider_id: &str,
    query: OAuthCallbackQuery,
) -> AppResult<Result<ProviderSignIn, ProviderFailure>> {
    let provider = state
        .provider(provider_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown sign-in provider: {provider_id}")))?;

    if let Some(error) = query.error {
        tracing::info!(provider = provider_id, %error, "Provider returned an error");
        return Ok(Err(if error == "access_denied" {
            ProviderFailure::AccessDenied
        } else {
            ProviderFailure::OAuthCallback
        }));
    }

    let expected = req.cookie(STATE_COOKIE).map(|c| c.value().to_string());
    let state_matches = matches!(
        (expected.as_deref(), query.state.as_deref()),
        (Some(expected), Some(given)) if !expected.is_empty() && expected == given
    );
    if !state_matches {
        tracing::warn!(provider = provider_id, "OAuth state mismatch");
        return Ok(Err(ProviderFailure::OAuthCallback));
    }

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return Ok(Err(ProviderFailure::OAuthCallback));
    };

    let profile = match provider
        .exchange_code(&code, &callback_uri(&state.base_url, provider.id()))
        .await
    {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(provider = provider_id, error = %e, "Code exchange failed");
            return Ok(Err(ProviderFailure::OAuthCallback));
        }
    };

    let grant = ProviderGrant {
        provider: profile.provider.clone(),
        access_token: profile.access_token.clone(),
    };

    let user = match state.authenticator.sign_in_with_provider(profile).await {
        Ok(user) => user,
        Err(AuthError::AccountNotLinked) => return Ok(Err(ProviderFailure::OAuthAccountNotLinked)),
        Err(e) => {
            tracing::error!(provider = provider_id, error = %e, "Provider sign-in failed");
            return Ok(Err(ProviderFailure::Callback));
        }
    };

    let (token, _claims) = match start_session(state, &user, grant) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue session");
            return Ok(Err(ProviderFailure::Callback));
        }
    };

    // The cookie came back from the browser, so it is resolved again.
    let target = req
        .cookie(CALLBACK_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_else(|| DEFAULT_REDIRECT_PATH.to_string());

    Ok(Ok(ProviderSignIn {
        token,
        target: resolve_redirect(&target, &state.base_url),
    }))
}

/// GET /api/auth/callback/{provider}
pub async fn provider_callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> AppResult<HttpResponse> {
    let provider_id = path.into_inner();
    let outcome = complete_provider_sign_in(&req, &state, &provider_id, query.into_inner()).await?;

    let mut builder = HttpResponse::SeeOther();
    builder
        .cookie(removal_cookie(STATE_COOKIE, "/api/auth"))
        .cookie(removal_cookie(CALLBACK_COOKIE, "/api/auth"));

    match outcome {
        Ok(signed_in) => {
            builder
                .cookie(session_cookie(
                    signed_in.token,
                    state.sessions.max_age(),
                    state.secure_cookies,
                ))
                .insert_header((header::LOCATION, signed_in.target));
        }
        Err(failure) => {
            let location = format!(
                "{}{AUTH_ERROR_PATH}?error={}",
                state.base_url,
                failure.code()
            );
            builder.insert_header((header::LOCATION, location));
        }
    }

    Ok(builder.finish())
}

/// GET /api/auth/session
///
/// The decoded session, or `null`. The token is never re-issued here.
pub async fn session(identity: OptionalIdentity) -> HttpResponse {
    HttpResponse::Ok().json(identity.0.map(|identity| session_view(&identity.claims)))
}

/// GET /api/auth/providers
pub async fn providers(state: web::Data<AppState>) -> HttpResponse {
    let base = &state.base_url;

    let mut providers = vec![ProviderInfo {
        id: CREDENTIALS_PROVIDER.to_string(),
        name: "Credentials".to_string(),
        signin_url: format!("{base}/api/auth/signin/{CREDENTIALS_PROVIDER}"),
        callback_url: callback_uri(base, CREDENTIALS_PROVIDER),
    }];
    providers.extend(state.providers.iter().map(|p| ProviderInfo {
        id: p.id().to_string(),
        name: p.name().to_string(),
        signin_url: format!("{base}/api/auth/signin/{}", p.id()),
        callback_url: callback_uri(base, p.id()),
    }));

    HttpResponse::Ok().json(providers)
}

/// POST /api/auth/signout
pub async fn sign_out(state: web::Data<AppState>, identity: OptionalIdentity) -> HttpResponse {
    if let Some(identity) = identity.0 {
        tracing::info!(user_id = %identity.user_id, "User signed out");
    }

    HttpResponse::Ok()
        .cookie(removal_cookie(SESSION_COOKIE, "/"))
        .json(json!({ "url": format!("{}{SIGN_IN_PATH}", state.base_url) }))
}
