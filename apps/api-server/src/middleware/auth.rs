//! Authentication extractors.

use std::future::{Ready, ready};

use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, dev::Payload, web};
use uuid::Uuid;

use insighto_core::auth::SessionClaims;
use insighto_core::ports::{Authorization, DenialReason};
use insighto_shared::ErrorResponse;

use super::error::problem_response;
use crate::session::presented_token;
use crate::state::AppState;

/// Signed-in user identity extractor.
///
/// Use this in handlers to require a session:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
///
/// Claims already resolved by [`RequireSession`](super::guard::RequireSession)
/// are reused; otherwise the bearer token or session cookie is decoded.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub claims: SessionClaims,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
            claims,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("session rejected: {0:?}")]
    Denied(DenialReason),
    #[error("session store is not configured")]
    Unconfigured,
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthenticationError::Denied(_) => StatusCode::UNAUTHORIZED,
            AuthenticationError::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AuthenticationError::Denied(DenialReason::MissingSession) => {
                ErrorResponse::new(401, "Authentication Required")
                    .with_detail("Sign in or provide a Bearer token in the Authorization header.")
            }
            AuthenticationError::Denied(DenialReason::Expired) => {
                ErrorResponse::new(401, "Session Expired")
                    .with_detail("Your session has expired. Please sign in again.")
            }
            AuthenticationError::Denied(DenialReason::Invalid) => {
                ErrorResponse::new(401, "Invalid Session")
            }
            AuthenticationError::Unconfigured => ErrorResponse::internal_error(),
        };

        problem_response(self.status_code(), error)
    }
}

/// Resolve the request's session, preferring claims the guard already stored.
pub fn authorize_request(req: &HttpRequest) -> Result<SessionClaims, AuthenticationError> {
    if let Some(claims) = req.extensions().get::<SessionClaims>() {
        return Ok(claims.clone());
    }

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthenticationError::Unconfigured);
    };

    match state.sessions.authorize(presented_token(req).as_deref()) {
        Authorization::Granted(claims) => Ok(claims),
        Authorization::Denied(reason) => Err(AuthenticationError::Denied(reason)),
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize_request(req).map(Identity::from))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(
            authorize_request(req).ok().map(Identity::from),
        )))
    }
}
