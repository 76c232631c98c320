//! Page guard - redirects anonymous visitors to the sign-in page.

use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use futures::future::LocalBoxFuture;
use url::form_urlencoded;

use insighto_shared::guard::SIGN_IN_PATH;

use super::auth::{AuthenticationError, authorize_request};

/// Sign-in URL that returns the visitor to `target` afterwards.
pub fn sign_in_redirect(target: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("callbackUrl", target)
        .finish();
    format!("{SIGN_IN_PATH}?{query}")
}

/// Requires a valid session for every request in the wrapped scope.
///
/// Granted claims are stored in request extensions for
/// [`Identity`](super::auth::Identity) to pick up. A denied request never
/// reaches the handler and receives `303 See Other` to the sign-in page.
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireSessionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionService { service }))
    }
}

pub struct RequireSessionService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize_request(req.request()) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(AuthenticationError::Denied(reason)) => {
                let target = req
                    .uri()
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| req.path().to_string());
                tracing::debug!(path = %target, ?reason, "Redirecting to sign-in");

                let response = HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, sign_in_redirect(&target)))
                    .finish();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
            Err(err) => {
                let response = actix_web::ResponseError::error_response(&err);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_redirect_encodes_target() {
        assert_eq!(
            sign_in_redirect("/insights?range=7d"),
            "/auth/signin?callbackUrl=%2Finsights%3Frange%3D7d"
        );
    }
}
