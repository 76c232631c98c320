//! Request ID middleware.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use tokio::task_local;
use tracing::Instrument;
use uuid::Uuid;

task_local! {
    static CURRENT_REQUEST_ID: RequestId;
}

const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Longest client-supplied id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Tags every request with an id, echoed in the `X-Request-ID` response
/// header, attached to the request's tracing span and readable through
/// [`RequestId::current`] while the request is served.
///
/// An id supplied by a proxy is kept when it is short and printable.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

fn accept_incoming(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId(
            req.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| accept_incoming(v))
                .map(String::from)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        );

        let span = tracing::info_span!("request", request_id = %request_id.as_str());
        let header = HeaderValue::from_str(request_id.as_str()).ok();

        // Inner middleware may answer from `call` itself, so the id is in
        // scope there as well as while the returned future runs.
        let fut = CURRENT_REQUEST_ID.sync_scope(request_id.clone(), || self.service.call(req));

        Box::pin(
            CURRENT_REQUEST_ID
                .scope(request_id, async move {
                    let mut res = fut.await?;
                    if let Some(value) = header {
                        res.headers_mut()
                            .insert(HeaderName::from_static("x-request-id"), value);
                    }
                    Ok::<_, Error>(res)
                })
                .instrument(span),
        )
    }
}

/// Id of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// The id in scope, or `None` outside [`RequestIdMiddleware`].
    pub fn current() -> Option<Self> {
        CURRENT_REQUEST_ID.try_with(|id| id.clone()).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("abc-123", true)]
    #[case("lb.7f3a_9", true)]
    #[case("", false)]
    #[case("has space", false)]
    #[case("<script>", false)]
    fn test_accept_incoming(#[case] value: &str, #[case] accepted: bool) {
        assert_eq!(accept_incoming(value), accepted);
    }

    async fn current_id() -> HttpResponse {
        HttpResponse::Ok().body(RequestId::current().map(RequestId::into_inner).unwrap_or_default())
    }

    #[actix_rt::test]
    async fn test_incoming_id_echoed() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/", web::get().to(current_id)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "edge-42"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.headers().get("x-request-id").unwrap(), "edge-42");
        assert_eq!(actix_test::read_body(res).await, "edge-42");
    }

    #[actix_rt::test]
    async fn test_rejected_id_is_replaced() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/", web::get().to(current_id)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "not allowed"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        let header = res.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
        assert_ne!(header, "not allowed");
        assert_eq!(actix_test::read_body(res).await, header.as_bytes());
    }

    #[test]
    fn test_no_id_outside_a_request() {
        assert_eq!(RequestId::current(), None);
    }
}
