//! Forwards the logical page path to handlers in the `x-pathname` header.
//!
//! A value already set by an upstream proxy wins; otherwise the request's own
//! path and query are copied in.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::PATHNAME_HEADER;

/// Middleware factory; wrap an `App` with it.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use leaves_web::PathForwarding;
///
/// let app = App::new().wrap(PathForwarding);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PathForwarding;

impl<S, B> Transform<S, ServiceRequest> for PathForwarding
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PathForwardingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PathForwardingMiddleware { service }))
    }
}

/// Service wrapper produced by [`PathForwarding`].
pub struct PathForwardingMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PathForwardingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if !req.headers().contains_key(PATHNAME_HEADER) {
            let logical = req
                .uri()
                .path_and_query()
                .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
            match HeaderValue::from_str(&logical) {
                Ok(value) => {
                    req.headers_mut()
                        .insert(HeaderName::from_static(PATHNAME_HEADER), value);
                }
                Err(err) => warn!(error = %err, path = %logical, "unforwardable request path"),
            }
        }
        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};
    use rstest::rstest;

    async fn forwarded(uri: &str, header: Option<&str>) -> String {
        let app = test::init_service(
            App::new()
                .wrap(PathForwarding)
                .default_service(web::to(|req: HttpRequest| async move {
                    let pathname = req
                        .headers()
                        .get(PATHNAME_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("<none>")
                        .to_owned();
                    HttpResponse::Ok().body(pathname)
                })),
        )
        .await;
        let mut req = test::TestRequest::get().uri(uri);
        if let Some(value) = header {
            req = req.insert_header((PATHNAME_HEADER, value));
        }
        let body = test::call_and_read_body(&app, req.to_request()).await;
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    #[rstest]
    #[case("/", "/")]
    #[case("/dynamic/a", "/dynamic/a")]
    #[case("/dynamic/a?tab=2", "/dynamic/a?tab=2")]
    #[actix_web::test]
    async fn request_path_is_forwarded(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(forwarded(uri, None).await, expected);
    }

    #[actix_web::test]
    async fn upstream_header_is_kept() {
        assert_eq!(forwarded("/", Some("/dynamic/proxied")).await, "/dynamic/proxied");
    }
}
