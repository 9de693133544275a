//! Request tracing middleware.
//!
//! Every request runs inside a [`TraceId`] scope. A well-formed `trace-id`
//! request header is reused so callers can correlate retries; otherwise a
//! fresh UUID is generated. The identifier is echoed on every response and
//! captured by domain errors raised while handling the request.
//!
//! Task-local values do not follow spawned tasks. Wrap spawned work in
//! [`TraceId::scope`] to keep the identifier.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory attaching a request-scoped [`TraceId`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn incoming_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = incoming_trace_id(&req).unwrap_or_else(TraceId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        // The inner call must start inside the scope so extractors see the id.
        Box::pin(TraceId::scope(trace_id, {
            let fut = TraceId::sync_scope(trace_id, || self.service.call(req));
            async move {
                let mut res = fut.await?;
                debug!(
                    %trace_id,
                    %method,
                    path = %path,
                    status = res.status().as_u16(),
                    "request completed"
                );
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(err) => {
                        error!(error = %err, %trace_id, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
        }))
    }
}
