//! Access log for every request.
//!
//! One `info` event per completed request with method, path, status,
//! duration, peer address, user agent and the authenticated user (or
//! `anonymous`). Requests slower than the configured threshold also
//! produce a `warn` event.

use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::{Error, HttpMessage};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::USER_AGENT;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::auth::RequestUserId;

/// Request logging middleware.
///
/// ```ignore
/// App::new().wrap(RequestLog::new(Duration::from_millis(1000)))
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestLog {
    slow_threshold: Duration,
}

impl RequestLog {
    pub fn new(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware {
            service,
            slow_threshold: self.slow_threshold,
        }))
    }
}

/// Service wrapper produced by [`RequestLog`].
pub struct RequestLogMiddleware<S> {
    service: S,
    slow_threshold: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
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
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let peer = req
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".into());
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let slow_threshold = self.slow_threshold;

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let elapsed = started.elapsed();
            let duration_ms = elapsed.as_millis() as u64;
            let user = res
                .request()
                .extensions()
                .get::<RequestUserId>()
                .map(|id| id.0.to_string())
                .unwrap_or_else(|| "anonymous".into());
            let status = res.status().as_u16();

            info!(
                %method,
                %path,
                status,
                duration_ms,
                %peer,
                %user_agent,
                %user,
                "request completed"
            );
            if elapsed > slow_threshold {
                warn!(
                    %method,
                    %path,
                    status,
                    duration_ms,
                    threshold_ms = slow_threshold.as_millis() as u64,
                    "slow request"
                );
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn passes_responses_through() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLog::new(Duration::ZERO))
                .route("/", web::get().to(|| async { HttpResponse::Accepted().finish() })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status().as_u16(), 202);
    }
}
