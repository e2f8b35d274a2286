use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use lr_shared::{ErrorConfig, Language};
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::handlers::error::render_actix_error;
use crate::i18n::preferred_languages;

/// Header carrying the request ID in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Ranked client languages stored in request extensions
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLanguages(pub Vec<Language>);

/// Middleware rendering every error response in the client's languages.
///
/// Covers [`ApiError`](crate::handlers::ApiError) from handlers, errors actix
/// raises itself (extractors, payloads), and errors returned by inner
/// services.
pub struct ErrorHandlerMiddleware {
    config: Rc<ErrorConfig>,
}

impl ErrorHandlerMiddleware {
    pub fn new(config: ErrorConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }
}

impl Default for ErrorHandlerMiddleware {
    fn default() -> Self {
        Self::new(ErrorConfig::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddlewareService {
            service: Rc::new(service),
            config: Rc::clone(&self.config),
        }))
    }
}

pub struct ErrorHandlerMiddlewareService<S> {
    service: Rc<S>,
    config: Rc<ErrorConfig>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = Rc::clone(&self.config);

        // Keep the caller's request ID or mint one
        let request_id = config.enable_request_id.then(|| {
            req.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
                .unwrap_or_else(|| Uuid::new_v4().to_string())
        });
        if let Some(id) = &request_id {
            req.extensions_mut().insert(RequestId(id.clone()));
        }

        let languages = preferred_languages(req.request(), &config);
        req.extensions_mut().insert(RequestLanguages(languages));

        let http_req = req.request().clone();

        Box::pin(async move {
            let mut res = match service.call(req).await {
                Ok(res) => {
                    let rendered = res
                        .response()
                        .error()
                        .map(|err| render_actix_error(res.request(), err, &config));
                    match rendered {
                        Some(response) => res.into_response(response).map_into_right_body(),
                        None => res.map_into_left_body(),
                    }
                }
                Err(err) => {
                    let response = render_actix_error(&http_req, &err, &config);
                    ServiceResponse::new(http_req, response).map_into_right_body()
                }
            };

            if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            Ok(res)
        })
    }
}

/// Access to what the middleware stored on a request
pub trait ErrorHandlingExt {
    /// Request ID from extensions, else from the `X-Request-ID` header
    fn request_id(&self) -> Option<String>;

    /// Languages parsed by the middleware, if it ran
    fn languages(&self) -> Option<Vec<Language>>;
}

impl ErrorHandlingExt for ServiceRequest {
    fn request_id(&self) -> Option<String> {
        self.request().request_id()
    }

    fn languages(&self) -> Option<Vec<Language>> {
        self.request().languages()
    }
}

impl ErrorHandlingExt for HttpRequest {
    fn request_id(&self) -> Option<String> {
        self.extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .or_else(|| {
                self.headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            })
    }

    fn languages(&self) -> Option<Vec<Language>> {
        self.extensions()
            .get::<RequestLanguages>()
            .map(|languages| languages.0.clone())
    }
}
