//! Request extractors whose rejections use the API error body.
//!
//! axum's own `Json` and `Path` reject with plain text. These wrappers keep
//! the status axum picks and render `{"error", "message"}` instead.

use axum::{
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::error_response;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RequestRejection))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RequestRejection))]
pub struct ApiPath<T>(pub T);

/// Rejection raised when a request body or path cannot be decoded.
#[derive(Debug)]
pub struct RequestRejection {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl From<JsonRejection> for RequestRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            code: "INVALID_REQUEST_BODY",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for RequestRejection {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            code: "INVALID_PATH",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        error_response(self.status, self.code, self.message)
    }
}
