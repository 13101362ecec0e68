use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::internal_body;

/// `CatchPanicLayer` handler: log the payload, answer with the generic 500 envelope.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Panic recovered: {detail}");

    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(internal_body())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_becomes_generic_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
