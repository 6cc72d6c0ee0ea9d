//! Liveness probe endpoint.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

/// Route the probe is served on.
pub const LIVENESS_PATH: &str = "/liveness";

/// Fixed response body, trailing newline included.
pub const LIVENESS_BODY: &str = "I'm alive!\n";

/// `GET /liveness` — always returns 200 OK with `I'm alive!\n` as plain text.
///
/// Reads nothing from the request and touches no shared state, so it answers
/// for as long as the process can accept connections.
pub async fn liveness() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        LIVENESS_BODY,
    )
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, response::IntoResponse};

    use super::*;

    #[tokio::test]
    async fn responds_200_with_fixed_body() {
        let response = liveness().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"I'm alive!\n");
    }

    #[tokio::test]
    async fn content_type_is_plain_text() {
        let response = liveness().await.into_response();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
