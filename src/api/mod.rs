//! HTTP surface of the probe: one route, no state.

use axum::{routing::get, Router};

pub mod health;

pub use health::{LIVENESS_BODY, LIVENESS_PATH};

/// Build the probe's axum router with request tracing attached.
pub fn router() -> Router {
    Router::new()
        .route(LIVENESS_PATH, get(health::liveness))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::DEBUG),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::DEBUG),
                ),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use tower::ServiceExt; // oneshot

    use super::*;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn get_liveness_returns_fixed_body() {
        let response = router()
            .oneshot(request(Method::GET, "/liveness"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], LIVENESS_BODY.as_bytes());
    }

    #[tokio::test]
    async fn query_string_is_ignored() {
        let response = router()
            .oneshot(request(Method::GET, "/liveness?verbose=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"I'm alive!\n");
    }

    #[tokio::test]
    async fn request_body_is_not_read() {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/liveness")
            .body(Body::from("ignored payload"))
            .unwrap();
        let response = router().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"I'm alive!\n");
    }

    #[tokio::test]
    async fn head_liveness_returns_200_without_body() {
        let response = router()
            .oneshot(request(Method::HEAD, "/liveness"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty(), "HEAD response carried a body: {body:?}");
    }

    #[tokio::test]
    async fn post_is_method_not_allowed() {
        let response = router()
            .oneshot(request(Method::POST, "/liveness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = router()
            .oneshot(request(Method::GET, "/readiness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
