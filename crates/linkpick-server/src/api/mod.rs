use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use linkpick_resolver::{resolve, ResolveError, ResolverClient};

use crate::middleware::{request_id, RequestId};

/// Error strings are part of the wire contract with the mobile app; the
/// detailed cause stays in the server log.
const MSG_URL_REQUIRED: &str = "url 필요";
const MSG_UNSUPPORTED_SHOP: &str = "지원하지 않는 쇼핑몰입니다.";
const MSG_PARSE_FAILED: &str = "상품 정보 파싱 실패";

#[derive(Clone)]
pub struct AppState {
    pub client: ResolverClient,
}

#[derive(Debug, Deserialize)]
struct ParseLinkRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/parse-link", post(parse_link))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn parse_link(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: axum::body::Bytes,
) -> axum::response::Response {
    // Absent body, non-JSON body, and `{"url": ""}` all count as a missing url.
    let request = serde_json::from_slice::<ParseLinkRequest>(&body).ok();
    let url = request
        .as_ref()
        .and_then(|req| req.url.as_deref())
        .map(str::trim)
        .filter(|u| !u.is_empty());

    let Some(url) = url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: MSG_URL_REQUIRED,
            }),
        )
            .into_response();
    };

    match resolve(&state.client, url).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) if err.is_caller_error() => {
            tracing::debug!(request_id = %req_id.0, error = %err, "rejected parse-link request");
            let error = match err {
                ResolveError::InvalidInput => MSG_URL_REQUIRED,
                _ => MSG_UNSUPPORTED_SHOP,
            };
            (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
        }
        Err(err) => {
            tracing::error!(request_id = %req_id.0, url, error = %err, "parse-link resolution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: MSG_PARSE_FAILED,
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let client = ResolverClient::new(5, "linkpick-test/0.1").expect("test client");
        build_app(AppState { client })
    }

    fn post_parse_link(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/parse-link")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[tokio::test]
    async fn missing_url_field_returns_url_required() {
        let response = test_app()
            .oneshot(post_parse_link("{}"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"error": "url 필요"}));
    }

    #[tokio::test]
    async fn empty_url_returns_url_required() {
        let response = test_app()
            .oneshot(post_parse_link(r#"{"url": "  "}"#))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("url 필요"));
    }

    #[tokio::test]
    async fn missing_body_returns_url_required() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/parse-link")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("url 필요"));
    }

    #[tokio::test]
    async fn unsupported_shop_returns_400_without_fetching() {
        // Dispatch rejects the host before any product-page fetch, so this
        // test needs no mock server.
        let response = test_app()
            .oneshot(post_parse_link(
                r#"{"url": "https://smartstore.naver.com/item/1"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["error"].as_str(),
            Some("지원하지 않는 쇼핑몰입니다.")
        );
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"].as_str(), Some("ok"));
    }

    #[tokio::test]
    async fn responses_carry_a_request_id_header() {
        let response = test_app()
            .oneshot(post_parse_link("{}"))
            .await
            .expect("response");

        let header = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .expect("x-request-id header");
        assert_eq!(header.len(), 36, "expected a UUID request id");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/parse-link")
                    .header("origin", "https://app.example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
