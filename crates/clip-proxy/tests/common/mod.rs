use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use clip_proxy::{ClipProxyConfig, Env};
use serde_json::{Value, json};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

/// Upstream with three hits for any phrase except `nothing` and `broken`;
/// hit `b` fails its detail lookup.
pub async fn start_mock_upstream() -> SocketAddr {
    let app = Router::new()
        .route(
            "/api/v1/phrases/search",
            get(|axum::extract::RawQuery(query): axum::extract::RawQuery| async move {
                let query = query.unwrap_or_default();
                if query.contains("q=broken") {
                    return (StatusCode::BAD_GATEWAY, "upstream down").into_response();
                }
                if query.contains("q=nothing") {
                    return Json(json!({ "results": [] })).into_response();
                }
                Json(json!({
                    "results": [
                        {
                            "id": "a",
                            "subtitle": {
                                "text": "hello world",
                                "start": 1000,
                                "end": 2000,
                                "words": [
                                    { "text": "hello", "start": 0, "end": 400 },
                                    { "text": "world", "start": 450, "end": 900 }
                                ]
                            }
                        },
                        { "id": "b" },
                        { "id": "c" }
                    ]
                }))
                .into_response()
            }),
        )
        .route(
            "/api/v1/phrases/{id}",
            get(|Path(id): Path<String>| async move { detail(&id) }),
        );

    serve(app).await
}

fn detail(id: &str) -> Response {
    let body: Value = match id {
        "a" => json!({ "video_url": "https://cdn.test/a.mp4" }),
        "c" => json!({ "data": { "url": "https://cdn.test/c.mp4" } }),
        _ => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    Json(body).into_response()
}

pub async fn start_proxy(upstream: SocketAddr) -> SocketAddr {
    let env = Env {
        upstream_base_url: format!("http://{upstream}"),
        upstream_cookie: Some("sid=test".to_string()),
        ..Default::default()
    };
    let router = clip_proxy::router(ClipProxyConfig::new(&env)).unwrap();

    serve(router).await
}
