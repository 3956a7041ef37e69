//! HTTP 요청 metrics middleware.
//!
//! 라벨은 실제 URI가 아니라 라우터가 매칭한 라우트 템플릿입니다
//! (`/user/id/{id}`, `/admin/products/{id}` 등). 이메일 같은 경로 값은 라벨에 남지 않습니다.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::{record_http_response, UNMATCHED_ROUTE};

/// 요청의 라우트 라벨.
///
/// 어떤 라우트에도 매칭되지 않은 요청(404 fallback)은 하나의 라벨로 묶입니다.
fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned())
}

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// 인증/인가 거부(401/403)도 해당 라우트의 응답으로 함께 기록됩니다.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = route_label(&request);

    let response = next.run(request).await;

    record_http_response(
        method.as_str(),
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
