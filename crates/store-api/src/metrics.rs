//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 인증 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// # Errors
///
/// 레코더가 이미 설치되어 있거나 버킷 설정이 잘못되면 `BuildError`.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        // HTTP 요청 지속 시간 히스토그램 버킷 설정
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// 라우트 템플릿에 매칭되지 않은 요청의 `route` 라벨.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// HTTP 응답 카운터와 처리 시간을 기록합니다.
///
/// `route`는 라우트 템플릿이어야 합니다. 실제 경로 값을 넣으면 라벨 카디널리티가 무한히 늘어납니다.
pub fn record_http_response(method: &str, route: &str, status: u16, duration_secs: f64) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 인증 메트릭 헬퍼 함수
// ============================================================================

/// 인증/인가 실패 카운터 증가.
pub fn record_auth_failure(reason: &'static str) {
    counter!("auth_failures_total", "reason" => reason).increment(1);
}

/// 로그인 결과 카운터 증가.
pub fn record_login(outcome: &'static str) {
    counter!("logins_total", "outcome" => outcome).increment(1);
}
