use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// `METRICS_ENABLED=true` (or `1`) turns metrics on. Off by default.
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("METRICS_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    })
}

/// Installs the Prometheus recorder and its upkeep task.
///
/// Returns `None` when metrics are disabled or the recorder cannot be installed.
/// Must be called from inside a Tokio runtime.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_metrics_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )
        .and_then(|builder| builder.install_recorder());

    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "failed to install Prometheus recorder, metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

// Auth and audit counters. `surface` is `admin` or `api`.

pub fn track_login_success(surface: &'static str, role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("logins_total", "surface" => surface, "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure(surface: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("logins_total", "surface" => surface, "status" => "failure").increment(1);
}

pub fn track_token_rejected(surface: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("tokens_rejected_total", "surface" => surface).increment(1);
}

pub fn track_access_denied(surface: &'static str, role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("access_denied_total", "surface" => surface, "role" => role.to_string()).increment(1);
}

pub fn track_audit_written(action: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("audit_entries_total", "action" => action.to_string(), "status" => "written").increment(1);
}

pub fn track_audit_failure(action: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("audit_entries_total", "action" => action.to_string(), "status" => "failed").increment(1);
}
