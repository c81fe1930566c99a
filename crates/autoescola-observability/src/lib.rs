//! Autoescola Observability
//!
//! - [`logging`]: tracing subscriber setup and the request logging middleware
//! - [`metrics`]: Prometheus exporter and auth/audit counters
//!
//! Logging is always on. Metrics are opt-in with `METRICS_ENABLED=true`; when
//! disabled the `track_*` helpers are no-ops.
//!
//! # Examples
//!
//! ```no_run
//! use autoescola_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let metrics = init_metrics();
//!     // ... application code ...
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use logging::{init_tracing, logging_middleware};
pub use metrics::{
    init_metrics, is_metrics_enabled, metrics_middleware, track_access_denied,
    track_audit_failure, track_audit_written, track_login_failure, track_login_success,
    track_token_rejected,
};
