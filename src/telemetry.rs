//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder; without a recorder
//! installed, all metric calls are no-ops.
//!
//! All metrics are prefixed with `segscope_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).

/// Total uploads sent to the classification service.
///
/// Labels: `status` ("ok" | "error").
pub const UPLOADS_TOTAL: &str = "segscope_uploads_total";

/// Upload round-trip duration in seconds.
pub const UPLOAD_DURATION_SECONDS: &str = "segscope_upload_duration_seconds";

/// Files refused by the upload gate.
///
/// Labels: `reason` ("no_file_selected" | "wrong_format" | "too_large" | "busy").
pub const VALIDATION_REJECTIONS_TOTAL: &str = "segscope_validation_rejections_total";

/// Exports written.
///
/// Labels: `scope` ("all" | "filtered").
pub const EXPORTS_TOTAL: &str = "segscope_exports_total";
