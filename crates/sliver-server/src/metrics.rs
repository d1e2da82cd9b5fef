use metrics::{counter, gauge};
use std::sync::OnceLock;

static METRICS_INIT: OnceLock<()> = OnceLock::new();

pub fn init_metrics() {
    METRICS_INIT.get_or_init(|| {
        // Metrics will be registered automatically when used
    });
}

pub fn record_session_start(camera: &str) {
    counter!("session_starts_total", "camera" => camera.to_string()).increment(1);
}

pub fn record_session_stop() {
    counter!("session_stops_total").increment(1);
}

pub fn record_camera_failure(reason: &str) {
    counter!("camera_failures_total", "reason" => reason.to_string()).increment(1);
}

pub fn record_inspection_good() {
    counter!("inspections_total", "outcome" => "good").increment(1);
}

pub fn record_inspection_defect() {
    counter!("inspections_total", "outcome" => "defect").increment(1);
}

pub fn update_defect_rate(rate: f64) {
    gauge!("defect_rate_pct").set(rate);
}

pub fn update_history_len(len: usize) {
    gauge!("defect_history_len").set(len as f64);
}
