use crate::control::{start_session, start_training, stop_session};
use crate::metrics;
use crate::state::{AppState, EventLevel, InspectionSettings, UiEvent};
use crate::static_ui;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use sliver_core::history::DefectEntry;
use sliver_core::report::ReportData;
use sliver_core::session::{SessionStatus, ACTIVE_CONFIDENCE_PCT};
use sliver_core::viewer::download_filename;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
struct StartRequest {
    camera: String,
}

#[derive(Deserialize)]
struct AddDefectRequest {
    source: String,
}

#[derive(Deserialize)]
struct OpenRequest {
    index: usize,
}

#[derive(Deserialize)]
struct NavRequest {
    delta: i64,
}

#[derive(Deserialize)]
struct EventsQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct StatusResponse {
    status: SessionStatus,
    camera: Option<String>,
    inspected: u64,
    good: u64,
    bad: u64,
    defect_rate: String,
    defect_bar_pct: f64,
    confidence_pct: Option<u8>,
    uptime: String,
    uptime_seconds: u64,
}

#[derive(Serialize)]
struct HistoryResponse {
    entries: Vec<DefectEntry>,
    len: usize,
    cap: usize,
}

#[derive(Serialize)]
struct ViewerResponse {
    open: bool,
    index: Option<usize>,
    position: Option<String>,
    image_source: Option<String>,
    prev_disabled: bool,
    next_disabled: bool,
}

#[derive(Serialize)]
struct DownloadResponse {
    filename: String,
    image_source: String,
}

#[derive(Serialize)]
struct EventView {
    time: String,
    text: String,
    level: EventLevel,
}

#[derive(Serialize)]
struct HealthResponse {
    status: SessionStatus,
    uptime_seconds: u64,
    inspected: u64,
    defect_rate: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/report", get(report_page))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/history", get(history_handler).post(add_defect_handler))
        .route("/viewer", get(viewer_handler))
        .route("/viewer/open", post(viewer_open_handler))
        .route("/viewer/nav", post(viewer_nav_handler))
        .route("/viewer/close", post(viewer_close_handler))
        .route("/viewer/download", get(viewer_download_handler))
        .route("/video", get(video_handler))
        .route("/events", get(events_handler))
        .route("/report/data", get(report_data_handler))
        .route("/settings", get(settings_handler).post(save_settings_handler))
        .route("/train", post(train_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn dashboard_page() -> Html<&'static str> {
    Html(static_ui::UI_HTML)
}

async fn report_page() -> Html<&'static str> {
    Html(static_ui::REPORT_HTML)
}

async fn status_snapshot(state: &AppState) -> StatusResponse {
    let session = state.session.read().await;
    let counters = state.counters.read().await;
    let active = session.is_active();
    StatusResponse {
        status: session.status(),
        camera: session.camera_label().map(str::to_string),
        inspected: counters.inspected,
        good: counters.good,
        bad: counters.bad,
        defect_rate: format!("{:.1}", counters.defect_rate()),
        defect_bar_pct: counters.defect_bar_pct(),
        confidence_pct: active.then_some(ACTIVE_CONFIDENCE_PCT),
        uptime: session.uptime_display(),
        uptime_seconds: session.uptime_seconds(),
    }
}

async fn start_handler(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> axum::response::Response {
    match start_session(&state, &req.camera).await {
        Ok(()) => Json(status_snapshot(&state).await).into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn stop_handler(State(state): State<AppState>) -> impl IntoResponse {
    stop_session(&state).await;
    Json(status_snapshot(&state).await)
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(status_snapshot(&state).await)
}

async fn history_handler(State(state): State<AppState>) -> impl IntoResponse {
    let history = state.history.read().await;
    Json(HistoryResponse {
        entries: history.entries().cloned().collect(),
        len: history.len(),
        cap: history.cap(),
    })
}

async fn add_defect_handler(
    State(state): State<AppState>,
    Json(req): Json<AddDefectRequest>,
) -> impl IntoResponse {
    let len = {
        let mut history = state.history.write().await;
        history.push_live(req.source.clone());
        history.len()
    };
    metrics::update_history_len(len);
    state
        .push_event(UiEvent::DefectImageAdded { source: req.source })
        .await;
    let history = state.history.read().await;
    Json(HistoryResponse {
        entries: history.entries().cloned().collect(),
        len: history.len(),
        cap: history.cap(),
    })
}

async fn viewer_snapshot(state: &AppState) -> ViewerResponse {
    let viewer = state.viewer.read().await;
    let history = state.history.read().await;
    let len = history.len();
    match viewer.current() {
        Some(index) => {
            let entry = history.get(index);
            ViewerResponse {
                open: true,
                index: Some(index),
                position: entry.map(|e| {
                    format!("{} / {} — {}", index + 1, len, e.captured_at)
                }),
                image_source: entry.map(|e| e.image_source.clone()),
                prev_disabled: viewer.at_first(),
                next_disabled: viewer.at_last(len),
            }
        }
        None => ViewerResponse {
            open: false,
            index: None,
            position: None,
            image_source: None,
            prev_disabled: true,
            next_disabled: true,
        },
    }
}

async fn viewer_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(viewer_snapshot(&state).await)
}

async fn viewer_open_handler(
    State(state): State<AppState>,
    Json(req): Json<OpenRequest>,
) -> axum::response::Response {
    let len = state.history.read().await.len();
    let result = state.viewer.write().await.open(req.index, len);
    match result {
        Ok(()) => Json(viewer_snapshot(&state).await).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn viewer_nav_handler(
    State(state): State<AppState>,
    Json(req): Json<NavRequest>,
) -> impl IntoResponse {
    let len = state.history.read().await.len();
    state.viewer.write().await.navigate(req.delta, len);
    Json(viewer_snapshot(&state).await)
}

async fn viewer_close_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.viewer.write().await.close();
    Json(viewer_snapshot(&state).await)
}

/// The actual save happens client-side, as in the mockup; this hands the
/// page the filename and source for the anchor download.
async fn viewer_download_handler(State(state): State<AppState>) -> axum::response::Response {
    let viewer = state.viewer.read().await;
    let Some(index) = viewer.current() else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let history = state.history.read().await;
    match history.get(index) {
        Some(entry) => Json(DownloadResponse {
            filename: download_filename(Utc::now()),
            image_source: entry.image_source.clone(),
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn video_handler(State(state): State<AppState>) -> axum::response::Response {
    match state.latest_frame.read().await.as_ref() {
        Some(frame) => (
            [(header::CONTENT_TYPE, "image/jpeg")],
            frame.data.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn events_handler(
    State(state): State<AppState>,
    Query(params): Query<EventsQuery>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(50);
    let events = state.get_events(limit).await;
    let views: Vec<EventView> = events
        .into_iter()
        .map(|entry| EventView {
            time: entry
                .timestamp
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
            text: entry.event.display_text(),
            level: entry.event.level(),
        })
        .collect();
    Json(views)
}

async fn report_data_handler() -> impl IntoResponse {
    Json(ReportData::sample())
}

async fn settings_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(*state.settings.read().await)
}

async fn save_settings_handler(
    State(state): State<AppState>,
    Json(settings): Json<InspectionSettings>,
) -> impl IntoResponse {
    *state.settings.write().await = settings;
    state.push_event(UiEvent::SettingsSaved).await;
    Json(settings)
}

async fn train_handler(State(state): State<AppState>) -> impl IntoResponse {
    if start_training(&state).await {
        (StatusCode::ACCEPTED, Json(serde_json::json!({ "started": true })))
    } else {
        (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "started": false })),
        )
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    let counters = state.counters.read().await;
    Json(HealthResponse {
        status: session.status(),
        uptime_seconds: session.uptime_seconds(),
        inspected: counters.inspected,
        defect_rate: format!("{:.1}", counters.defect_rate()),
    })
}

async fn metrics_handler(State(state): State<AppState>) -> axum::response::Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::OK, "# metrics exporter not installed\n").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RunConfig;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use sliver_camera::{CameraBackend, CameraError, CameraFacing, CameraStream, CaptureConstraints, SimulatedBackend};
    use sliver_core::history::DefectHistory;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct DenyingBackend;

    impl CameraBackend for DenyingBackend {
        fn open(
            &self,
            _facing: CameraFacing,
            _constraints: &CaptureConstraints,
        ) -> Result<CameraStream, CameraError> {
            Err(CameraError::DeviceUnavailable)
        }
    }

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(SimulatedBackend),
            RunConfig::default(),
            DefectHistory::seeded(),
        )
    }

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
        let response = router(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn post_json(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_initial_status() {
        let state = test_state();
        let (status, json) = get_json(&state, "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "STANDBY");
        assert_eq!(json["defect_rate"], "0.0");
        assert_eq!(json["uptime"], "0:00");
        assert_eq!(json["confidence_pct"], Value::Null);
    }

    #[tokio::test]
    async fn test_start_then_stop() {
        let state = test_state();
        let (status, json) =
            post_json(&state, "/start", serde_json::json!({ "camera": "0" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["camera"], "Laptop Camera");
        assert_eq!(json["confidence_pct"], 84);

        let (status, json) = post_json(&state, "/stop", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "STANDBY");
    }

    #[tokio::test]
    async fn test_start_failure_surfaces_reason() {
        let state = AppState::new(
            Arc::new(DenyingBackend),
            RunConfig::default(),
            DefectHistory::seeded(),
        );
        let (status, json) =
            post_json(&state, "/start", serde_json::json!({ "camera": "0" })).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "Requested device not found");

        let (_, json) = get_json(&state, "/status").await;
        assert_eq!(json["status"], "STANDBY");
    }

    #[tokio::test]
    async fn test_history_add_and_cap() {
        let state = test_state();
        let (_, json) = get_json(&state, "/history").await;
        assert_eq!(json["len"], 6);

        for i in 0..5 {
            let (status, _) = post_json(
                &state,
                "/history",
                serde_json::json!({ "source": format!("cap_{i}.jpg") }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (_, json) = get_json(&state, "/history").await;
        assert_eq!(json["len"], 10);
        assert_eq!(json["entries"][0]["image_source"], "cap_4.jpg");
        assert_eq!(json["entries"][0]["sample"], false);
    }

    #[tokio::test]
    async fn test_viewer_flow() {
        let state = test_state();
        let (status, json) =
            post_json(&state, "/viewer/open", serde_json::json!({ "index": 0 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["open"], true);
        assert_eq!(json["prev_disabled"], true);
        assert_eq!(json["next_disabled"], false);

        let (_, json) = post_json(&state, "/viewer/nav", serde_json::json!({ "delta": 1 })).await;
        assert_eq!(json["index"], 1);
        assert_eq!(json["prev_disabled"], false);
        assert_eq!(json["position"], "2 / 6 — Sample");

        let (_, json) = post_json(&state, "/viewer/nav", serde_json::json!({ "delta": 10 })).await;
        assert_eq!(json["index"], 5);
        assert_eq!(json["next_disabled"], true);

        let (status, json) = get_json(&state, "/viewer/download").await;
        assert_eq!(status, StatusCode::OK);
        let filename = json["filename"].as_str().unwrap();
        assert!(filename.starts_with("defect_"));
        assert!(filename.ends_with(".jpg"));
        assert!(!filename.contains(':'));

        let (_, json) = post_json(&state, "/viewer/close", Value::Null).await;
        assert_eq!(json["open"], false);

        let (status, _) = get_json(&state, "/viewer/download").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_viewer_open_rejects_bad_index() {
        let state = test_state();
        let (status, json) =
            post_json(&state, "/viewer/open", serde_json::json!({ "index": 6 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("out of range"));
    }

    #[tokio::test]
    async fn test_video_is_404_in_standby() {
        let state = test_state();
        let response = router(state.clone())
            .oneshot(Request::builder().uri("/video").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_data_shape() {
        let state = test_state();
        let (status, json) = get_json(&state, "/report/data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"].as_array().unwrap().len(), 10);
        assert_eq!(json["outcome_split"]["data"][1], 61);
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let state = test_state();
        let (status, json) = post_json(
            &state,
            "/settings",
            serde_json::json!({
                "mode": "manual",
                "sensitivity_pct": 70,
                "defect_threshold_pct": 40
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "manual");

        let (_, json) = get_json(&state, "/settings").await;
        assert_eq!(json["sensitivity_pct"], 70);

        let (_, events) = get_json(&state, "/events").await;
        let texts: Vec<&str> = events
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["text"].as_str().unwrap())
            .collect();
        assert!(texts.contains(&"Settings updated."));
    }

    #[tokio::test]
    async fn test_dashboard_and_report_pages_served() {
        let state = test_state();
        for uri in ["/", "/report"] {
            let response = router(state.clone())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
