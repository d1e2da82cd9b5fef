use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use sliver_camera::{CameraBackend, CameraFrame, CameraStream};
use sliver_core::counters::SessionCounters;
use sliver_core::history::DefectHistory;
use sliver_core::session::Session;
use sliver_core::ticker::DEFECT_PROBABILITY;
use sliver_core::viewer::ModalViewer;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Log-box events, rendered in the dashboard with a per-entry level.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    SessionStarted { camera: String },
    SessionStopped,
    DefectDetected,
    DefectImageAdded { source: String },
    CameraError { reason: String },
    SettingsSaved,
    TrainingStarted,
    TrainingComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Normal,
    Warning,
    Error,
}

impl UiEvent {
    pub fn display_text(&self) -> String {
        match self {
            UiEvent::SessionStarted { camera } => format!("Detection started — {camera}"),
            UiEvent::SessionStopped => "Detection stopped.".to_string(),
            UiEvent::DefectDetected => "⚠ DEFECT DETECTED (demo)".to_string(),
            UiEvent::DefectImageAdded { source } => format!("Defect image added: {source}"),
            UiEvent::CameraError { reason } => format!("Failed to open camera: {reason}"),
            UiEvent::SettingsSaved => "Settings updated.".to_string(),
            UiEvent::TrainingStarted => "Training started...".to_string(),
            UiEvent::TrainingComplete => "Training complete.".to_string(),
        }
    }

    pub fn level(&self) -> EventLevel {
        match self {
            UiEvent::DefectDetected => EventLevel::Warning,
            UiEvent::CameraError { .. } => EventLevel::Error,
            _ => EventLevel::Normal,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UiEventLogEntry {
    pub timestamp: chrono::DateTime<Utc>,
    pub event: UiEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionMode {
    Default,
    Manual,
}

/// Settings dialog payload. Thresholds only matter in manual mode; saving
/// them has no effect on the simulation, matching the mockup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InspectionSettings {
    pub mode: InspectionMode,
    pub sensitivity_pct: u8,
    pub defect_threshold_pct: u8,
}

impl Default for InspectionSettings {
    fn default() -> Self {
        Self {
            mode: InspectionMode::Default,
            sensitivity_pct: 50,
            defect_threshold_pct: 60,
        }
    }
}

/// Runtime knobs fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub defect_probability: f64,
    /// Recycle the fixed sample images into the history on simulated
    /// defects (the commented-out branch in the original mockup).
    pub demo_thumbnails: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            defect_probability: DEFECT_PROBABILITY,
            demo_thumbnails: false,
        }
    }
}

/// One slot per recurring task kind; `Option::take` + abort gives
/// exactly-once cancellation and at most one live task per kind.
#[derive(Default)]
pub struct TaskSlots {
    pub ticker: Option<JoinHandle<()>>,
    pub frame_pump: Option<JoinHandle<()>>,
    pub training: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub counters: Arc<RwLock<SessionCounters>>,
    pub history: Arc<RwLock<DefectHistory>>,
    pub viewer: Arc<RwLock<ModalViewer>>,
    pub settings: Arc<RwLock<InspectionSettings>>,
    pub event_log: Arc<RwLock<VecDeque<UiEventLogEntry>>>,
    pub latest_frame: Arc<RwLock<Option<CameraFrame>>>,
    pub stream: Arc<Mutex<Option<CameraStream>>>,
    pub tasks: Arc<Mutex<TaskSlots>>,
    pub backend: Arc<dyn CameraBackend>,
    pub config: RunConfig,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(backend: Arc<dyn CameraBackend>, config: RunConfig, history: DefectHistory) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            counters: Arc::new(RwLock::new(SessionCounters::new())),
            history: Arc::new(RwLock::new(history)),
            viewer: Arc::new(RwLock::new(ModalViewer::new())),
            settings: Arc::new(RwLock::new(InspectionSettings::default())),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
            latest_frame: Arc::new(RwLock::new(None)),
            stream: Arc::new(Mutex::new(None)),
            tasks: Arc::new(Mutex::new(TaskSlots::default())),
            backend,
            config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    pub async fn push_event(&self, event: UiEvent) {
        let mut log = self.event_log.write().await;
        log.push_back(UiEventLogEntry {
            timestamp: Utc::now(),
            event,
        });
        // Keep last 500 events
        while log.len() > 500 {
            log.pop_front();
        }
    }

    pub async fn get_events(&self, limit: usize) -> Vec<UiEventLogEntry> {
        let log = self.event_log.read().await;
        let start = log.len().saturating_sub(limit);
        log.iter().skip(start).cloned().collect()
    }
}
