use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Confidence readout shown while a session is active.
pub const ACTIVE_CONFIDENCE_PCT: u8 = 84;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    Standby,
    Active,
}

/// Inspection session lifecycle: STANDBY <-> ACTIVE.
///
/// The uptime clock starts on activation and freezes on deactivation; it is
/// never reset explicitly, matching the observed behavior.
#[derive(Debug, Clone)]
pub struct Session {
    status: SessionStatus,
    started_at: Option<Instant>,
    camera_label: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Standby,
            started_at: None,
            camera_label: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn camera_label(&self) -> Option<&str> {
        self.camera_label.as_deref()
    }

    /// STANDBY -> ACTIVE. Restarts the uptime clock.
    pub fn activate(&mut self, camera_label: impl Into<String>) {
        let label = camera_label.into();
        info!("Session active on {}", label);
        self.status = SessionStatus::Active;
        self.started_at = Some(Instant::now());
        self.camera_label = Some(label);
    }

    /// ACTIVE -> STANDBY. Idempotent; calling while already standing by is a
    /// no-op beyond clearing the camera label.
    pub fn deactivate(&mut self) {
        if self.status == SessionStatus::Active {
            info!("Session stopped");
        }
        self.status = SessionStatus::Standby;
        self.camera_label = None;
    }

    pub fn uptime_seconds(&self) -> u64 {
        match (self.status, self.started_at) {
            (SessionStatus::Active, Some(start)) => start.elapsed().as_secs(),
            _ => 0,
        }
    }

    /// Elapsed active time as `m:ss`.
    pub fn uptime_display(&self) -> String {
        format_uptime(self.uptime_seconds())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_uptime(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
