use crate::error::CameraError;
use crate::stream::CameraStream;

/// Camera preference behind the two-entry selector:
/// "0" prefers the built-in camera, "1" an external/USB one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    User,
    Environment,
}

impl CameraFacing {
    /// Unknown selector values fall back to the built-in camera.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "1" => CameraFacing::Environment,
            _ => CameraFacing::User,
        }
    }

    pub fn facing_mode(&self) -> &'static str {
        match self {
            CameraFacing::User => "user",
            CameraFacing::Environment => "environment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CameraFacing::User => "Laptop Camera",
            CameraFacing::Environment => "USB Camera",
        }
    }
}

/// Requested capture parameters; ideal resolution, never audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            audio: false,
        }
    }
}

/// Seam between the session controller and the capture hardware.
///
/// The shipped backend is simulated; tests swap in backends that deny
/// access to exercise the failure path.
pub trait CameraBackend: Send + Sync {
    fn open(
        &self,
        facing: CameraFacing,
        constraints: &CaptureConstraints,
    ) -> Result<CameraStream, CameraError>;
}

/// Backend that always grants a synthetic stream.
#[derive(Debug, Default)]
pub struct SimulatedBackend;

impl CameraBackend for SimulatedBackend {
    fn open(
        &self,
        facing: CameraFacing,
        constraints: &CaptureConstraints,
    ) -> Result<CameraStream, CameraError> {
        Ok(CameraStream::new(facing, *constraints))
    }
}
