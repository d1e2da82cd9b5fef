use thiserror::Error;

/// Camera acquisition failures. The display string is what the operator
/// sees in the dashboard notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Requested device not found")]
    DeviceUnavailable,
    #[error("Capture constraints could not be satisfied")]
    ConstraintsUnsatisfiable,
}
