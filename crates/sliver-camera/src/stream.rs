use crate::device::{CameraFacing, CaptureConstraints};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Single grey 1x1 baseline JPEG, the payload of every synthetic frame.
pub const PLACEHOLDER_JPEG: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
    0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
    0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
    0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
    0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
    0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
    0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
    0xFF, 0xC4, 0x00, 0x14, 0x10, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00,
    0x3F, 0x00, 0x7F, 0xFF, 0xD9,
];

/// One constituent track of an acquired stream.
///
/// The stop flag is shared so a caller that handed the stream away can still
/// verify teardown happened.
#[derive(Debug, Clone)]
pub struct VideoTrack {
    label: String,
    stopped: Arc<AtomicBool>,
}

impl VideoTrack {
    fn new(label: String) -> Self {
        Self {
            label,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stopped)
    }

    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            debug!("Stopped track {}", self.label);
        }
    }
}

/// Exclusive handle on an acquired capture stream.
///
/// At most one handle exists per session controller. `stop` halts every
/// constituent track and is idempotent; dropping the handle also stops the
/// tracks so a leaked handle cannot hold the hardware.
#[derive(Debug)]
pub struct CameraStream {
    facing: CameraFacing,
    constraints: CaptureConstraints,
    tracks: Vec<VideoTrack>,
    stopped: bool,
}

impl CameraStream {
    pub fn new(facing: CameraFacing, constraints: CaptureConstraints) -> Self {
        let tracks = vec![VideoTrack::new(format!("video:{}", facing.facing_mode()))];
        Self {
            facing,
            constraints,
            tracks,
            stopped: false,
        }
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    pub fn tracks(&self) -> &[VideoTrack] {
        &self.tracks
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        for track in &self.tracks {
            track.stop();
        }
        self.stopped = true;
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One captured frame, JPEG-encoded.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl CameraFrame {
    /// Synthetic placeholder frame at the constraint resolution.
    pub fn synthetic(constraints: &CaptureConstraints) -> Self {
        Self {
            width: constraints.width,
            height: constraints.height,
            data: PLACEHOLDER_JPEG.to_vec(),
            captured_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_halts_every_track() {
        let mut stream = CameraStream::new(CameraFacing::User, CaptureConstraints::default());
        let flags: Vec<_> = stream.tracks().iter().map(|t| t.stop_flag()).collect();
        assert!(flags.iter().all(|f| !f.load(Ordering::SeqCst)));

        stream.stop();
        assert!(stream.is_stopped());
        assert!(flags.iter().all(|f| f.load(Ordering::SeqCst)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut stream = CameraStream::new(CameraFacing::Environment, CaptureConstraints::default());
        stream.stop();
        stream.stop();
        assert!(stream.is_stopped());
    }

    #[test]
    fn test_drop_stops_tracks() {
        let stream = CameraStream::new(CameraFacing::User, CaptureConstraints::default());
        let flag = stream.tracks()[0].stop_flag();
        drop(stream);
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_synthetic_frame_shape() {
        let frame = CameraFrame::synthetic(&CaptureConstraints::default());
        assert_eq!(frame.width, 1280);
        assert_eq!(frame.height, 720);
        // JPEG SOI/EOI markers
        assert_eq!(&frame.data[..2], &[0xFF, 0xD8]);
        assert_eq!(&frame.data[frame.data.len() - 2..], &[0xFF, 0xD9]);
    }
}
