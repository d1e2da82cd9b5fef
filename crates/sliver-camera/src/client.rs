use crate::device::{CameraFacing, CaptureConstraints};
use crate::stream::CameraFrame;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Frame cadence of the simulated capture pump (~30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug, Clone)]
pub enum CameraEvent {
    Attached { facing: CameraFacing },
    Frame(CameraFrame),
    Detached,
}

/// Pushes frames from an attached camera to the session controller.
///
/// The pump exits when the receiving side is dropped, so cancelling the
/// consumer task is enough to wind it down.
pub struct CameraClient {
    facing: CameraFacing,
    constraints: CaptureConstraints,
    tx: mpsc::UnboundedSender<CameraEvent>,
}

impl CameraClient {
    pub fn new(
        facing: CameraFacing,
        constraints: CaptureConstraints,
        tx: mpsc::UnboundedSender<CameraEvent>,
    ) -> Self {
        Self {
            facing,
            constraints,
            tx,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        info!("Camera pump starting ({})", self.facing.label());
        if self.tx.send(CameraEvent::Attached { facing: self.facing }).is_err() {
            return Ok(());
        }

        let mut interval = tokio::time::interval(FRAME_INTERVAL);
        loop {
            interval.tick().await;
            let frame = CameraFrame::synthetic(&self.constraints);
            if self.tx.send(CameraEvent::Frame(frame)).is_err() {
                debug!("Frame receiver dropped, camera pump exiting");
                break;
            }
        }

        let _ = self.tx.send(CameraEvent::Detached);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pump_emits_attach_then_frames() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = CameraClient::new(CameraFacing::User, CaptureConstraints::default(), tx);
        let handle = tokio::spawn(async move { client.run().await });

        match rx.recv().await.unwrap() {
            CameraEvent::Attached { facing } => assert_eq!(facing, CameraFacing::User),
            other => panic!("expected Attached, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            CameraEvent::Frame(frame) => assert!(!frame.data.is_empty()),
            other => panic!("expected Frame, got {other:?}"),
        }

        // Dropping the receiver winds the pump down
        drop(rx);
        handle.await.unwrap().unwrap();
    }
}
