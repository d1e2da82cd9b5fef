use crate::metrics;
use crate::state::{AppState, UiEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sliver_camera::{
    CameraClient, CameraError, CameraEvent, CameraFacing, CaptureConstraints,
};
use sliver_core::history::SAMPLE_IMAGES;
use sliver_core::ticker::{classify_with, sample_tick_interval, InspectionOutcome};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

const TRAINING_DURATION: Duration = Duration::from_secs(20);

/// STANDBY -> ACTIVE. Tears down any prior stream before reacquiring, so
/// re-entry is safe and at most one handle ever exists. On failure the
/// session stays in STANDBY and no timers are started.
pub async fn start_session(state: &AppState, selector: &str) -> Result<(), CameraError> {
    teardown_stream(state).await;

    let facing = CameraFacing::from_selector(selector);
    let constraints = CaptureConstraints::default();
    let stream = match state.backend.open(facing, &constraints) {
        Ok(stream) => stream,
        Err(err) => {
            warn!("Camera acquisition failed: {}", err);
            metrics::record_camera_failure(&err.to_string());
            state
                .push_event(UiEvent::CameraError {
                    reason: err.to_string(),
                })
                .await;
            return Err(err);
        }
    };
    *state.stream.lock().await = Some(stream);
    state.session.write().await.activate(facing.label());

    {
        let mut tasks = state.tasks.lock().await;
        if let Some(handle) = tasks.frame_pump.take() {
            handle.abort();
        }
        tasks.frame_pump = Some(spawn_frame_pump(state.clone(), facing, constraints));
        if let Some(handle) = tasks.ticker.take() {
            handle.abort();
        }
        tasks.ticker = Some(spawn_ticker(state.clone()));
    }

    state
        .push_event(UiEvent::SessionStarted {
            camera: facing.label().to_string(),
        })
        .await;
    metrics::record_session_start(facing.label());
    Ok(())
}

/// ACTIVE -> STANDBY. Always succeeds; cancels the ticker and frame pump
/// exactly once, stops every track of the stream, clears the display
/// surface. Calling while already in STANDBY only repeats the cleanup.
pub async fn stop_session(state: &AppState) {
    {
        let mut tasks = state.tasks.lock().await;
        if let Some(handle) = tasks.ticker.take() {
            handle.abort();
        }
        if let Some(handle) = tasks.frame_pump.take() {
            handle.abort();
        }
    }
    teardown_stream(state).await;
    *state.latest_frame.write().await = None;
    state.session.write().await.deactivate();
    state.push_event(UiEvent::SessionStopped).await;
    metrics::record_session_stop();
}

async fn teardown_stream(state: &AppState) {
    if let Some(mut stream) = state.stream.lock().await.take() {
        stream.stop();
    }
}

/// Forwards pump frames into the shared latest-frame slot. Aborting this
/// task drops the receiver, which makes the inner client exit on its next
/// send.
fn spawn_frame_pump(
    state: AppState,
    facing: CameraFacing,
    constraints: CaptureConstraints,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = CameraClient::new(facing, constraints, tx);
        tokio::spawn(async move {
            if let Err(e) = client.run().await {
                error!("Camera pump error: {}", e);
            }
        });
        while let Some(event) = rx.recv().await {
            match event {
                CameraEvent::Attached { facing } => {
                    debug!("Camera attached ({})", facing.label());
                }
                CameraEvent::Frame(frame) => {
                    *state.latest_frame.write().await = Some(frame);
                }
                CameraEvent::Detached => break,
            }
        }
    })
}

/// Simulated inspection ticker: sleep a fresh random interval, then
/// classify one part. The task is aborted on stop, so no tick can fire
/// after the session ends.
fn spawn_ticker(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        loop {
            let wait = sample_tick_interval(&mut rng);
            tokio::time::sleep(wait).await;
            if !state.session.read().await.is_active() {
                break;
            }
            let draw = rng.gen::<f64>();
            run_tick(&state, draw).await;
        }
    })
}

pub(crate) async fn run_tick(state: &AppState, draw: f64) {
    let outcome = classify_with(draw, state.config.defect_probability);
    let (bad, rate) = {
        let mut counters = state.counters.write().await;
        match outcome {
            InspectionOutcome::Defect => counters.record_defect(),
            InspectionOutcome::Good => counters.record_good(),
        }
        (counters.bad, counters.defect_rate())
    };

    match outcome {
        InspectionOutcome::Defect => {
            metrics::record_inspection_defect();
            state.push_event(UiEvent::DefectDetected).await;
            if state.config.demo_thumbnails {
                let source = SAMPLE_IMAGES[bad as usize % SAMPLE_IMAGES.len()];
                let mut history = state.history.write().await;
                history.push_live(source);
                metrics::update_history_len(history.len());
            }
        }
        InspectionOutcome::Good => metrics::record_inspection_good(),
    }
    metrics::update_defect_rate(rate);
}

/// Fire-and-forget training job; returns false if one is already running.
pub async fn start_training(state: &AppState) -> bool {
    let mut tasks = state.tasks.lock().await;
    if let Some(handle) = &tasks.training {
        if !handle.is_finished() {
            return false;
        }
    }
    let state = state.clone();
    tasks.training = Some(tokio::spawn(async move {
        state.push_event(UiEvent::TrainingStarted).await;
        tokio::time::sleep(TRAINING_DURATION).await;
        state.push_event(UiEvent::TrainingComplete).await;
    }));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RunConfig;
    use sliver_camera::{CameraBackend, CameraStream, SimulatedBackend};
    use sliver_core::history::DefectHistory;
    use sliver_core::session::SessionStatus;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    struct DenyingBackend;

    impl CameraBackend for DenyingBackend {
        fn open(
            &self,
            _facing: CameraFacing,
            _constraints: &CaptureConstraints,
        ) -> Result<CameraStream, CameraError> {
            Err(CameraError::PermissionDenied)
        }
    }

    /// Grants streams but keeps each issued track's stop flag so tests can
    /// verify teardown across reacquisitions.
    #[derive(Default)]
    struct TrackingBackend {
        issued: Mutex<Vec<Arc<AtomicBool>>>,
    }

    impl CameraBackend for TrackingBackend {
        fn open(
            &self,
            facing: CameraFacing,
            constraints: &CaptureConstraints,
        ) -> Result<CameraStream, CameraError> {
            let stream = CameraStream::new(facing, *constraints);
            let mut issued = self.issued.lock().unwrap();
            for track in stream.tracks() {
                issued.push(track.stop_flag());
            }
            Ok(stream)
        }
    }

    fn state_with(backend: Arc<dyn CameraBackend>, config: RunConfig) -> AppState {
        AppState::new(backend, config, DefectHistory::seeded())
    }

    #[tokio::test]
    async fn test_failed_start_stays_in_standby() {
        let state = state_with(Arc::new(DenyingBackend), RunConfig::default());

        let err = start_session(&state, "0").await.unwrap_err();
        assert_eq!(err, CameraError::PermissionDenied);

        assert_eq!(state.session.read().await.status(), SessionStatus::Standby);
        assert!(state.stream.lock().await.is_none());
        // No timers started
        let tasks = state.tasks.lock().await;
        assert!(tasks.ticker.is_none());
        assert!(tasks.frame_pump.is_none());
        drop(tasks);

        let events = state.get_events(10).await;
        let text = events.last().unwrap().event.display_text();
        assert!(text.contains("Permission denied"), "got {text:?}");
    }

    #[tokio::test]
    async fn test_start_activates_and_spawns_timers() {
        let state = state_with(Arc::new(SimulatedBackend), RunConfig::default());

        start_session(&state, "1").await.unwrap();
        assert_eq!(state.session.read().await.status(), SessionStatus::Active);
        assert_eq!(state.session.read().await.camera_label(), Some("USB Camera"));
        assert!(state.stream.lock().await.is_some());
        let tasks = state.tasks.lock().await;
        assert!(tasks.ticker.is_some());
        assert!(tasks.frame_pump.is_some());
    }

    #[tokio::test]
    async fn test_restart_releases_previous_handle() {
        let backend = Arc::new(TrackingBackend::default());
        let state = state_with(backend.clone(), RunConfig::default());

        start_session(&state, "0").await.unwrap();
        start_session(&state, "1").await.unwrap();

        let issued = backend.issued.lock().unwrap();
        assert_eq!(issued.len(), 2);
        // First acquisition fully stopped before the second exists
        assert!(issued[0].load(Ordering::SeqCst));
        assert!(!issued[1].load(Ordering::SeqCst));
        drop(issued);

        let stream = state.stream.lock().await;
        assert!(stream.as_ref().is_some_and(|s| !s.is_stopped()));
    }

    #[tokio::test]
    async fn test_stop_releases_everything() {
        let backend = Arc::new(TrackingBackend::default());
        let state = state_with(backend.clone(), RunConfig::default());

        start_session(&state, "0").await.unwrap();
        stop_session(&state).await;

        assert_eq!(state.session.read().await.status(), SessionStatus::Standby);
        assert!(state.stream.lock().await.is_none());
        assert!(state.latest_frame.read().await.is_none());
        assert!(backend.issued.lock().unwrap()[0].load(Ordering::SeqCst));
        let tasks = state.tasks.lock().await;
        assert!(tasks.ticker.is_none());
        assert!(tasks.frame_pump.is_none());
    }

    #[tokio::test]
    async fn test_stop_while_standby_is_harmless() {
        let state = state_with(Arc::new(SimulatedBackend), RunConfig::default());
        stop_session(&state).await;
        stop_session(&state).await;
        assert_eq!(state.session.read().await.status(), SessionStatus::Standby);
    }

    #[tokio::test]
    async fn test_counters_survive_stop_start() {
        let state = state_with(Arc::new(SimulatedBackend), RunConfig::default());
        start_session(&state, "0").await.unwrap();
        run_tick(&state, 0.01).await; // defect
        run_tick(&state, 0.9).await; // good
        stop_session(&state).await;
        start_session(&state, "0").await.unwrap();

        let counters = state.counters.read().await;
        assert_eq!(counters.inspected, 2);
        assert_eq!(counters.bad, 1);
        drop(counters);
        stop_session(&state).await;
    }

    #[tokio::test]
    async fn test_tick_updates_counters_and_log() {
        let state = state_with(Arc::new(SimulatedBackend), RunConfig::default());
        run_tick(&state, 0.05).await;

        let counters = state.counters.read().await;
        assert_eq!(counters.inspected, 1);
        assert_eq!(counters.bad, 1);
        drop(counters);

        let events = state.get_events(10).await;
        assert_eq!(
            events.last().unwrap().event.display_text(),
            "⚠ DEFECT DETECTED (demo)"
        );
        // Default behavior: counters only, no thumbnail added
        assert_eq!(state.history.read().await.len(), 6);
    }

    #[tokio::test]
    async fn test_demo_thumbnails_recycle_sample_images() {
        let config = RunConfig {
            demo_thumbnails: true,
            ..RunConfig::default()
        };
        let state = state_with(Arc::new(SimulatedBackend), config);
        run_tick(&state, 0.0).await;

        let history = state.history.read().await;
        assert_eq!(history.len(), 7);
        assert!(!history.get(0).unwrap().sample);
    }

    #[tokio::test]
    async fn test_training_runs_one_at_a_time() {
        let state = state_with(Arc::new(SimulatedBackend), RunConfig::default());
        assert!(start_training(&state).await);
        assert!(!start_training(&state).await);
    }
}
