use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::{
    dispatch::{Effect, EffectSender},
    engine::GestureEngine,
    error::Result,
    types::TrackedFrame,
};

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecognizerStats {
    pub frames: u64,
    pub events: u64,
    pub effects: u64,
}

/// Owns the recognition thread; stops and joins it when dropped.
#[derive(Debug)]
pub struct RecognizerHandle {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<RecognizerStats>>,
}

impl RecognizerHandle {
    /// Asks the worker to stop after the current frame and waits for it.
    pub fn stop(mut self) -> RecognizerStats {
        self.stop.store(true, Ordering::SeqCst);
        self.join_inner()
    }

    /// Waits for the worker to run out of frames.
    pub fn join(mut self) -> RecognizerStats {
        self.join_inner()
    }

    fn join_inner(&mut self) -> RecognizerStats {
        match self.handle.take().map(|h| h.join()) {
            Some(Ok(stats)) => stats,
            Some(Err(_)) => {
                log::error!("recognizer thread panicked");
                RecognizerStats::default()
            }
            None => RecognizerStats::default(),
        }
    }
}

impl Drop for RecognizerHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawns the worker that turns tracker frames into effects.
///
/// Frames are consumed strictly in arrival order. Skipping to the newest frame
/// would hide the intermediate phases that swipes and holds are built from.
pub fn start_recognizer(
    engine: GestureEngine,
    frame_rx: Receiver<TrackedFrame>,
    effects: EffectSender,
) -> Result<RecognizerHandle> {
    log::info!("starting recognizer with {} profile", engine.profile().name());

    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    let handle = thread::Builder::new()
        .name("gesture-recognizer".into())
        .spawn(move || run_worker_loop(engine, frame_rx, effects, stop_flag))?;

    Ok(RecognizerHandle {
        stop,
        handle: Some(handle),
    })
}

fn run_worker_loop(
    mut engine: GestureEngine,
    frame_rx: Receiver<TrackedFrame>,
    effects: EffectSender,
    stop: Arc<AtomicBool>,
) -> RecognizerStats {
    let mut stats = RecognizerStats::default();

    'frames: while !stop.load(Ordering::Relaxed) {
        let frame = match frame_rx.recv_timeout(STOP_POLL_INTERVAL) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        stats.frames += 1;

        for (track_id, event) in engine.process_frame(&frame.hands) {
            stats.events += 1;
            let Some(effect) = Effect::for_event(event) else {
                log::info!("gesture detected: {event} (track {track_id}, no effect)");
                continue;
            };
            log::info!(
                "gesture detected: {event} (track {track_id}) -> {}",
                effect.label()
            );
            if !effects.send(effect) {
                log::info!("effect consumer closed, stopping recognizer");
                break 'frames;
            }
            stats.effects += 1;
        }
    }

    log::info!(
        "recognizer finished: {} frames, {} events",
        stats.frames,
        stats.events
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EngineConfig,
        dispatch::{SceneState, effect_channel},
        types::{BoundingBox, GestureLabel, TrackedHand},
    };

    fn frame(gesture: GestureLabel) -> TrackedFrame {
        TrackedFrame {
            hands: vec![TrackedHand::fresh(
                1,
                gesture,
                BoundingBox::new(0.0, 0.0, 100.0, 100.0),
            )],
        }
    }

    #[test]
    fn worker_drains_frames_and_publishes_effects() {
        let engine = GestureEngine::new(EngineConfig::default()).unwrap();
        let (frame_tx, frame_rx) = crossbeam_channel::unbounded();
        let (effect_tx, effect_rx) = effect_channel(16);

        let handle = start_recognizer(engine, frame_rx, effect_tx).unwrap();
        for _ in 0..4 {
            frame_tx.send(frame(GestureLabel::Grabbing)).unwrap();
        }
        drop(frame_tx);

        let stats = handle.join();
        assert_eq!(stats.frames, 4);
        assert_eq!(stats.events, 1);
        assert_eq!(stats.effects, 1);

        let mut scene = SceneState::default();
        let drained = effect_rx.drain_into(&mut scene);
        assert_eq!(drained.applied, 1);
        assert!(drained.finished);
        assert_eq!(scene.heartbeat_bpm, crate::dispatch::MIN_HEARTBEAT_BPM);
    }

    #[test]
    fn stop_interrupts_an_idle_worker() {
        let engine = GestureEngine::new(EngineConfig::default()).unwrap();
        let (_frame_tx, frame_rx) = crossbeam_channel::unbounded::<TrackedFrame>();
        let (effect_tx, _effect_rx) = effect_channel(4);

        let handle = start_recognizer(engine, frame_rx, effect_tx).unwrap();
        let stats = handle.stop();
        assert_eq!(stats.frames, 0);
    }
}
