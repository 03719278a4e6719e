use std::{
    fs::File,
    io::{self, BufReader},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use gesture_events::{
    EngineConfig, GestureEngine, SceneState, TrackedFrame, effect_channel,
    pipeline::{self, start_recognizer},
};

const REPLAY_FPS: u64 = 30;
const RENDER_FPS: u64 = 60;
const EFFECT_QUEUE_DEPTH: usize = 64;

fn main() -> Result<()> {
    env_logger::init();

    let frames = load_frames()?;
    log::info!("loaded {} tracker frames", frames.len());

    let config = EngineConfig::from_env().context("failed to read engine configuration")?;
    let engine = GestureEngine::new(config)?;

    let (frame_tx, frame_rx) = bounded::<TrackedFrame>(1);
    let (effect_tx, effect_rx) = effect_channel(EFFECT_QUEUE_DEPTH);
    let recognizer = start_recognizer(engine, frame_rx, effect_tx)?;

    let feeder = thread::Builder::new()
        .name("replay-feeder".into())
        .spawn(move || {
            let interval = Duration::from_millis(1_000 / REPLAY_FPS);
            for frame in frames {
                if frame_tx.send(frame).is_err() {
                    break;
                }
                thread::sleep(interval);
            }
        })
        .context("failed to spawn replay feeder")?;

    let tick = Duration::from_millis(1_000 / RENDER_FPS);
    let mut scene = SceneState::default();
    let mut applied = 0;
    loop {
        let started = Instant::now();
        let drained = effect_rx.drain_into(&mut scene);
        applied += drained.applied;
        scene.step();
        if drained.finished {
            break;
        }
        if let Some(sleep_for) = tick.checked_sub(started.elapsed()) {
            thread::sleep(sleep_for);
        }
    }

    if feeder.join().is_err() {
        log::error!("replay feeder panicked");
    }
    let stats = recognizer.join();
    log::info!(
        "replay done: {} frames, {} events, {} effects applied",
        stats.frames,
        stats.events,
        applied
    );
    log::info!("final scene: {scene:?}");
    Ok(())
}

fn load_frames() -> Result<Vec<TrackedFrame>> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            let file = File::open(&path).with_context(|| format!("failed to open {path}"))?;
            pipeline::read_frames(BufReader::new(file))
                .with_context(|| format!("failed to parse {path}"))
        }
        _ => pipeline::read_frames(io::stdin().lock()).context("failed to parse stdin"),
    }
}
