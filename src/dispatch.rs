//! Event → effect mapping and the render-side state the effects drive.
//!
//! Effects cross from the recognition thread to the render thread through a
//! bounded queue; only the render thread ever touches [`SceneState`].

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};

use crate::types::Event;

const ZOOM_IMPULSE: f32 = 0.05;
const ZOOM_FRICTION: f32 = 0.97;
const ROTATION_IMPULSE_DEG: f32 = 1.1;
const ROTATION_FRICTION: f32 = 0.985;
const CAMERA_FORWARD: [f32; 3] = [0.0, 0.0, -1.0];

pub const NORMAL_HEARTBEAT_BPM: u32 = 120;
pub const MIN_HEARTBEAT_BPM: u32 = 50;
pub const MAX_HEARTBEAT_BPM: u32 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
    ZoomIn,
    ZoomOut,
    TogglePerspective,
    ResetView,
    SlowHeartbeat,
    FastHeartbeat,
    StopHeartbeat,
}

impl Effect {
    /// Several events share one effect; events without an application meaning map to none.
    pub fn for_event(event: Event) -> Option<Self> {
        match event {
            Event::SwipeLeft | Event::SwipeLeft2 | Event::SwipeLeft3 => Some(Effect::RotateLeft),
            Event::SwipeRight | Event::SwipeRight2 | Event::SwipeRight3 => {
                Some(Effect::RotateRight)
            }
            Event::SwipeUp | Event::SwipeUp2 | Event::SwipeUp3 | Event::FastSwipeUp => {
                Some(Effect::RotateUp)
            }
            Event::SwipeDown | Event::SwipeDown2 | Event::SwipeDown3 | Event::FastSwipeDown => {
                Some(Effect::RotateDown)
            }
            Event::ZoomIn => Some(Effect::ZoomIn),
            Event::ZoomOut => Some(Effect::ZoomOut),
            Event::Tap | Event::DoubleTap => Some(Effect::TogglePerspective),
            Event::LittleFinger => Some(Effect::ResetView),
            Event::Drag => Some(Effect::SlowHeartbeat),
            Event::Drop => Some(Effect::FastHeartbeat),
            Event::Stop => Some(Effect::StopHeartbeat),
            Event::Drag2
            | Event::Drop2
            | Event::Drag3
            | Event::Drop3
            | Event::Unknown => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Effect::RotateLeft => "rotate left",
            Effect::RotateRight => "rotate right",
            Effect::RotateUp => "rotate up",
            Effect::RotateDown => "rotate down",
            Effect::ZoomIn => "zoom in",
            Effect::ZoomOut => "zoom out",
            Effect::TogglePerspective => "toggle perspective",
            Effect::ResetView => "reset view",
            Effect::SlowHeartbeat => "slow heartbeat",
            Effect::FastHeartbeat => "fast heartbeat",
            Effect::StopHeartbeat => "stop heartbeat",
        }
    }
}

/// Camera, model rotation and heartbeat parameters mutated by effects.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub zoom: [f32; 3],
    pub zoom_velocity: [f32; 3],
    /// Model rotation in degrees around (x, y).
    pub rotation: [f32; 2],
    /// Degrees per step: `[0]` spins around y, `[1]` around x.
    pub rotation_velocity: [f32; 2],
    pub heartbeat_bpm: u32,
    pub heartbeat_enabled: bool,
    pub perspective: bool,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            zoom: [0.0; 3],
            zoom_velocity: [0.0; 3],
            rotation: [0.0; 2],
            rotation_velocity: [0.0; 2],
            heartbeat_bpm: NORMAL_HEARTBEAT_BPM,
            heartbeat_enabled: true,
            perspective: true,
        }
    }
}

impl SceneState {
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::RotateLeft => self.rotation_velocity[0] -= ROTATION_IMPULSE_DEG,
            Effect::RotateRight => self.rotation_velocity[0] += ROTATION_IMPULSE_DEG,
            Effect::RotateUp => self.rotation_velocity[1] += ROTATION_IMPULSE_DEG,
            Effect::RotateDown => self.rotation_velocity[1] -= ROTATION_IMPULSE_DEG,
            Effect::ZoomIn => add_scaled(&mut self.zoom_velocity, CAMERA_FORWARD, ZOOM_IMPULSE),
            Effect::ZoomOut => add_scaled(&mut self.zoom_velocity, CAMERA_FORWARD, -ZOOM_IMPULSE),
            Effect::TogglePerspective => {
                self.perspective = !self.perspective;
                self.zoom = [0.0; 3];
            }
            Effect::ResetView => {
                self.zoom = [0.0; 3];
                self.zoom_velocity = [0.0; 3];
                self.rotation = [0.0; 2];
                self.rotation_velocity = [0.0; 2];
                self.heartbeat_bpm = NORMAL_HEARTBEAT_BPM;
                self.heartbeat_enabled = true;
            }
            Effect::SlowHeartbeat => self.heartbeat_bpm = MIN_HEARTBEAT_BPM,
            Effect::FastHeartbeat => self.heartbeat_bpm = MAX_HEARTBEAT_BPM,
            Effect::StopHeartbeat => self.heartbeat_enabled = false,
        }
    }

    /// Integrates one render frame of zoom and rotation motion with friction.
    pub fn step(&mut self) {
        for axis in 0..3 {
            self.zoom[axis] += self.zoom_velocity[axis];
            self.zoom_velocity[axis] *= ZOOM_FRICTION;
        }
        for (i, velocity) in self.rotation_velocity.iter_mut().enumerate() {
            *velocity *= ROTATION_FRICTION;
            // Horizontal swipes spin around y, vertical ones around x.
            self.rotation[1 - i] += *velocity;
        }
    }
}

fn add_scaled(target: &mut [f32; 3], direction: [f32; 3], scale: f32) {
    for axis in 0..3 {
        target[axis] += direction[axis] * scale;
    }
}

/// Producer half of the effect queue, owned by the recognition thread.
#[derive(Clone, Debug)]
pub struct EffectSender {
    tx: Sender<Effect>,
}

impl EffectSender {
    /// Returns false once the render side is gone.
    pub fn send(&self, effect: Effect) -> bool {
        match self.tx.try_send(effect) {
            Ok(()) => true,
            Err(TrySendError::Full(effect)) => {
                log::warn!("effect queue full, dropping {}", effect.label());
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// What one drain of the queue did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drained {
    pub applied: usize,
    /// The producer is gone and the queue is empty.
    pub finished: bool,
}

/// Consumer half, drained once per render frame.
#[derive(Debug)]
pub struct EffectReceiver {
    rx: Receiver<Effect>,
}

impl EffectReceiver {
    pub fn drain_into(&self, scene: &mut SceneState) -> Drained {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(effect) => {
                    scene.apply(effect);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => {
                    return Drained {
                        applied,
                        finished: false,
                    };
                }
                Err(TryRecvError::Disconnected) => {
                    return Drained {
                        applied,
                        finished: true,
                    };
                }
            }
        }
    }
}

pub fn effect_channel(capacity: usize) -> (EffectSender, EffectReceiver) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (EffectSender { tx }, EffectReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_count_variants_share_effects() {
        assert_eq!(Effect::for_event(Event::SwipeLeft), Some(Effect::RotateLeft));
        assert_eq!(Effect::for_event(Event::SwipeLeft3), Some(Effect::RotateLeft));
        assert_eq!(Effect::for_event(Event::SwipeDown2), Some(Effect::RotateDown));
        assert_eq!(Effect::for_event(Event::DoubleTap), Some(Effect::TogglePerspective));
        assert_eq!(Effect::for_event(Event::Drag2), None);
        assert_eq!(Effect::for_event(Event::Unknown), None);
    }

    #[test]
    fn rotation_impulse_decays() {
        let mut scene = SceneState::default();
        scene.apply(Effect::RotateRight);
        scene.step();
        let first = scene.rotation[1];
        assert!(first > 0.0);
        scene.step();
        assert!(scene.rotation[1] > first);
        assert!(scene.rotation_velocity[0] < ROTATION_IMPULSE_DEG);
        assert_eq!(scene.rotation[0], 0.0);
    }

    #[test]
    fn zoom_moves_along_forward_axis() {
        let mut scene = SceneState::default();
        scene.apply(Effect::ZoomIn);
        scene.step();
        assert!(scene.zoom[2] < 0.0);
        scene.apply(Effect::ZoomOut);
        scene.apply(Effect::ZoomOut);
        scene.step();
        assert!(scene.zoom_velocity[2] > 0.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut scene = SceneState::default();
        scene.apply(Effect::RotateUp);
        scene.apply(Effect::FastHeartbeat);
        scene.apply(Effect::StopHeartbeat);
        scene.step();
        scene.apply(Effect::ResetView);
        assert_eq!(scene, SceneState::default());
    }

    #[test]
    fn queue_drains_in_order() {
        let (tx, rx) = effect_channel(4);
        assert!(tx.send(Effect::SlowHeartbeat));
        assert!(tx.send(Effect::TogglePerspective));
        assert!(tx.send(Effect::FastHeartbeat));

        let mut scene = SceneState::default();
        assert_eq!(
            rx.drain_into(&mut scene),
            Drained {
                applied: 3,
                finished: false
            }
        );
        assert_eq!(scene.heartbeat_bpm, MAX_HEARTBEAT_BPM);
        assert!(!scene.perspective);

        tx.send(Effect::ZoomIn);
        drop(tx);
        let drained = rx.drain_into(&mut scene);
        assert_eq!(drained.applied, 1);
        assert!(drained.finished);
    }

    #[test]
    fn send_reports_disconnect() {
        let (tx, rx) = effect_channel(1);
        drop(rx);
        assert!(!tx.send(Effect::ZoomIn));
    }
}
