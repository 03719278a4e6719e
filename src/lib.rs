//! Turns per-frame hand detections into discrete gesture events.
//!
//! Each tracked hand owns a [`SlidingWindow`]; every observation is labeled with a
//! motion phase and matched against an ordered [`DetectorSet`]. Confirmed events
//! are mapped to scene [`Effect`]s and handed to the render side over a bounded queue.

pub mod config;
pub mod detector;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod labeler;
pub mod phase;
pub mod pipeline;
pub mod types;
pub mod window;

pub use config::{EngineConfig, ProfileKind};
pub use detector::{DetectorSet, RecognitionProfile, Rule};
pub use dispatch::{Effect, EffectReceiver, EffectSender, SceneState, effect_channel};
pub use engine::GestureEngine;
pub use error::{Error, Result};
pub use labeler::PositionLabeler;
pub use phase::PhaseLabel;
pub use types::{
    BoundingBox, Event, GestureLabel, HandObservation, RawObservation, TrackId, TrackedFrame,
    TrackedHand,
};
pub use window::SlidingWindow;
