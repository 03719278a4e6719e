use std::{collections::VecDeque, sync::Arc};

use crate::{
    config::EngineConfig,
    detector::RecognitionProfile,
    phase::PhaseLabel,
    types::{Event, GestureLabel, HandObservation, RawObservation},
};

/// Bounded history of labeled observations for one tracked hand.
///
/// The window is the only state pattern matching sees. A confirmed event consumes
/// the evidence that produced it: the window is emptied and the event waits in a
/// single pending slot until [`SlidingWindow::take_action`] reads it.
pub struct SlidingWindow {
    observations: VecDeque<HandObservation>,
    capacity: usize,
    min_frames: usize,
    min_distance: f32,
    action: Option<Event>,
    last_event: Option<Event>,
    tap_markers: VecDeque<Event>,
    tap_history: usize,
    profile: Arc<RecognitionProfile>,
}

impl SlidingWindow {
    pub fn new(profile: Arc<RecognitionProfile>, config: &EngineConfig) -> Self {
        Self {
            observations: VecDeque::with_capacity(config.window_capacity),
            capacity: config.window_capacity,
            min_frames: config.min_frames,
            min_distance: config.min_distance,
            action: None,
            last_event: None,
            tap_markers: VecDeque::with_capacity(config.tap_history),
            tap_history: config.tap_history,
            profile,
        }
    }

    /// Labels and stores one frame's observation, then runs the detector set against it.
    pub fn append(&mut self, raw: RawObservation) {
        if self.observations.len() >= self.capacity {
            self.observations.pop_front();
        }

        let position = self.profile.labeler().label(raw.gesture, self);
        let observation = raw.labeled(position);
        self.observations.push_back(observation);

        let profile = Arc::clone(&self.profile);
        if let Some(event) = profile.detectors().run(&observation, self) {
            self.confirm(event);
        }
    }

    fn confirm(&mut self, event: Event) {
        if let Some(unread) = self.action.replace(event) {
            log::warn!("pending {unread} overwritten by {event} before it was consumed");
        }
        self.last_event = Some(event);
        log::debug!(
            "{} confirmed {event} after {} frames",
            self.profile.name(),
            self.observations.len()
        );
        self.clear();
    }

    /// Hands the pending event to the caller and empties the slot.
    pub fn take_action(&mut self) -> Option<Event> {
        self.action.take()
    }

    pub fn pending_action(&self) -> Option<Event> {
        self.action
    }

    /// Most recent event confirmed on this track, consumed or not.
    pub fn last_event(&self) -> Option<Event> {
        self.last_event
    }

    pub fn index_of_position(&self, position: PhaseLabel) -> Option<usize> {
        self.observations.iter().position(|o| o.position == position)
    }

    pub fn index_of_gesture(&self, gesture: GestureLabel) -> Option<usize> {
        self.observations.iter().position(|o| o.gesture == gesture)
    }

    pub fn contains_position(&self, position: PhaseLabel) -> bool {
        self.observations.iter().any(|o| o.position == position)
    }

    /// Drops every observation. The pending action and tap markers survive.
    pub fn clear(&mut self) {
        self.observations.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HandObservation> {
        self.observations.get(index)
    }

    pub fn newest(&self) -> Option<&HandObservation> {
        self.observations.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames between the observation at `index` and the newest one.
    pub fn elapsed_since(&self, index: usize) -> usize {
        self.observations.len().saturating_sub(index + 1)
    }

    pub fn min_frames(&self) -> usize {
        self.min_frames
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn profile(&self) -> &RecognitionProfile {
        &self.profile
    }

    pub fn tap_markers(&self) -> impl Iterator<Item = &Event> {
        self.tap_markers.iter()
    }

    pub(crate) fn push_tap_marker(&mut self, marker: Event) {
        if self.tap_markers.len() >= self.tap_history {
            self.tap_markers.pop_front();
        }
        self.tap_markers.push_back(marker);
    }

    /// Removes the two newest markers when both equal `marker`.
    pub(crate) fn collapse_tap_markers(&mut self, marker: Event) -> bool {
        let len = self.tap_markers.len();
        if len >= 2 && self.tap_markers[len - 1] == marker && self.tap_markers[len - 2] == marker
        {
            self.tap_markers.truncate(len - 2);
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for SlidingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingWindow")
            .field("profile", &self.profile.name())
            .field(
                "positions",
                &self.observations.iter().map(|o| o.position).collect::<Vec<_>>(),
            )
            .field("action", &self.action)
            .field("tap_markers", &self.tap_markers)
            .finish()
    }
}
