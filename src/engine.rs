use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    config::EngineConfig,
    detector::RecognitionProfile,
    error::Result,
    types::{Event, RawObservation, TrackId, TrackedHand},
    window::SlidingWindow,
};

/// One sliding window per live track, all sharing a single recognition profile.
pub struct GestureEngine {
    config: EngineConfig,
    profile: Arc<RecognitionProfile>,
    tracks: HashMap<TrackId, SlidingWindow>,
}

impl GestureEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let profile = RecognitionProfile::for_kind(config.profile);
        Self::with_profile(config, profile)
    }

    pub fn with_profile(config: EngineConfig, profile: RecognitionProfile) -> Result<Self> {
        config.validate()?;
        log::info!(
            "gesture engine ready: profile {} ({} rules), window {}",
            profile.name(),
            profile.detectors().len(),
            config.window_capacity
        );
        Ok(Self {
            config,
            profile: Arc::new(profile),
            tracks: HashMap::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn profile(&self) -> &RecognitionProfile {
        &self.profile
    }

    /// Feeds one tracker frame and returns the events it produced, ordered by track id.
    ///
    /// Only fresh detections reach the windows; coasting tracks keep their history
    /// untouched. Tracks missing from the frame altogether are treated as dropped.
    pub fn process_frame(&mut self, hands: &[TrackedHand]) -> Vec<(TrackId, Event)> {
        let live: HashSet<TrackId> = hands.iter().map(|h| h.track_id).collect();
        self.retain_tracks(&live);

        let mut fresh: HashMap<TrackId, RawObservation> = HashMap::new();
        for hand in hands.iter().filter(|h| h.is_fresh()) {
            if fresh.insert(hand.track_id, hand.observation()).is_some() {
                log::warn!(
                    "track {} reported twice in one frame; keeping the last row",
                    hand.track_id
                );
            }
        }

        for track_id in fresh.keys() {
            if !self.tracks.contains_key(track_id) {
                log::debug!("track {track_id} started");
                self.tracks.insert(
                    *track_id,
                    SlidingWindow::new(Arc::clone(&self.profile), &self.config),
                );
            }
        }

        let mut events: Vec<(TrackId, Event)> = self
            .tracks
            .par_iter_mut()
            .filter_map(|(track_id, window)| {
                let raw = fresh.get(track_id)?;
                window.append(*raw);
                window.take_action().map(|event| (*track_id, event))
            })
            .collect();
        events.sort_by_key(|(track_id, _)| *track_id);
        events
    }

    /// Appends one observation to a track without frame bookkeeping.
    pub fn append(&mut self, track_id: TrackId, raw: RawObservation) {
        let profile = &self.profile;
        let config = &self.config;
        self.tracks
            .entry(track_id)
            .or_insert_with(|| SlidingWindow::new(Arc::clone(profile), config))
            .append(raw);
    }

    pub fn take_action(&mut self, track_id: TrackId) -> Option<Event> {
        self.tracks.get_mut(&track_id)?.take_action()
    }

    pub fn window(&self, track_id: TrackId) -> Option<&SlidingWindow> {
        self.tracks.get(&track_id)
    }

    pub fn drop_track(&mut self, track_id: TrackId) -> bool {
        self.tracks.remove(&track_id).is_some()
    }

    pub fn retain_tracks(&mut self, live: &HashSet<TrackId>) {
        self.tracks.retain(|track_id, _| {
            let keep = live.contains(track_id);
            if !keep {
                log::debug!("track {track_id} dropped");
            }
            keep
        });
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn track_ids(&self) -> Vec<TrackId> {
        let mut ids: Vec<TrackId> = self.tracks.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
