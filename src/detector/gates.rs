//! Quality gates applied between the anchor of a candidate pattern and the newest frame.

use crate::types::HandObservation;

/// Which bounding-box span of the anchor the newest center must fall inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Free,
    /// End center stays within the anchor's vertical span.
    Horizontal,
    /// End center stays within the anchor's horizontal span.
    Vertical,
    Both,
}

impl Axis {
    pub fn holds(&self, start: &HandObservation, end: &HandObservation) -> bool {
        let (x, y) = end.center;
        match self {
            Axis::Free => true,
            Axis::Horizontal => start.bbox.spans_y(y),
            Axis::Vertical => start.bbox.spans_x(x),
            Axis::Both => start.bbox.spans_x(x) && start.bbox.spans_y(y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinFrames {
    Off,
    /// The engine-wide `min_frames` setting.
    Default,
    Exactly(usize),
}

impl MinFrames {
    pub fn resolve(&self, default: usize) -> usize {
        match self {
            MinFrames::Off => 0,
            MinFrames::Default => default,
            MinFrames::Exactly(frames) => *frames,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gates {
    pub distance: bool,
    pub min_frames: MinFrames,
    pub axis: Axis,
}

impl Gates {
    pub fn swipe(axis: Axis) -> Self {
        Self {
            distance: true,
            min_frames: MinFrames::Default,
            axis,
        }
    }

    pub fn timed(frames: usize, axis: Axis) -> Self {
        Self {
            distance: false,
            min_frames: MinFrames::Exactly(frames),
            axis,
        }
    }

    pub fn with_frames(mut self, min_frames: MinFrames) -> Self {
        self.min_frames = min_frames;
        self
    }

    pub fn passes(&self, check: &GateCheck<'_>) -> bool {
        if self.distance && !travelled(check.start, check.end, check.min_distance) {
            return false;
        }
        if check.elapsed < self.min_frames.resolve(check.default_frames) {
            return false;
        }
        self.axis.holds(check.start, check.end)
    }
}

pub struct GateCheck<'a> {
    pub start: &'a HandObservation,
    pub end: &'a HandObservation,
    pub elapsed: usize,
    pub default_frames: usize,
    pub min_distance: f32,
}

/// Center travel measured in mean hand sizes must exceed `min_distance`.
pub fn travelled(start: &HandObservation, end: &HandObservation, min_distance: f32) -> bool {
    let mean_size = (start.size + end.size) / 2.0;
    if mean_size <= f32::EPSILON {
        return false;
    }
    let dx = end.center.0 - start.center.0;
    let dy = end.center.1 - start.center.1;
    (dx * dx + dy * dy).sqrt() / mean_size > min_distance
}
