//! Ordered pattern rules evaluated against a window after every append.

pub mod gates;
mod presets;

use crate::{
    config::ProfileKind,
    labeler::PositionLabeler,
    phase::PhaseLabel,
    types::{Event, GestureLabel, HandObservation},
    window::SlidingWindow,
};

pub use gates::{Axis, GateCheck, Gates, MinFrames};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Confirm(Event),
    /// Candidate disqualified: the window is cleared and evaluation continues.
    Reject,
    Abstain,
}

/// What the newest observation must look like for a rule to be considered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Phase(PhaseLabel),
    Gesture(&'static [GestureLabel]),
}

impl Trigger {
    fn matches(&self, obs: &HandObservation) -> bool {
        match self {
            Trigger::Phase(phase) => obs.position == *phase,
            Trigger::Gesture(gestures) => gestures.contains(&obs.gesture),
        }
    }
}

/// Locates the start of a candidate pattern: its first occurrence in the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Phase(PhaseLabel),
    Gesture(GestureLabel),
}

impl Anchor {
    fn locate(&self, window: &SlidingWindow) -> Option<usize> {
        match self {
            Anchor::Phase(phase) => window.index_of_position(*phase),
            Anchor::Gesture(gesture) => window.index_of_gesture(*gesture),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnReject {
    Clear,
    Keep,
}

impl OnReject {
    fn outcome(&self) -> Outcome {
        match self {
            OnReject::Clear => Outcome::Reject,
            OnReject::Keep => Outcome::Abstain,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RuleKind {
    /// Two endpoints of a motion, checked by distance, duration and axis gates.
    Traversal {
        anchor: Anchor,
        gates: Gates,
        on_reject: OnReject,
    },
    /// A pose held long enough while nothing is pending.
    Hold {
        anchor: Anchor,
        requires: Option<PhaseLabel>,
        min_frames: MinFrames,
        on_reject: OnReject,
    },
    /// Slow transitions confirm directly; fast ones leave a marker and pair up.
    Tap {
        anchor: PhaseLabel,
        min_frames: usize,
        fast_min: usize,
        fast_max: usize,
        double: Event,
    },
    /// Closes a gesture confirmed earlier on the same track.
    FollowUp { after: Event },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub kind: RuleKind,
    pub event: Event,
}

impl Rule {
    pub fn traversal(
        name: &'static str,
        end: PhaseLabel,
        start: PhaseLabel,
        gates: Gates,
        on_reject: OnReject,
        event: Event,
    ) -> Self {
        Self {
            name,
            trigger: Trigger::Phase(end),
            kind: RuleKind::Traversal {
                anchor: Anchor::Phase(start),
                gates,
                on_reject,
            },
            event,
        }
    }

    pub fn hold(
        name: &'static str,
        trigger: Trigger,
        anchor: Anchor,
        min_frames: MinFrames,
        on_reject: OnReject,
        event: Event,
    ) -> Self {
        Self {
            name,
            trigger,
            kind: RuleKind::Hold {
                anchor,
                requires: None,
                min_frames,
                on_reject,
            },
            event,
        }
    }

    pub fn follow_up(
        name: &'static str,
        gestures: &'static [GestureLabel],
        after: Event,
        event: Event,
    ) -> Self {
        Self {
            name,
            trigger: Trigger::Gesture(gestures),
            kind: RuleKind::FollowUp { after },
            event,
        }
    }

    /// Only meaningful for hold rules: the window must also contain `phase`.
    pub fn requiring(mut self, phase: PhaseLabel) -> Self {
        if let RuleKind::Hold { requires, .. } = &mut self.kind {
            *requires = Some(phase);
        }
        self
    }

    pub fn evaluate(&self, newest: &HandObservation, window: &mut SlidingWindow) -> Outcome {
        if !self.trigger.matches(newest) {
            return Outcome::Abstain;
        }

        match &self.kind {
            RuleKind::Traversal {
                anchor,
                gates,
                on_reject,
            } => {
                let Some(index) = anchor.locate(window) else {
                    return Outcome::Abstain;
                };
                let Some(start) = window.get(index).copied() else {
                    return Outcome::Abstain;
                };
                let check = GateCheck {
                    start: &start,
                    end: newest,
                    elapsed: window.elapsed_since(index),
                    default_frames: window.min_frames(),
                    min_distance: window.min_distance(),
                };
                if gates.passes(&check) {
                    Outcome::Confirm(self.event)
                } else {
                    on_reject.outcome()
                }
            }
            RuleKind::Hold {
                anchor,
                requires,
                min_frames,
                on_reject,
            } => {
                if window.pending_action().is_some() {
                    return Outcome::Abstain;
                }
                if let Some(phase) = requires {
                    if !window.contains_position(*phase) {
                        return Outcome::Abstain;
                    }
                }
                let Some(index) = anchor.locate(window) else {
                    return Outcome::Abstain;
                };
                if window.elapsed_since(index) >= min_frames.resolve(window.min_frames()) {
                    Outcome::Confirm(self.event)
                } else {
                    on_reject.outcome()
                }
            }
            RuleKind::Tap {
                anchor,
                min_frames,
                fast_min,
                fast_max,
                double,
            } => {
                let Some(index) = window.index_of_position(*anchor) else {
                    return Outcome::Abstain;
                };
                let Some(start) = window.get(index).copied() else {
                    return Outcome::Abstain;
                };
                if !Axis::Both.holds(&start, newest) {
                    return Outcome::Abstain;
                }
                let elapsed = window.elapsed_since(index);
                if elapsed >= *min_frames {
                    Outcome::Confirm(self.event)
                } else if (*fast_min..*fast_max).contains(&elapsed) {
                    window.push_tap_marker(self.event);
                    if window.collapse_tap_markers(self.event) {
                        Outcome::Confirm(*double)
                    } else {
                        Outcome::Reject
                    }
                } else {
                    Outcome::Abstain
                }
            }
            RuleKind::FollowUp { after } => {
                if window.pending_action().is_none() && window.last_event() == Some(*after) {
                    Outcome::Confirm(self.event)
                } else {
                    Outcome::Abstain
                }
            }
        }
    }
}

/// Rules in priority order; the first confirmation wins the frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectorSet {
    rules: Vec<Rule>,
}

impl DetectorSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(presets::standard_rules())
    }

    pub fn extended() -> Self {
        Self::new(presets::extended_rules())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn run(&self, newest: &HandObservation, window: &mut SlidingWindow) -> Option<Event> {
        for rule in &self.rules {
            match rule.evaluate(newest, window) {
                Outcome::Confirm(event) => return Some(event),
                Outcome::Reject => {
                    log::debug!(
                        "{} rejected at {} ({} frames discarded)",
                        rule.name,
                        newest.position,
                        window.len()
                    );
                    window.clear();
                }
                Outcome::Abstain => {}
            }
        }
        None
    }
}

/// A labeling table paired with the detector set that understands its phases.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionProfile {
    name: String,
    labeler: PositionLabeler,
    detectors: DetectorSet,
}

impl RecognitionProfile {
    pub fn new(name: impl Into<String>, labeler: PositionLabeler, detectors: DetectorSet) -> Self {
        Self {
            name: name.into(),
            labeler,
            detectors,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            ProfileKind::Standard.label(),
            PositionLabeler::standard(),
            DetectorSet::standard(),
        )
    }

    pub fn extended() -> Self {
        Self::new(
            ProfileKind::Extended.label(),
            PositionLabeler::extended(),
            DetectorSet::extended(),
        )
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Standard => Self::standard(),
            ProfileKind::Extended => Self::extended(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labeler(&self) -> &PositionLabeler {
        &self.labeler
    }

    pub fn detectors(&self) -> &DetectorSet {
        &self.detectors
    }
}
