//! Phase labeling: turns a raw gesture into the start or end of a motion family.
//!
//! There is no toggle state outside the window. Whether a pose opens a motion or
//! closes the complementary one depends only on which phases the window already
//! holds, so clearing the window resets every family at once.

use crate::{phase::PhaseLabel, types::GestureLabel, window::SlidingWindow};

use GestureLabel as G;
use PhaseLabel as P;

/// Emit `emit` when `present` is already in the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Toggle {
    pub present: PhaseLabel,
    /// When set, the first `present` must lie at most this many frames before the incoming one.
    pub within: Option<usize>,
    pub emit: PhaseLabel,
}

impl Toggle {
    pub fn when(present: PhaseLabel, emit: PhaseLabel) -> Self {
        Self {
            present,
            within: None,
            emit,
        }
    }

    pub fn recent(present: PhaseLabel, within: usize, emit: PhaseLabel) -> Self {
        Self {
            present,
            within: Some(within),
            emit,
        }
    }

    fn applies(&self, window: &SlidingWindow) -> bool {
        match window.index_of_position(self.present) {
            Some(index) => match self.within {
                // The incoming observation will land at index `len`.
                Some(limit) => window.len() - index <= limit,
                None => true,
            },
            None => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelRule {
    pub gestures: Vec<GestureLabel>,
    pub toggles: Vec<Toggle>,
    pub otherwise: PhaseLabel,
}

impl LabelRule {
    pub fn new(gestures: &[GestureLabel], toggles: Vec<Toggle>, otherwise: PhaseLabel) -> Self {
        Self {
            gestures: gestures.to_vec(),
            toggles,
            otherwise,
        }
    }

    /// The common two-state family: close `present` with `end`, otherwise open with `start`.
    pub fn pair(
        gestures: &[GestureLabel],
        present: PhaseLabel,
        end: PhaseLabel,
        start: PhaseLabel,
    ) -> Self {
        Self::new(gestures, vec![Toggle::when(present, end)], start)
    }

    pub fn fixed(gestures: &[GestureLabel], phase: PhaseLabel) -> Self {
        Self::new(gestures, Vec::new(), phase)
    }

    fn resolve(&self, window: &SlidingWindow) -> PhaseLabel {
        self.toggles
            .iter()
            .find(|t| t.applies(window))
            .map(|t| t.emit)
            .unwrap_or(self.otherwise)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionLabeler {
    rules: Vec<LabelRule>,
}

impl PositionLabeler {
    pub fn new(rules: Vec<LabelRule>) -> Self {
        Self { rules }
    }

    /// Labels `gesture` against the window contents before insertion.
    pub fn label(&self, gesture: GestureLabel, window: &SlidingWindow) -> PhaseLabel {
        self.rules
            .iter()
            .find(|rule| rule.gestures.contains(&gesture))
            .map(|rule| rule.resolve(window))
            .unwrap_or(PhaseLabel::Unknown)
    }

    pub fn rules(&self) -> &[LabelRule] {
        &self.rules
    }

    pub fn standard() -> Self {
        Self::new(vec![
            LabelRule::pair(&[G::StopInverted], P::DownStart, P::UpEnd, P::UpStart),
            LabelRule::pair(&[G::HandDown], P::UpStart, P::DownEnd, P::DownStart),
            LabelRule::pair(&[G::HandRight], P::LeftStart, P::RightEnd, P::RightStart),
            LabelRule::pair(&[G::HandLeft], P::RightStart, P::LeftEnd, P::LeftStart),
            LabelRule::pair(&[G::Grabbing], P::DragStart, P::DragEnd, P::DragStart),
            LabelRule::fixed(&[G::Palm], P::DragStart),
            LabelRule::new(
                &[G::Fist],
                vec![
                    Toggle::recent(P::DragStart, 5, P::DragEnd),
                    Toggle::when(P::ZoomOutStart, P::ZoomOutEnd),
                ],
                P::ZoomInStart,
            ),
            LabelRule::pair(
                &[G::ThumbIndex, G::Three2],
                P::ZoomInStart,
                P::ZoomInEnd,
                P::ZoomOutStart,
            ),
            LabelRule::pair(&[G::TwoRight], P::LeftStart3, P::RightEnd3, P::RightStart3),
            LabelRule::pair(&[G::TwoLeft], P::RightStart3, P::LeftEnd3, P::LeftStart3),
            LabelRule::pair(&[G::TwoUp], P::DownStart3, P::UpEnd3, P::UpStart3),
            LabelRule::pair(&[G::TwoDown], P::UpStart3, P::DownEnd3, P::DownStart3),
            LabelRule::pair(
                &[G::LittleFinger],
                P::LittleFingerStart,
                P::LittleFingerEnd,
                P::LittleFingerStart,
            ),
            LabelRule::pair(&[G::Stop], P::StopStart, P::StopEnd, P::StopStart),
        ])
    }

    pub fn extended() -> Self {
        Self::new(vec![
            LabelRule::pair(
                &[G::Palm, G::Stop, G::StopInverted],
                P::DownStart,
                P::UpEnd,
                P::UpStart,
            ),
            LabelRule::pair(&[G::HandDown], P::UpStart, P::DownEnd, P::DownStart),
            LabelRule::pair(&[G::HandRight], P::LeftStart, P::RightEnd, P::RightStart),
            LabelRule::pair(&[G::HandLeft], P::RightStart, P::LeftEnd, P::LeftStart),
            LabelRule::pair(
                &[G::One],
                P::FastSwipeUpStart,
                P::FastSwipeUpEnd,
                P::FastSwipeDownStart,
            ),
            LabelRule::pair(
                &[G::Point],
                P::FastSwipeDownStart,
                P::FastSwipeDownEnd,
                P::FastSwipeUpStart,
            ),
            LabelRule::fixed(&[G::Grabbing], P::DragStart),
            LabelRule::pair(&[G::Fist], P::ZoomOutStart, P::ZoomOutEnd, P::ZoomInStart),
            LabelRule::pair(
                &[G::ThumbIndex, G::Three2],
                P::ZoomInStart,
                P::ZoomInEnd,
                P::ZoomOutStart,
            ),
            LabelRule::pair(&[G::ThumbRight], P::LeftStart2, P::RightEnd2, P::RightStart2),
            LabelRule::pair(&[G::ThumbLeft], P::RightStart2, P::LeftEnd2, P::LeftStart2),
            LabelRule::pair(&[G::TwoRight], P::LeftStart3, P::RightEnd3, P::RightStart3),
            LabelRule::pair(&[G::TwoLeft], P::RightStart3, P::LeftEnd3, P::LeftStart3),
            LabelRule::pair(&[G::TwoUp], P::DownStart3, P::UpEnd3, P::UpStart3),
            LabelRule::pair(&[G::TwoDown], P::UpStart3, P::DownEnd3, P::DownStart3),
            LabelRule::pair(&[G::ThumbDown], P::ZoomOutStart, P::DownEnd2, P::UpStart2),
        ])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::EngineConfig,
        detector::{DetectorSet, RecognitionProfile},
        types::{BoundingBox, RawObservation},
    };

    // A window that records labels but never confirms anything.
    fn inert_window(labeler: PositionLabeler) -> SlidingWindow {
        let profile = RecognitionProfile::new("inert", labeler, DetectorSet::new(Vec::new()));
        SlidingWindow::new(Arc::new(profile), &EngineConfig::default())
    }

    fn push(window: &mut SlidingWindow, gesture: GestureLabel) -> PhaseLabel {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        window.append(RawObservation::new(gesture, bbox));
        window.newest().map(|o| o.position).unwrap_or(PhaseLabel::Unknown)
    }

    #[test]
    fn unmapped_gesture_is_unknown() {
        let window = inert_window(PositionLabeler::standard());
        let labeler = PositionLabeler::standard();
        assert_eq!(labeler.label(G::Like, &window), P::Unknown);
        assert_eq!(labeler.label(G::Peace, &window), P::Unknown);
    }

    #[test]
    fn horizontal_family_toggles_on_window_contents() {
        let mut window = inert_window(PositionLabeler::standard());
        assert_eq!(push(&mut window, G::HandLeft), P::LeftStart);
        assert_eq!(push(&mut window, G::HandLeft), P::LeftStart);
        assert_eq!(push(&mut window, G::HandRight), P::RightEnd);

        window.clear();
        assert_eq!(push(&mut window, G::HandRight), P::RightStart);
        assert_eq!(push(&mut window, G::HandLeft), P::LeftEnd);
    }

    #[test]
    fn fist_closes_recent_drag_only() {
        let mut window = inert_window(PositionLabeler::standard());
        assert_eq!(push(&mut window, G::Palm), P::DragStart);
        assert_eq!(push(&mut window, G::Fist), P::DragEnd);

        window.clear();
        push(&mut window, G::Palm);
        for _ in 0..5 {
            push(&mut window, G::Like);
        }
        // Six frames after the palm: too old to be the end of a drag.
        assert_eq!(push(&mut window, G::Fist), P::ZoomInStart);
    }

    #[test]
    fn fist_closes_zoom_out() {
        let mut window = inert_window(PositionLabeler::standard());
        assert_eq!(push(&mut window, G::ThumbIndex), P::ZoomOutStart);
        assert_eq!(push(&mut window, G::Fist), P::ZoomOutEnd);
        assert_eq!(push(&mut window, G::Three2), P::ZoomOutStart);
    }

    #[test]
    fn extended_table_maps_alternate_poses() {
        let mut window = inert_window(PositionLabeler::extended());
        assert_eq!(push(&mut window, G::Stop), P::UpStart);
        assert_eq!(push(&mut window, G::HandDown), P::DownEnd);

        window.clear();
        assert_eq!(push(&mut window, G::Point), P::FastSwipeUpStart);
        assert_eq!(push(&mut window, G::One), P::FastSwipeUpEnd);

        window.clear();
        assert_eq!(push(&mut window, G::ThumbDown), P::UpStart2);
        assert_eq!(push(&mut window, G::ThumbIndex), P::ZoomOutStart);
        assert_eq!(push(&mut window, G::ThumbDown), P::DownEnd2);
        assert_eq!(push(&mut window, G::Grabbing), P::DragStart);
        assert_eq!(push(&mut window, G::Grabbing), P::DragStart);
    }
}
