use std::{fmt, str::FromStr};

use crate::{error::Error, phase::PhaseLabel};

pub type TrackId = u32;

/// Static hand pose emitted by the upstream classifier, in classifier index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    HandDown,
    HandRight,
    HandLeft,
    ThumbIndex,
    ThumbLeft,
    ThumbRight,
    ThumbDown,
    HalfUp,
    HalfLeft,
    HalfRight,
    HalfDown,
    PartHandHeart,
    PartHandHeart2,
    FistInverted,
    TwoLeft,
    TwoRight,
    TwoDown,
    Grabbing,
    Grip,
    Point,
    Call,
    Three3,
    LittleFinger,
    MiddleFinger,
    Dislike,
    Fist,
    Four,
    Like,
    Mute,
    Ok,
    One,
    Palm,
    Peace,
    PeaceInverted,
    Rock,
    Stop,
    StopInverted,
    Three,
    Three2,
    TwoUp,
    TwoUpInverted,
    ThreeGun,
    OneLeft,
    OneRight,
    OneDown,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 45] = [
        GestureLabel::HandDown,
        GestureLabel::HandRight,
        GestureLabel::HandLeft,
        GestureLabel::ThumbIndex,
        GestureLabel::ThumbLeft,
        GestureLabel::ThumbRight,
        GestureLabel::ThumbDown,
        GestureLabel::HalfUp,
        GestureLabel::HalfLeft,
        GestureLabel::HalfRight,
        GestureLabel::HalfDown,
        GestureLabel::PartHandHeart,
        GestureLabel::PartHandHeart2,
        GestureLabel::FistInverted,
        GestureLabel::TwoLeft,
        GestureLabel::TwoRight,
        GestureLabel::TwoDown,
        GestureLabel::Grabbing,
        GestureLabel::Grip,
        GestureLabel::Point,
        GestureLabel::Call,
        GestureLabel::Three3,
        GestureLabel::LittleFinger,
        GestureLabel::MiddleFinger,
        GestureLabel::Dislike,
        GestureLabel::Fist,
        GestureLabel::Four,
        GestureLabel::Like,
        GestureLabel::Mute,
        GestureLabel::Ok,
        GestureLabel::One,
        GestureLabel::Palm,
        GestureLabel::Peace,
        GestureLabel::PeaceInverted,
        GestureLabel::Rock,
        GestureLabel::Stop,
        GestureLabel::StopInverted,
        GestureLabel::Three,
        GestureLabel::Three2,
        GestureLabel::TwoUp,
        GestureLabel::TwoUpInverted,
        GestureLabel::ThreeGun,
        GestureLabel::OneLeft,
        GestureLabel::OneRight,
        GestureLabel::OneDown,
    ];

    /// Maps a raw classifier output index onto the vocabulary.
    pub fn from_index(index: usize) -> Result<Self, Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::UnknownGesture(index.to_string()))
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureLabel::HandDown => "hand_down",
            GestureLabel::HandRight => "hand_right",
            GestureLabel::HandLeft => "hand_left",
            GestureLabel::ThumbIndex => "thumb_index",
            GestureLabel::ThumbLeft => "thumb_left",
            GestureLabel::ThumbRight => "thumb_right",
            GestureLabel::ThumbDown => "thumb_down",
            GestureLabel::HalfUp => "half_up",
            GestureLabel::HalfLeft => "half_left",
            GestureLabel::HalfRight => "half_right",
            GestureLabel::HalfDown => "half_down",
            GestureLabel::PartHandHeart => "part_hand_heart",
            GestureLabel::PartHandHeart2 => "part_hand_heart2",
            GestureLabel::FistInverted => "fist_inverted",
            GestureLabel::TwoLeft => "two_left",
            GestureLabel::TwoRight => "two_right",
            GestureLabel::TwoDown => "two_down",
            GestureLabel::Grabbing => "grabbing",
            GestureLabel::Grip => "grip",
            GestureLabel::Point => "point",
            GestureLabel::Call => "call",
            GestureLabel::Three3 => "three3",
            GestureLabel::LittleFinger => "little_finger",
            GestureLabel::MiddleFinger => "middle_finger",
            GestureLabel::Dislike => "dislike",
            GestureLabel::Fist => "fist",
            GestureLabel::Four => "four",
            GestureLabel::Like => "like",
            GestureLabel::Mute => "mute",
            GestureLabel::Ok => "ok",
            GestureLabel::One => "one",
            GestureLabel::Palm => "palm",
            GestureLabel::Peace => "peace",
            GestureLabel::PeaceInverted => "peace_inverted",
            GestureLabel::Rock => "rock",
            GestureLabel::Stop => "stop",
            GestureLabel::StopInverted => "stop_inverted",
            GestureLabel::Three => "three",
            GestureLabel::Three2 => "three2",
            GestureLabel::TwoUp => "two_up",
            GestureLabel::TwoUpInverted => "two_up_inverted",
            GestureLabel::ThreeGun => "three_gun",
            GestureLabel::OneLeft => "one_left",
            GestureLabel::OneRight => "one_right",
            GestureLabel::OneDown => "one_down",
        }
    }
}

impl FromStr for GestureLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(found) = Self::ALL.iter().find(|g| g.name() == trimmed) {
            return Ok(*found);
        }
        // Classifier dumps sometimes carry the numeric index instead of the name.
        match trimmed.parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => Err(Error::UnknownGesture(trimmed.to_string())),
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Rejects boxes the tracker should never produce: non-finite or inverted corners.
    pub fn validated(self) -> Result<Self, Error> {
        let corners = [self.x_min, self.y_min, self.x_max, self.y_max];
        if corners.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidObservation(format!(
                "non-finite bounding box {self:?}"
            )));
        }
        if self.x_max < self.x_min || self.y_max < self.y_min {
            return Err(Error::InvalidObservation(format!(
                "inverted bounding box {self:?}"
            )));
        }
        Ok(self)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Side length of the square with the same area.
    pub fn size(&self) -> f32 {
        (self.width() * self.height()).max(0.0).sqrt()
    }

    pub fn spans_x(&self, x: f32) -> bool {
        self.x_min < x && x < self.x_max
    }

    pub fn spans_y(&self, y: f32) -> bool {
        self.y_min < y && y < self.y_max
    }
}

/// One frame's classifier output for one hand, before phase labeling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawObservation {
    pub gesture: GestureLabel,
    pub bbox: BoundingBox,
}

impl RawObservation {
    pub fn new(gesture: GestureLabel, bbox: BoundingBox) -> Self {
        Self { gesture, bbox }
    }

    pub fn labeled(self, position: PhaseLabel) -> HandObservation {
        HandObservation {
            gesture: self.gesture,
            bbox: self.bbox,
            center: self.bbox.center(),
            size: self.bbox.size(),
            position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandObservation {
    pub gesture: GestureLabel,
    pub bbox: BoundingBox,
    pub center: (f32, f32),
    pub size: f32,
    pub position: PhaseLabel,
}

/// A tracker output row for one hand in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedHand {
    pub track_id: TrackId,
    pub gesture: GestureLabel,
    pub bbox: BoundingBox,
    /// Frames since the tracker last matched a detection; zero for a fresh detection.
    pub time_since_update: u32,
}

impl TrackedHand {
    pub fn fresh(track_id: TrackId, gesture: GestureLabel, bbox: BoundingBox) -> Self {
        Self {
            track_id,
            gesture,
            bbox,
            time_since_update: 0,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.time_since_update == 0
    }

    pub fn observation(&self) -> RawObservation {
        RawObservation::new(self.gesture, self.bbox)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackedFrame {
    pub hands: Vec<TrackedHand>,
}

/// High-level interaction recognized from a sequence of observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Unknown,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    SwipeLeft2,
    SwipeRight2,
    SwipeUp2,
    SwipeDown2,
    SwipeLeft3,
    SwipeRight3,
    SwipeUp3,
    SwipeDown3,
    FastSwipeUp,
    FastSwipeDown,
    ZoomIn,
    ZoomOut,
    Drag,
    Drop,
    Drag2,
    Drop2,
    Drag3,
    Drop3,
    Tap,
    DoubleTap,
    LittleFinger,
    Stop,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Unknown => "UNKNOWN",
            Event::SwipeLeft => "SWIPE_LEFT",
            Event::SwipeRight => "SWIPE_RIGHT",
            Event::SwipeUp => "SWIPE_UP",
            Event::SwipeDown => "SWIPE_DOWN",
            Event::SwipeLeft2 => "SWIPE_LEFT2",
            Event::SwipeRight2 => "SWIPE_RIGHT2",
            Event::SwipeUp2 => "SWIPE_UP2",
            Event::SwipeDown2 => "SWIPE_DOWN2",
            Event::SwipeLeft3 => "SWIPE_LEFT3",
            Event::SwipeRight3 => "SWIPE_RIGHT3",
            Event::SwipeUp3 => "SWIPE_UP3",
            Event::SwipeDown3 => "SWIPE_DOWN3",
            Event::FastSwipeUp => "FAST_SWIPE_UP",
            Event::FastSwipeDown => "FAST_SWIPE_DOWN",
            Event::ZoomIn => "ZOOM_IN",
            Event::ZoomOut => "ZOOM_OUT",
            Event::Drag => "DRAG",
            Event::Drop => "DROP",
            Event::Drag2 => "DRAG2",
            Event::Drop2 => "DROP2",
            Event::Drag3 => "DRAG3",
            Event::Drop3 => "DROP3",
            Event::Tap => "TAP",
            Event::DoubleTap => "DOUBLE_TAP",
            Event::LittleFinger => "LITTLE_FINGER",
            Event::Stop => "STOP",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_index_order_matches_classifier() {
        assert_eq!(GestureLabel::from_index(0).unwrap(), GestureLabel::HandDown);
        assert_eq!(GestureLabel::from_index(17).unwrap(), GestureLabel::Grabbing);
        assert_eq!(GestureLabel::from_index(25).unwrap(), GestureLabel::Fist);
        assert_eq!(GestureLabel::from_index(36).unwrap(), GestureLabel::StopInverted);
        assert_eq!(GestureLabel::from_index(44).unwrap(), GestureLabel::OneDown);
        assert!(GestureLabel::from_index(45).is_err());
        for (i, g) in GestureLabel::ALL.iter().enumerate() {
            assert_eq!(g.index(), i);
        }
    }

    #[test]
    fn gesture_parses_names_and_indices() {
        assert_eq!("grabbing".parse::<GestureLabel>().unwrap(), GestureLabel::Grabbing);
        assert_eq!(" three2 ".parse::<GestureLabel>().unwrap(), GestureLabel::Three2);
        assert_eq!("19".parse::<GestureLabel>().unwrap(), GestureLabel::Point);
        assert!(matches!(
            "jazz_hands".parse::<GestureLabel>(),
            Err(Error::UnknownGesture(_))
        ));
    }

    #[test]
    fn bbox_geometry() {
        let bbox = BoundingBox::new(10.0, 20.0, 50.0, 120.0);
        assert_eq!(bbox.center(), (30.0, 70.0));
        assert!((bbox.size() - (40.0f32 * 100.0).sqrt()).abs() < 1e-4);
        assert!(bbox.spans_x(30.0));
        assert!(!bbox.spans_x(10.0));
        assert!(bbox.spans_y(119.0));
        assert!(!bbox.spans_y(121.0));
    }

    #[test]
    fn bbox_validation_rejects_bad_boxes() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).validated().is_ok());
        assert!(BoundingBox::new(5.0, 0.0, 1.0, 1.0).validated().is_err());
        assert!(BoundingBox::new(0.0, f32::NAN, 1.0, 1.0).validated().is_err());
    }

    #[test]
    fn labeling_derives_center_and_size() {
        let raw = RawObservation::new(GestureLabel::Palm, BoundingBox::new(0.0, 0.0, 4.0, 9.0));
        let obs = raw.labeled(PhaseLabel::DragStart);
        assert_eq!(obs.center, (2.0, 4.5));
        assert!((obs.size - 6.0).abs() < 1e-6);
        assert_eq!(obs.position, PhaseLabel::DragStart);
        assert_eq!(obs.gesture, GestureLabel::Palm);
    }

    #[test]
    fn event_names_are_stable() {
        assert_eq!(Event::DoubleTap.to_string(), "DOUBLE_TAP");
        assert_eq!(Event::SwipeLeft3.to_string(), "SWIPE_LEFT3");
    }
}
