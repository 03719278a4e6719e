use super::{Anchor, Axis, Gates, MinFrames, OnReject, Rule, RuleKind, Trigger};
use crate::{
    phase::PhaseLabel as P,
    types::{Event, GestureLabel as G},
};

fn tap() -> Rule {
    Rule {
        name: "tap",
        trigger: Trigger::Gesture(&[G::Point]),
        kind: RuleKind::Tap {
            anchor: P::ZoomInStart,
            min_frames: 8,
            fast_min: 2,
            fast_max: 8,
            double: Event::DoubleTap,
        },
        event: Event::Tap,
    }
}

fn swipe(name: &'static str, end: P, start: P, axis: Axis, event: Event) -> Rule {
    Rule::traversal(name, end, start, Gates::swipe(axis), OnReject::Clear, event)
}

pub(super) fn standard_rules() -> Vec<Rule> {
    vec![
        swipe("swipe-left", P::LeftEnd, P::RightStart, Axis::Horizontal, Event::SwipeLeft),
        swipe("swipe-right", P::RightEnd, P::LeftStart, Axis::Horizontal, Event::SwipeRight),
        Rule::hold(
            "drag",
            Trigger::Phase(P::DragEnd),
            Anchor::Phase(P::DragStart),
            MinFrames::Exactly(3),
            OnReject::Keep,
            Event::Drag,
        ),
        swipe("swipe-up", P::UpEnd, P::DownStart, Axis::Vertical, Event::SwipeUp),
        swipe("swipe-down", P::DownEnd, P::UpStart, Axis::Vertical, Event::SwipeDown),
        Rule::traversal(
            "zoom-in",
            P::ZoomInEnd,
            P::ZoomInStart,
            Gates::timed(15, Axis::Both),
            OnReject::Keep,
            Event::ZoomIn,
        ),
        Rule::traversal(
            "zoom-out",
            P::ZoomOutEnd,
            P::ZoomOutStart,
            Gates::timed(15, Axis::Both),
            OnReject::Clear,
            Event::ZoomOut,
        ),
        swipe("swipe-left3", P::LeftEnd3, P::RightStart3, Axis::Horizontal, Event::SwipeLeft3),
        swipe("swipe-right3", P::RightEnd3, P::LeftStart3, Axis::Horizontal, Event::SwipeRight3),
        Rule::traversal(
            "swipe-up3",
            P::UpEnd3,
            P::DownStart3,
            Gates::timed(15, Axis::Vertical),
            OnReject::Clear,
            Event::SwipeUp3,
        ),
        Rule::traversal(
            "swipe-down3",
            P::DownEnd3,
            P::UpStart3,
            Gates::timed(15, Axis::Vertical),
            OnReject::Clear,
            Event::SwipeDown3,
        ),
        tap(),
        Rule::hold(
            "drop",
            Trigger::Gesture(&[G::Grabbing]),
            Anchor::Gesture(G::Fist),
            MinFrames::Exactly(3),
            OnReject::Keep,
            Event::Drop,
        ),
        Rule::hold(
            "little-finger",
            Trigger::Phase(P::LittleFingerEnd),
            Anchor::Phase(P::LittleFingerStart),
            MinFrames::Exactly(10),
            OnReject::Keep,
            Event::LittleFinger,
        ),
        Rule::hold(
            "stop",
            Trigger::Phase(P::StopEnd),
            Anchor::Phase(P::StopStart),
            MinFrames::Exactly(10),
            OnReject::Keep,
            Event::Stop,
        ),
    ]
}

pub(super) fn extended_rules() -> Vec<Rule> {
    vec![
        swipe("swipe-left", P::LeftEnd, P::RightStart, Axis::Horizontal, Event::SwipeLeft),
        swipe("swipe-right", P::RightEnd, P::LeftStart, Axis::Horizontal, Event::SwipeRight),
        swipe("swipe-up", P::UpEnd, P::DownStart, Axis::Vertical, Event::SwipeUp),
        swipe("swipe-down", P::DownEnd, P::UpStart, Axis::Vertical, Event::SwipeDown),
        Rule::hold(
            "drag2",
            Trigger::Gesture(&[G::Grip]),
            Anchor::Gesture(G::Grip),
            MinFrames::Default,
            OnReject::Keep,
            Event::Drag2,
        ),
        Rule::follow_up(
            "drop2",
            &[G::PartHandHeart, G::PartHandHeart2],
            Event::Drag2,
            Event::Drop2,
        ),
        Rule::hold(
            "drag3",
            Trigger::Gesture(&[G::Ok]),
            Anchor::Gesture(G::Ok),
            MinFrames::Default,
            OnReject::Keep,
            Event::Drag3,
        ),
        Rule::follow_up(
            "drop3",
            &[G::PartHandHeart, G::PartHandHeart2],
            Event::Drag3,
            Event::Drop3,
        ),
        Rule::traversal(
            "fast-swipe-up",
            P::FastSwipeUpEnd,
            P::FastSwipeUpStart,
            Gates::timed(20, Axis::Vertical),
            OnReject::Clear,
            Event::FastSwipeUp,
        ),
        Rule::traversal(
            "fast-swipe-down",
            P::FastSwipeDownEnd,
            P::FastSwipeDownStart,
            Gates::timed(20, Axis::Vertical),
            OnReject::Keep,
            Event::FastSwipeDown,
        ),
        Rule::traversal(
            "zoom-in",
            P::ZoomInEnd,
            P::ZoomInStart,
            Gates::timed(20, Axis::Both),
            OnReject::Keep,
            Event::ZoomIn,
        ),
        Rule::traversal(
            "zoom-out",
            P::ZoomOutEnd,
            P::ZoomOutStart,
            Gates::timed(20, Axis::Both),
            OnReject::Clear,
            Event::ZoomOut,
        ),
        swipe("swipe-left2", P::LeftEnd2, P::RightStart2, Axis::Horizontal, Event::SwipeLeft2),
        swipe("swipe-right2", P::RightEnd2, P::LeftStart2, Axis::Horizontal, Event::SwipeRight2),
        swipe("swipe-left3", P::LeftEnd3, P::RightStart3, Axis::Horizontal, Event::SwipeLeft3),
        swipe("swipe-right3", P::RightEnd3, P::LeftStart3, Axis::Horizontal, Event::SwipeRight3),
        Rule::traversal(
            "swipe-up3",
            P::UpEnd3,
            P::DownStart3,
            Gates::timed(15, Axis::Vertical),
            OnReject::Clear,
            Event::SwipeUp3,
        ),
        Rule::traversal(
            "swipe-down3",
            P::DownEnd3,
            P::UpStart3,
            Gates::timed(15, Axis::Vertical),
            OnReject::Clear,
            Event::SwipeDown3,
        ),
        Rule::hold(
            "drag",
            Trigger::Gesture(&[G::Fist]),
            Anchor::Gesture(G::Grabbing),
            MinFrames::Exactly(3),
            OnReject::Clear,
            Event::Drag,
        )
        .requiring(P::DragStart),
        tap(),
        Rule::traversal(
            "swipe-down2",
            P::DownEnd2,
            P::ZoomOutStart,
            Gates::swipe(Axis::Vertical).with_frames(MinFrames::Off),
            OnReject::Clear,
            Event::SwipeDown2,
        ),
        Rule::traversal(
            "swipe-up2",
            P::ZoomOutStart,
            P::UpStart2,
            Gates::swipe(Axis::Vertical).with_frames(MinFrames::Off),
            OnReject::Clear,
            Event::SwipeUp2,
        ),
        Rule::follow_up(
            "drop",
            &[G::Stop, G::Palm, G::StopInverted, G::Grabbing],
            Event::Drag,
            Event::Drop,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::EngineConfig,
        detector::RecognitionProfile,
        types::{BoundingBox, RawObservation},
        window::SlidingWindow,
    };

    fn names(rules: &[Rule]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name).collect()
    }

    fn window(profile: RecognitionProfile) -> SlidingWindow {
        SlidingWindow::new(Arc::new(profile), &EngineConfig::default())
    }

    fn feed(window: &mut SlidingWindow, gesture: G, x: f32, y: f32, times: usize) {
        for _ in 0..times {
            let bbox = BoundingBox::new(x - 50.0, y - 50.0, x + 50.0, y + 50.0);
            window.append(RawObservation::new(gesture, bbox));
        }
    }

    #[test]
    fn standard_priority_order() {
        assert_eq!(
            names(&standard_rules()),
            [
                "swipe-left",
                "swipe-right",
                "drag",
                "swipe-up",
                "swipe-down",
                "zoom-in",
                "zoom-out",
                "swipe-left3",
                "swipe-right3",
                "swipe-up3",
                "swipe-down3",
                "tap",
                "drop",
                "little-finger",
                "stop",
            ]
        );
    }

    #[test]
    fn extended_priority_order() {
        let rules = extended_rules();
        let order = names(&rules);
        assert_eq!(order.first(), Some(&"swipe-left"));
        assert_eq!(order.last(), Some(&"drop"));
        let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();
        assert!(pos("drag2") < pos("drop2"));
        assert!(pos("zoom-out") < pos("drag"));
        assert!(pos("drag") < pos("tap"));
        assert!(pos("tap") < pos("swipe-down2"));
    }

    #[test]
    fn standard_zoom_in_needs_fifteen_frames() {
        let mut w = window(RecognitionProfile::standard());
        feed(&mut w, G::Fist, 100.0, 100.0, 1);
        feed(&mut w, G::Like, 100.0, 100.0, 13);
        feed(&mut w, G::ThumbIndex, 100.0, 100.0, 1);
        // Fourteen frames: zoom-in keeps its evidence instead of clearing.
        assert_eq!(w.take_action(), None);
        assert_eq!(w.len(), 15);

        feed(&mut w, G::ThumbIndex, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::ZoomIn));
        assert!(w.is_empty());
    }

    #[test]
    fn standard_three_finger_swipe_up_has_no_distance_gate() {
        let mut w = window(RecognitionProfile::standard());
        feed(&mut w, G::TwoDown, 100.0, 100.0, 1);
        feed(&mut w, G::Like, 100.0, 100.0, 14);
        feed(&mut w, G::TwoUp, 100.0, 90.0, 1);
        assert_eq!(w.take_action(), Some(Event::SwipeUp3));
    }

    #[test]
    fn standard_stop_and_little_finger_hold_ten_frames() {
        let mut w = window(RecognitionProfile::standard());
        feed(&mut w, G::Stop, 100.0, 100.0, 10);
        assert_eq!(w.take_action(), None);
        feed(&mut w, G::Stop, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::Stop));

        feed(&mut w, G::LittleFinger, 100.0, 100.0, 11);
        assert_eq!(w.take_action(), Some(Event::LittleFinger));
    }

    #[test]
    fn standard_drop_follows_fist() {
        let mut w = window(RecognitionProfile::standard());
        feed(&mut w, G::Fist, 100.0, 100.0, 1);
        feed(&mut w, G::Grabbing, 100.0, 100.0, 2);
        assert_eq!(w.take_action(), None);
        feed(&mut w, G::Grabbing, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::Drop));
    }

    #[test]
    fn extended_drag_then_drop() {
        let mut w = window(RecognitionProfile::extended());
        feed(&mut w, G::Grabbing, 100.0, 100.0, 3);
        feed(&mut w, G::Fist, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::Drag));

        feed(&mut w, G::Palm, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::Drop));
        assert_eq!(w.last_event(), Some(Event::Drop));

        feed(&mut w, G::Palm, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), None);
    }

    #[test]
    fn extended_grip_hold_and_heart_release() {
        let mut w = window(RecognitionProfile::extended());
        feed(&mut w, G::Grip, 100.0, 100.0, 20);
        assert_eq!(w.take_action(), None);
        feed(&mut w, G::Grip, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::Drag2));

        feed(&mut w, G::PartHandHeart2, 100.0, 100.0, 1);
        assert_eq!(w.take_action(), Some(Event::Drop2));
    }

    #[test]
    fn extended_thumb_swipe_down_skips_duration() {
        let mut w = window(RecognitionProfile::extended());
        feed(&mut w, G::ThumbIndex, 100.0, 100.0, 1);
        feed(&mut w, G::ThumbDown, 110.0, 300.0, 1);
        assert_eq!(w.take_action(), Some(Event::SwipeDown2));
    }
}
