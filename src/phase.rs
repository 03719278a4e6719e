use std::fmt;

/// Transitional marker assigned to an observation: the start or end of a motion family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseLabel {
    Unknown,
    LeftStart,
    LeftEnd,
    RightStart,
    RightEnd,
    UpStart,
    UpEnd,
    DownStart,
    DownEnd,
    ZoomInStart,
    ZoomInEnd,
    ZoomOutStart,
    ZoomOutEnd,
    DragStart,
    DragEnd,
    LeftStart2,
    LeftEnd2,
    RightStart2,
    RightEnd2,
    UpStart2,
    DownEnd2,
    LeftStart3,
    LeftEnd3,
    RightStart3,
    RightEnd3,
    UpStart3,
    UpEnd3,
    DownStart3,
    DownEnd3,
    FastSwipeUpStart,
    FastSwipeUpEnd,
    FastSwipeDownStart,
    FastSwipeDownEnd,
    LittleFingerStart,
    LittleFingerEnd,
    StopStart,
    StopEnd,
}

impl PhaseLabel {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseLabel::Unknown => "UNKNOWN",
            PhaseLabel::LeftStart => "LEFT_START",
            PhaseLabel::LeftEnd => "LEFT_END",
            PhaseLabel::RightStart => "RIGHT_START",
            PhaseLabel::RightEnd => "RIGHT_END",
            PhaseLabel::UpStart => "UP_START",
            PhaseLabel::UpEnd => "UP_END",
            PhaseLabel::DownStart => "DOWN_START",
            PhaseLabel::DownEnd => "DOWN_END",
            PhaseLabel::ZoomInStart => "ZOOM_IN_START",
            PhaseLabel::ZoomInEnd => "ZOOM_IN_END",
            PhaseLabel::ZoomOutStart => "ZOOM_OUT_START",
            PhaseLabel::ZoomOutEnd => "ZOOM_OUT_END",
            PhaseLabel::DragStart => "DRAG_START",
            PhaseLabel::DragEnd => "DRAG_END",
            PhaseLabel::LeftStart2 => "LEFT_START2",
            PhaseLabel::LeftEnd2 => "LEFT_END2",
            PhaseLabel::RightStart2 => "RIGHT_START2",
            PhaseLabel::RightEnd2 => "RIGHT_END2",
            PhaseLabel::UpStart2 => "UP_START2",
            PhaseLabel::DownEnd2 => "DOWN_END2",
            PhaseLabel::LeftStart3 => "LEFT_START3",
            PhaseLabel::LeftEnd3 => "LEFT_END3",
            PhaseLabel::RightStart3 => "RIGHT_START3",
            PhaseLabel::RightEnd3 => "RIGHT_END3",
            PhaseLabel::UpStart3 => "UP_START3",
            PhaseLabel::UpEnd3 => "UP_END3",
            PhaseLabel::DownStart3 => "DOWN_START3",
            PhaseLabel::DownEnd3 => "DOWN_END3",
            PhaseLabel::FastSwipeUpStart => "FAST_SWIPE_UP_START",
            PhaseLabel::FastSwipeUpEnd => "FAST_SWIPE_UP_END",
            PhaseLabel::FastSwipeDownStart => "FAST_SWIPE_DOWN_START",
            PhaseLabel::FastSwipeDownEnd => "FAST_SWIPE_DOWN_END",
            PhaseLabel::LittleFingerStart => "LITTLE_FINGER_START",
            PhaseLabel::LittleFingerEnd => "LITTLE_FINGER_END",
            PhaseLabel::StopStart => "STOP_START",
            PhaseLabel::StopEnd => "STOP_END",
        }
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
