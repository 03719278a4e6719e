//! Line-oriented tracker dumps.
//!
//! One frame per line, hands separated by whitespace, each hand written as
//! `track:gesture:x_min,y_min,x_max,y_max[:time_since_update]`. A blank line is
//! a frame without hands and `#` starts a comment line.

use std::io::BufRead;

use crate::{
    error::{Error, Result},
    types::{BoundingBox, GestureLabel, TrackId, TrackedFrame, TrackedHand},
};

pub fn read_frames<R: BufRead>(reader: R) -> Result<Vec<TrackedFrame>> {
    let mut frames = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(frame) = parse_line(index + 1, &line)? {
            frames.push(frame);
        }
    }
    Ok(frames)
}

/// Parses one line; comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<TrackedFrame>> {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return Ok(None);
    }

    let hands = trimmed
        .split_whitespace()
        .map(|token| parse_hand(token).map_err(|reason| replay_error(line_no, reason)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(TrackedFrame { hands }))
}

fn parse_hand(token: &str) -> std::result::Result<TrackedHand, String> {
    let fields: Vec<&str> = token.split(':').collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(format!("expected track:gesture:bbox[:age], got `{token}`"));
    }

    let track_id = fields[0]
        .parse::<TrackId>()
        .map_err(|err| format!("bad track id `{}`: {err}", fields[0]))?;
    let gesture: GestureLabel = fields[1].parse().map_err(|err: Error| err.to_string())?;
    let bbox = parse_bbox(fields[2])?;
    let time_since_update = match fields.get(3) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|err| format!("bad time_since_update `{raw}`: {err}"))?,
        None => 0,
    };

    Ok(TrackedHand {
        track_id,
        gesture,
        bbox,
        time_since_update,
    })
}

fn parse_bbox(raw: &str) -> std::result::Result<BoundingBox, String> {
    let coords = raw
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f32>()
                .map_err(|err| format!("bad coordinate `{v}`: {err}"))
        })
        .collect::<std::result::Result<Vec<f32>, String>>()?;
    let &[x_min, y_min, x_max, y_max] = coords.as_slice() else {
        return Err(format!("expected four coordinates, got `{raw}`"));
    };
    BoundingBox::new(x_min, y_min, x_max, y_max)
        .validated()
        .map_err(|err| err.to_string())
}

fn replay_error(line: usize, reason: String) -> Error {
    Error::Replay { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_hand_frames() {
        let frame = parse_line(1, "1:palm:0,0,10,10 2:fist:20,0,30,10:3")
            .unwrap()
            .unwrap();
        assert_eq!(frame.hands.len(), 2);
        assert_eq!(frame.hands[0].track_id, 1);
        assert_eq!(frame.hands[0].gesture, GestureLabel::Palm);
        assert!(frame.hands[0].is_fresh());
        assert_eq!(frame.hands[1].gesture, GestureLabel::Fist);
        assert_eq!(frame.hands[1].time_since_update, 3);
        assert_eq!(frame.hands[1].bbox, BoundingBox::new(20.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn blank_lines_are_empty_frames_and_comments_are_skipped() {
        let input = "# recorded session\n1:like:0,0,1,1\n\n1:25:0,0,1,1\n";
        let frames = read_frames(input.as_bytes()).unwrap();
        assert_eq!(frames.len(), 3);
        assert!(frames[1].hands.is_empty());
        assert_eq!(frames[2].hands[0].gesture, GestureLabel::Fist);
    }

    #[test]
    fn malformed_lines_report_their_number() {
        let input = "1:palm:0,0,1,1\n1:palm:0,0,1\n";
        match read_frames(input.as_bytes()) {
            Err(Error::Replay { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("four coordinates"));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        assert!(parse_line(1, "x:palm:0,0,1,1").is_err());
        assert!(parse_line(1, "1:wave:0,0,1,1").is_err());
        assert!(parse_line(1, "1:palm:5,0,1,1").is_err());
        assert!(parse_line(1, "1:palm").is_err());
    }
}
