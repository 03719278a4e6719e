pub mod recognizer;
pub mod replay;

pub use recognizer::{RecognizerHandle, RecognizerStats, start_recognizer};
pub use replay::{parse_line, read_frames};
