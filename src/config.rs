use std::{env, str::FromStr};

use crate::error::{Error, Result};

pub const DEFAULT_WINDOW_CAPACITY: usize = 30;
pub const DEFAULT_MIN_FRAMES: usize = 20;
pub const DEFAULT_MIN_DISTANCE: f32 = 1.5;
pub const DEFAULT_TAP_HISTORY: usize = 5;

/// Built-in detector configurations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileKind {
    #[default]
    Standard,
    /// Alternate poses: thumb swipes, fast pointer swipes, grip and ok drags.
    Extended,
}

impl ProfileKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::Standard => "standard",
            ProfileKind::Extended => "extended",
        }
    }
}

impl FromStr for ProfileKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ProfileKind::Standard),
            "extended" => Ok(ProfileKind::Extended),
            other => Err(Error::Config(format!("unknown profile `{other}`"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Observations kept per track.
    pub window_capacity: usize,
    /// Duration gate used by rules without their own minimum.
    pub min_frames: usize,
    /// Travel required by the distance gate, in mean hand sizes.
    pub min_distance: f32,
    /// Provisional tap markers remembered per track.
    pub tap_history: usize,
    pub profile: ProfileKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            min_frames: DEFAULT_MIN_FRAMES,
            min_distance: DEFAULT_MIN_DISTANCE,
            tap_history: DEFAULT_TAP_HISTORY,
            profile: ProfileKind::Standard,
        }
    }
}

impl EngineConfig {
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    pub fn with_min_frames(mut self, min_frames: usize) -> Self {
        self.min_frames = min_frames;
        self
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_tap_history(mut self, tap_history: usize) -> Self {
        self.tap_history = tap_history;
        self
    }

    pub fn with_profile(mut self, profile: ProfileKind) -> Self {
        self.profile = profile;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_capacity == 0 {
            return Err(Error::Config("window capacity must be positive".into()));
        }
        // The newest frame sits at index capacity - 1, so longer gates can never pass.
        if self.min_frames >= self.window_capacity {
            return Err(Error::Config(format!(
                "min_frames {} must be below the window capacity {}",
                self.min_frames, self.window_capacity
            )));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::Config(format!(
                "min_distance must be a positive number, got {}",
                self.min_distance
            )));
        }
        if self.tap_history < 2 {
            return Err(Error::Config(
                "tap history must hold at least two markers".into(),
            ));
        }
        Ok(())
    }

    /// Defaults overridden by `GESTURE_*` environment variables, then validated.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(profile) = read_env::<ProfileKind>("GESTURE_PROFILE")? {
            config.profile = profile;
        }
        if let Some(capacity) = read_env("GESTURE_WINDOW")? {
            config.window_capacity = capacity;
        }
        if let Some(min_frames) = read_env("GESTURE_MIN_FRAMES")? {
            config.min_frames = min_frames;
        }
        if let Some(min_distance) = read_env("GESTURE_MIN_DISTANCE")? {
            config.min_distance = min_distance;
        }
        if let Some(tap_history) = read_env("GESTURE_TAP_HISTORY")? {
            config.tap_history = tap_history;
        }
        config.validate()?;
        Ok(config)
    }
}

fn read_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(Error::Config(format!("{key}: {err}"))),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| Error::Config(format!("{key}={raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_capacity, 30);
        assert_eq!(config.min_frames, 20);
        assert_eq!(config.tap_history, 5);
        assert_eq!(config.profile, ProfileKind::Standard);
    }

    #[test]
    fn rejects_unreachable_duration_gate() {
        let config = EngineConfig::default().with_window_capacity(20);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(EngineConfig::default()
            .with_window_capacity(21)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        let base = EngineConfig::default();
        assert!(base.clone().with_window_capacity(0).validate().is_err());
        assert!(base.clone().with_min_distance(0.0).validate().is_err());
        assert!(base.clone().with_min_distance(f32::NAN).validate().is_err());
        assert!(base.with_tap_history(1).validate().is_err());
    }

    #[test]
    fn profile_names_parse() {
        assert_eq!("Extended".parse::<ProfileKind>().unwrap(), ProfileKind::Extended);
        assert_eq!(" standard".parse::<ProfileKind>().unwrap(), ProfileKind::Standard);
        assert!("fancy".parse::<ProfileKind>().is_err());
    }

    #[test]
    fn env_values_parse_with_context() {
        assert_eq!(parse_value::<usize>("GESTURE_WINDOW", " 40 ").unwrap(), 40);
        let err = parse_value::<usize>("GESTURE_WINDOW", "forty").unwrap_err();
        assert!(err.to_string().contains("GESTURE_WINDOW"));
    }
}
