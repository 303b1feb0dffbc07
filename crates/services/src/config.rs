//! Runtime configuration read from `DAILY_*` environment variables.

use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;

use daily_core::model::{DayNumber, MasteryMode};
use daily_core::stats::DailyTarget;
use daily_core::window::{DEFAULT_WINDOW_SIZE, DaySelector};
use thiserror::Error;

use crate::ads::{AdConfig, AdEnvironment, AdPlacement};
use crate::error::ConfigError;
use crate::speech::SpeechSettings;

/// How the displayed day is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMode {
    /// Always show the start day.
    Fixed,
    /// Start on the start day and let the learner move between days.
    #[default]
    Advancing,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown day mode {0:?} (expected `fixed` or `advancing`)")]
pub struct ParseDayModeError(String);

impl FromStr for DayMode {
    type Err = ParseDayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(DayMode::Fixed),
            "advancing" => Ok(DayMode::Advancing),
            _ => Err(ParseDayModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechBackend {
    #[default]
    System,
    Off,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown speech backend {0:?} (expected `system` or `off`)")]
pub struct ParseSpeechBackendError(String);

impl FromStr for SpeechBackend {
    type Err = ParseSpeechBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" | "on" => Ok(SpeechBackend::System),
            "off" | "none" => Ok(SpeechBackend::Off),
            _ => Err(ParseSpeechBackendError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_size: NonZeroUsize,
    pub start_day: DayNumber,
    pub day_mode: DayMode,
    pub mastery: MasteryMode,
    pub daily_target: DailyTarget,
    pub speech: SpeechBackend,
    pub speech_settings: SpeechSettings,
    pub ads: AdConfig,
    pub ad_placement: AdPlacement,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            start_day: DayNumber::FIRST,
            day_mode: DayMode::default(),
            mastery: MasteryMode::default(),
            daily_target: DailyTarget::default(),
            speech: SpeechBackend::default(),
            speech_settings: SpeechSettings::default(),
            ads: AdConfig::default(),
            ad_placement: AdPlacement::default(),
        }
    }
}

impl AppConfig {
    /// Read the process environment on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a variable that is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a variable that is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let var = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        };

        if let Some((key, value)) = var("DAILY_WINDOW_SIZE") {
            config.window_size = parse(key, &value)?;
        }
        if let Some((key, value)) = var("DAILY_START_DAY") {
            config.start_day = parse(key, &value)?;
        }
        if let Some((key, value)) = var("DAILY_DAY_MODE") {
            config.day_mode = parse(key, &value)?;
        }
        if let Some((key, value)) = var("DAILY_MASTERY") {
            config.mastery = parse(key, &value)?;
        }
        if let Some((key, value)) = var("DAILY_TARGET") {
            config.daily_target = parse(key, &value)?;
        }
        if let Some((key, value)) = var("DAILY_SPEECH") {
            config.speech = parse(key, &value)?;
        }
        if let Some((key, value)) = var("DAILY_SPEECH_RATE") {
            let rate: f32 = parse(key, &value)?;
            if !(rate.is_finite() && rate > 0.0) {
                return Err(invalid(key, &value, "must be a positive number"));
            }
            config.speech_settings.rate = rate;
        }
        if let Some((key, value)) = var("DAILY_ADS_ENV") {
            config.ads.environment = match value.to_ascii_lowercase().as_str() {
                "development" | "dev" => AdEnvironment::Development,
                "production" | "prod" => AdEnvironment::Production,
                _ => return Err(invalid(key, &value, "expected `development` or `production`")),
            };
        }
        if let Some((key, value)) = var("DAILY_AD_EVERY") {
            config.ad_placement = AdPlacement::every(parse(key, &value)?);
        }

        Ok(config)
    }

    /// Starting day selection for this configuration.
    #[must_use]
    pub fn day_selector(&self) -> DaySelector {
        match self.day_mode {
            DayMode::Fixed => DaySelector::Fixed(self.start_day),
            DayMode::Advancing => DaySelector::Advancing(self.start_day),
        }
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err: T::Err| invalid(key, value, err.to_string()))
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var: key,
        value: value.to_string(),
        reason: reason.into(),
    }
}
