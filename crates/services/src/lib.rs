#![forbid(unsafe_code)]

pub mod ads;
pub mod app_services;
pub mod config;
pub mod day_service;
pub mod error;
pub mod notice;
pub mod progress_service;
pub mod speech;
pub mod stats_service;

pub use daily_core::Clock;

pub use ads::{AdNetwork, AdPlacement, AdService, AdStatus, BannerSlot, TestAdNetwork};
pub use app_services::AppServices;
pub use config::{
    AppConfig, DayMode, ParseDayModeError, ParseSpeechBackendError, SpeechBackend,
};
pub use day_service::DayService;
pub use error::{AdError, AppServicesError, ConfigError, ProgressServiceError, SpeechError};
pub use notice::{Notice, NoticeKind};
pub use progress_service::ProgressService;
pub use speech::{LanguageTag, NoSpeech, SpeechService, SpeechSynthesizer, SystemSpeech};
pub use stats_service::StatsService;
