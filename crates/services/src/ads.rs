//! Banner ad slots.
//!
//! The ad network is an external SDK reached through `AdNetwork`. `AdService`
//! owns its lifecycle for the whole process: it initializes the network once,
//! remembers the outcome, and turns every failure into an empty slot.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AdError;

/// Google's public test banner unit.
pub const TEST_BANNER_UNIT_ID: &str = "ca-app-pub-3940256099942544/6300978111";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdPlatform {
    Android,
    Ios,
    Desktop,
    Web,
}

impl AdPlatform {
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            AdPlatform::Android
        } else if cfg!(target_os = "ios") {
            AdPlatform::Ios
        } else if cfg!(target_arch = "wasm32") {
            AdPlatform::Web
        } else {
            AdPlatform::Desktop
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AdPlatform::Android => "android",
            AdPlatform::Ios => "ios",
            AdPlatform::Desktop => "desktop",
            AdPlatform::Web => "web",
        }
    }

    /// Whether banner ads can be shown here at all.
    #[must_use]
    pub fn supports_ads(self) -> bool {
        !matches!(self, AdPlatform::Web)
    }

    /// Environment variable holding this platform's banner unit id.
    #[must_use]
    pub fn banner_unit_env_var(self) -> Option<&'static str> {
        match self {
            AdPlatform::Android => Some("DAILY_ADMOB_BANNER_AD_UNIT_ID_ANDROID"),
            AdPlatform::Ios => Some("DAILY_ADMOB_BANNER_AD_UNIT_ID_IOS"),
            AdPlatform::Desktop => Some("DAILY_ADMOB_BANNER_AD_UNIT_ID_DESKTOP"),
            AdPlatform::Web => None,
        }
    }
}

impl fmt::Display for AdPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Development builds only ever request test ads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdEnvironment {
    Development,
    Production,
}

impl Default for AdEnvironment {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            AdEnvironment::Development
        } else {
            AdEnvironment::Production
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdConfig {
    pub platform: AdPlatform,
    pub environment: AdEnvironment,
    /// Explicitly configured unit id; wins over the environment.
    pub banner_unit_id: Option<String>,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self {
            platform: AdPlatform::current(),
            environment: AdEnvironment::default(),
            banner_unit_id: None,
        }
    }
}

impl AdConfig {
    /// Resolve the banner unit id: explicit value, then the platform's
    /// environment variable, then the test unit. Blank values are skipped.
    #[must_use]
    pub fn resolve_banner_unit_id(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        if self.environment == AdEnvironment::Development {
            return TEST_BANNER_UNIT_ID.to_string();
        }
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        self.banner_unit_id
            .clone()
            .and_then(non_blank)
            .or_else(|| {
                self.platform
                    .banner_unit_env_var()
                    .and_then(&lookup)
                    .and_then(non_blank)
            })
            .unwrap_or_else(|| TEST_BANNER_UNIT_ID.to_string())
    }

    #[must_use]
    pub fn banner_unit_id(&self) -> String {
        self.resolve_banner_unit_id(|key| std::env::var(key).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRating {
    G,
    Pg,
    T,
    Ma,
}

/// Request options applied once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestConfiguration {
    pub max_ad_content_rating: ContentRating,
    pub tag_for_child_directed_treatment: bool,
    pub tag_for_under_age_of_consent: bool,
}

impl Default for RequestConfiguration {
    fn default() -> Self {
        Self {
            max_ad_content_rating: ContentRating::G,
            tag_for_child_directed_treatment: false,
            tag_for_under_age_of_consent: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSize {
    Banner,
}

/// What the view needs to draw one banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerSlot {
    pub position: usize,
    pub unit_id: String,
    pub size: BannerSize,
    pub non_personalized_only: bool,
    pub label: String,
}

#[async_trait]
pub trait AdNetwork: Send + Sync {
    /// # Errors
    ///
    /// Returns `AdError::InitializationFailure` if the SDK cannot start.
    async fn initialize(&self, config: &RequestConfiguration) -> Result<(), AdError>;

    /// A banner for `position`, or `None` if the network has nothing to show.
    fn banner(&self, unit_id: &str, position: usize) -> Option<BannerSlot>;

    async fn shutdown(&self) {}
}

/// Serves labelled placeholder banners for the test unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestAdNetwork;

#[async_trait]
impl AdNetwork for TestAdNetwork {
    async fn initialize(&self, _config: &RequestConfiguration) -> Result<(), AdError> {
        Ok(())
    }

    fn banner(&self, unit_id: &str, position: usize) -> Option<BannerSlot> {
        Some(BannerSlot {
            position,
            unit_id: unit_id.to_string(),
            size: BannerSize::Banner,
            non_personalized_only: false,
            label: "Advertisement".to_string(),
        })
    }
}

/// Where banners go in the sentence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdPlacement {
    every: NonZeroUsize,
}

impl AdPlacement {
    #[must_use]
    pub fn every(every: NonZeroUsize) -> Self {
        Self { every }
    }

    /// Slot position following the card at `index`, if one goes there.
    #[must_use]
    pub fn slot_after(&self, index: usize) -> Option<usize> {
        let shown = index.checked_add(1)?;
        (shown % self.every.get() == 0).then(|| shown / self.every.get() - 1)
    }
}

impl Default for AdPlacement {
    fn default() -> Self {
        Self {
            every: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdStatus {
    Uninitialized,
    Initializing,
    Ready,
    Failed(AdError),
    Unsupported,
    ShutDown,
}

/// Process-wide owner of the ad network.
///
/// Create one per process in the composition root and share it. `initialize`
/// is safe to call repeatedly: once ready, later calls return immediately.
pub struct AdService {
    network: Arc<dyn AdNetwork>,
    config: AdConfig,
    unit_id: String,
    request: RequestConfiguration,
    status: Mutex<AdStatus>,
}

impl AdService {
    #[must_use]
    pub fn new(network: Arc<dyn AdNetwork>, config: AdConfig) -> Self {
        let unit_id = config.banner_unit_id();
        Self::with_unit_id(network, config, unit_id)
    }

    #[must_use]
    pub fn with_unit_id(network: Arc<dyn AdNetwork>, config: AdConfig, unit_id: String) -> Self {
        let status = if config.platform.supports_ads() {
            AdStatus::Uninitialized
        } else {
            AdStatus::Unsupported
        };
        Self {
            network,
            config,
            unit_id,
            request: RequestConfiguration::default(),
            status: Mutex::new(status),
        }
    }

    #[must_use]
    pub fn status(&self) -> AdStatus {
        self.status
            .lock()
            .map_or(AdStatus::Uninitialized, |status| status.clone())
    }

    #[must_use]
    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    fn set_status(&self, next: AdStatus) {
        if let Ok(mut status) = self.status.lock() {
            *status = next;
        }
    }

    /// Start the network once. Failures are logged and remembered, never raised.
    pub async fn initialize(&self) -> AdStatus {
        {
            let Ok(mut status) = self.status.lock() else {
                return AdStatus::Uninitialized;
            };
            match *status {
                AdStatus::Ready | AdStatus::Initializing | AdStatus::Unsupported => {
                    return status.clone();
                }
                AdStatus::Uninitialized | AdStatus::Failed(_) | AdStatus::ShutDown => {
                    *status = AdStatus::Initializing;
                }
            }
        }

        let next = match self.network.initialize(&self.request).await {
            Ok(()) => {
                log::info!(
                    "ad network initialized on {} (unit {})",
                    self.config.platform,
                    self.unit_id
                );
                AdStatus::Ready
            }
            Err(err) => {
                log::warn!("ad network failed to initialize: {err}");
                AdStatus::Failed(err)
            }
        };
        self.set_status(next.clone());
        next
    }

    /// Stop the network. Slots render nothing until `initialize` runs again.
    pub async fn shutdown(&self) {
        if self.status() != AdStatus::Ready {
            return;
        }
        self.network.shutdown().await;
        self.set_status(AdStatus::ShutDown);
        log::info!("ad network shut down");
    }

    /// Banner for slot `position`, or nothing when ads are unavailable.
    #[must_use]
    pub fn render_slot(&self, position: usize) -> Option<BannerSlot> {
        if self.status() != AdStatus::Ready {
            return None;
        }
        self.network.banner(&self.unit_id, position)
    }
}
