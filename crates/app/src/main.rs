use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use daily_core::model::{DayNumber, MasteryMode};
use daily_core::stats::DailyTarget;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AdStatus, AppConfig, AppServices, Clock, DayMode, SpeechBackend};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidValue { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.parse().map_err(|_| ArgsError::InvalidValue { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--day <n>] [--fixed-day] [--window-size <n>]");
    eprintln!("                      [--mastery auto|manual] [--target window|<n>]");
    eprintln!("                      [--no-speech] [--banner-unit-id <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --day 1 --window-size 50 --mastery auto --target window");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DAILY_WINDOW_SIZE, DAILY_START_DAY, DAILY_DAY_MODE, DAILY_MASTERY,");
    eprintln!("  DAILY_TARGET, DAILY_SPEECH, DAILY_SPEECH_RATE, DAILY_ADS_ENV, DAILY_AD_EVERY,");
    eprintln!("  DAILY_ADMOB_BANNER_AD_UNIT_ID_ANDROID, DAILY_ADMOB_BANNER_AD_UNIT_ID_IOS,");
    eprintln!("  DAILY_ADMOB_BANNER_AD_UNIT_ID_DESKTOP, RUST_LOG");
}

enum Parsed {
    Run(AppConfig),
    Help,
}

/// Apply command-line flags on top of `config`.
fn parse_args(
    mut config: AppConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Parsed, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--day" => config.start_day = parse_value::<DayNumber>(args, "--day")?,
            "--fixed-day" => config.day_mode = DayMode::Fixed,
            "--window-size" => {
                config.window_size = parse_value::<NonZeroUsize>(args, "--window-size")?;
            }
            "--mastery" => config.mastery = parse_value::<MasteryMode>(args, "--mastery")?,
            "--target" => config.daily_target = parse_value::<DailyTarget>(args, "--target")?,
            "--no-speech" => config.speech = SpeechBackend::Off,
            "--banner-unit-id" => {
                let value = require_value(args, "--banner-unit-id")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidValue {
                        flag: "--banner-unit-id",
                        raw: value,
                    });
                }
                config.ads.banner_unit_id = Some(value);
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Parsed::Run(config))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let mut args = std::env::args().skip(1);
    let config = match parse_args(config, &mut args).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Parsed::Run(config) => config,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    log::info!(
        "starting on day {} ({:?}), window {}, mastery {}, target {}",
        config.start_day,
        config.day_mode,
        config.window_size,
        config.mastery,
        config.daily_target
    );

    let services = AppServices::bundled(&config, Clock::system())?;

    // Ads are optional; a failed start only means empty slots.
    if let AdStatus::Failed(err) = services.ads().initialize().await {
        log::warn!("continuing without ads: {err}");
    }

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Telugu Daily")
            .with_always_on_top(false),
    );

    // The desktop event loop exits the process; the ad network goes with it.
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
