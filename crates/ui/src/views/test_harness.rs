use std::sync::Arc;

use async_trait::async_trait;
use daily_core::model::MasteryMode;
use daily_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::ads::{AdEnvironment, AdPlatform, RequestConfiguration};
use services::speech::SpeechRequest;
use services::{
    AdError, AdService, AppConfig, AppServices, Clock, SpeechError, SpeechSynthesizer,
    TestAdNetwork,
};
use storage::{ProgressRepository, SentencePool, Storage};

use crate::context::{UiApp, build_app_context, use_selected_day_provider};
use crate::views::daily::DailyTestHandles;
use crate::views::{DailyView, ProgressView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Daily,
    Progress,
}

/// Harness knobs; defaults give auto mastery, working speech and ready ads.
#[derive(Clone)]
pub struct HarnessOptions {
    pub mastery: MasteryMode,
    pub pool_len: usize,
    pub speech_works: bool,
    pub ads_ready: bool,
    pub progress: Option<Arc<dyn ProgressRepository>>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            mastery: MasteryMode::Auto,
            pool_len: 3,
            speech_works: true,
            ads_ready: true,
            progress: None,
        }
    }
}

struct QuietSpeech {
    works: bool,
}

#[async_trait]
impl SpeechSynthesizer for QuietSpeech {
    async fn speak(&self, _request: &SpeechRequest) -> Result<(), SpeechError> {
        if self.works {
            Ok(())
        } else {
            Err(SpeechError::PlaybackUnavailable("no engine".into()))
        }
    }
}

struct FailingAdNetwork;

#[async_trait]
impl services::AdNetwork for FailingAdNetwork {
    async fn initialize(&self, _config: &RequestConfiguration) -> Result<(), AdError> {
        Err(AdError::InitializationFailure("offline".into()))
    }

    fn banner(&self, _unit_id: &str, _position: usize) -> Option<services::BannerSlot> {
        None
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    handles: DailyTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_selected_day_provider(&ctx);
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Daily => rsx! { DailyView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
    pub handles: DailyTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned work and resource reloads have settled.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn pool(len: usize) -> SentencePool {
    SentencePool::from_pairs((0..len).map(|i| (format!("వాక్యం {i}"), format!("Sentence {i}"))))
        .expect("valid pool")
}

pub async fn setup_view_harness(view: ViewKind, options: HarnessOptions) -> ViewHarness {
    let config = AppConfig {
        mastery: options.mastery,
        ..AppConfig::default()
    };
    let mut storage = Storage::in_memory(pool(options.pool_len));
    if let Some(progress) = options.progress {
        storage.progress = progress;
    }

    let ad_config = services::ads::AdConfig {
        platform: AdPlatform::Desktop,
        environment: AdEnvironment::Development,
        banner_unit_id: None,
    };
    let network: Arc<dyn services::AdNetwork> = if options.ads_ready {
        Arc::new(TestAdNetwork)
    } else {
        Arc::new(FailingAdNetwork)
    };
    let ads = AdService::new(network, ad_config);
    ads.initialize().await;

    let app = Arc::new(AppServices::with_parts(
        &config,
        Clock::fixed(fixed_now()),
        storage,
        Arc::new(QuietSpeech {
            works: options.speech_works,
        }),
        ads,
    ));

    let handles = DailyTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, app, handles }
}
