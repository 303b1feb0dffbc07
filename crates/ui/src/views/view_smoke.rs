use std::sync::Arc;

use daily_core::model::{MasteryMode, ProgressEntry, SentenceId};
use services::LanguageTag;
use storage::{ProgressRepository, StorageError};

use super::test_harness::{HarnessOptions, ViewKind, setup_view_harness};
use crate::vm::DailyIntent;

#[tokio::test(flavor = "current_thread")]
async fn daily_view_smoke_renders_cards_and_header() {
    let mut harness = setup_view_harness(ViewKind::Daily, HarnessOptions::default()).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Day 1 • 3 New Phrases"), "missing header in {html}");
    assert!(html.contains("0/3"), "missing learned count in {html}");
    assert!(html.contains("#1"), "missing card number in {html}");
    assert!(html.contains("వాక్యం 2"), "missing source text in {html}");
    assert!(html.contains("Sentence 2"), "missing english text in {html}");
    assert!(html.contains("Know It"), "missing action in {html}");
    assert!(!html.contains("Mark mastered"), "auto mode shows toggles in {html}");
    assert!(!html.contains("Viewed"), "untouched cards show views in {html}");
    assert!(!html.contains("Last viewed"), "untouched cards show a time in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_know_it_twice_masters_card() {
    let mut harness = setup_view_harness(ViewKind::Daily, HarnessOptions::default()).await;
    harness.rebuild();
    harness.settle().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(DailyIntent::KnowIt(SentenceId::new(0)));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Viewed 1 time"), "missing view count in {html}");
    assert!(
        html.contains("Last viewed 2023-11-14 22:13 UTC"),
        "missing last viewed time in {html}"
    );
    assert!(html.contains("1/3"), "missing learned count in {html}");

    dispatch.call(DailyIntent::KnowIt(SentenceId::new(0)));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Viewed 2 times"), "missing view count in {html}");
    assert!(html.contains("sentence-card--mastered"), "missing mastered card in {html}");
    assert!(html.contains("🌳 1"), "missing mastered count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_manual_mastery_before_completion_shows_notice() {
    let options = HarnessOptions {
        mastery: MasteryMode::Manual,
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Daily, options).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Mark completed"), "missing toggle in {html}");

    let dispatch = harness.handles.dispatch();
    dispatch.call(DailyIntent::ToggleMastered(SentenceId::new(1)));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Not completed yet"), "missing notice in {html}");
    let entry = harness
        .app
        .progress()
        .get_or_default(SentenceId::new(1))
        .await
        .unwrap();
    assert!(!entry.is_mastered());

    dispatch.call(DailyIntent::DismissNotice);
    harness.settle().await;
    assert!(!harness.render().contains("Not completed yet"));
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_speech_failure_shows_notice_without_progress() {
    let options = HarnessOptions {
        speech_works: false,
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Daily, options).await;
    harness.rebuild();
    harness.settle().await;

    harness
        .handles
        .dispatch()
        .call(DailyIntent::Speak(SentenceId::new(0), LanguageTag::TeluguIn));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Speech Error"), "missing notice in {html}");
    assert!(
        html.contains("Text-to-speech is not available on this device."),
        "missing notice body in {html}"
    );
    assert!(html.contains("0/3"), "speech changed progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_reset_requires_confirmation() {
    let mut harness = setup_view_harness(ViewKind::Daily, HarnessOptions::default()).await;
    harness.rebuild();
    harness.settle().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(DailyIntent::KnowIt(SentenceId::new(2)));
    harness.settle().await;
    assert!(harness.render().contains("1/3"));

    dispatch.call(DailyIntent::RequestReset);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("This cannot be undone"), "missing confirmation in {html}");
    assert!(html.contains("1/3"), "reset ran before confirmation in {html}");

    dispatch.call(DailyIntent::ConfirmReset);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0/3"), "reset did not clear progress in {html}");
    assert!(!html.contains("Viewed"), "reset left view counts in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_interleaves_ads_only_when_ready() {
    let options = HarnessOptions {
        pool_len: 12,
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Daily, options).await;
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert_eq!(html.matches("ad-slot__label").count(), 1, "expected one ad in {html}");

    let options = HarnessOptions {
        pool_len: 12,
        ads_ready: false,
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Daily, options).await;
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("ad-slot"), "failed ads still rendered in {html}");
    assert!(html.contains("#12"), "cards missing after failed ads in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_next_day_moves_window() {
    let options = HarnessOptions {
        pool_len: 60,
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Daily, options).await;
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("Day 1 • 50 New Phrases"));

    harness.handles.dispatch().call(DailyIntent::NextDay);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Day 2 • 10 New Phrases"), "missing day 2 in {html}");
    assert!(html.contains("#51"), "missing first card of day 2 in {html}");

    // There is no day 3 in a pool of 60.
    harness.handles.dispatch().call(DailyIntent::NextDay);
    harness.settle().await;
    assert!(harness.render().contains("Day 2 •"));
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_totals() {
    let mut harness = setup_view_harness(ViewKind::Progress, HarnessOptions::default()).await;
    let progress = harness.app.progress();
    progress.record_view(SentenceId::new(0)).await.unwrap();
    progress.record_view(SentenceId::new(0)).await.unwrap();
    progress.record_view(SentenceId::new(1)).await.unwrap();

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your Progress"), "missing title in {html}");
    assert!(html.contains("Completed"), "missing completed label in {html}");
    assert!(html.contains("2/3"), "missing day row in {html}");
    assert!(html.contains("67%"), "missing percent in {html}");
    assert!(html.contains("Reset all progress"), "missing reset in {html}");
}

struct FailingProgressRepo;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgressRepo {
    async fn get_progress(&self, _id: SentenceId) -> Result<Option<ProgressEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn upsert_progress(&self, _entry: &ProgressEntry) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_progress(
        &self,
        _ids: &[SentenceId],
    ) -> Result<Vec<ProgressEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn clear_progress(&self, _ids: &[SentenceId]) -> Result<usize, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn clear_all(&self) -> Result<usize, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_smoke_renders_error_state() {
    let options = HarnessOptions {
        progress: Some(Arc::new(FailingProgressRepo)),
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Daily, options).await;
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
