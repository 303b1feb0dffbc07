use dioxus::prelude::*;

use daily_core::model::MasteryMode;
use services::{LanguageTag, Notice};

use crate::context::{AppContext, SelectedDay};
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{DailyIntent, DailyItem, DayHeaderVm, SentenceCardVm, load_daily};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn DailyView() -> Element {
    let ctx = use_context::<AppContext>();
    let selected = use_context::<SelectedDay>();
    let mode = ctx.mastery_mode();

    let notice = use_signal(|| None::<Notice>);
    let confirm_reset = use_signal(|| false);

    let resource = {
        let days = ctx.days();
        let progress = ctx.progress();
        let stats = ctx.stats();
        let placement = ctx.ad_placement();
        use_resource(move || {
            let days = days.clone();
            let progress = progress.clone();
            let stats = stats.clone();
            let selector = selected.current();
            async move {
                load_daily(
                    &days,
                    &progress,
                    &stats,
                    placement,
                    selector.current(),
                    !selector.is_fixed(),
                )
                .await
            }
        })
    };

    let dispatch_intent = {
        let ctx = ctx.clone();
        use_callback(move |intent: DailyIntent| {
            let mut notice = notice;
            let mut confirm_reset = confirm_reset;
            let mut resource = resource;
            let mut day = selected.0;

            match intent {
                DailyIntent::KnowIt(id) => {
                    let progress = ctx.progress();
                    spawn(async move {
                        match progress.record_view(id).await {
                            Ok(_) => resource.restart(),
                            Err(err) => notice.set(Some(Notice::from(&err))),
                        }
                    });
                }
                DailyIntent::ToggleCompleted(id) => {
                    let progress = ctx.progress();
                    spawn(async move {
                        match progress.toggle_completed(id).await {
                            Ok(_) => resource.restart(),
                            Err(err) => notice.set(Some(Notice::from(&err))),
                        }
                    });
                }
                DailyIntent::ToggleMastered(id) => {
                    let progress = ctx.progress();
                    spawn(async move {
                        match progress.toggle_mastered(id).await {
                            Ok(_) => resource.restart(),
                            Err(err) => notice.set(Some(Notice::from(&err))),
                        }
                    });
                }
                DailyIntent::Speak(id, language) => {
                    let Some(sentence) = ctx.days().sentence(id).cloned() else {
                        return;
                    };
                    let speech = ctx.speech();
                    spawn(async move {
                        let result = match language {
                            LanguageTag::TeluguIn => speech.speak_source(&sentence).await,
                            LanguageTag::EnglishUs => speech.speak_english(&sentence).await,
                        };
                        if let Err(err) = result {
                            notice.set(Some(Notice::from(&err)));
                        }
                    });
                }
                DailyIntent::PreviousDay => {
                    day.write().go_back();
                }
                DailyIntent::NextDay => {
                    let next = day.peek().current().next();
                    if ctx.days().has_day(next) {
                        day.write().go_to(next);
                    }
                }
                DailyIntent::RequestReset => confirm_reset.set(true),
                DailyIntent::CancelReset => confirm_reset.set(false),
                DailyIntent::ConfirmReset => {
                    confirm_reset.set(false);
                    let window = ctx.days().window(day.peek().current());
                    let progress = ctx.progress();
                    spawn(async move {
                        match progress.reset_window(&window).await {
                            Ok(_) => resource.restart(),
                            Err(err) => notice.set(Some(Notice::from(&err))),
                        }
                    });
                }
                DailyIntent::DismissNotice => notice.set(None),
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<DailyTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let retry_action = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page daily",
            if let Some(current) = notice() {
                NoticeBanner {
                    notice: current,
                    on_dismiss: move |()| dispatch_intent.call(DailyIntent::DismissNotice),
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "view-error",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| retry_action.call(()),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(data) => rsx! {
                    DayHeader { header: data.header.clone() }
                    nav { class: "day-nav",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: !data.has_previous,
                            onclick: move |_| dispatch_intent.call(DailyIntent::PreviousDay),
                            "Previous day"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: !data.has_next,
                            onclick: move |_| dispatch_intent.call(DailyIntent::NextDay),
                            "Next day"
                        }
                    }
                    if data.is_empty() {
                        p { class: "empty", "No phrases for Day {data.day()}. You have reached the end of the list." }
                    } else {
                        div { class: "sentence-list",
                            for item in data.items.clone() {
                                match item {
                                    DailyItem::Card(card) => rsx! {
                                        SentenceCard {
                                            key: "{card.id}",
                                            card: card.clone(),
                                            mode,
                                            on_intent: dispatch_intent,
                                        }
                                    },
                                    DailyItem::Ad { slot } => rsx! {
                                        AdSlot { key: "ad-{slot}", slot }
                                    },
                                }
                            }
                        }
                        div { class: "reset",
                            if confirm_reset() {
                                p { "Reset progress for Day {data.day()}? This cannot be undone." }
                                button {
                                    class: "btn btn-danger",
                                    r#type: "button",
                                    onclick: move |_| dispatch_intent.call(DailyIntent::ConfirmReset),
                                    "Reset"
                                }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| dispatch_intent.call(DailyIntent::CancelReset),
                                    "Cancel"
                                }
                            } else {
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| dispatch_intent.call(DailyIntent::RequestReset),
                                    "Reset day"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn DayHeader(header: DayHeaderVm) -> Element {
    let style = header.progress_style();
    rsx! {
        header { class: "day-header",
            h2 { "Telugu Daily" }
            p { class: "day-header__subtitle", "{header.subtitle}" }
            div { class: "day-header__stats",
                div { class: "day-header__learned",
                    span { class: "day-header__count", "{header.learned_label}" }
                    span { class: "day-header__label", "Learned" }
                }
                div { class: "day-header__mastered",
                    span { class: "day-header__count", "{header.mastered_label}" }
                    span { class: "day-header__label", "Mastered" }
                }
            }
            div { class: "progress-bar",
                div { class: "progress-bar__fill", style: "{style}" }
            }
            if header.done {
                p { class: "day-header__done", "All done for today!" }
            }
        }
    }
}

#[component]
fn SentenceCard(
    card: SentenceCardVm,
    mode: MasteryMode,
    on_intent: EventHandler<DailyIntent>,
) -> Element {
    let id = card.id;
    rsx! {
        article { class: card.class(),
            div { class: "sentence-card__header",
                span { class: "sentence-card__number", "{card.number_label}" }
                span { class: "sentence-card__status",
                    if card.completed {
                        span { class: "status-completed", title: "Completed", "✓" }
                    }
                    if card.mastered {
                        span { class: "status-mastered", title: "Mastered", "🌳" }
                    }
                }
            }
            button {
                class: "sentence-card__source",
                r#type: "button",
                onclick: move |_| on_intent.call(DailyIntent::Speak(id, LanguageTag::TeluguIn)),
                span { "{card.source_text}" }
                span { class: "play", "▶" }
            }
            button {
                class: "sentence-card__english",
                r#type: "button",
                onclick: move |_| on_intent.call(DailyIntent::Speak(id, LanguageTag::EnglishUs)),
                span { "{card.english_text}" }
                span { class: "play", "▶" }
            }
            div { class: "sentence-card__actions",
                button {
                    class: "btn btn-know",
                    r#type: "button",
                    onclick: move |_| on_intent.call(DailyIntent::KnowIt(id)),
                    "Know It"
                }
                if mode == MasteryMode::Manual {
                    button {
                        class: "btn btn-toggle",
                        r#type: "button",
                        onclick: move |_| on_intent.call(DailyIntent::ToggleCompleted(id)),
                        if card.completed { "Completed ✓" } else { "Mark completed" }
                    }
                    button {
                        class: "btn btn-toggle",
                        r#type: "button",
                        disabled: !card.completed,
                        onclick: move |_| on_intent.call(DailyIntent::ToggleMastered(id)),
                        if card.mastered { "Mastered 🌳" } else { "Mark mastered" }
                    }
                }
            }
            footer { class: "sentence-card__footer",
                if let Some(label) = card.viewed_label.clone() {
                    p { class: "sentence-card__views", "{label}" }
                }
                if let Some(when) = card.last_viewed_str.clone() {
                    p { class: "sentence-card__last-viewed", "Last viewed {when}" }
                }
            }
        }
    }
}

#[component]
fn AdSlot(slot: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let Some(banner) = ctx.ads().render_slot(slot) else {
        return rsx! {};
    };
    rsx! {
        aside {
            class: "ad-slot",
            "data-unit": "{banner.unit_id}",
            "data-slot": "{banner.position}",
            span { class: "ad-slot__label", "{banner.label}" }
        }
    }
}

#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    let class = match notice.kind {
        services::NoticeKind::Warning => "notice notice--warning",
        services::NoticeKind::Error => "notice notice--error",
    };
    rsx! {
        div { class, role: "alert",
            strong { "{notice.title}" }
            p { "{notice.message}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "OK"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct DailyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<DailyIntent>>>>,
}

#[cfg(test)]
impl DailyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<DailyIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<DailyIntent> {
        (*self.dispatch.borrow()).expect("daily dispatch registered")
    }
}
