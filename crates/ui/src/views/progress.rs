use dioxus::prelude::*;

use services::Notice;

use crate::context::{AppContext, SelectedDay};
use crate::views::{NoticeBanner, ViewState, view_state_from_resource};
use crate::vm::{DayRowVm, load_progress_overview};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let selected = use_context::<SelectedDay>();
    let mut notice = use_signal(|| None::<Notice>);
    let mut confirm_reset = use_signal(|| false);

    let resource = {
        let days = ctx.days();
        let stats = ctx.stats();
        use_resource(move || {
            let days = days.clone();
            let stats = stats.clone();
            let current_day = selected.current().current();
            async move { load_progress_overview(&days, &stats, current_day).await }
        })
    };

    let reset_all = {
        let progress = ctx.progress();
        use_callback(move |()| {
            let progress = progress.clone();
            let mut resource = resource;
            confirm_reset.set(false);
            spawn(async move {
                match progress.reset_all().await {
                    Ok(_) => resource.restart(),
                    Err(err) => notice.set(Some(Notice::from(&err))),
                }
            });
        })
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page progress",
            h2 { "Your Progress" }
            if let Some(current) = notice() {
                NoticeBanner {
                    notice: current,
                    on_dismiss: move |()| notice.set(None),
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "progress-stats",
                        div { class: "stat",
                            span { class: "stat__number", "{data.completed}" }
                            span { class: "stat__label", "Completed" }
                        }
                        div { class: "stat",
                            span { class: "stat__number", "{data.mastered}" }
                            span { class: "stat__label", "Mastered" }
                        }
                        div { class: "stat",
                            span { class: "stat__number", "{data.current_day}" }
                            span { class: "stat__label", "Days" }
                        }
                    }
                    if data.rows.is_empty() {
                        p { "No phrases available." }
                    } else {
                        table { class: "day-table",
                            thead {
                                tr {
                                    th { "Day" }
                                    th { "Learned" }
                                    th { "Mastered" }
                                    th { "Done" }
                                }
                            }
                            tbody {
                                for row in data.rows.clone() {
                                    DayRow { key: "{row.day}", row: row.clone() }
                                }
                            }
                        }
                    }
                    div { class: "reset",
                        if confirm_reset() {
                            p { "Reset all progress? This cannot be undone." }
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                onclick: move |_| reset_all.call(()),
                                "Reset everything"
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| confirm_reset.set(false),
                                "Cancel"
                            }
                        } else {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| confirm_reset.set(true),
                                "Reset all progress"
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn DayRow(row: DayRowVm) -> Element {
    let class = if row.is_current { "day-row day-row--current" } else { "day-row" };
    rsx! {
        tr { class,
            td { "Day {row.day}" }
            td { "{row.learned_label}" }
            td { "🌳 {row.mastered}" }
            td { "{row.percent}%" }
        }
    }
}
