use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DailyView, ProgressView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DailyView)] Daily {},
        #[route("/progress", ProgressView)] Progress {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Telugu Daily" }
            ul {
                li { Link { to: Route::Daily {}, "Today" } }
                li { Link { to: Route::Progress {}, "Progress" } }
            }
        }
    }
}
