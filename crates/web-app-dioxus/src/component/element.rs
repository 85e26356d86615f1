use dioxus::prelude::*;

use crate::t;
use setpace_web_app::Text;

#[component]
pub fn LoadingPage() -> Element {
    rsx! {
        div {
            class: "loading",
            i { class: "fas fa-spinner fa-pulse" }
            p { "{t(Text::Loading)}" }
        }
    }
}

#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div {
            class: "message is-danger",
            div {
                class: "message-body",
                "{message}"
            }
        }
    }
}

#[component]
pub fn Icon(name: String, is_small: Option<bool>) -> Element {
    rsx! {
        span {
            class: "icon",
            class: if is_small.unwrap_or_default() { "is-small" },
            i { class: "fas fa-{name}" }
        }
    }
}

/// Round icon button of the workout screen.
#[component]
pub fn IconButton(
    icon: String,
    title: String,
    onclick: EventHandler<MouseEvent>,
    is_active: Option<bool>,
) -> Element {
    rsx! {
        button {
            class: "icon-button",
            class: if is_active.unwrap_or_default() { "is-active" },
            title: "{title}",
            aria_label: "{title}",
            onclick: move |evt| onclick.call(evt),
            Icon { name: icon }
        }
    }
}
