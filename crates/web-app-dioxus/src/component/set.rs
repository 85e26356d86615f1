use dioxus::prelude::*;

use crate::{component::element::Icon, t};
use setpace_domain::{Set, SetNumber, SetStatus, Weight};
use setpace_web_app::Text;

const DURATION_STEP: i32 = 5;

#[component]
pub fn SetSelector(
    current: SetNumber,
    completed: Vec<SetNumber>,
    on_select: EventHandler<SetNumber>,
) -> Element {
    rsx! {
        nav {
            class: "set-selector",
            for number in SetNumber::all() {
                button {
                    key: "{number}",
                    class: "set-tab",
                    class: if number == current { "is-current" },
                    class: if completed.contains(&number) { "is-completed" },
                    onclick: move |_| on_select.call(number),
                    if completed.contains(&number) {
                        Icon { name: "check", is_small: true }
                    }
                    "{t(Text::Set)} {number}"
                }
            }
        }
    }
}

#[component]
pub fn SetDetails(
    set: Set,
    on_toggle_complete: EventHandler<MouseEvent>,
    on_adjust_weight: EventHandler<f32>,
    on_adjust_duration: EventHandler<i32>,
) -> Element {
    let status_icon = match set.status {
        SetStatus::Idle => "circle",
        SetStatus::Pending => "hourglass-half",
        SetStatus::Completed => "circle-check",
    };

    rsx! {
        section {
            class: "set-details",
            button {
                class: "set-status",
                class: if set.status == SetStatus::Pending { "is-pending" },
                class: if set.status == SetStatus::Completed { "is-completed" },
                onclick: move |evt| on_toggle_complete.call(evt),
                Icon { name: "{status_icon}" }
            }
            Adjuster {
                label: "{t(Text::AddedWeight)}",
                value: "{set.weight} {t(Text::Kilogram)}",
                on_decrease: move |_| on_adjust_weight.call(-Weight::STEP),
                on_increase: move |_| on_adjust_weight.call(Weight::STEP),
            }
            Adjuster {
                label: "{t(Text::Time)}",
                value: "{set.duration} {t(Text::Second)}",
                on_decrease: move |_| on_adjust_duration.call(-DURATION_STEP),
                on_increase: move |_| on_adjust_duration.call(DURATION_STEP),
            }
        }
    }
}

#[component]
fn Adjuster(
    label: String,
    value: String,
    on_decrease: EventHandler<MouseEvent>,
    on_increase: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div {
            class: "adjuster",
            span { class: "adjuster-label", "{label}" }
            div {
                class: "adjuster-controls",
                button {
                    class: "adjuster-button",
                    onclick: move |evt| on_decrease.call(evt),
                    Icon { name: "minus", is_small: true }
                }
                span { class: "adjuster-value", "{value}" }
                button {
                    class: "adjuster-button",
                    onclick: move |evt| on_increase.call(evt),
                    Icon { name: "plus", is_small: true }
                }
            }
        }
    }
}
