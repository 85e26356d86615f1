use dioxus::prelude::*;
use log::debug;

use crate::{
    component::element::{Icon, IconButton},
    t,
};
use setpace_domain::Time;
use setpace_web_app::{Text, presentation::format_duration};

#[component]
pub fn Footer(total_duration: Time, on_next_sound: EventHandler<MouseEvent>) -> Element {
    rsx! {
        footer {
            class: "workout-footer",
            IconButton {
                icon: "arrow-left",
                title: "Back",
                onclick: move |_| debug!("back requested"),
            }
            div {
                class: "total-duration",
                Icon { name: "stopwatch", is_small: true }
                span { "{format_duration(total_duration)}" }
            }
            IconButton {
                icon: "music",
                title: "{t(Text::NextSound)}",
                onclick: on_next_sound,
            }
        }
    }
}
