use dioxus::prelude::*;

use crate::{component::element::ErrorMessage, t};
use setpace_web_app::Text;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        div {
            class: "page",
            ErrorMessage { message: "{t(Text::PageNotFound)}: /{path}" }
            Link { class: "button", to: "/", "{t(Text::NewExercise)}" }
        }
    }
}
