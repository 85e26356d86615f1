use dioxus::prelude::*;

use crate::{
    SETTINGS,
    component::{
        element::IconButton,
        pwa::{FullscreenButton, InstallButton},
    },
    save_settings, t,
};
use setpace_web_app::Text;

#[component]
pub fn Header(
    on_new_exercise: EventHandler<MouseEvent>,
    on_toggle_sounds: EventHandler<MouseEvent>,
) -> Element {
    let language = SETTINGS.read().language;

    rsx! {
        header {
            class: "workout-header",
            div {
                class: "header-group",
                IconButton {
                    icon: "circle-info",
                    title: "{t(Text::NewExercise)}",
                    onclick: on_new_exercise,
                }
                IconButton {
                    icon: "clock",
                    title: "{t(Text::ToggleSounds)}",
                    onclick: on_toggle_sounds,
                }
            }
            div {
                class: "header-group",
                InstallButton {}
                FullscreenButton {}
                button {
                    class: "language-toggle",
                    onclick: move |_| {
                        let settings = SETTINGS.read().with_toggled_language();
                        save_settings(settings);
                    },
                    "{language.toggle_label()}"
                }
            }
        }
    }
}
