use std::rc::Rc;

use dioxus::prelude::*;
use log::error;

use crate::{component::element::IconButton, t};
use setpace_web_app::{Text, fullscreen, install_prompt::InstallPrompt};

#[component]
pub fn InstallButton() -> Element {
    let available = use_signal(|| false);
    let prompt = use_hook(|| {
        Rc::new(InstallPrompt::new(move || {
            let mut available = available;
            available.set(true);
        }))
    });

    rsx! {
        if available() {
            IconButton {
                icon: "download",
                title: "{t(Text::InstallApp)}",
                onclick: move |_| {
                    let prompt = prompt.clone();
                    let mut available = available;
                    spawn(async move {
                        if let Err(err) = prompt.prompt().await {
                            error!("failed to show install prompt: {err:?}");
                        }
                        available.set(prompt.is_available());
                    });
                },
            }
        }
    }
}

#[component]
pub fn FullscreenButton() -> Element {
    let is_fullscreen = use_signal(fullscreen::is_fullscreen);
    use_hook(|| {
        Rc::new(fullscreen::on_change(move |value| {
            let mut is_fullscreen = is_fullscreen;
            is_fullscreen.set(value);
        }))
    });

    if !fullscreen::is_supported() {
        return rsx! {};
    }
    let (icon, title) = if is_fullscreen() {
        ("compress", t(Text::ExitFullscreen))
    } else {
        ("expand", t(Text::EnterFullscreen))
    };

    rsx! {
        IconButton {
            icon: "{icon}",
            title: "{title}",
            is_active: is_fullscreen(),
            onclick: move |_| {
                if let Err(err) = fullscreen::toggle() {
                    error!("failed to toggle fullscreen mode: {err:?}");
                }
            },
        }
    }
}
