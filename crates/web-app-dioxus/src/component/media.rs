use std::{cell::RefCell, rc::Rc};

use dioxus::{prelude::*, web::WebEventExt};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

use crate::component::element::Icon;
use setpace_domain::{CanvasVideoConfig, Media, MediaKind, should_use_canvas_fallback};
use setpace_web_app::canvas::{
    BrowserCapabilities, CanvasVideoFallback, configure_video_for_transparency,
};

/// Exercise animation framed by a ring.
///
/// Videos with an alpha channel are mirrored onto a canvas if the browser cannot show their
/// transparency natively. The mirror is removed when the component unmounts.
#[component]
pub fn MediaDisplay(media: Option<Media>, name: String) -> Element {
    let mut failed = use_signal(|| false);
    let fallback = use_hook(|| Rc::new(RefCell::new(None::<CanvasVideoFallback>)));
    use_drop({
        let fallback = fallback.clone();
        move || {
            fallback.borrow_mut().take();
        }
    });

    let content = match media {
        Some(Media { url, kind: MediaKind::Video }) if !failed() => {
            let video_url = url.clone();
            let mounted_url = url.clone();
            let failed_fallback = fallback.clone();
            rsx! {
                video {
                    class: "media-content",
                    src: "{url}",
                    autoplay: true,
                    r#loop: true,
                    muted: true,
                    playsinline: true,
                    preload: "metadata",
                    aria_label: "{name}",
                    onerror: move |_| {
                        warn!("failed to load video {video_url}");
                        failed_fallback.borrow_mut().take();
                        failed.set(true);
                    },
                    onmounted: move |event| {
                        let Ok(video) = event.as_web_event().dyn_into::<HtmlVideoElement>() else {
                            return;
                        };
                        attach_canvas_fallback(&video, &mounted_url, &fallback);
                    },
                }
            }
        }
        Some(Media { url, kind: MediaKind::Image }) if !failed() => {
            let image_url = url.clone();
            rsx! {
                img {
                    class: "media-content",
                    src: "{url}",
                    alt: "{name}",
                    onerror: move |_| {
                        warn!("failed to load image {image_url}");
                        failed.set(true);
                    },
                }
            }
        }
        _ => rsx! {
            div {
                class: "media-placeholder",
                Icon { name: "person-running" }
            }
        },
    };

    rsx! {
        div {
            class: "media",
            div { class: "media-ring" }
            div {
                class: "media-frame",
                {content}
            }
        }
    }
}

fn attach_canvas_fallback(
    video: &HtmlVideoElement,
    url: &str,
    slot: &Rc<RefCell<Option<CanvasVideoFallback>>>,
) {
    if let Err(err) = configure_video_for_transparency(video) {
        warn!("failed to configure video for transparency: {err:?}");
    }
    if !should_use_canvas_fallback(url, &BrowserCapabilities) {
        return;
    }
    match CanvasVideoFallback::new(video, CanvasVideoConfig::default()) {
        Ok(fallback) => {
            debug!("using canvas fallback for {url}");
            *slot.borrow_mut() = Some(fallback);
        }
        Err(err) => warn!("failed to create canvas fallback, using native video: {err}"),
    }
}
