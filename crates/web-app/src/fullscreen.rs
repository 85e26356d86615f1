use gloo_events::EventListener;
use gloo_utils::document;
use wasm_bindgen::JsValue;

#[must_use]
pub fn is_supported() -> bool {
    document().fullscreen_enabled()
}

#[must_use]
pub fn is_fullscreen() -> bool {
    document().fullscreen_element().is_some()
}

#[allow(clippy::missing_errors_doc)]
pub fn toggle() -> Result<(), JsValue> {
    let document = document();
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
        return Ok(());
    }
    match document.document_element() {
        Some(element) => element.request_fullscreen(),
        None => Err(JsValue::from_str("failed to get document element")),
    }
}

/// Calls `on_change` with the new state whenever the page enters or leaves fullscreen mode.
pub fn on_change(on_change: impl Fn(bool) + 'static) -> EventListener {
    EventListener::new(&document(), "fullscreenchange", move |_| {
        on_change(is_fullscreen());
    })
}
