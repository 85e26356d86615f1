//! Deferred prompt for installing the application.

use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use log::{debug, error, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Event;

/// Captures the `beforeinstallprompt` event, so that the installation can be triggered later.
pub struct InstallPrompt {
    event: Rc<RefCell<Option<Event>>>,
    _listener: EventListener,
}

impl InstallPrompt {
    /// Calls `on_available` whenever the browser offers the installation.
    pub fn new(on_available: impl Fn() + 'static) -> Self {
        let event = Rc::new(RefCell::new(None));
        let deferred_event = event.clone();
        let listener = EventListener::new(&gloo_utils::window(), "beforeinstallprompt", move |e| {
            e.prevent_default();
            *deferred_event.borrow_mut() = Some(e.clone());
            debug!("app installation available");
            on_available();
        });
        Self {
            event,
            _listener: listener,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.event.borrow().is_some()
    }

    /// Shows the installation prompt. The prompt can be shown only once.
    pub async fn prompt(&self) -> Result<(), JsValue> {
        let Some(event) = self.event.borrow_mut().take() else {
            return Ok(());
        };
        let prompt = js_sys::Reflect::get(&event, &JsValue::from_str("prompt"))?
            .dyn_into::<js_sys::Function>()?;
        prompt.call0(&event)?;
        let user_choice = js_sys::Reflect::get(&event, &JsValue::from_str("userChoice"))?;
        let choice = JsFuture::from(js_sys::Promise::resolve(&user_choice)).await?;
        match js_sys::Reflect::get(&choice, &JsValue::from_str("outcome"))?.as_string() {
            Some(outcome) => info!("user response to the install prompt: {outcome}"),
            None => error!("unexpected response to the install prompt"),
        }
        Ok(())
    }
}
