use gloo_events::EventListener;
use log::{debug, error};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ServiceWorker, ServiceWorkerRegistration, ServiceWorkerState};

#[derive(serde::Serialize)]
#[serde(tag = "task", content = "content")]
pub enum Message {
    UpdateCache,
}

#[allow(clippy::missing_errors_doc)]
pub fn post(message: &Message) -> Result<(), String> {
    let Some(window) = web_sys::window() else {
        return Err("failed to get window".to_string());
    };
    let Some(service_worker) = window.navigator().service_worker().controller() else {
        return Err("failed to get service worker".to_string());
    };
    match serde_wasm_bindgen::to_value(message) {
        Ok(json_message) => {
            let Err(err) = service_worker.post_message(&json_message) else {
                return Ok(());
            };
            Err(format!("failed to post message to service worker: {err:?}"))
        }
        Err(err) => Err(format!(
            "failed to prepare message for service worker: {err}"
        )),
    }
}

/// Registers the service worker and calls `on_update` when a new version has been installed
/// while an older version controls the page.
///
/// The registered listeners live as long as the page.
#[allow(clippy::missing_errors_doc)]
pub async fn register(url: &str, on_update: impl Fn() + Clone + 'static) -> Result<(), String> {
    let Some(window) = web_sys::window() else {
        return Err("failed to get window".to_string());
    };
    let promise = window.navigator().service_worker().register(url);
    let registration = JsFuture::from(promise)
        .await
        .map_err(|err| format!("failed to register service worker: {err:?}"))?
        .dyn_into::<ServiceWorkerRegistration>()
        .map_err(|_| "unexpected service worker registration".to_string())?;
    debug!("service worker registered with scope {}", registration.scope());

    let updated_registration = registration.clone();
    EventListener::new(&registration, "updatefound", move |_| {
        let Some(worker) = updated_registration.installing() else {
            return;
        };
        watch_installation(worker, on_update.clone());
    })
    .forget();

    Ok(())
}

fn watch_installation(worker: ServiceWorker, on_update: impl Fn() + 'static) {
    let installing_worker = worker.clone();
    EventListener::new(&worker, "statechange", move |_| {
        if installing_worker.state() != ServiceWorkerState::Installed {
            return;
        }
        let has_controller = web_sys::window()
            .and_then(|window| window.navigator().service_worker().controller())
            .is_some();
        if has_controller {
            on_update();
        }
    })
    .forget();
}

/// Asks the user to reload the page and reloads it on confirmation.
pub fn confirm_reload(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    match window.confirm_with_message(message) {
        Ok(true) => {
            if let Err(err) = window.location().reload() {
                error!("failed to reload page: {err:?}");
            }
        }
        Ok(false) => {}
        Err(err) => error!("failed to show confirmation dialog: {err:?}"),
    }
}
