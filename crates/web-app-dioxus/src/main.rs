#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use log::{LevelFilter, debug, error, info};

use setpace_domain as domain;
use setpace_storage as storage;
use setpace_web_app::{self as web_app, SettingsService, Text};

use page::{not_found::NotFound, workout::Workout};

mod component;
mod page;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Workout {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const SERVICE_WORKER_URL: &str = "/sw.js";

static DOMAIN_SERVICE: GlobalSignal<
    domain::Service<storage::bundled_rest::BundledREST<storage::rest::GlooNetSendRequest>>,
> = Signal::global(|| domain::Service::new(storage::bundled_rest::BundledREST::new()));
static WEB_APP_SERVICE: GlobalSignal<web_app::Service<storage::local_storage::LocalStorage>> =
    Signal::global(|| web_app::Service::new(storage::local_storage::LocalStorage));
static SETTINGS: GlobalSignal<web_app::Settings> = Signal::global(web_app::Settings::default);

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    let _ = web_app::log::init(
        Arc::new(Mutex::new(storage::local_storage::LocalStorage)),
        LevelFilter::Debug,
    );
}

/// Translates `text` into the language of the current settings.
fn t(text: Text) -> &'static str {
    text.translate(SETTINGS.read().language)
}

fn save_settings(settings: web_app::Settings) {
    *SETTINGS.write() = settings;
    spawn(async move {
        if let Err(err) = WEB_APP_SERVICE.read().set_settings(settings).await {
            error!("failed to save settings: {err}");
        }
    });
}

#[component]
fn App() -> Element {
    std::panic::set_hook(Box::new(|info| {
        error!("{info}");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"))
            .map(|el| {
                el.set_inner_html(&format!("
                    <section class=\"fatal\">
                        <div class=\"fatal-message\">
                            <p class=\"fatal-title\">Something went wrong</p>
                            <p>An unexpected error occurred and the workout cannot continue.</p>
                            <pre>{info}</pre>
                            <button class=\"button\" onclick=\"location.reload()\">
                                <span class=\"icon\">
                                    <i class=\"fas fa-arrow-rotate-right\"></i>
                                </span>
                                <span>Reload page</span>
                            </button>
                        </div>
                    </section>
                "));
                Some(())
            });
    }));

    use_future(|| async {
        match WEB_APP_SERVICE.read().get_settings().await {
            Ok(settings) => *SETTINGS.write() = settings,
            Err(err) => error!("failed to read settings: {err}"),
        }
    });

    use_future(|| async {
        let message = t(Text::NewVersion);
        match web_app::service_worker::register(SERVICE_WORKER_URL, move || {
            web_app::service_worker::confirm_reload(message);
        })
        .await
        {
            Ok(()) => {
                info!("service worker registered");
                if let Err(err) =
                    web_app::service_worker::post(&web_app::service_worker::Message::UpdateCache)
                {
                    debug!("cache not updated: {err}");
                }
            }
            Err(err) => error!("failed to register service worker: {err}"),
        }
    });

    rsx! {
        document::Link { rel: "icon", href: "/icon.svg" }
        document::Link { rel: "manifest", href: "/manifest.json" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link {
            rel: "stylesheet",
            href: "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.7.2/css/all.min.css",
        }

        Router::<Route> {}
    }
}

#[macro_export]
macro_rules! eh {
    ($($closure:ident),+; $expr:expr) => {{
        $(let $closure = $closure.clone();)+
            move |_| {
                $(let $closure = $closure.clone();)+
                $expr
            }
    }};
    (mut $($mut_closure:ident),*; $expr:expr) => {{
        $(let $mut_closure = $mut_closure.clone();)+
            move |_| {
                $(let mut $mut_closure = $mut_closure.clone();)*
                $expr
            }
    }};
}
