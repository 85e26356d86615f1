//! Playback of the cue sounds.
//!
//! Browsers only allow audio after a user gesture, so the audio context is created and resumed by
//! [`AudioPlayer::enable_audio_context`], which must be called from an event handler. Audio
//! elements are created once per sound list and reused, as some browsers refuse to play elements
//! created outside of a user gesture.

use std::{cell::RefCell, rc::Rc};

use gloo_timers::future::TimeoutFuture;
use log::{debug, error, warn};
use setpace_domain::{AudioBank, AudioConfig, AudioCue};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioContext, AudioContextState, HtmlAudioElement};

const CONFIG_POLL_INTERVAL_MS: u32 = 100;
const CONFIG_POLL_ATTEMPTS: u32 = 50;

/// Shared handle to the audio resources of the application.
///
/// Clones refer to the same resources. The resources are released by [`AudioPlayer::dispose`].
#[derive(Clone, Default)]
pub struct AudioPlayer {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    bank: AudioBank,
    volume: f64,
    context: Option<AudioContext>,
    elements: Vec<HtmlAudioElement>,
    playing: Option<HtmlAudioElement>,
    enabled: bool,
}

impl AudioPlayer {
    #[must_use]
    pub fn new(volume: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                volume,
                ..Inner::default()
            })),
        }
    }

    pub fn set_config(&self, config: AudioConfig) {
        let mut inner = self.inner.borrow_mut();
        debug!(
            "loaded audio config with {} primary and {} secondary sounds",
            config.primary.len(),
            config.secondary.len()
        );
        inner.bank = AudioBank::new(config);
        inner.elements.clear();
        if inner.enabled {
            inner.create_elements();
        }
    }

    pub fn set_volume(&self, volume: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.volume = volume;
        for element in &inner.elements {
            element.set_volume(volume);
        }
    }

    pub fn enable_audio_context(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.context.is_none() {
            match AudioContext::new() {
                Ok(context) => inner.context = Some(context),
                Err(err) => error!("failed to create audio context: {err:?}"),
            }
        }
        inner.resume_context();
        if inner.elements.is_empty() {
            inner.create_elements();
        }
        inner.enabled = true;
    }

    /// Plays the selected sound, waiting for the sound list if it is not yet loaded.
    pub fn play_selected_sound(&self) {
        let player = self.clone();
        spawn_local(async move {
            let mut attempts = 0;
            while !player.inner.borrow().bank.is_loaded() {
                if attempts == CONFIG_POLL_ATTEMPTS {
                    warn!("failed to play sound: audio config not loaded");
                    return;
                }
                if attempts == 0 {
                    debug!("waiting for audio config");
                }
                TimeoutFuture::new(CONFIG_POLL_INTERVAL_MS).await;
                attempts += 1;
            }
            if !player.inner.borrow().enabled {
                player.enable_audio_context();
            }
            let index = player.inner.borrow().bank.selected();
            player.play_index(index).await;
        });
    }

    /// Selects the next sound of the active list and plays it.
    pub fn cycle_and_play_next(&self) {
        self.enable_audio_context();
        let index = {
            let mut inner = self.inner.borrow_mut();
            inner.stop();
            inner.bank.cycle_next()
        };
        let Some(index) = index else {
            warn!("failed to select sound: audio config not loaded");
            return;
        };
        let player = self.clone();
        spawn_local(async move { player.play_index(index).await });
    }

    /// Switches between the primary and the secondary sound list and plays the first sound.
    pub fn toggle_audio_bank(&self) {
        let enabled = {
            let mut inner = self.inner.borrow_mut();
            inner.stop();
            match inner.bank.toggle() {
                Ok(bank) => debug!("switched to {bank} sounds"),
                Err(err) => {
                    warn!("failed to switch sounds: {err}");
                    return;
                }
            }
            inner.create_elements();
            inner.enabled
        };
        if enabled {
            let player = self.clone();
            spawn_local(async move { player.play_index(0).await });
        }
    }

    /// Stops playback and releases the audio context and elements.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.stop();
        inner.elements.clear();
        inner.enabled = false;
        if let Some(context) = inner.context.take() {
            if let Err(err) = context.close() {
                error!("failed to close audio context: {err:?}");
            }
        }
    }

    async fn play_index(&self, index: usize) {
        let (element, url, volume) = {
            let mut inner = self.inner.borrow_mut();
            inner.stop();
            inner.resume_context();
            let Some(url) = inner.bank.urls().get(index).cloned() else {
                warn!("failed to play sound: no sound at index {index}");
                return;
            };
            (inner.elements.get(index).cloned(), url, inner.volume)
        };

        let result = match element {
            Some(element) => {
                element.set_current_time(0.);
                play(&element).await.map(|()| element)
            }
            None => Err(JsValue::from_str("audio element not available")),
        };
        let element = match result {
            Ok(element) => element,
            Err(err) => {
                warn!("failed to play sound {url}: {err:?}");
                self.inner.borrow_mut().stop();
                match create_element(&url, volume) {
                    Ok(element) => match play(&element).await {
                        Ok(()) => element,
                        Err(err) => {
                            warn!("failed to play sound {url} with new audio element: {err:?}");
                            return;
                        }
                    },
                    Err(err) => {
                        warn!("failed to create audio element for {url}: {err:?}");
                        return;
                    }
                }
            }
        };
        debug!("playing sound {index}: {url}");
        self.inner.borrow_mut().playing = Some(element);
    }
}

impl PartialEq for AudioPlayer {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AudioCue for AudioPlayer {
    fn enable(&mut self) {
        self.enable_audio_context();
    }

    fn play(&mut self) {
        self.play_selected_sound();
    }
}

impl Inner {
    fn create_elements(&mut self) {
        let volume = self.volume;
        self.elements = self
            .bank
            .urls()
            .iter()
            .filter_map(|url| match create_element(url, volume) {
                Ok(element) => Some(element),
                Err(err) => {
                    error!("failed to create audio element for {url}: {err:?}");
                    None
                }
            })
            .collect();
        if self.elements.len() != self.bank.urls().len() {
            self.elements.clear();
        }
    }

    fn resume_context(&self) {
        let Some(context) = &self.context else {
            return;
        };
        if context.state() != AudioContextState::Suspended {
            return;
        }
        match context.resume() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    warn!("failed to resume audio context: {err:?}");
                }
            }),
            Err(err) => warn!("failed to resume audio context: {err:?}"),
        }
    }

    fn stop(&mut self) {
        if let Some(element) = self.playing.take() {
            if let Err(err) = element.pause() {
                warn!("failed to pause sound: {err:?}");
            }
            element.set_current_time(0.);
        }
    }
}

fn create_element(url: &str, volume: f64) -> Result<HtmlAudioElement, JsValue> {
    let element = HtmlAudioElement::new_with_src(url)?;
    element.set_volume(volume);
    element.set_preload("auto");
    Ok(element)
}

async fn play(element: &HtmlAudioElement) -> Result<(), JsValue> {
    JsFuture::from(element.play()?).await.map(|_| ())
}
