//! Bundled REST
//!
//! Exercises are always read from the data bundled with the application. The audio configuration
//! is requested from the remote endpoint, with the bundled configuration serving as fallback.

use setpace_domain as domain;

use super::bundled;
use super::rest::{GlooNetSendRequest, REST, SendRequest};

#[derive(Clone)]
pub struct BundledREST<S: SendRequest> {
    pub rest: REST<S>,
}

impl BundledREST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self { rest: REST::new() }
    }
}

impl Default for BundledREST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> domain::ExerciseRepository for BundledREST<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let exercises = bundled::exercises()?;
        if exercises.is_empty() {
            return Err(domain::ReadError::NotFound);
        }
        Ok(exercises)
    }
}

impl<S: SendRequest> domain::AudioConfigRepository for BundledREST<S> {
    async fn read_audio_config(&self) -> Result<domain::AudioConfig, domain::ReadError> {
        self.rest.read_audio_config().await
    }

    async fn read_bundled_audio_config(&self) -> Result<domain::AudioConfig, domain::ReadError> {
        Ok(bundled::audio_config()?)
    }
}
