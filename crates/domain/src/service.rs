use log::{debug, error, warn};

use crate::{
    AudioConfig, AudioConfigRepository, AudioConfigService, Catalog, ExerciseRepository,
    ExerciseService, ReadError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_catalog(&self) -> Result<Catalog, ReadError> {
        let exercises = log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )?;
        Ok(Catalog::new(exercises))
    }
}

impl<R: AudioConfigRepository> AudioConfigService for Service<R> {
    async fn get_audio_config(&self) -> Result<AudioConfig, ReadError> {
        match self.repository.read_audio_config().await {
            Ok(config) if !config.is_empty() => return Ok(config),
            Ok(_) => warn!("remote audio config contains no sounds, using bundled config"),
            Err(err) if err.is_expected() => {
                debug!("remote audio config unreachable, using bundled config: {err}");
            }
            Err(err) => warn!("failed to get remote audio config, using bundled config: {err}"),
        }
        log_on_error!(
            self.repository.read_bundled_audio_config(),
            ReadError,
            "get",
            "bundled audio config"
        )
    }
}
