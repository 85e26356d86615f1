use strum::Display;

use crate::ReadError;

/// Sound played when a rest period ends.
///
/// Implementations own the underlying audio resources. `enable` must be called from a user
/// gesture before the first `play`, as browsers block audio otherwise.
pub trait AudioCue {
    fn enable(&mut self);
    fn play(&mut self);
}

#[allow(async_fn_in_trait)]
pub trait AudioConfigService {
    async fn get_audio_config(&self) -> Result<AudioConfig, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait AudioConfigRepository {
    async fn read_audio_config(&self) -> Result<AudioConfig, ReadError>;
    async fn read_bundled_audio_config(&self) -> Result<AudioConfig, ReadError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl AudioConfig {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

#[derive(Display, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Bank {
    #[default]
    Primary,
    Secondary,
}

impl Bank {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Bank::Primary => Bank::Secondary,
            Bank::Secondary => Bank::Primary,
        }
    }
}

/// Selection state over the two lists of cue sounds.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioBank {
    config: AudioConfig,
    active: Bank,
    selected: usize,
}

impl AudioBank {
    #[must_use]
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            active: Bank::Primary,
            selected: 0,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.urls().is_empty()
    }

    #[must_use]
    pub fn active(&self) -> Bank {
        self.active
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn urls(&self) -> &[String] {
        self.urls_of(self.active)
    }

    #[must_use]
    pub fn selected_url(&self) -> Option<&str> {
        self.urls().get(self.selected).map(String::as_str)
    }

    /// Advances the selection, wrapping around at the end of the active list.
    pub fn cycle_next(&mut self) -> Option<usize> {
        let len = self.urls().len();
        if len == 0 {
            return None;
        }
        self.selected = (self.selected + 1) % len;
        Some(self.selected)
    }

    /// Switches to the other list and selects its first sound.
    pub fn toggle(&mut self) -> Result<Bank, AudioError> {
        let next = self.active.other();
        if self.urls_of(next).is_empty() {
            return Err(AudioError::EmptyBank(next));
        }
        self.active = next;
        self.selected = 0;
        Ok(next)
    }

    fn urls_of(&self, bank: Bank) -> &[String] {
        match bank {
            Bank::Primary => &self.config.primary,
            Bank::Secondary => &self.config.secondary,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AudioError {
    #[error("{0} audio list is empty")]
    EmptyBank(Bank),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(primary: &[&str], secondary: &[&str]) -> AudioConfig {
        AudioConfig {
            primary: primary.iter().map(ToString::to_string).collect(),
            secondary: secondary.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_audio_bank_default_is_not_loaded() {
        let mut bank = AudioBank::default();
        assert!(!bank.is_loaded());
        assert_eq!(bank.selected_url(), None);
        assert_eq!(bank.cycle_next(), None);
    }

    #[test]
    fn test_audio_bank_cycle_next_wraps() {
        let mut bank = AudioBank::new(config(&["a", "b", "c"], &[]));
        assert_eq!(bank.selected_url(), Some("a"));
        assert_eq!(bank.cycle_next(), Some(1));
        assert_eq!(bank.cycle_next(), Some(2));
        assert_eq!(bank.cycle_next(), Some(0));
        assert_eq!(bank.selected_url(), Some("a"));
    }

    #[test]
    fn test_audio_bank_toggle() {
        let mut bank = AudioBank::new(config(&["a", "b"], &["x"]));
        bank.cycle_next();

        assert_eq!(bank.toggle(), Ok(Bank::Secondary));
        assert_eq!(bank.selected(), 0);
        assert_eq!(bank.selected_url(), Some("x"));

        assert_eq!(bank.toggle(), Ok(Bank::Primary));
        assert_eq!(bank.selected_url(), Some("a"));
    }

    #[test]
    fn test_audio_bank_toggle_empty_secondary() {
        let mut bank = AudioBank::new(config(&["a", "b"], &[]));
        bank.cycle_next();

        assert_eq!(bank.toggle(), Err(AudioError::EmptyBank(Bank::Secondary)));
        assert_eq!(bank.active(), Bank::Primary);
        assert_eq!(bank.selected_url(), Some("b"));
    }

    #[test]
    fn test_audio_error_display() {
        assert_eq!(
            AudioError::EmptyBank(Bank::Secondary).to_string(),
            "secondary audio list is empty"
        );
    }
}
