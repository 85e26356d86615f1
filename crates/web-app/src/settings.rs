use crate::Language;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub language: Language,
    /// Volume of the cue sounds in percent.
    pub volume: u8,
}

impl Settings {
    #[must_use]
    pub fn with_toggled_language(self) -> Self {
        Self {
            language: self.language.toggled(),
            ..self
        }
    }

    #[must_use]
    pub fn audio_volume(&self) -> f64 {
        f64::from(self.volume.min(100)) / 100.
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::En,
            volume: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_with_toggled_language() {
        let settings = Settings::default().with_toggled_language();
        assert_eq!(
            settings,
            Settings {
                language: Language::Zh,
                volume: 50
            }
        );
        assert_eq!(settings.with_toggled_language(), Settings::default());
    }

    #[rstest]
    #[case(0, 0.)]
    #[case(50, 0.5)]
    #[case(100, 1.)]
    #[case(255, 1.)]
    fn test_audio_volume(#[case] volume: u8, #[case] expected: f64) {
        assert_approx_eq!(
            Settings {
                volume,
                ..Settings::default()
            }
            .audio_volume(),
            expected
        );
    }

    #[test]
    fn test_deserialize() {
        assert_eq!(
            serde_json::from_str::<Settings>(r#"{"language": "zh", "volume": 70}"#).unwrap(),
            Settings {
                language: Language::Zh,
                volume: 70
            }
        );
    }
}
