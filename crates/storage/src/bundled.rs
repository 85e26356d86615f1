//! Data shipped with the application.

use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use setpace_domain as domain;

const EXERCISES: &str = include_str!("../data/exercises.json");
const AUDIO_CONFIG: &str = include_str!("../data/audio.json");

pub fn exercises() -> Result<Vec<domain::Exercise>, domain::StorageError> {
    parse_exercises(EXERCISES)
}

pub fn audio_config() -> Result<domain::AudioConfig, domain::StorageError> {
    parse_audio_config(AUDIO_CONFIG)
}

pub fn parse_exercises(json: &str) -> Result<Vec<domain::Exercise>, domain::StorageError> {
    let data = serde_json::from_str::<ExerciseData>(json)
        .map_err(|err| domain::StorageError::InvalidData(err.to_string()))?;
    data.exercises
        .into_iter()
        .map(domain::Exercise::try_from)
        .collect()
}

pub fn parse_audio_config(json: &str) -> Result<domain::AudioConfig, domain::StorageError> {
    serde_json::from_str::<AudioConfig>(json)
        .map(domain::AudioConfig::from)
        .map_err(|err| domain::StorageError::InvalidData(err.to_string()))
}

#[derive(Deserialize, Serialize)]
struct ExerciseData {
    exercises: Vec<Exercise>,
}

#[derive(Deserialize, Serialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty_level: String,
    pub media_url: Option<String>,
    pub media_type: String,
    pub duration_seconds: u32,
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = domain::StorageError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        let name = domain::Name::new(&value.name).map_err(|err| {
            domain::StorageError::InvalidData(format!("exercise {}: {err}", value.id))
        })?;
        let difficulty = value.difficulty_level.parse().unwrap_or_else(|_| {
            warn!(
                "unknown difficulty \"{}\" of exercise {}",
                value.difficulty_level, value.id
            );
            domain::Difficulty::default()
        });
        let media = match value.media_url {
            Some(url) => Some(domain::Media {
                url,
                kind: value.media_type.parse().map_err(|_| {
                    domain::StorageError::InvalidData(format!(
                        "exercise {}: unknown media type \"{}\"",
                        value.id, value.media_type
                    ))
                })?,
            }),
            None => None,
        };
        Ok(domain::Exercise {
            id: value.id.into(),
            name,
            description: value.description,
            category: value.category,
            difficulty,
            media,
            duration: domain::Time::new(value.duration_seconds),
        })
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_urls: Vec<String>,
    #[serde(default)]
    pub audio_urls2: Vec<String>,
}

impl From<AudioConfig> for domain::AudioConfig {
    fn from(value: AudioConfig) -> Self {
        domain::AudioConfig {
            primary: value.audio_urls,
            secondary: value.audio_urls2,
        }
    }
}
