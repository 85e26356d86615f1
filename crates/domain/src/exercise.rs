use derive_more::Deref;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{Name, ReadError, Time};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_catalog(&self) -> Result<Catalog, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass a `len` of zero.
    fn index(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub media: Option<Media>,
    pub duration: Time,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl std::fmt::Display for ExerciseID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub url: String,
    pub kind: MediaKind,
}

#[derive(Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Display, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// All exercises known to the application.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Picks a random exercise, avoiding `exclude` unless it is the only one.
    pub fn pick_random(
        &self,
        exclude: Option<ExerciseID>,
        random: &mut impl RandomSource,
    ) -> Option<&Exercise> {
        let mut candidates = self
            .exercises
            .iter()
            .filter(|e| Some(e.id) != exclude)
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            candidates = self.exercises.iter().collect();
        }

        if candidates.is_empty() {
            return None;
        }

        let idx = random.index(candidates.len()).min(candidates.len() - 1);
        Some(candidates[idx])
    }
}
