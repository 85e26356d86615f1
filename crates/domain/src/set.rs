use std::{
    iter::Sum,
    ops::{Add, Deref},
};

use derive_more::{Display, Into};
use uuid::Uuid;

use crate::ExerciseID;

pub const SETS_PER_EXERCISE: u8 = 4;
pub const DEFAULT_DURATION: Time = Time::new(45);
pub const DEFAULT_REST_TIME: Time = Time::new(15);

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub exercise_id: ExerciseID,
    pub number: SetNumber,
    pub status: SetStatus,
    pub weight: Weight,
    pub duration: Time,
    pub rest_time: Time,
}

impl Set {
    /// Creates the sets of a newly chosen exercise with default values.
    #[must_use]
    pub fn fresh_sets(exercise_id: ExerciseID) -> Vec<Set> {
        SetNumber::all()
            .map(|number| Set {
                id: SetID::random(),
                exercise_id,
                number,
                status: SetStatus::Idle,
                weight: Weight::default(),
                duration: DEFAULT_DURATION,
                rest_time: DEFAULT_REST_TIME,
            })
            .collect()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SetStatus::Completed
    }
}

/// Progress of a single set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SetStatus {
    /// Neither started nor completed.
    #[default]
    Idle,
    /// Started, the rest timer is running.
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// 1-based position of a set within its exercise.
#[derive(Debug, Display, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetNumber(u8);

impl SetNumber {
    pub const FIRST: SetNumber = SetNumber(1);

    pub fn new(value: u8) -> Result<Self, SetNumberError> {
        if !(1..=SETS_PER_EXERCISE).contains(&value) {
            return Err(SetNumberError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn all() -> impl Iterator<Item = SetNumber> {
        (1..=SETS_PER_EXERCISE).map(SetNumber)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl Deref for SetNumber {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetNumberError {
    #[error("Set number must be in the range 1 to {SETS_PER_EXERCISE} ({0})")]
    OutOfRange(u8),
}

/// Added weight in kg.
#[derive(Debug, Default, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const STEP: f32 = 2.5;

    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }

    #[must_use]
    pub fn adjusted(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

/// Duration in seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl Time {
    pub const ZERO: Time = Time(0);

    #[must_use]
    pub const fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.0
    }

    /// Adds a signed number of seconds, flooring at zero.
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        Self(self.0.saturating_add_signed(delta))
    }
}

impl From<Time> for i64 {
    fn from(value: Time) -> Self {
        i64::from(value.0)
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Time {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Time::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_set_fresh_sets() {
        let sets = Set::fresh_sets(7.into());

        assert_eq!(sets.len(), 4);
        assert_eq!(
            sets.iter().map(|s| *s.number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        for set in &sets {
            assert_eq!(set.exercise_id, 7.into());
            assert_eq!(set.status, SetStatus::Idle);
            assert!(!set.is_completed());
            assert_eq!(set.weight, Weight::default());
            assert_eq!(set.duration, Time::new(45));
            assert_eq!(set.rest_time, Time::new(15));
        }
    }

    #[test]
    fn test_set_fresh_sets_unique_ids() {
        let sets = Set::fresh_sets(1.into());
        let mut ids = sets.iter().map(|s| s.id).collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[rstest]
    #[case(0, Err(SetNumberError::OutOfRange(0)))]
    #[case(1, Ok(SetNumber(1)))]
    #[case(4, Ok(SetNumber(4)))]
    #[case(5, Err(SetNumberError::OutOfRange(5)))]
    fn test_set_number_new(#[case] value: u8, #[case] expected: Result<SetNumber, SetNumberError>) {
        assert_eq!(SetNumber::new(value), expected);
    }

    #[test]
    fn test_set_number_index() {
        assert_eq!(
            SetNumber::all().map(SetNumber::index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[rstest]
    #[case(0.0, 2.5, 2.5)]
    #[case(2.5, 2.5, 5.0)]
    #[case(2.5, -5.0, 0.0)]
    fn test_weight_adjusted(#[case] value: f32, #[case] delta: f32, #[case] expected: f32) {
        assert_eq!(Weight::new(value).adjusted(delta), Weight(expected));
    }

    #[rstest]
    #[case(0.0, "0")]
    #[case(5.0, "5")]
    #[case(7.5, "7.5")]
    fn test_weight_display(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(Weight::new(value).to_string(), expected);
    }

    #[rstest]
    #[case(15, 15, 30)]
    #[case(15, -15, 0)]
    #[case(15, -30, 0)]
    #[case(45, 5, 50)]
    fn test_time_adjusted(#[case] value: u32, #[case] delta: i32, #[case] expected: u32) {
        assert_eq!(Time::new(value).adjusted(delta), Time::new(expected));
    }

    #[test]
    fn test_time_sum() {
        assert_eq!(
            [Time::new(45), Time::new(50), Time::new(5)].into_iter().sum::<Time>(),
            Time::new(100)
        );
        assert_eq!(std::iter::empty::<Time>().sum::<Time>(), Time::ZERO);
    }
}
