use std::collections::BTreeSet;

use log::debug;

use crate::{AudioCue, Catalog, Exercise, RandomSource, Set, SetNumber, SetStatus, Time};

/// Workout state of the active exercise.
///
/// At most one set is [`SetStatus::Pending`], and it is always the current set. Showing the rest
/// timer and the current set being pending are the same condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    exercise: Exercise,
    sets: Vec<Set>,
    current: SetNumber,
}

impl Session {
    #[must_use]
    pub fn new(exercise: Exercise) -> Self {
        let sets = Set::fresh_sets(exercise.id);
        Self {
            exercise,
            sets,
            current: SetNumber::FIRST,
        }
    }

    #[must_use]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    #[must_use]
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    #[must_use]
    pub fn current_set_number(&self) -> SetNumber {
        self.current
    }

    #[must_use]
    pub fn current_set(&self) -> &Set {
        &self.sets[self.current.index()]
    }

    #[must_use]
    pub fn status(&self) -> SetStatus {
        self.current_set().status
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status() == SetStatus::Pending
    }

    #[must_use]
    pub fn show_rest_timer(&self) -> bool {
        self.is_pending()
    }

    #[must_use]
    pub fn completed_sets(&self) -> BTreeSet<SetNumber> {
        self.sets
            .iter()
            .filter(|s| s.is_completed())
            .map(|s| s.number)
            .collect()
    }

    #[must_use]
    pub fn total_duration(&self) -> Time {
        self.sets.iter().map(|s| s.duration).sum()
    }

    /// Makes `number` the current set. A pending previous set is returned to idle.
    pub fn select_set(&mut self, number: SetNumber) {
        if self.is_pending() {
            debug!("abandoning rest timer of set {}", self.current);
            self.current_set_mut().status = SetStatus::Idle;
        }
        self.current = number;
    }

    /// Advances the current set: idle sets are started, pending sets are completed and
    /// completed sets are reset.
    pub fn toggle_complete(&mut self, cue: &mut impl AudioCue) -> SetStatus {
        let next = match self.status() {
            SetStatus::Completed => SetStatus::Idle,
            SetStatus::Pending => SetStatus::Completed,
            SetStatus::Idle => {
                cue.enable();
                SetStatus::Pending
            }
        };
        self.current_set_mut().status = next;
        next
    }

    pub fn adjust_weight(&mut self, delta: f32) {
        let set = self.current_set_mut();
        set.weight = set.weight.adjusted(delta);
    }

    pub fn adjust_duration(&mut self, delta: i32) {
        let set = self.current_set_mut();
        set.duration = set.duration.adjusted(delta);
    }

    pub fn adjust_rest_time(&mut self, delta: i32) {
        let set = self.current_set_mut();
        set.rest_time = set.rest_time.adjusted(delta);
    }

    /// Completes the pending set after the user closed the rest timer.
    pub fn dismiss_rest_timer(&mut self, cue: &mut impl AudioCue) -> bool {
        self.finish_rest(cue)
    }

    /// Completes the pending set after the rest timer ran out.
    pub fn complete_rest_timer(&mut self, cue: &mut impl AudioCue) -> bool {
        self.finish_rest(cue)
    }

    /// Replaces the exercise by a different random one and starts over with fresh sets.
    ///
    /// Returns `false` if the catalog is empty.
    pub fn new_exercise(&mut self, catalog: &Catalog, random: &mut impl RandomSource) -> bool {
        let Some(exercise) = catalog.pick_random(Some(self.exercise.id), random) else {
            return false;
        };
        *self = Session::new(exercise.clone());
        true
    }

    fn finish_rest(&mut self, cue: &mut impl AudioCue) -> bool {
        if !self.is_pending() {
            return false;
        }
        cue.play();
        self.current_set_mut().status = SetStatus::Completed;
        true
    }

    fn current_set_mut(&mut self) -> &mut Set {
        let idx = self.current.index();
        &mut self.sets[idx]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        Outcome, RestTimer, TICK_INTERVAL_MS, Tick, Weight,
        exercise::tests::{Sequence, catalog, exercise},
    };

    use super::*;

    #[derive(Default)]
    pub struct Recorder {
        pub enabled: usize,
        pub played: usize,
    }

    impl AudioCue for Recorder {
        fn enable(&mut self) {
            self.enabled += 1;
        }

        fn play(&mut self) {
            self.played += 1;
        }
    }

    fn number(value: u8) -> SetNumber {
        SetNumber::new(value).unwrap()
    }

    fn session() -> Session {
        Session::new(exercise(1, "Squat"))
    }

    #[test]
    fn test_session_new() {
        let session = session();

        assert_eq!(session.current_set_number(), number(1));
        assert_eq!(session.sets().len(), 4);
        assert_eq!(session.status(), SetStatus::Idle);
        assert!(!session.show_rest_timer());
        assert!(session.completed_sets().is_empty());
        assert_eq!(session.total_duration(), Time::new(180));
    }

    #[test]
    fn test_session_toggle_complete_idle_starts() {
        let mut session = session();
        let mut cue = Recorder::default();

        assert_eq!(session.toggle_complete(&mut cue), SetStatus::Pending);
        assert!(session.is_pending());
        assert!(session.show_rest_timer());
        assert!(!session.current_set().is_completed());
        assert!(session.completed_sets().is_empty());
        assert_eq!(cue.enabled, 1);
        assert_eq!(cue.played, 0);
    }

    #[test]
    fn test_session_toggle_complete_pending_completes() {
        let mut session = session();
        let mut cue = Recorder::default();
        session.toggle_complete(&mut cue);

        assert_eq!(session.toggle_complete(&mut cue), SetStatus::Completed);
        assert!(!session.show_rest_timer());
        assert!(session.current_set().is_completed());
        assert_eq!(session.completed_sets(), BTreeSet::from([number(1)]));
        assert_eq!(cue.played, 0);
    }

    #[test]
    fn test_session_toggle_complete_completed_resets() {
        let mut session = session();
        let mut cue = Recorder::default();
        session.toggle_complete(&mut cue);
        session.toggle_complete(&mut cue);

        assert_eq!(session.toggle_complete(&mut cue), SetStatus::Idle);
        assert!(!session.current_set().is_completed());
        assert!(!session.show_rest_timer());
        assert!(session.completed_sets().is_empty());
    }

    #[rstest]
    #[case::dismissed(true)]
    #[case::natural(false)]
    fn test_session_finish_rest(#[case] dismissed: bool) {
        let mut session = session();
        let mut cue = Recorder::default();
        session.toggle_complete(&mut cue);

        let finished = if dismissed {
            session.dismiss_rest_timer(&mut cue)
        } else {
            session.complete_rest_timer(&mut cue)
        };

        assert!(finished);
        assert_eq!(session.status(), SetStatus::Completed);
        assert!(!session.show_rest_timer());
        assert_eq!(session.completed_sets(), BTreeSet::from([number(1)]));
        assert_eq!(cue.played, 1);
    }

    #[test]
    fn test_session_finish_rest_without_pending_set() {
        let mut session = session();
        let mut cue = Recorder::default();

        assert!(!session.complete_rest_timer(&mut cue));
        assert!(!session.dismiss_rest_timer(&mut cue));
        assert_eq!(session.status(), SetStatus::Idle);
        assert_eq!(cue.played, 0);
    }

    #[test]
    fn test_session_select_set_abandons_pending_set() {
        let mut session = session();
        let mut cue = Recorder::default();
        session.toggle_complete(&mut cue);

        session.select_set(number(3));

        assert_eq!(session.current_set_number(), number(3));
        assert!(!session.show_rest_timer());
        assert_eq!(session.sets()[0].status, SetStatus::Idle);
        assert!(session.sets().iter().all(|s| s.status != SetStatus::Pending));

        assert!(!session.complete_rest_timer(&mut cue));
        assert_eq!(session.sets()[0].status, SetStatus::Idle);
    }

    #[test]
    fn test_session_select_set_keeps_completion() {
        let mut session = session();
        let mut cue = Recorder::default();
        session.toggle_complete(&mut cue);
        session.complete_rest_timer(&mut cue);

        session.select_set(number(2));
        assert_eq!(session.status(), SetStatus::Idle);

        session.select_set(number(1));
        assert_eq!(session.status(), SetStatus::Completed);
        assert!(!session.show_rest_timer());
    }

    #[test]
    fn test_session_adjustments_affect_current_set_only() {
        let mut session = session();
        session.select_set(number(2));

        session.adjust_weight(Weight::STEP);
        session.adjust_weight(Weight::STEP);
        session.adjust_duration(5);
        session.adjust_rest_time(15);

        let set = session.current_set();
        assert_eq!(set.weight, Weight::new(5.0));
        assert_eq!(set.duration, Time::new(50));
        assert_eq!(set.rest_time, Time::new(30));
        assert_eq!(set.status, SetStatus::Idle);

        for other in [0, 2, 3] {
            assert_eq!(session.sets()[other].weight, Weight::default());
            assert_eq!(session.sets()[other].duration, Time::new(45));
            assert_eq!(session.sets()[other].rest_time, Time::new(15));
        }
    }

    #[test]
    fn test_session_adjust_rest_time_floors_at_zero() {
        let mut session = session();
        session.adjust_rest_time(-15);
        session.adjust_rest_time(-15);
        assert_eq!(session.current_set().rest_time, Time::ZERO);
    }

    #[test]
    fn test_session_total_duration_tracks_adjustments() {
        let mut session = session();
        let adjustments = [(1, 5), (2, 5), (2, 5), (4, -10), (3, 0), (1, -100)];

        for (set, delta) in adjustments {
            session.select_set(number(set));
            session.adjust_duration(delta);
            session.adjust_weight(Weight::STEP);
            assert_eq!(
                session.total_duration(),
                session.sets().iter().map(|s| s.duration).sum::<Time>()
            );
        }

        assert_eq!(session.total_duration(), Time::new(55 + 45 + 35));
    }

    #[test]
    fn test_session_new_exercise() {
        let catalog = catalog(3);
        let mut cue = Recorder::default();
        let mut session = Session::new(catalog.get(2.into()).unwrap().clone());
        session.toggle_complete(&mut cue);
        session.complete_rest_timer(&mut cue);
        session.select_set(number(3));
        session.adjust_weight(Weight::STEP);
        session.toggle_complete(&mut cue);

        for idx in 0..6 {
            let previous = session.exercise().id;
            assert!(session.new_exercise(&catalog, &mut Sequence::new(&[idx])));
            assert!(session.exercise().id != previous);
            assert_eq!(session.current_set_number(), number(1));
            assert_eq!(session.sets().len(), 4);
            assert!(session.sets().iter().all(|s| s.status == SetStatus::Idle));
            assert!(session.sets().iter().all(|s| s.weight == Weight::default()));
            assert!(
                session
                    .sets()
                    .iter()
                    .all(|s| s.exercise_id == session.exercise().id)
            );
            assert!(session.completed_sets().is_empty());
            assert!(!session.show_rest_timer());
        }
    }

    #[test]
    fn test_session_rest_between_sets() {
        let start =
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::milliseconds(100);
        let mut session = session();
        let mut cue = Recorder::default();

        assert_eq!(session.toggle_complete(&mut cue), SetStatus::Pending);
        assert!(session.show_rest_timer());

        let mut timer = RestTimer::new(session.current_set().rest_time);
        assert_eq!(timer.rest_time(), Time::new(15));
        let delay = timer.activate(start).unwrap();
        assert_eq!(delay, 900);

        let mut now = start + Duration::milliseconds(i64::from(delay));
        let mut tick = timer.begin(now);
        let mut ticks = 0;
        while tick == Tick::Running {
            assert_eq!(session.status(), SetStatus::Pending);
            now += Duration::milliseconds(i64::from(TICK_INTERVAL_MS));
            tick = timer.tick(now);
            ticks += 1;
        }
        assert_eq!(tick, Tick::Expired);
        assert_eq!(ticks, 14);
        assert_eq!(timer.remaining(), Time::ZERO);
        assert_eq!(now - start, Duration::milliseconds(14_900));

        assert_eq!(timer.finish(), Some(Outcome::Completed));
        assert_eq!(timer.finish(), None);
        assert!(session.complete_rest_timer(&mut cue));
        assert_eq!(session.status(), SetStatus::Completed);
        assert_eq!(session.completed_sets(), BTreeSet::from([number(1)]));
        assert_eq!(cue.played, 1);

        session.select_set(number(2));
        assert_eq!(session.status(), SetStatus::Idle);
        assert!(!session.show_rest_timer());
        assert_eq!(session.completed_sets(), BTreeSet::from([number(1)]));
        assert_eq!(cue.played, 1);
    }

    #[test]
    fn test_session_new_exercise_empty_catalog() {
        let mut session = session();
        assert!(!session.new_exercise(&Catalog::default(), &mut Sequence::new(&[0])));
        assert_eq!(session.exercise().id, 1.into());
    }
}
