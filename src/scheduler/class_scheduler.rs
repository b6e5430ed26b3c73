//! Greedy randomized-restart scheduler for one class group.
//!
//! # Algorithm
//!
//! Each attempt:
//! 1. Shuffle the subject pool (each subject repeated by its weekly hours).
//! 2. Draw a fresh daily load and allocate an empty grid and stage.
//! 3. For each pool entry, scan days in weekday order, skipping days where
//!    the subject is at its daily cap; within a day scan slots ascending,
//!    skipping filled cells and (for banned subjects) the last slot.
//! 4. At an open slot, try the subject's teachers in random order; the
//!    first one free in both the shared ledger and the stage gets the slot.
//! 5. If some entry cannot be placed, or (strict mode) a cell stays empty,
//!    drop the stage and start over.
//!
//! No placement decision is ever revisited within an attempt. Diversity
//! across attempts (shuffle, daily load, teacher order) is the only way
//! out of a dead end.
//!
//! # Complexity
//! O(a * p * s * t) where a=attempts, p=pool size, s=slots/week,
//! t=teachers/subject.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::config::{SchedulerConfig, SlotScan};
use super::distributor::distribute_daily_load;
use super::ledger::{TeacherLedger, TeacherStage};
use crate::error::{TimetableError, TimetableResult};
use crate::models::{Assignment, ClassGroup, ClassTimetable, Curriculum, Roster, Weekday};
use crate::validation::validate_inputs;

/// A successful placement, not yet committed to the ledger.
#[derive(Debug, Clone)]
pub struct Placement {
    /// The complete grid.
    pub timetable: ClassTimetable,
    /// Teacher reservations made by the winning attempt.
    pub stage: TeacherStage,
    /// Attempts used, including the winning one.
    pub attempts: u32,
}

/// An exhausted attempt budget.
///
/// Carries the final attempt's partial grid and stage so a best-effort
/// caller can still commit what was placed.
#[derive(Debug, Clone)]
pub struct PlacementFailure {
    /// Class group name.
    pub class_group: String,
    /// Attempts used.
    pub attempts: u32,
    /// Grid of the final attempt.
    pub partial: ClassTimetable,
    /// Reservations of the final attempt.
    pub stage: TeacherStage,
}

impl From<PlacementFailure> for TimetableError {
    fn from(failure: PlacementFailure) -> Self {
        TimetableError::PlacementExhausted {
            class_group: failure.class_group,
            attempts: failure.attempts,
        }
    }
}

/// Places one class group's weekly lessons around existing reservations.
///
/// # Example
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_timetable::models::{ClassGroup, Curriculum, Roster};
/// use u_timetable::scheduler::{ClassScheduler, SchedulerConfig, TeacherLedger};
///
/// let curriculum = Curriculum::new()
///     .with_subject(6, "math", 5)
///     .with_subject(6, "art", 2)
///     .with_subject(6, "pe", 3);
/// let roster = Roster::new()
///     .with_teachers("math", &["M1"])
///     .with_teachers("art", &["A1"])
///     .with_teachers("pe", &["P1"]);
/// let config = SchedulerConfig::default();
///
/// let scheduler = ClassScheduler::new(&curriculum, &roster, &config);
/// let ledger = TeacherLedger::new();
/// let mut rng = SmallRng::seed_from_u64(3);
/// let placement = scheduler
///     .schedule(&ClassGroup::new("6A", 6), &ledger, &mut rng)
///     .unwrap();
/// assert_eq!(placement.timetable.lesson_count(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClassScheduler<'a> {
    curriculum: &'a Curriculum,
    roster: &'a Roster,
    config: &'a SchedulerConfig,
}

impl<'a> ClassScheduler<'a> {
    /// Creates a scheduler over borrowed inputs.
    pub fn new(
        curriculum: &'a Curriculum,
        roster: &'a Roster,
        config: &'a SchedulerConfig,
    ) -> Self {
        Self {
            curriculum,
            roster,
            config,
        }
    }

    /// Validates the class group's inputs, then places it.
    ///
    /// Configuration problems fail before any attempt is made.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        class_group: &ClassGroup,
        ledger: &TeacherLedger,
        rng: &mut R,
    ) -> TimetableResult<Placement> {
        validate_inputs(std::slice::from_ref(class_group), self.curriculum, self.roster)
            .map_err(TimetableError::Configuration)?;
        Ok(self.place(class_group, ledger, rng)?)
    }

    /// Runs up to `max_attempts` randomized attempts without validating.
    ///
    /// The ledger is only read. On success the caller decides whether to
    /// commit the returned stage.
    pub fn place<R: Rng + ?Sized>(
        &self,
        class_group: &ClassGroup,
        ledger: &TeacherLedger,
        rng: &mut R,
    ) -> Result<Placement, PlacementFailure> {
        let mut pool = self.curriculum.subject_pool(class_group.level);
        let mut last = None;

        for attempt in 1..=self.config.max_attempts {
            pool.shuffle(rng);
            let load = distribute_daily_load(pool.len(), rng);
            let mut grid = ClassTimetable::empty(&load);
            let mut stage = TeacherStage::new();

            let blocked = pool.iter().find(|subject| {
                !self.place_lesson(subject, class_group.level, &mut grid, &mut stage, ledger, rng)
            });

            match blocked {
                None if !self.config.strict_completeness || grid.is_complete() => {
                    debug!(
                        "Placed class group {} on attempt {}",
                        class_group.name, attempt
                    );
                    return Ok(Placement {
                        timetable: grid,
                        stage,
                        attempts: attempt,
                    });
                }
                None => debug!(
                    "Attempt {} for {} left {} empty cells",
                    attempt,
                    class_group.name,
                    grid.empty_cells().len()
                ),
                Some(subject) => debug!(
                    "Attempt {} for {} could not place '{}'",
                    attempt, class_group.name, subject
                ),
            }
            last = Some((grid, stage));
        }

        let (partial, stage) = last.unwrap_or_default();
        Err(PlacementFailure {
            class_group: class_group.name.clone(),
            attempts: self.config.max_attempts,
            partial,
            stage,
        })
    }

    /// Places one lesson of `subject`. Returns `false` if no cell fits.
    fn place_lesson<R: Rng + ?Sized>(
        &self,
        subject: &str,
        level: u32,
        grid: &mut ClassTimetable,
        stage: &mut TeacherStage,
        ledger: &TeacherLedger,
        rng: &mut R,
    ) -> bool {
        let cap = self.config.daily_cap(subject, level);
        let forbidden_last = self.config.is_forbidden_last(subject);
        let teachers = self.roster.teachers(subject).unwrap_or(&[]);

        for day in Weekday::ALL {
            if grid.count_on(day, subject) >= cap {
                continue;
            }
            let day_len = grid.slots(day).len();
            for slot in 0..day_len {
                if forbidden_last && slot + 1 == day_len {
                    continue;
                }
                if !grid.is_open(day, slot) {
                    continue;
                }
                match pick_teacher(teachers, day, slot, ledger, stage, rng) {
                    Some(teacher) => {
                        stage.reserve(&teacher, day, slot);
                        grid.place(day, slot, Assignment::new(subject, teacher));
                        return true;
                    }
                    None if self.config.slot_scan == SlotScan::FirstOpenSlot => return false,
                    None => {}
                }
            }
        }
        false
    }
}

/// First teacher, in random order, free at (day, slot) in ledger and stage.
fn pick_teacher<R: Rng + ?Sized>(
    teachers: &[String],
    day: Weekday,
    slot: usize,
    ledger: &TeacherLedger,
    stage: &TeacherStage,
    rng: &mut R,
) -> Option<String> {
    let mut order: Vec<&String> = teachers.iter().collect();
    order.shuffle(rng);
    order
        .into_iter()
        .find(|t| ledger.is_free(t, day, slot) && stage.is_free(t, day, slot))
        .cloned()
}
