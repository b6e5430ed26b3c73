//! Multi-class-group orchestration.
//!
//! Class groups are placed one after another in input order. Each
//! successful placement is committed into the shared `TeacherLedger`
//! before the next group starts, so later groups schedule around the
//! teachers already claimed by earlier ones. Committed groups are never
//! revisited.
//!
//! # Policies
//!
//! - `FailFastRestart`: any failed group clears the ledger and restarts
//!   the pass from the first group, at most `max_passes` times.
//! - `BestEffort`: a failed group contributes its final partial grid
//!   (and its reservations) and the pass continues.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::class_scheduler::{ClassScheduler, PlacementFailure};
use super::config::{OrchestrationPolicy, OrchestratorConfig};
use super::ledger::TeacherLedger;
use crate::audit::audit;
use crate::error::{TimetableError, TimetableResult};
use crate::models::{ClassGroup, Curriculum, Roster, Timetable};
use crate::validation::validate_inputs;

/// Builds a full timetable for every class group.
///
/// # Example
///
/// ```
/// use u_timetable::models::{ClassGroup, Curriculum, Roster};
/// use u_timetable::scheduler::Orchestrator;
///
/// let curriculum = Curriculum::new()
///     .with_subject(5, "math", 5)
///     .with_subject(5, "art", 5);
/// let roster = Roster::new()
///     .with_teachers("math", &["M1"])
///     .with_teachers("art", &["A1", "A2"]);
/// let groups = ClassGroup::sections(5..=5, &["A", "B"]);
///
/// let mut orchestrator = Orchestrator::new(groups, curriculum, roster);
/// let timetable = orchestrator.run_seeded(17).unwrap();
/// assert!(timetable.is_complete());
/// assert_eq!(timetable.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Orchestrator {
    class_groups: Vec<ClassGroup>,
    curriculum: Curriculum,
    roster: Roster,
    config: OrchestratorConfig,
    ledger: TeacherLedger,
}

impl Orchestrator {
    /// Creates an orchestrator with the default configuration.
    pub fn new(class_groups: Vec<ClassGroup>, curriculum: Curriculum, roster: Roster) -> Self {
        Self {
            class_groups,
            curriculum,
            roster,
            config: OrchestratorConfig::default(),
            ledger: TeacherLedger::new(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Ledger state after the most recent pass.
    pub fn ledger(&self) -> &TeacherLedger {
        &self.ledger
    }

    /// Class groups in processing order.
    pub fn class_groups(&self) -> &[ClassGroup] {
        &self.class_groups
    }

    /// Runs with a seeded `StdRng` for reproducible output.
    pub fn run_seeded(&mut self, seed: u64) -> TimetableResult<Timetable> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(&mut rng)
    }

    /// Validates inputs and runs the configured policy.
    ///
    /// # Errors
    /// - `Configuration` if the inputs are inconsistent (nothing is placed).
    /// - `OrchestrationExhausted` if `FailFastRestart` runs out of passes.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TimetableResult<Timetable> {
        validate_inputs(&self.class_groups, &self.curriculum, &self.roster)
            .map_err(TimetableError::Configuration)?;

        let timetable = match self.config.policy {
            OrchestrationPolicy::FailFastRestart => self.run_fail_fast(rng)?,
            OrchestrationPolicy::BestEffort => self.run_best_effort(rng),
        };

        let violations = audit(&timetable, &self.curriculum, &self.config.scheduler);
        match self.config.policy {
            OrchestrationPolicy::FailFastRestart => {
                for violation in &violations {
                    warn!(
                        "Audit violation {:?} in {}: {}",
                        violation.violation_type, violation.class_group, violation.message
                    );
                }
                debug_assert!(
                    violations.is_empty(),
                    "completed pass failed audit: {violations:?}"
                );
            }
            OrchestrationPolicy::BestEffort => {
                debug!("Audit found {} violations", violations.len());
            }
        }
        Ok(timetable)
    }

    fn run_fail_fast<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TimetableResult<Timetable> {
        // A zero budget still runs once
        let max_passes = self.config.max_passes.max(1);
        let mut last_failed = String::new();

        for pass in 1..=max_passes {
            match self.run_pass(rng) {
                Ok(timetable) => {
                    info!(
                        "Timetable for {} class groups completed on pass {}",
                        timetable.len(),
                        pass
                    );
                    return Ok(timetable);
                }
                Err(failure) => {
                    warn!(
                        "Pass {}/{} failed at class group {} after {} attempts, restarting",
                        pass, max_passes, failure.class_group, failure.attempts
                    );
                    last_failed = failure.class_group;
                }
            }
        }

        Err(TimetableError::OrchestrationExhausted {
            passes: max_passes,
            last_failed,
        })
    }

    /// One pass over all groups, stopping at the first failure.
    fn run_pass<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Timetable, PlacementFailure> {
        self.ledger.clear();
        let scheduler = ClassScheduler::new(&self.curriculum, &self.roster, &self.config.scheduler);
        let mut timetable = Timetable::new(self.config.lesson_times.clone());

        for group in &self.class_groups {
            let placement = scheduler.place(group, &self.ledger, rng)?;
            let conflicts = self.ledger.commit(placement.stage);
            debug_assert_eq!(conflicts, 0, "stage was built against this ledger");
            info!(
                "Committed class group {} after {} attempts",
                group.name, placement.attempts
            );
            timetable.push(group.clone(), placement.timetable, true);
        }
        Ok(timetable)
    }

    fn run_best_effort<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Timetable {
        self.ledger.clear();
        let scheduler = ClassScheduler::new(&self.curriculum, &self.roster, &self.config.scheduler);
        let mut timetable = Timetable::new(self.config.lesson_times.clone());

        for group in &self.class_groups {
            match scheduler.place(group, &self.ledger, rng) {
                Ok(placement) => {
                    let conflicts = self.ledger.commit(placement.stage);
                    debug_assert_eq!(conflicts, 0, "stage was built against this ledger");
                    info!(
                        "Committed class group {} after {} attempts",
                        group.name, placement.attempts
                    );
                    timetable.push(group.clone(), placement.timetable, true);
                }
                Err(failure) => {
                    warn!(
                        "Accepting partial timetable for {} ({} empty cells)",
                        group.name,
                        failure.partial.empty_cells().len()
                    );
                    let conflicts = self.ledger.commit(failure.stage);
                    debug_assert_eq!(conflicts, 0, "stage was built against this ledger");
                    timetable.push(group.clone(), failure.partial, false);
                }
            }
        }
        timetable
    }
}
