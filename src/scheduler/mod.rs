//! Timetable assignment engine.
//!
//! Places class groups one at a time with a greedy, randomized-restart
//! heuristic. It is not a complete constraint solver: an attempt never
//! backtracks, and a committed class group is never revisited.
//!
//! # Components
//!
//! - `distribute_daily_load`: spreads weekly hours over the five weekdays.
//! - `ClassScheduler`: bounded retries for a single class group.
//! - `TeacherLedger` / `TeacherStage`: committed vs. tentative teacher
//!   reservations.
//! - `Orchestrator`: runs all class groups under a failure policy.

mod class_scheduler;
mod config;
mod distributor;
mod ledger;
mod orchestrator;

pub use class_scheduler::{ClassScheduler, Placement, PlacementFailure};
pub use config::{
    default_lesson_times, OrchestrationPolicy, OrchestratorConfig, SchedulerConfig, SlotScan,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_PASSES,
};
pub use distributor::distribute_daily_load;
pub use ledger::{TeacherLedger, TeacherStage};
pub use orchestrator::Orchestrator;
