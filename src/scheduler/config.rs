//! Scheduler and orchestrator configuration.
//!
//! Every field has a default, so a JSON document only needs to name what
//! it changes:
//!
//! ```
//! use u_timetable::scheduler::{OrchestrationPolicy, OrchestratorConfig};
//!
//! let config = OrchestratorConfig::from_json_str(
//!     r#"{"policy": "BestEffort", "scheduler": {"repeatable_subjects": ["algebra"]}}"#,
//! ).unwrap();
//! assert_eq!(config.policy, OrchestrationPolicy::BestEffort);
//! assert_eq!(config.scheduler.max_attempts, 100);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::TimetableResult;

/// Default per-class attempt budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;
/// Default whole-pass restart budget.
pub const DEFAULT_MAX_PASSES: u32 = 50;

/// How a subject instance reacts when an open slot has no free teacher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotScan {
    /// Keep scanning later slots and days before giving up on the instance.
    #[default]
    Exhaustive,
    /// Abandon the attempt at the first open slot without a free teacher.
    FirstOpenSlot,
}

/// What the orchestrator does when a class group cannot be placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrchestrationPolicy {
    /// Clear the ledger and restart from the first class group, up to
    /// `max_passes` times.
    #[default]
    FailFastRestart,
    /// Accept the final partial grid and move on.
    BestEffort,
}

/// Placement rules for a single class group.
///
/// No subject is repeatable or banned from the last slot by default. The
/// classic school policy lets algebra and geometry run twice a day from
/// grade 9 and keeps both out of the last slot:
///
/// ```
/// use u_timetable::scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::default()
///     .with_repeatable("algebra")
///     .with_repeatable("geometry")
///     .with_forbidden_last_slot("algebra")
///     .with_forbidden_last_slot("geometry");
///
/// assert_eq!(config.daily_cap("algebra", 9), 2);
/// assert_eq!(config.daily_cap("geometry", 8), 1);
/// assert_eq!(config.daily_cap("history", 11), 1);
/// assert!(config.is_forbidden_last("geometry"));
/// assert!(!config.is_forbidden_last("history"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Randomized attempts per class group.
    pub max_attempts: u32,
    /// Subjects allowed `repeat_cap` lessons per day at qualifying levels.
    pub repeatable_subjects: BTreeSet<String>,
    /// Lowest level at which repeatable subjects may repeat.
    pub repeat_grade_threshold: u32,
    /// Daily cap for repeatable subjects at qualifying levels.
    pub repeat_cap: usize,
    /// Subjects banned from the last slot of a day. Empty disables the ban.
    pub forbidden_last_slot_subjects: BTreeSet<String>,
    /// Reject attempts that leave any cell empty.
    pub strict_completeness: bool,
    /// Slot scanning policy.
    pub slot_scan: SlotScan,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            repeatable_subjects: BTreeSet::new(),
            repeat_grade_threshold: 9,
            repeat_cap: 2,
            forbidden_last_slot_subjects: BTreeSet::new(),
            strict_completeness: true,
            slot_scan: SlotScan::Exhaustive,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Marks a subject as repeatable.
    pub fn with_repeatable(mut self, subject: impl Into<String>) -> Self {
        self.repeatable_subjects.insert(subject.into());
        self
    }

    /// Sets the level threshold and cap for repeatable subjects.
    pub fn with_repeat_rule(mut self, grade_threshold: u32, cap: usize) -> Self {
        self.repeat_grade_threshold = grade_threshold;
        self.repeat_cap = cap;
        self
    }

    /// Bans a subject from the last slot of every day.
    pub fn with_forbidden_last_slot(mut self, subject: impl Into<String>) -> Self {
        self.forbidden_last_slot_subjects.insert(subject.into());
        self
    }

    /// Sets the strict completeness check.
    pub fn with_strict_completeness(mut self, strict: bool) -> Self {
        self.strict_completeness = strict;
        self
    }

    /// Sets the slot scanning policy.
    pub fn with_slot_scan(mut self, slot_scan: SlotScan) -> Self {
        self.slot_scan = slot_scan;
        self
    }

    /// Lessons of `subject` allowed per day at `level`.
    pub fn daily_cap(&self, subject: &str, level: u32) -> usize {
        if level >= self.repeat_grade_threshold && self.repeatable_subjects.contains(subject) {
            self.repeat_cap
        } else {
            1
        }
    }

    /// Whether `subject` may not take the last slot of a day.
    pub fn is_forbidden_last(&self, subject: &str) -> bool {
        self.forbidden_last_slot_subjects.contains(subject)
    }
}

/// Whole-pass configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Failure policy.
    pub policy: OrchestrationPolicy,
    /// Restart budget for `FailFastRestart`.
    pub max_passes: u32,
    /// Lesson-time labels passed through to the result.
    pub lesson_times: Vec<String>,
    /// Per-class placement rules.
    pub scheduler: SchedulerConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            policy: OrchestrationPolicy::FailFastRestart,
            max_passes: DEFAULT_MAX_PASSES,
            lesson_times: default_lesson_times(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> TimetableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the failure policy.
    pub fn with_policy(mut self, policy: OrchestrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the restart budget.
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Sets the lesson-time labels.
    pub fn with_lesson_times(mut self, lesson_times: Vec<String>) -> Self {
        self.lesson_times = lesson_times;
        self
    }

    /// Sets the per-class placement rules.
    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }
}

/// Seven 45-minute periods with 10-minute breaks, starting 08:30.
pub fn default_lesson_times() -> Vec<String> {
    [
        "08:30–09:15",
        "09:25–10:10",
        "10:20–11:05",
        "11:15–12:00",
        "12:10–12:55",
        "13:05–13:50",
        "14:00–14:45",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
