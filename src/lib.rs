//! Weekly school timetable generation for the U-Engine ecosystem.
//!
//! Assigns lesson slots to subject/teacher pairs for a set of class
//! groups, honoring weekly hour quotas, per-day repetition limits,
//! optional last-slot bans, and teacher non-overlap across all groups.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ClassGroup`, `Curriculum`, `Roster`,
//!   `DailyLoad`, `ClassTimetable`, `Timetable`
//! - **`scheduler`**: Daily load distribution, per-class placement,
//!   teacher ledger, multi-class orchestration
//! - **`validation`**: Input integrity checks (missing subjects, empty
//!   teacher lists, unknown levels)
//! - **`audit`**: Post-hoc rule checks on finished timetables
//! - **`error`**: `TimetableError`
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{ClassGroup, Curriculum, Roster};
//! use u_timetable::scheduler::Orchestrator;
//!
//! let curriculum = Curriculum::from_json_str(r#"{"6": {"math": 5, "art": 2, "pe": 3}}"#)?;
//! let roster = Roster::from_json_str(r#"{"math": ["M1"], "art": ["A1"], "pe": ["P1"]}"#)?;
//!
//! let mut orchestrator = Orchestrator::new(vec![ClassGroup::new("6A", 6)], curriculum, roster);
//! let timetable = orchestrator.run_seeded(42)?;
//! assert_eq!(timetable.get("6A").map(|t| t.lesson_count()), Some(10));
//! # Ok::<(), u_timetable::TimetableError>(())
//! ```

pub mod audit;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{TimetableError, TimetableResult};
