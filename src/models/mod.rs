//! Timetabling domain models.
//!
//! Provides the input types (curriculum, roster, class groups) and the
//! solution types (daily loads, per-class grids, the pass result).
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Meaning |
//! |-------------|--------|---------|
//! | ClassGroup | Class "7A" | Needs its own weekly grid |
//! | Curriculum | Study plan | Weekly hours per subject and grade |
//! | Roster | Staff list | Eligible teachers per subject |
//! | ClassTimetable | Class timetable | Weekday → lesson slots |

mod curriculum;
mod timetable;
mod weekday;

pub use curriculum::{ClassGroup, Curriculum, Roster};
pub use timetable::{Assignment, ClassSchedule, ClassTimetable, DailyLoad, Timetable};
pub use weekday::{Weekday, WEEKDAY_COUNT};
