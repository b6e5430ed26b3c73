//! Post-hoc timetable checks.
//!
//! Re-verifies a finished `Timetable` against the curriculum and the
//! placement rules. A result produced by the fail-fast policy yields no
//! violations; best-effort results report what their partial grids miss.
//! Violations come out in class-group order, then by subject and weekday.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{Curriculum, Timetable, Weekday};
use crate::scheduler::SchedulerConfig;

/// A rule broken by a finished timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Class group the violation was found in.
    pub class_group: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A subject's weekly count differs from its curriculum hours.
    QuotaMismatch,
    /// A subject exceeds its per-day cap.
    RepetitionCap,
    /// A banned subject sits in the last slot of a day.
    ForbiddenLastSlot,
    /// A cell was left empty.
    EmptyCell,
    /// A teacher holds two lessons at the same day and slot.
    TeacherConflict,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        class_group: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            class_group: class_group.into(),
            message: message.into(),
        }
    }
}

/// Checks every class group in `timetable`.
///
/// Teacher conflicts are checked across the whole timetable; the later
/// class group in processing order is the one reported.
pub fn audit(
    timetable: &Timetable,
    curriculum: &Curriculum,
    config: &SchedulerConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut bookings: HashMap<(&str, Weekday, usize), &str> = HashMap::new();

    for entry in &timetable.entries {
        let name = entry.class_group.name.as_str();
        let level = entry.class_group.level;
        let grid = &entry.timetable;

        // Quotas, including subjects placed that the curriculum lacks
        let mut placed: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, _, lesson) in grid.lessons() {
            *placed.entry(lesson.subject.as_str()).or_insert(0) += 1;
        }
        if let Some(subjects) = curriculum.subjects(level) {
            for (subject, &hours) in subjects {
                let count = placed.get(subject.as_str()).copied().unwrap_or(0);
                if count != hours as usize {
                    violations.push(Violation::new(
                        ViolationType::QuotaMismatch,
                        name,
                        format!("'{subject}' has {count} lessons, expected {hours}"),
                    ));
                }
            }
        }
        for (subject, count) in &placed {
            if curriculum.hours(level, subject) == 0 {
                violations.push(Violation::new(
                    ViolationType::QuotaMismatch,
                    name,
                    format!("'{subject}' has {count} lessons, expected 0"),
                ));
            }
        }

        for day in Weekday::ALL {
            let slots = grid.slots(day);

            let mut per_day: BTreeMap<&str, usize> = BTreeMap::new();
            for lesson in slots.iter().flatten() {
                *per_day.entry(lesson.subject.as_str()).or_insert(0) += 1;
            }
            for (subject, count) in per_day {
                let cap = config.daily_cap(subject, level);
                if count > cap {
                    violations.push(Violation::new(
                        ViolationType::RepetitionCap,
                        name,
                        format!("'{subject}' appears {count} times on {day}, cap {cap}"),
                    ));
                }
            }

            if let Some(Some(last)) = slots.last() {
                if config.is_forbidden_last(&last.subject) {
                    violations.push(Violation::new(
                        ViolationType::ForbiddenLastSlot,
                        name,
                        format!("'{}' is the last lesson on {day}", last.subject),
                    ));
                }
            }

            for (slot, cell) in slots.iter().enumerate() {
                match cell {
                    None => violations.push(Violation::new(
                        ViolationType::EmptyCell,
                        name,
                        format!("{day} slot {slot} is empty"),
                    )),
                    Some(lesson) => {
                        let key = (lesson.teacher.as_str(), day, slot);
                        if let Some(other) = bookings.insert(key, name) {
                            violations.push(Violation::new(
                                ViolationType::TeacherConflict,
                                name,
                                format!(
                                    "Teacher '{}' is also teaching {other} on {day} slot {slot}",
                                    lesson.teacher
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, ClassGroup, ClassTimetable, DailyLoad};

    fn curriculum() -> Curriculum {
        Curriculum::new()
            .with_subject(9, "algebra", 2)
            .with_subject(9, "art", 1)
    }

    fn grid(lessons: &[(&str, &str)]) -> ClassTimetable {
        let mut t = ClassTimetable::empty(&DailyLoad::new([lessons.len(), 0, 0, 0, 0]));
        for (slot, (subject, teacher)) in lessons.iter().enumerate() {
            t.place(Weekday::Mon, slot, Assignment::new(*subject, *teacher));
        }
        t
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type).collect()
    }

    #[test]
    fn test_clean_timetable() {
        let config = SchedulerConfig::default().with_repeatable("algebra");
        let mut tt = Timetable::new(Vec::new());
        tt.push(
            ClassGroup::new("9A", 9),
            grid(&[("algebra", "T1"), ("algebra", "T1"), ("art", "T2")]),
            true,
        );
        assert!(audit(&tt, &curriculum(), &config).is_empty());
    }

    #[test]
    fn test_repetition_cap() {
        // Not repeatable → cap 1
        let config = SchedulerConfig::default();
        let mut tt = Timetable::new(Vec::new());
        tt.push(
            ClassGroup::new("9A", 9),
            grid(&[("algebra", "T1"), ("algebra", "T1"), ("art", "T2")]),
            true,
        );
        assert_eq!(kinds(&audit(&tt, &curriculum(), &config)), [ViolationType::RepetitionCap]);
    }

    #[test]
    fn test_forbidden_last_slot() {
        let config = SchedulerConfig::default()
            .with_repeatable("algebra")
            .with_forbidden_last_slot("algebra");
        let mut tt = Timetable::new(Vec::new());
        tt.push(
            ClassGroup::new("9A", 9),
            grid(&[("art", "T2"), ("algebra", "T1"), ("algebra", "T1")]),
            true,
        );
        assert_eq!(
            kinds(&audit(&tt, &curriculum(), &config)),
            [ViolationType::ForbiddenLastSlot]
        );
    }

    #[test]
    fn test_teacher_conflict_across_groups() {
        let config = SchedulerConfig::default().with_repeatable("algebra");
        let mut tt = Timetable::new(Vec::new());
        let lessons = [("algebra", "T1"), ("algebra", "T1"), ("art", "T2")];
        tt.push(ClassGroup::new("9A", 9), grid(&lessons), true);
        tt.push(ClassGroup::new("9B", 9), grid(&lessons), true);

        let violations = audit(&tt, &curriculum(), &config);
        assert_eq!(violations.len(), 3);
        assert!(violations
            .iter()
            .all(|v| v.violation_type == ViolationType::TeacherConflict && v.class_group == "9B"));
    }

    #[test]
    fn test_quota_and_empty_cells() {
        let config = SchedulerConfig::default();
        let mut t = ClassTimetable::empty(&DailyLoad::new([2, 1, 0, 0, 0]));
        t.place(Weekday::Mon, 0, Assignment::new("music", "T9"));
        let mut tt = Timetable::new(Vec::new());
        tt.push(ClassGroup::new("9A", 9), t, false);

        let found = kinds(&audit(&tt, &curriculum(), &config));
        // algebra 0/2, art 0/1, music 1/0
        assert_eq!(
            found
                .iter()
                .filter(|k| **k == ViolationType::QuotaMismatch)
                .count(),
            3
        );
        assert_eq!(
            found
                .iter()
                .filter(|k| **k == ViolationType::EmptyCell)
                .count(),
            2
        );
    }

    #[test]
    fn test_violation_order_is_stable() {
        let config = SchedulerConfig::default();
        let mut t = ClassTimetable::empty(&DailyLoad::new([6, 0, 0, 0, 0]));
        let lessons = [
            ("music", "T9"),
            ("art", "T2"),
            ("drama", "T8"),
            ("music", "T9"),
            ("art", "T2"),
            ("drama", "T8"),
        ];
        for (slot, (subject, teacher)) in lessons.iter().enumerate() {
            t.place(Weekday::Mon, slot, Assignment::new(*subject, *teacher));
        }
        let mut tt = Timetable::new(Vec::new());
        tt.push(ClassGroup::new("9A", 9), t, true);

        let violations = audit(&tt, &curriculum(), &config);
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "'algebra' has 0 lessons, expected 2",
                "'art' has 2 lessons, expected 1",
                "'drama' has 2 lessons, expected 0",
                "'music' has 2 lessons, expected 0",
                "'art' appears 2 times on Mon, cap 1",
                "'drama' appears 2 times on Mon, cap 1",
                "'music' appears 2 times on Mon, cap 1",
            ]
        );
        assert_eq!(audit(&tt, &curriculum(), &config), violations);
    }
}
