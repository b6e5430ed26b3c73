//! Timetable (solution) models.
//!
//! A `ClassTimetable` is the weekly grid of one class group: for each
//! weekday an ordered list of lesson slots, each holding an `Assignment`
//! or nothing. A `Timetable` collects the grids of every class group in
//! one orchestration pass together with the rendering metadata
//! (weekday order, lesson-time labels).

use serde::{Deserialize, Serialize};

use super::{ClassGroup, Weekday, WEEKDAY_COUNT};

/// Lesson slots per weekday for one class group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoad {
    counts: [usize; WEEKDAY_COUNT],
}

impl DailyLoad {
    /// Creates a load from per-day counts in weekday order.
    pub fn new(counts: [usize; WEEKDAY_COUNT]) -> Self {
        Self { counts }
    }

    /// Same count on every day.
    pub fn uniform(count: usize) -> Self {
        Self::new([count; WEEKDAY_COUNT])
    }

    /// Slot count of a day.
    #[inline]
    pub fn get(&self, day: Weekday) -> usize {
        self.counts[day.index()]
    }

    /// Adds one slot to a day.
    pub fn increment(&mut self, day: Weekday) {
        self.counts[day.index()] += 1;
    }

    /// Total slots across the week.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest single-day count.
    pub fn max_day(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// A subject taught by a teacher in one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Subject name.
    pub subject: String,
    /// Teacher identifier.
    pub teacher: String,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(subject: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            teacher: teacher.into(),
        }
    }
}

/// Weekly grid of one class group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTimetable {
    days: [Vec<Option<Assignment>>; WEEKDAY_COUNT],
}

impl ClassTimetable {
    /// Creates an empty grid shaped by a daily load.
    pub fn empty(load: &DailyLoad) -> Self {
        let mut days: [Vec<Option<Assignment>>; WEEKDAY_COUNT] = Default::default();
        for day in Weekday::ALL {
            days[day.index()] = vec![None; load.get(day)];
        }
        Self { days }
    }

    /// Slots of a day, in lesson order.
    pub fn slots(&self, day: Weekday) -> &[Option<Assignment>] {
        &self.days[day.index()]
    }

    /// Assignment at a cell, if the cell exists and is filled.
    pub fn get(&self, day: Weekday, slot: usize) -> Option<&Assignment> {
        self.days[day.index()].get(slot).and_then(Option::as_ref)
    }

    /// Whether a cell exists and is still empty.
    pub fn is_open(&self, day: Weekday, slot: usize) -> bool {
        matches!(self.days[day.index()].get(slot), Some(None))
    }

    /// Fills a cell. Returns `false` if the cell does not exist.
    pub fn place(&mut self, day: Weekday, slot: usize, assignment: Assignment) -> bool {
        match self.days[day.index()].get_mut(slot) {
            Some(cell) => {
                *cell = Some(assignment);
                true
            }
            None => false,
        }
    }

    /// Number of lessons of a subject already on a day.
    pub fn count_on(&self, day: Weekday, subject: &str) -> usize {
        self.slots(day)
            .iter()
            .flatten()
            .filter(|a| a.subject == subject)
            .count()
    }

    /// Number of lessons of a subject across the week.
    pub fn subject_count(&self, subject: &str) -> usize {
        Weekday::ALL
            .iter()
            .map(|&day| self.count_on(day, subject))
            .sum()
    }

    /// Number of filled cells.
    pub fn lesson_count(&self) -> usize {
        self.days.iter().flatten().flatten().count()
    }

    /// Empty cells as (day, slot) pairs.
    pub fn empty_cells(&self) -> Vec<(Weekday, usize)> {
        Weekday::ALL
            .iter()
            .flat_map(|&day| {
                self.slots(day)
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_none())
                    .map(move |(slot, _)| (day, slot))
            })
            .collect()
    }

    /// Whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.days.iter().flatten().all(Option::is_some)
    }

    /// The daily load this grid was shaped by.
    pub fn daily_load(&self) -> DailyLoad {
        let mut counts = [0; WEEKDAY_COUNT];
        for (count, slots) in counts.iter_mut().zip(&self.days) {
            *count = slots.len();
        }
        DailyLoad::new(counts)
    }

    /// Iterates over filled cells as (day, slot, assignment).
    pub fn lessons(&self) -> impl Iterator<Item = (Weekday, usize, &Assignment)> {
        Weekday::ALL.into_iter().flat_map(move |day| {
            self.slots(day)
                .iter()
                .enumerate()
                .filter_map(move |(slot, cell)| cell.as_ref().map(|a| (day, slot, a)))
        })
    }
}

/// One class group's entry in a finished pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    /// The class group.
    pub class_group: ClassGroup,
    /// Its weekly grid.
    pub timetable: ClassTimetable,
    /// `false` when a best-effort pass accepted a partial grid.
    pub complete: bool,
}

/// Result of one orchestration pass, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Class groups in processing order.
    pub entries: Vec<ClassSchedule>,
    /// Weekdays in display order.
    pub weekdays: Vec<Weekday>,
    /// Lesson-time label per slot index.
    pub lesson_times: Vec<String>,
}

impl Timetable {
    /// Creates an empty result with the given lesson-time labels.
    pub fn new(lesson_times: Vec<String>) -> Self {
        Self {
            entries: Vec::new(),
            weekdays: Weekday::ALL.to_vec(),
            lesson_times,
        }
    }

    /// Appends a class group's grid.
    pub fn push(&mut self, class_group: ClassGroup, timetable: ClassTimetable, complete: bool) {
        self.entries.push(ClassSchedule {
            class_group,
            timetable,
            complete,
        });
    }

    /// Grid of a class group by name.
    pub fn get(&self, name: &str) -> Option<&ClassTimetable> {
        self.entries
            .iter()
            .find(|e| e.class_group.name == name)
            .map(|e| &e.timetable)
    }

    /// Whether every class group received a complete grid.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.complete)
    }

    /// Names of class groups accepted with partial grids.
    pub fn incomplete_groups(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.complete)
            .map(|e| e.class_group.name.as_str())
            .collect()
    }

    /// Time label of a slot index, if configured.
    pub fn lesson_label(&self, slot: usize) -> Option<&str> {
        self.lesson_times.get(slot).map(String::as_str)
    }

    /// Number of class groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the result holds no class groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> ClassTimetable {
        let mut t = ClassTimetable::empty(&DailyLoad::new([2, 1, 1, 0, 0]));
        t.place(Weekday::Mon, 0, Assignment::new("math", "T1"));
        t.place(Weekday::Mon, 1, Assignment::new("art", "T2"));
        t.place(Weekday::Tue, 0, Assignment::new("math", "T1"));
        t
    }

    #[test]
    fn test_daily_load() {
        let mut load = DailyLoad::uniform(2);
        load.increment(Weekday::Thu);
        assert_eq!(load.total(), 11);
        assert_eq!(load.get(Weekday::Thu), 3);
        assert_eq!(load.max_day(), 3);
    }

    #[test]
    fn test_grid_shape() {
        let t = sample_grid();
        assert_eq!(t.slots(Weekday::Mon).len(), 2);
        assert!(t.slots(Weekday::Fri).is_empty());
        assert_eq!(t.daily_load(), DailyLoad::new([2, 1, 1, 0, 0]));
    }

    #[test]
    fn test_grid_counts() {
        let t = sample_grid();
        assert_eq!(t.count_on(Weekday::Mon, "math"), 1);
        assert_eq!(t.subject_count("math"), 2);
        assert_eq!(t.lesson_count(), 3);
        assert_eq!(t.lessons().count(), 3);
    }

    #[test]
    fn test_grid_completeness() {
        let mut t = sample_grid();
        assert!(!t.is_complete());
        assert_eq!(t.empty_cells(), vec![(Weekday::Wed, 0)]);
        assert!(t.is_open(Weekday::Wed, 0));
        assert!(!t.is_open(Weekday::Mon, 0));
        assert!(!t.is_open(Weekday::Fri, 0));

        assert!(t.place(Weekday::Wed, 0, Assignment::new("pe", "T3")));
        assert!(t.is_complete());
        assert!(!t.place(Weekday::Fri, 0, Assignment::new("pe", "T3")));
    }

    #[test]
    fn test_timetable_lookup() {
        let mut tt = Timetable::new(vec!["08:30".into(), "09:25".into()]);
        tt.push(ClassGroup::new("5A", 5), sample_grid(), false);
        assert_eq!(tt.len(), 1);
        assert!(tt.get("5A").is_some());
        assert!(tt.get("5B").is_none());
        assert!(!tt.is_complete());
        assert_eq!(tt.incomplete_groups(), vec!["5A"]);
        assert_eq!(tt.lesson_label(1), Some("09:25"));
        assert_eq!(tt.lesson_label(2), None);
        assert_eq!(tt.weekdays.len(), WEEKDAY_COUNT);
    }

    #[test]
    fn test_timetable_serialization() {
        let mut tt = Timetable::new(Vec::new());
        tt.push(ClassGroup::new("5A", 5), sample_grid(), true);
        let json = serde_json::to_string(&tt).unwrap();
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tt);
    }
}
