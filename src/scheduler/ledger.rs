//! Teacher occupancy tracking.
//!
//! `TeacherLedger` records committed reservations for one orchestration
//! pass. `TeacherStage` collects the tentative reservations of a single
//! placement attempt; it is either dropped or committed into the ledger
//! as a whole, so a failed attempt never leaves partial state behind.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Weekday, WEEKDAY_COUNT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Occupancy {
    // teacher → weekday → occupied slot indices
    cells: HashMap<String, [BTreeSet<usize>; WEEKDAY_COUNT]>,
}

impl Occupancy {
    fn is_free(&self, teacher: &str, day: Weekday, slot: usize) -> bool {
        self.cells
            .get(teacher)
            .map_or(true, |days| !days[day.index()].contains(&slot))
    }

    fn reserve(&mut self, teacher: &str, day: Weekday, slot: usize) -> bool {
        if let Some(days) = self.cells.get_mut(teacher) {
            return days[day.index()].insert(slot);
        }
        let mut days: [BTreeSet<usize>; WEEKDAY_COUNT] = Default::default();
        days[day.index()].insert(slot);
        self.cells.insert(teacher.to_string(), days);
        true
    }

    fn slots(&self, teacher: &str, day: Weekday) -> Vec<usize> {
        self.cells
            .get(teacher)
            .map(|days| days[day.index()].iter().copied().collect())
            .unwrap_or_default()
    }

    fn reservation_count(&self) -> usize {
        self.cells.values().flatten().map(BTreeSet::len).sum()
    }
}

/// Committed teacher reservations shared by every class group in a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherLedger {
    occupancy: Occupancy,
}

impl TeacherLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the teacher has no committed lesson at (day, slot).
    pub fn is_free(&self, teacher: &str, day: Weekday, slot: usize) -> bool {
        self.occupancy.is_free(teacher, day, slot)
    }

    /// Reserves a single cell. Returns `false` if it was already taken.
    pub fn reserve(&mut self, teacher: &str, day: Weekday, slot: usize) -> bool {
        self.occupancy.reserve(teacher, day, slot)
    }

    /// Commits every reservation of a finished attempt.
    ///
    /// Returns the number of cells that were already taken. A stage built
    /// against this ledger always yields 0.
    pub fn commit(&mut self, stage: TeacherStage) -> usize {
        let mut conflicts = 0;
        for (teacher, days) in stage.occupancy.cells {
            for day in Weekday::ALL {
                for &slot in &days[day.index()] {
                    if !self.occupancy.reserve(&teacher, day, slot) {
                        conflicts += 1;
                    }
                }
            }
        }
        conflicts
    }

    /// Removes all reservations.
    pub fn clear(&mut self) {
        self.occupancy.cells.clear();
    }

    /// Committed slots of a teacher on a day, ascending.
    pub fn occupied_slots(&self, teacher: &str, day: Weekday) -> Vec<usize> {
        self.occupancy.slots(teacher, day)
    }

    /// Total committed cells.
    pub fn reservation_count(&self) -> usize {
        self.occupancy.reservation_count()
    }

    /// Whether nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.reservation_count() == 0
    }
}

/// Tentative reservations of one placement attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherStage {
    occupancy: Occupancy,
}

impl TeacherStage {
    /// Creates an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the teacher has no staged lesson at (day, slot).
    pub fn is_free(&self, teacher: &str, day: Weekday, slot: usize) -> bool {
        self.occupancy.is_free(teacher, day, slot)
    }

    /// Stages a reservation.
    pub fn reserve(&mut self, teacher: &str, day: Weekday, slot: usize) -> bool {
        self.occupancy.reserve(teacher, day, slot)
    }

    /// Number of staged cells.
    pub fn reservation_count(&self) -> usize {
        self.occupancy.reservation_count()
    }
}
