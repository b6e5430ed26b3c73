//! School week model.
//!
//! The week is a fixed, ordered set of five teaching days. The order is
//! significant: placement scans days front to back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of teaching days in a week.
pub const WEEKDAY_COUNT: usize = 5;

/// A teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
}

impl Weekday {
    /// All teaching days in scan order.
    pub const ALL: [Weekday; WEEKDAY_COUNT] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Position of the day within the week (Mon = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at the given position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_order() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Weekday::from_index(i), Some(*day));
        }
        assert!(Weekday::Mon < Weekday::Fri);
        assert_eq!(Weekday::from_index(WEEKDAY_COUNT), None);
    }

    #[test]
    fn test_weekday_display() {
        assert_eq!(Weekday::Wed.to_string(), "Wed");
        let json = serde_json::to_string(&Weekday::Thu).unwrap();
        assert_eq!(json, "\"Thu\"");
    }
}
