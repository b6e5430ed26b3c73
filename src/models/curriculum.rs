//! Curriculum, roster, and class-group models.
//!
//! These are the fixed inputs of timetable generation. The engine reads
//! them but never mutates them.
//!
//! Maps are ordered (`BTreeMap`) so that the unshuffled subject pool, and
//! therefore every seeded run, is reproducible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TimetableResult;

/// A cohort that needs its own weekly timetable (e.g. "7A").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Display name, unique within one run.
    pub name: String,
    /// Grade level used for curriculum lookup and repetition rules.
    pub level: u32,
}

impl ClassGroup {
    /// Creates a class group.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Parses a name such as `"10B"`, taking the leading digits as the level.
    ///
    /// Returns `None` if the name does not start with a digit.
    pub fn parse(name: &str) -> Option<Self> {
        let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
        let level = digits.parse().ok()?;
        Some(Self::new(name, level))
    }

    /// Builds groups for every level × section, level-major.
    ///
    /// ```
    /// use u_timetable::models::ClassGroup;
    ///
    /// let groups = ClassGroup::sections(5..=6, &["A", "B"]);
    /// let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    /// assert_eq!(names, ["5A", "5B", "6A", "6B"]);
    /// ```
    pub fn sections<I>(levels: I, sections: &[&str]) -> Vec<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        levels
            .into_iter()
            .flat_map(|level| {
                sections
                    .iter()
                    .map(move |section| Self::new(format!("{level}{section}"), level))
            })
            .collect()
    }
}

/// Weekly lesson quotas: level → subject → hours per week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curriculum {
    levels: BTreeMap<u32, BTreeMap<String, u32>>,
}

impl Curriculum {
    /// Creates an empty curriculum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly hours of one subject at one level.
    pub fn with_subject(mut self, level: u32, subject: impl Into<String>, hours: u32) -> Self {
        self.levels
            .entry(level)
            .or_default()
            .insert(subject.into(), hours);
        self
    }

    /// Parses a curriculum from JSON such as `{"5": {"math": 4}}`.
    pub fn from_json_str(json: &str) -> TimetableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Subject quotas for a level, if the level is known.
    pub fn subjects(&self, level: u32) -> Option<&BTreeMap<String, u32>> {
        self.levels.get(&level)
    }

    /// Whether the level has a curriculum entry.
    pub fn has_level(&self, level: u32) -> bool {
        self.levels.contains_key(&level)
    }

    /// All levels with an entry, ascending.
    pub fn levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    /// Weekly hours of a subject at a level (0 if absent).
    pub fn hours(&self, level: u32, subject: &str) -> u32 {
        self.subjects(level)
            .and_then(|s| s.get(subject))
            .copied()
            .unwrap_or(0)
    }

    /// Total weekly lessons at a level.
    pub fn weekly_hours(&self, level: u32) -> u32 {
        self.subjects(level)
            .map(|s| s.values().sum())
            .unwrap_or(0)
    }

    /// Flat pool with each subject repeated by its weekly hours, unshuffled.
    pub fn subject_pool(&self, level: u32) -> Vec<String> {
        let mut pool = Vec::with_capacity(self.weekly_hours(level) as usize);
        if let Some(subjects) = self.subjects(level) {
            for (subject, &hours) in subjects {
                pool.extend((0..hours).map(|_| subject.clone()));
            }
        }
        pool
    }
}

/// Eligible teachers per subject, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    subjects: BTreeMap<String, Vec<String>>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the eligible teachers of a subject.
    pub fn with_teachers<S>(mut self, subject: impl Into<String>, teachers: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        self.subjects.insert(
            subject.into(),
            teachers.iter().map(|t| t.as_ref().to_string()).collect(),
        );
        self
    }

    /// Parses a roster from JSON such as `{"math": ["Ivanova", "Petrenko"]}`.
    pub fn from_json_str(json: &str) -> TimetableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Eligible teachers of a subject, if the subject is known.
    pub fn teachers(&self, subject: &str) -> Option<&[String]> {
        self.subjects.get(subject).map(Vec::as_slice)
    }

    /// Iterates over (subject, teachers) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.subjects
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_group_parse() {
        let g = ClassGroup::parse("10B").unwrap();
        assert_eq!(g.level, 10);
        assert_eq!(g.name, "10B");
        assert_eq!(ClassGroup::parse("7А").unwrap().level, 7);
        assert!(ClassGroup::parse("B10").is_none());
    }

    #[test]
    fn test_curriculum_pool() {
        let c = Curriculum::new()
            .with_subject(6, "math", 5)
            .with_subject(6, "art", 2)
            .with_subject(6, "pe", 3);

        assert_eq!(c.weekly_hours(6), 10);
        assert_eq!(c.hours(6, "art"), 2);
        assert_eq!(c.hours(7, "art"), 0);

        let pool = c.subject_pool(6);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.iter().filter(|s| *s == "math").count(), 5);
        assert!(c.subject_pool(7).is_empty());
    }

    #[test]
    fn test_curriculum_from_json() {
        let c = Curriculum::from_json_str(r#"{"5": {"math": 4, "art": 1}, "9": {"pe": 2}}"#)
            .unwrap();
        assert_eq!(c.levels().collect::<Vec<_>>(), vec![5, 9]);
        assert_eq!(c.weekly_hours(5), 5);
        assert!(c.has_level(9));
    }

    #[test]
    fn test_roster_from_json() {
        let r = Roster::from_json_str(r#"{"math": ["T1", "T2"]}"#).unwrap();
        assert_eq!(r.teachers("math").unwrap(), ["T1", "T2"]);
        assert!(r.teachers("art").is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(Curriculum::from_json_str(r#"{"five": {"math": 4}}"#).is_err());
        assert!(Roster::from_json_str("[1, 2]").is_err());
    }
}
