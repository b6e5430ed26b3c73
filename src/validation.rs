//! Input validation for timetable generation.
//!
//! Checks the curriculum and roster against the class groups before any
//! placement is attempted. Detects:
//! - Class groups whose level has no curriculum entry
//! - Subjects missing from the roster
//! - Subjects with no eligible teacher
//! - Subjects with a zero weekly quota
//! - Teachers listed twice under one subject
//! - Duplicate class-group names
//!
//! All issues are collected, not just the first.

use crate::models::{ClassGroup, Curriculum, Roster};
use std::collections::{BTreeSet, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two class groups share the same name.
    DuplicateClassGroup,
    /// A class group's level has no curriculum entry.
    MissingCurriculum,
    /// The curriculum references a subject absent from the roster.
    MissingSubject,
    /// A subject has an empty teacher list.
    NoTeachers,
    /// A subject is listed with zero weekly hours.
    ZeroHours,
    /// A teacher appears twice in one subject's list.
    DuplicateTeacher,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates class groups, curriculum, and roster together.
///
/// Only levels and subjects actually used by `class_groups` are checked
/// against the roster; unused curriculum levels are ignored.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_inputs(
    class_groups: &[ClassGroup],
    curriculum: &Curriculum,
    roster: &Roster,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    let mut levels = BTreeSet::new();
    for group in class_groups {
        if !names.insert(group.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateClassGroup,
                format!("Duplicate class group: {}", group.name),
            ));
        }
        if curriculum.has_level(group.level) {
            levels.insert(group.level);
        } else {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCurriculum,
                format!(
                    "Class group '{}' has no curriculum for level {}",
                    group.name, group.level
                ),
            ));
        }
    }

    // Each subject is reported once even if several levels use it
    let mut seen_subjects = HashSet::new();
    for level in levels {
        let Some(subjects) = curriculum.subjects(level) else {
            continue;
        };
        for (subject, &hours) in subjects {
            if hours == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ZeroHours,
                    format!("Subject '{subject}' has zero weekly hours at level {level}"),
                ));
            }
            if !seen_subjects.insert(subject.as_str()) {
                continue;
            }
            match roster.teachers(subject) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingSubject,
                    format!("Subject '{subject}' is not in the roster"),
                )),
                Some([]) => errors.push(ValidationError::new(
                    ValidationErrorKind::NoTeachers,
                    format!("Subject '{subject}' has no eligible teachers"),
                )),
                Some(teachers) => {
                    let mut unique = HashSet::new();
                    for teacher in teachers {
                        if !unique.insert(teacher.as_str()) {
                            errors.push(ValidationError::new(
                                ValidationErrorKind::DuplicateTeacher,
                                format!("Teacher '{teacher}' listed twice for '{subject}'"),
                            ));
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_curriculum() -> Curriculum {
        Curriculum::new()
            .with_subject(6, "math", 5)
            .with_subject(6, "art", 2)
            .with_subject(6, "pe", 3)
    }

    fn sample_roster() -> Roster {
        Roster::new()
            .with_teachers("math", &["M1"])
            .with_teachers("art", &["A1"])
            .with_teachers("pe", &["P1", "P2"])
    }

    fn groups() -> Vec<ClassGroup> {
        vec![ClassGroup::new("6A", 6), ClassGroup::new("6B", 6)]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_inputs(&groups(), &sample_curriculum(), &sample_roster()).is_ok());
    }

    #[test]
    fn test_missing_subject() {
        let roster = Roster::new()
            .with_teachers("math", &["M1"])
            .with_teachers("pe", &["P1"]);

        let errors = validate_inputs(&groups(), &sample_curriculum(), &roster).unwrap_err();
        // Reported once although two groups use level 6
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingSubject);
        assert!(errors[0].message.contains("art"));
    }

    #[test]
    fn test_subject_without_teachers() {
        let none: [&str; 0] = [];
        let roster = sample_roster().with_teachers("art", &none);

        let errors = validate_inputs(&groups(), &sample_curriculum(), &roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoTeachers));
    }

    #[test]
    fn test_missing_curriculum_level() {
        let groups = vec![ClassGroup::new("7A", 7)];

        let errors = validate_inputs(&groups, &sample_curriculum(), &sample_roster()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingCurriculum);
    }

    #[test]
    fn test_duplicate_class_group() {
        let groups = vec![ClassGroup::new("6A", 6), ClassGroup::new("6A", 6)];

        let errors = validate_inputs(&groups, &sample_curriculum(), &sample_roster()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateClassGroup));
    }

    #[test]
    fn test_zero_hours_and_duplicate_teacher() {
        let curriculum = sample_curriculum().with_subject(6, "music", 0);
        let roster = sample_roster()
            .with_teachers("music", &["X1"])
            .with_teachers("pe", &["P1", "P1"]);

        let errors = validate_inputs(&groups(), &curriculum, &roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroHours));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateTeacher));
    }

    #[test]
    fn test_unused_level_ignored() {
        // Level 9 references a subject with no roster entry, but no group uses it
        let curriculum = sample_curriculum().with_subject(9, "physics", 2);
        assert!(validate_inputs(&groups(), &curriculum, &sample_roster()).is_ok());
    }
}
