//! The dashboard read model, computed on every request, never stored.

use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// How many subjects are shown as today's classes.
pub const TODAY_CLASSES_LIMIT: usize = 3;

/// How many incomplete assignments are shown as upcoming.
pub const UPCOMING_ASSIGNMENTS_LIMIT: usize = 3;

/// A subject entry in [`Dashboard::today_classes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
  pub code:      String,
  pub name:      String,
  pub professor: String,
}

impl From<&Subject> for ClassEntry {
  fn from(s: &Subject) -> Self {
    Self {
      code:      s.code.clone(),
      name:      s.name.clone(),
      professor: s.professor.clone(),
    }
  }
}

/// An assignment entry in [`Dashboard::upcoming_assignments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingAssignment {
  pub title:        String,
  pub subject_code: String,
  pub deadline:     String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
  /// The first subjects in insertion order. There is no schedule, so this is
  /// not filtered by weekday.
  pub today_classes:        Vec<ClassEntry>,
  /// Subjects with classes held and attendance below 75 %.
  pub low_attendance:       usize,
  /// Earliest incomplete assignments, ascending by deadline.
  pub upcoming_assignments: Vec<UpcomingAssignment>,
  pub total_subjects:       usize,
}

impl Dashboard {
  /// Assemble the dashboard from every subject (in storage order) and the
  /// upcoming assignments already selected by the store.
  pub fn build(subjects: &[Subject], upcoming: Vec<UpcomingAssignment>) -> Self {
    Self {
      today_classes:        subjects
        .iter()
        .take(TODAY_CLASSES_LIMIT)
        .map(ClassEntry::from)
        .collect(),
      low_attendance:       subjects.iter().filter(|s| s.is_low_attendance()).count(),
      upcoming_assignments: upcoming
        .into_iter()
        .take(UPCOMING_ASSIGNMENTS_LIMIT)
        .collect(),
      total_subjects:       subjects.len(),
    }
  }
}
