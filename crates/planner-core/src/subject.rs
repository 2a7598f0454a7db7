//! Subjects: courses with attendance counters.

use serde::{Deserialize, Serialize};

use crate::attendance::{attendance_pct, is_low_attendance};

/// Store-assigned subject identifier.
pub type SubjectId = i64;

/// A persisted subject row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:            SubjectId,
  /// Unique across all subjects.
  pub code:          String,
  pub name:          String,
  pub professor:     String,
  /// Classes attended.
  pub attendance:    u32,
  /// Classes held.
  pub total_classes: u32,
}

impl Subject {
  /// Attendance percentage rounded to one decimal; `0.0` with no classes held.
  pub fn attendance_pct(&self) -> f64 {
    attendance_pct(self.attendance, self.total_classes)
  }

  pub fn is_low_attendance(&self) -> bool {
    is_low_attendance(self.attendance, self.total_classes)
  }
}

/// Input for creating a subject. The id is assigned by the store.
///
/// `attendance <= total_classes` is not checked here; only the attendance
/// action path clamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubject {
  pub code:          String,
  pub name:          String,
  pub professor:     String,
  #[serde(default)]
  pub attendance:    u32,
  #[serde(default)]
  pub total_classes: u32,
}

impl NewSubject {
  /// A subject with no classes held yet.
  pub fn new(
    code: impl Into<String>,
    name: impl Into<String>,
    professor: impl Into<String>,
  ) -> Self {
    Self {
      code:          code.into(),
      name:          name.into(),
      professor:     professor.into(),
      attendance:    0,
      total_classes: 0,
    }
  }

  pub fn with_attendance(mut self, attendance: u32, total_classes: u32) -> Self {
    self.attendance = attendance;
    self.total_classes = total_classes;
    self
  }
}

/// A subject as returned by listings, with its derived percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectView {
  #[serde(flatten)]
  pub subject:        Subject,
  pub attendance_pct: f64,
}

impl From<Subject> for SubjectView {
  fn from(subject: Subject) -> Self {
    let attendance_pct = subject.attendance_pct();
    Self { subject, attendance_pct }
  }
}
