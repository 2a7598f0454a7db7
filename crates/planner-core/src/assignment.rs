//! Assignments: deadline-bound tasks attached to subjects.

use serde::{Deserialize, Serialize};

use crate::subject::SubjectId;

/// Store-assigned assignment identifier.
pub type AssignmentId = i64;

/// A persisted assignment row.
///
/// `deadline` is ISO-style text; lexicographic order is chronological order
/// for well-formed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  pub id:         AssignmentId,
  /// Not checked against existing subjects on write.
  pub subject_id: SubjectId,
  pub title:      String,
  pub deadline:   String,
  pub completed:  bool,
}

/// Input for creating an assignment. New assignments start incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
  pub subject_id: SubjectId,
  pub title:      String,
  pub deadline:   String,
}

impl NewAssignment {
  pub fn new(
    subject_id: SubjectId,
    title: impl Into<String>,
    deadline: impl Into<String>,
  ) -> Self {
    Self { subject_id, title: title.into(), deadline: deadline.into() }
  }
}

/// An assignment joined with the code and name of its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
  #[serde(flatten)]
  pub assignment:   Assignment,
  pub subject_code: String,
  pub subject_name: String,
}
