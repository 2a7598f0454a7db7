//! Mapping between SQLite rows and `planner-core` types.
//!
//! Every `SELECT` in the store lists its columns explicitly in the order the
//! mappers below read them.

use planner_core::{
  assignment::{Assignment, AssignmentView},
  dashboard::UpcomingAssignment,
  subject::Subject,
};
use rusqlite::Row;

pub const SUBJECT_COLUMNS: &str = "id, code, name, professor, attendance, total_classes";

pub fn subject(row: &Row<'_>) -> rusqlite::Result<Subject> {
  Ok(Subject {
    id:            row.get(0)?,
    code:          row.get(1)?,
    name:          row.get(2)?,
    professor:     row.get(3)?,
    attendance:    row.get::<_, Option<u32>>(4)?.unwrap_or_default(),
    total_classes: row.get::<_, Option<u32>>(5)?.unwrap_or_default(),
  })
}

pub const ASSIGNMENT_VIEW_COLUMNS: &str =
  "a.id, a.subject_id, a.title, a.deadline, a.completed, s.code, s.name";

pub fn assignment_view(row: &Row<'_>) -> rusqlite::Result<AssignmentView> {
  Ok(AssignmentView {
    assignment:   Assignment {
      id:         row.get(0)?,
      subject_id: row.get(1)?,
      title:      row.get(2)?,
      deadline:   row.get(3)?,
      completed:  row.get::<_, Option<bool>>(4)?.unwrap_or_default(),
    },
    subject_code: row.get(5)?,
    subject_name: row.get(6)?,
  })
}

pub fn upcoming_assignment(row: &Row<'_>) -> rusqlite::Result<UpcomingAssignment> {
  Ok(UpcomingAssignment {
    title:        row.get(0)?,
    subject_code: row.get(1)?,
    deadline:     row.get(2)?,
  })
}
