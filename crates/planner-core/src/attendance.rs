//! Attendance arithmetic: percentages, the low-attendance predicate, and the
//! clamped increment/decrement actions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Subjects strictly below this percentage count as low attendance.
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

fn raw_pct(attendance: u32, total_classes: u32) -> f64 {
  f64::from(attendance) / f64::from(total_classes) * 100.0
}

/// `attendance / total_classes * 100`, rounded to one decimal place.
///
/// Returns `0.0` when no classes have been held. Ties round to even, so
/// `1/16` gives `6.2`.
pub fn attendance_pct(attendance: u32, total_classes: u32) -> f64 {
  if total_classes == 0 {
    return 0.0;
  }
  (raw_pct(attendance, total_classes) * 10.0).round_ties_even() / 10.0
}

/// Whether a subject is below [`LOW_ATTENDANCE_THRESHOLD`].
///
/// Subjects with no classes held are never low. The comparison uses the
/// unrounded percentage.
pub fn is_low_attendance(attendance: u32, total_classes: u32) -> bool {
  total_classes > 0 && raw_pct(attendance, total_classes) < LOW_ATTENDANCE_THRESHOLD
}

// ─── Actions ─────────────────────────────────────────────────────────────────

/// A single attendance adjustment.
///
/// Parsed from the `action` string of a request. Unknown strings are kept as
/// [`AttendanceAction::Unrecognized`] and leave the counter unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceAction {
  Increment,
  Decrement,
  Unrecognized(String),
}

impl AttendanceAction {
  /// New attendance value after applying this action.
  ///
  /// Increment clamps at `total_classes`, decrement clamps at zero. A stored
  /// attendance already above the total is pulled down to it by an
  /// increment.
  pub fn apply(&self, attendance: u32, total_classes: u32) -> u32 {
    match self {
      Self::Increment => attendance.saturating_add(1).min(total_classes),
      Self::Decrement => attendance.saturating_sub(1),
      Self::Unrecognized(_) => attendance,
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Increment => "increment",
      Self::Decrement => "decrement",
      Self::Unrecognized(s) => s,
    }
  }
}

impl From<&str> for AttendanceAction {
  fn from(s: &str) -> Self { s.to_owned().into() }
}

impl From<String> for AttendanceAction {
  fn from(s: String) -> Self {
    match s.as_str() {
      "increment" => Self::Increment,
      "decrement" => Self::Decrement,
      _ => Self::Unrecognized(s),
    }
  }
}

impl From<AttendanceAction> for String {
  fn from(action: AttendanceAction) -> Self {
    match action {
      AttendanceAction::Unrecognized(s) => s,
      other => other.as_str().to_owned(),
    }
  }
}

impl fmt::Display for AttendanceAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Counters of a subject after an attendance action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
  pub attendance:     u32,
  pub total_classes:  u32,
  pub attendance_pct: f64,
}

impl AttendanceSummary {
  pub fn new(attendance: u32, total_classes: u32) -> Self {
    Self {
      attendance,
      total_classes,
      attendance_pct: attendance_pct(attendance, total_classes),
    }
  }
}
