//! [`SqliteStore`], the SQLite implementation of [`PlannerStore`].

use std::{path::Path, time::Duration};

use planner_core::{
  assignment::{AssignmentId, AssignmentView, NewAssignment},
  attendance::{AttendanceAction, AttendanceSummary},
  dashboard::{Dashboard, UPCOMING_ASSIGNMENTS_LIMIT},
  store::PlannerStore,
  subject::{NewSubject, Subject, SubjectId, SubjectView},
};
use rusqlite::{OptionalExtension as _, Transaction, TransactionBehavior};
use tracing::{debug, info, warn};

use crate::{
  error::is_unique_violation,
  row::{self, ASSIGNMENT_VIEW_COLUMNS, SUBJECT_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

/// How long a writer waits for the database lock before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings applied when the store is opened.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub busy_timeout: Duration,
}

impl Default for StoreConfig {
  fn default() -> Self { Self { busy_timeout: DEFAULT_BUSY_TIMEOUT } }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A planner store backed by a single SQLite file in WAL mode.
///
/// Cloning is cheap: the inner connection is reference-counted, and every
/// call is serialised through its worker thread.
///
/// WAL reader concurrency applies across processes only. Within one store,
/// reads queue behind a write that is itself waiting (up to the busy timeout)
/// on a lock held by another connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with the default busy timeout.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, StoreConfig::default()).await
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open_with(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init(config).await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init(StoreConfig::default()).await?;
    Ok(store)
  }

  async fn init(&self, config: StoreConfig) -> Result<()> {
    let busy_timeout = config.busy_timeout;
    let journal_mode: String = self
      .conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        // The bundled SQLite enables foreign keys by default. The declared
        // reference must not be enforced: orphaned assignments are allowed.
        conn.pragma_update(None, "foreign_keys", false)?;
        // Answers with the mode actually in effect ("memory" for in-memory
        // databases).
        let mode = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        conn.execute_batch(SCHEMA)?;
        Ok(mode)
      })
      .await?;
    debug!(%journal_mode, ?busy_timeout, "schema initialised");
    Ok(())
  }

  /// Run `f` inside one transaction on the worker thread.
  ///
  /// The transaction is committed only when `f` succeeds; on any error it is
  /// dropped, which rolls it back.
  async fn transact<T, F>(&self, behavior: TransactionBehavior, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(behavior)?;
        let out = match f(&tx) {
          Ok(out) => out,
          Err(e) => return Ok(Err(e)),
        };
        tx.commit()?;
        Ok(Ok(out))
      })
      .await?
  }

  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self.transact(TransactionBehavior::Deferred, f).await
  }

  /// Writers take the lock up front so a read-then-write transaction waits on
  /// the busy timeout instead of failing on lock upgrade.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self.transact(TransactionBehavior::Immediate, f).await
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

fn select_subjects(tx: &Transaction<'_>) -> Result<Vec<Subject>> {
  let mut stmt = tx.prepare(&format!("SELECT {SUBJECT_COLUMNS} FROM subjects ORDER BY id"))?;
  let rows = stmt
    .query_map([], row::subject)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn select_subject_views(tx: &Transaction<'_>) -> Result<Vec<SubjectView>> {
  Ok(select_subjects(tx)?.into_iter().map(SubjectView::from).collect())
}

// Inner join: assignments whose subject no longer exists are left out.
fn select_assignment_views(tx: &Transaction<'_>) -> Result<Vec<AssignmentView>> {
  let mut stmt = tx.prepare(&format!(
    "SELECT {ASSIGNMENT_VIEW_COLUMNS}
     FROM assignments a
     JOIN subjects s ON a.subject_id = s.id
     ORDER BY a.deadline, a.id"
  ))?;
  let rows = stmt
    .query_map([], row::assignment_view)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

// ─── PlannerStore impl ───────────────────────────────────────────────────────

impl PlannerStore for SqliteStore {
  type Error = Error;

  async fn dashboard(&self) -> Result<Dashboard> {
    let (subjects, upcoming) = self
      .read(|tx| {
        let subjects = select_subjects(tx)?;
        let mut stmt = tx.prepare(
          "SELECT a.title, s.code, a.deadline
           FROM assignments a
           JOIN subjects s ON a.subject_id = s.id
           WHERE a.completed = 0
           ORDER BY a.deadline, a.id
           LIMIT ?1",
        )?;
        let upcoming = stmt
          .query_map([UPCOMING_ASSIGNMENTS_LIMIT as i64], row::upcoming_assignment)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((subjects, upcoming))
      })
      .await?;

    debug!(subjects = subjects.len(), upcoming = upcoming.len(), "dashboard computed");
    Ok(Dashboard::build(&subjects, upcoming))
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn list_subjects(&self) -> Result<Vec<SubjectView>> {
    self.read(select_subject_views).await
  }

  async fn create_subject(&self, input: NewSubject) -> Result<Vec<SubjectView>> {
    let code = input.code.clone();

    let result = self
      .write(move |tx| {
        let inserted = tx.execute(
          "INSERT INTO subjects (code, name, professor, attendance, total_classes)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            input.code,
            input.name,
            input.professor,
            input.attendance,
            input.total_classes,
          ],
        );
        match inserted {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(planner_core::Error::DuplicateSubjectCode(input.code).into());
          }
          Err(e) => return Err(e.into()),
        }
        select_subject_views(tx)
      })
      .await;

    match &result {
      Ok(_) => info!(%code, "subject created"),
      Err(Error::Core(e)) => warn!(%code, "subject not created: {e}"),
      Err(_) => {}
    }
    result
  }

  async fn update_subject(
    &self,
    id: SubjectId,
    attendance: u32,
    total_classes: u32,
  ) -> Result<()> {
    let changed = self
      .write(move |tx| {
        Ok(tx.execute(
          "UPDATE subjects SET attendance = ?1, total_classes = ?2 WHERE id = ?3",
          rusqlite::params![attendance, total_classes, id],
        )?)
      })
      .await?;
    info!(id, attendance, total_classes, changed, "subject updated");
    Ok(())
  }

  async fn delete_subject(&self, id: SubjectId) -> Result<()> {
    let changed = self
      .write(move |tx| {
        Ok(tx.execute("DELETE FROM subjects WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    info!(id, changed, "subject deleted");
    Ok(())
  }

  async fn record_attendance(
    &self,
    id: SubjectId,
    action: AttendanceAction,
  ) -> Result<AttendanceSummary> {
    let label = action.to_string();

    let summary = self
      .write(move |tx| {
        let counters: Option<(Option<u32>, Option<u32>)> = tx
          .query_row(
            "SELECT attendance, total_classes FROM subjects WHERE id = ?1",
            rusqlite::params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;

        let Some((attendance, total_classes)) = counters else {
          return Err(planner_core::Error::SubjectNotFound(id).into());
        };
        let total_classes = total_classes.unwrap_or_default();
        let attendance = action.apply(attendance.unwrap_or_default(), total_classes);

        tx.execute(
          "UPDATE subjects SET attendance = ?1 WHERE id = ?2",
          rusqlite::params![attendance, id],
        )?;
        Ok(AttendanceSummary::new(attendance, total_classes))
      })
      .await?;

    info!(id, action = %label, attendance = summary.attendance, "attendance recorded");
    Ok(summary)
  }

  // ── Assignments ───────────────────────────────────────────────────────────

  async fn list_assignments(&self) -> Result<Vec<AssignmentView>> {
    self.read(select_assignment_views).await
  }

  async fn create_assignment(&self, input: NewAssignment) -> Result<Vec<AssignmentView>> {
    let subject_id = input.subject_id;

    let listing = self
      .write(move |tx| {
        tx.execute(
          "INSERT INTO assignments (subject_id, title, deadline) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.subject_id, input.title, input.deadline],
        )?;
        select_assignment_views(tx)
      })
      .await?;

    info!(subject_id, "assignment created");
    Ok(listing)
  }

  async fn set_assignment_completed(&self, id: AssignmentId, completed: bool) -> Result<()> {
    let changed = self
      .write(move |tx| {
        Ok(tx.execute(
          "UPDATE assignments SET completed = ?1 WHERE id = ?2",
          rusqlite::params![completed, id],
        )?)
      })
      .await?;
    info!(id, completed, changed, "assignment updated");
    Ok(())
  }

  async fn delete_assignment(&self, id: AssignmentId) -> Result<()> {
    let changed = self
      .write(move |tx| {
        Ok(tx.execute("DELETE FROM assignments WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    info!(id, changed, "assignment deleted");
    Ok(())
  }
}
