//! SQLite-based per-tenant task store.
//!
//! Task collections are partitioned per tenant (chat). Each task is one
//! row with its status mirrored into a column so the two buckets load
//! without decoding; the record itself is serialized JSON. History is an
//! append-only table ordered by insertion.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StoreError;
use crate::task::{DoneEntry, Task, TaskBoard, TaskStatus};

/// Boundary contract for per-tenant task persistence. The engine never
/// reaches into ambient state; callers load a board, run engine calls,
/// and save the board back.
pub trait TaskStore {
    /// Load a tenant's board. An unknown tenant yields an empty board.
    fn load(&self, tenant: &str) -> Result<TaskBoard, StoreError>;
    /// Persist a tenant's board, replacing what was stored before.
    fn save(&mut self, tenant: &str, board: &TaskBoard) -> Result<(), StoreError>;
}

fn format_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Active => "ACTIVE",
        TaskStatus::Overdue => "OVERDUE",
    }
}

/// SQLite database for task boards.
pub struct TaskDb {
    conn: Connection,
}

impl TaskDb {
    /// Open the database at `~/.config/dayplan/dayplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::DataDirUnavailable(e.to_string()))?;
        Self::open_at(&dir.join("dayplan.db"))
    }

    /// Open the database at an explicit path (tests, alternate homes).
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    tenant  TEXT NOT NULL,
                    id      TEXT NOT NULL,
                    status  TEXT NOT NULL,
                    record  TEXT NOT NULL,
                    PRIMARY KEY (tenant, id)
                );

                CREATE TABLE IF NOT EXISTS history (
                    seq     INTEGER PRIMARY KEY AUTOINCREMENT,
                    tenant  TEXT NOT NULL,
                    record  TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_tenant ON tasks(tenant);
                CREATE INDEX IF NOT EXISTS idx_history_tenant ON history(tenant);",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    /// List every tenant with at least one stored row.
    pub fn tenants(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT tenant FROM tasks
             UNION SELECT DISTINCT tenant FROM history
             ORDER BY tenant",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut tenants = Vec::new();
        for row in rows {
            tenants.push(row?);
        }
        Ok(tenants)
    }
}

impl TaskStore for TaskDb {
    fn load(&self, tenant: &str) -> Result<TaskBoard, StoreError> {
        let mut board = TaskBoard::new();

        let mut stmt = self
            .conn
            .prepare("SELECT status, record FROM tasks WHERE tenant = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![tenant], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (status, record) = row?;
            let task: Task =
                serde_json::from_str(&record).map_err(|e| StoreError::CorruptRecord {
                    tenant: tenant.to_string(),
                    message: e.to_string(),
                })?;
            match status.as_str() {
                "OVERDUE" => board.overdue.insert(task.id.clone(), task),
                _ => board.active.insert(task.id.clone(), task),
            };
        }

        let mut stmt = self
            .conn
            .prepare("SELECT record FROM history WHERE tenant = ?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![tenant], |row| row.get::<_, String>(0))?;
        for row in rows {
            let entry: DoneEntry =
                serde_json::from_str(&row?).map_err(|e| StoreError::CorruptRecord {
                    tenant: tenant.to_string(),
                    message: e.to_string(),
                })?;
            board.history.push(entry);
        }

        Ok(board)
    }

    fn save(&mut self, tenant: &str, board: &TaskBoard) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM tasks WHERE tenant = ?1", params![tenant])?;
        tx.execute("DELETE FROM history WHERE tenant = ?1", params![tenant])?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO tasks (tenant, id, status, record) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for task in board.active.values().chain(board.overdue.values()) {
                let record = serde_json::to_string(task).map_err(|e| {
                    StoreError::QueryFailed(format!("serialize task {}: {e}", task.id))
                })?;
                insert.execute(params![
                    tenant,
                    task.id,
                    format_status(task.status),
                    record
                ])?;
            }

            let mut insert =
                tx.prepare("INSERT INTO history (tenant, record) VALUES (?1, ?2)")?;
            for entry in &board.history {
                let record = serde_json::to_string(entry).map_err(|e| {
                    StoreError::QueryFailed(format!("serialize history entry: {e}"))
                })?;
                insert.execute(params![tenant, record])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Effort, TaskStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn open_memory() -> TaskDb {
        let conn = Connection::open_in_memory().unwrap();
        let db = TaskDb { conn };
        db.migrate().unwrap();
        db
    }

    fn sample_board() -> TaskBoard {
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();
        let mut board = TaskBoard::new();
        board.insert(
            Task::new("write report", 90, now + Duration::days(1))
                .with_auto(true)
                .with_effort(Effort::Heavy),
        );
        let mut late = Task::new("late essay", 120, now - Duration::hours(4));
        late.status = TaskStatus::Overdue;
        board.overdue.insert(late.id.clone(), late);
        board.insert(Task::new("gym", 60, now).recurring(vec![0, 3], "18:00", "19:00"));

        let mut finished = Task::new("old chore", 15, now - Duration::days(2));
        finished.done = true;
        board.history.push(DoneEntry {
            task: finished,
            completed_at: now - Duration::days(1),
        });
        board
    }

    #[test]
    fn round_trips_a_board_per_tenant() {
        let mut db = open_memory();
        let board = sample_board();
        db.save("chat-1", &board).unwrap();

        let loaded = db.load("chat-1").unwrap();
        assert_eq!(loaded.active.len(), board.active.len());
        assert_eq!(loaded.overdue.len(), 1);
        assert_eq!(loaded.history.len(), 1);
        let (id, original) = board.active.iter().next().unwrap();
        assert_eq!(loaded.active[id].title, original.title);

        // Tenants are partitioned.
        assert!(db.load("chat-2").unwrap().active.is_empty());
        assert_eq!(db.tenants().unwrap(), vec!["chat-1".to_string()]);
    }

    #[test]
    fn save_replaces_previous_state() {
        let mut db = open_memory();
        db.save("chat-1", &sample_board()).unwrap();

        let mut smaller = TaskBoard::new();
        let now = Utc::now();
        smaller.insert(Task::new("only one", 30, now + Duration::days(1)));
        db.save("chat-1", &smaller).unwrap();

        let loaded = db.load("chat-1").unwrap();
        assert_eq!(loaded.active.len(), 1);
        assert!(loaded.overdue.is_empty());
        assert!(loaded.history.is_empty());
    }

    #[test]
    fn unknown_tenant_yields_empty_board() {
        let db = open_memory();
        let board = db.load("nobody").unwrap();
        assert!(board.active.is_empty());
        assert!(board.overdue.is_empty());
        assert!(board.history.is_empty());
    }
}
