use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Exercise, GamificationState, Plan, PlanDay, Session};

// ─── Sessions ────────────────────────────────────────────────────────────────

pub struct SessionRepo;

impl SessionRepo {
    pub fn insert(conn: &Connection, session: &Session) -> Result<i64> {
        let exercises = serde_json::to_string(&session.exercises)?;
        conn.execute(
            "INSERT INTO sessions (date, completed_at, duration_min, plan_id, day_index, day_label, exercises)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session.date,
                session.completed_at,
                session.duration_min,
                session.plan_id,
                session.day_index.map(|i| i as i64),
                session.day_label,
                exercises,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent sessions by date, newest first.
    pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<Session>> {
        let mut stmt = conn.prepare(
            "SELECT id, date, completed_at, duration_min, plan_id, day_index, day_label, exercises
             FROM sessions ORDER BY date DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<i64>>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, date, completed_at, duration_min, plan_id, day_index, day_label, exercises) =
                r?;
            let exercises: Vec<Exercise> = serde_json::from_str(&exercises)?;
            result.push(Session {
                id: Some(id),
                date,
                completed_at,
                duration_min: duration_min as u32,
                plan_id,
                day_index: day_index.map(|i| i as usize),
                day_label,
                exercises,
            });
        }
        Ok(result)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .map_err(anyhow::Error::from)
    }

    /// Session dates within an inclusive date range (for weekly summaries).
    pub fn dates_in_range(conn: &Connection, start: &str, end: &str) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT date FROM sessions WHERE date >= ?1 AND date <= ?2 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![start, end], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── Plans ───────────────────────────────────────────────────────────────────

pub struct PlanRepo;

impl PlanRepo {
    pub fn insert(conn: &Connection, plan: &Plan) -> Result<()> {
        let days = serde_json::to_string(&plan.days)?;
        conn.execute(
            "INSERT INTO plans (id, name, days) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = ?2, days = ?3",
            params![plan.id, plan.name, days],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, id: &str) -> Result<Option<Plan>> {
        let row = conn
            .query_row(
                "SELECT id, name, days FROM plans WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, name, days)) => {
                let days: Vec<PlanDay> = serde_json::from_str(&days)?;
                Ok(Some(Plan { id, name, days }))
            }
        }
    }

    pub fn list(conn: &Connection) -> Result<Vec<Plan>> {
        let mut stmt = conn.prepare("SELECT id, name, days FROM plans ORDER BY created_at, id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, name, days) = r?;
            let days: Vec<PlanDay> = serde_json::from_str(&days)?;
            result.push(Plan { id, name, days });
        }
        Ok(result)
    }
}

// ─── Gamification document ───────────────────────────────────────────────────

pub struct GamificationRepo;

impl GamificationRepo {
    /// Load the document and its revision. Revision 0 means "not created
    /// yet" and is the expected value for the first store.
    pub fn load(conn: &Connection) -> Result<Option<(GamificationState, i64)>> {
        let row = conn
            .query_row(
                "SELECT revision, doc FROM gamification WHERE id = 1",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((revision, doc)) => {
                let state: GamificationState = serde_json::from_str(&doc)?;
                Ok(Some((state, revision)))
            }
        }
    }

    /// Load with the read-failure policy: gamification unavailability must
    /// never block a session save, so any load error degrades to a fresh
    /// default document (logged).
    pub fn load_or_default(conn: &Connection) -> (GamificationState, i64) {
        match Self::load(conn) {
            Ok(Some((state, revision))) => (state, revision),
            Ok(None) => (GamificationState::new(), 0),
            Err(err) => {
                log::warn!("Failed to load gamification state, starting fresh: {}", err);
                (GamificationState::new(), 0)
            }
        }
    }

    /// Compare-and-set write: succeeds only when the stored revision still
    /// matches `expected_revision`. Returns false on conflict so the caller
    /// can reload and recompute.
    pub fn store(
        conn: &Connection,
        state: &GamificationState,
        expected_revision: i64,
    ) -> Result<bool> {
        let doc = serde_json::to_string(state)?;
        let changed = if expected_revision == 0 {
            conn.execute(
                "INSERT INTO gamification (id, revision, doc) VALUES (1, 1, ?1)
                 ON CONFLICT(id) DO NOTHING",
                params![doc],
            )?
        } else {
            conn.execute(
                "UPDATE gamification SET revision = revision + 1, doc = ?1
                 WHERE id = 1 AND revision = ?2",
                params![doc, expected_revision],
            )?
        };
        Ok(changed == 1)
    }

    /// Bump the plans-completed counter under the same CAS discipline as
    /// session processing. Plan badges are picked up on the next session.
    pub fn record_plan_completion(conn: &Connection) -> Result<u32> {
        for _ in 0..3 {
            let (mut state, revision) = Self::load_or_default(conn);
            state.stats.plans_completed += 1;
            let completed = state.stats.plans_completed;
            if Self::store(conn, &state, revision)? {
                return Ok(completed);
            }
        }
        Err(anyhow!("Gamification document kept changing; plan completion not recorded"))
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
