//! SQLite-backed score store: the persisted high score and the lifetime
//! per-note accuracy statistics that outlive any single round.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, Result as SqlResult};

use bsharp_types::{Note, NoteStats};

/// Schema version for the scores database.
const SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS high_score (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    score INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS note_stats (
    note TEXT PRIMARY KEY,
    correct INTEGER NOT NULL,
    total INTEGER NOT NULL
);
";

/// Storage for the high score and per-note statistics.
///
/// The round engine never touches this directly: the game coordinator reads
/// the high score at round start and writes back on the engine's outcomes.
pub struct ScoreDb {
    conn: Connection,
}

impl ScoreDb {
    /// Open (or create) the scores database at `path`.
    pub fn open(path: &Path) -> SqlResult<Self> {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory store, for tests and for runs with persistence disabled.
    pub fn open_in_memory() -> SqlResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> SqlResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at)
             VALUES (?1, datetime('now'))",
            params![SCHEMA_VERSION],
        )?;
        Ok(Self { conn })
    }

    pub fn high_score(&self) -> SqlResult<u32> {
        let mut stmt = self
            .conn
            .prepare("SELECT score FROM high_score WHERE id = 1")?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => row.get(0),
            None => Ok(0),
        }
    }

    pub fn set_high_score(&self, score: u32) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO high_score (id, score) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET score = excluded.score",
            params![score],
        )?;
        Ok(())
    }

    /// Record one guess against the note that was live.
    pub fn record_guess(&self, note: Note, correct: bool) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO note_stats (note, correct, total) VALUES (?1, ?2, 1)
             ON CONFLICT(note) DO UPDATE SET
                 correct = correct + excluded.correct,
                 total = total + 1",
            params![note.name(), correct as i32],
        )?;
        Ok(())
    }

    /// All accumulated per-note counters. Notes never guessed are absent.
    pub fn note_stats(&self) -> SqlResult<HashMap<Note, NoteStats>> {
        let mut stmt = self
            .conn
            .prepare("SELECT note, correct, total FROM note_stats")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })?;

        let mut out = HashMap::new();
        for row in rows {
            let (name, correct, total) = row?;
            match Note::ALL.iter().copied().find(|n| n.name() == name) {
                Some(note) => {
                    out.insert(note, NoteStats { correct, total });
                }
                None => {
                    log::warn!(target: "store", "skipping stats row for unknown note {:?}", name)
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_defaults_to_zero() {
        let db = ScoreDb::open_in_memory().unwrap();
        assert_eq!(db.high_score().unwrap(), 0);
    }

    #[test]
    fn high_score_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.sqlite");
        {
            let db = ScoreDb::open(&path).unwrap();
            db.set_high_score(130).unwrap();
        }
        let db = ScoreDb::open(&path).unwrap();
        assert_eq!(db.high_score().unwrap(), 130);
    }

    #[test]
    fn set_high_score_overwrites() {
        let db = ScoreDb::open_in_memory().unwrap();
        db.set_high_score(50).unwrap();
        db.set_high_score(110).unwrap();
        assert_eq!(db.high_score().unwrap(), 110);
    }

    #[test]
    fn record_guess_accumulates_per_note() {
        let db = ScoreDb::open_in_memory().unwrap();
        db.record_guess(Note::Eb, true).unwrap();
        db.record_guess(Note::Eb, false).unwrap();
        db.record_guess(Note::Eb, true).unwrap();
        db.record_guess(Note::A, false).unwrap();

        let stats = db.note_stats().unwrap();
        assert_eq!(
            stats[&Note::Eb],
            NoteStats {
                correct: 2,
                total: 3
            }
        );
        assert_eq!(
            stats[&Note::A],
            NoteStats {
                correct: 0,
                total: 1
            }
        );
        assert!(!stats.contains_key(&Note::C));
    }

    #[test]
    fn stats_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.sqlite");
        {
            let db = ScoreDb::open(&path).unwrap();
            db.record_guess(Note::Fs, true).unwrap();
        }
        let db = ScoreDb::open(&path).unwrap();
        let stats = db.note_stats().unwrap();
        assert_eq!(stats[&Note::Fs].total, 1);
    }
}
