//! Keyed snapshot rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::StoredSnapshot;

impl Database {
    /// Insert or overwrite the snapshot stored under `key`.
    pub fn put_snapshot(&self, key: &str, json: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO snapshots (key, json, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET json = excluded.json, saved_at = excluded.saved_at",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Fetch the snapshot stored under `key`, if any.
    pub fn get_snapshot(&self, key: &str) -> Result<Option<StoredSnapshot>> {
        let row = self
            .conn()
            .query_row(
                "SELECT key, json, saved_at FROM snapshots WHERE key = ?1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((key, json, saved_str)) = row else {
            return Ok(None);
        };

        let saved_at: DateTime<Utc> =
            DateTime::parse_from_rfc3339(&saved_str)?.with_timezone(&Utc);

        Ok(Some(StoredSnapshot {
            key,
            json,
            saved_at,
        }))
    }

    pub fn delete_snapshot(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_snapshot("nope").unwrap().is_none());
    }

    #[test]
    fn put_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.put_snapshot("k", r#"{"a":1}"#).unwrap();
        db.put_snapshot("k", r#"{"a":2}"#).unwrap();

        let snap = db.get_snapshot("k").unwrap().unwrap();
        assert_eq!(snap.key, "k");
        assert_eq!(snap.json, r#"{"a":2}"#);

        let rows: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn keys_are_independent() {
        let db = Database::open_in_memory().unwrap();
        db.put_snapshot("a", "1").unwrap();
        db.put_snapshot("b", "2").unwrap();
        assert_eq!(db.get_snapshot("a").unwrap().unwrap().json, "1");
        assert_eq!(db.get_snapshot("b").unwrap().unwrap().json, "2");
    }

    #[test]
    fn delete_reports_presence() {
        let db = Database::open_in_memory().unwrap();
        db.put_snapshot("k", "1").unwrap();
        assert!(db.delete_snapshot("k").unwrap());
        assert!(!db.delete_snapshot("k").unwrap());
        assert!(db.get_snapshot("k").unwrap().is_none());
    }
}
