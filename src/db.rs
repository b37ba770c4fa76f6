//! Session database: crafting queue, crafting history and inventory

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::models::HistoryRow;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Items waiting to be crafted, in queue order
        CREATE TABLE IF NOT EXISTS crafting_queue (
            position INTEGER PRIMARY KEY,
            item TEXT NOT NULL
        );

        -- Every completed craft; the in-memory history shows the newest few
        CREATE TABLE IF NOT EXISTS crafting_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item TEXT NOT NULL,
            crafted_at INTEGER NOT NULL
        );

        -- Materials on hand; empty stacks are deleted, never stored as zero
        CREATE TABLE IF NOT EXISTS inventory (
            material TEXT PRIMARY KEY,
            quantity INTEGER NOT NULL CHECK (quantity > 0)
        );

        CREATE INDEX IF NOT EXISTS idx_crafting_history_time ON crafting_history(crafted_at);
        "#,
    )?;
    Ok(())
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Queued items, front first
pub fn load_queue(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT item FROM crafting_queue ORDER BY position")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    debug!(items = results.len(), "loaded queue");
    Ok(results)
}

/// Replace the stored queue
pub fn save_queue<'a>(conn: &Connection, items: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM crafting_queue", [])?;
    {
        let mut stmt = tx.prepare("INSERT INTO crafting_queue (position, item) VALUES (?1, ?2)")?;
        for (position, item) in items.into_iter().enumerate() {
            stmt.execute((position as i64, item))?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// The newest `limit` history rows, newest first
pub fn load_history(conn: &Connection, limit: usize) -> Result<Vec<HistoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT item, crafted_at FROM crafting_history
         ORDER BY crafted_at DESC, id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit as i64], |row| {
        Ok(HistoryRow {
            item: row.get(0)?,
            crafted_at: row.get(1)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Replace the stored history; `rows` are oldest first
pub fn save_history(conn: &Connection, rows: &[HistoryRow]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM crafting_history", [])?;
    {
        let mut stmt = tx.prepare("INSERT INTO crafting_history (item, crafted_at) VALUES (?1, ?2)")?;
        for row in rows {
            stmt.execute((&row.item, row.crafted_at))?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn append_history(conn: &Connection, item: &str, crafted_at: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO crafting_history (item, crafted_at) VALUES (?1, ?2)",
        (item, crafted_at),
    )?;
    Ok(())
}

/// Delete the newest history row, returning its item
pub fn remove_latest_history(conn: &Connection) -> Result<Option<String>> {
    let latest: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, item FROM crafting_history ORDER BY crafted_at DESC, id DESC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match latest {
        Some((id, item)) => {
            conn.execute("DELETE FROM crafting_history WHERE id = ?1", [id])?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

/// Drop all but the newest `keep` history rows
pub fn prune_history(conn: &Connection, keep: usize) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM crafting_history WHERE id NOT IN (
             SELECT id FROM crafting_history ORDER BY crafted_at DESC, id DESC LIMIT ?1
         )",
        [keep as i64],
    )?;
    Ok(removed)
}

/// Inventory rows sorted by material
pub fn load_inventory(conn: &Connection) -> Result<Vec<(String, u32)>> {
    let mut stmt = conn.prepare("SELECT material, quantity FROM inventory ORDER BY material")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    debug!(materials = results.len(), "loaded inventory");
    Ok(results)
}

/// Replace the stored inventory
pub fn save_inventory(conn: &Connection, rows: &[(String, u32)]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM inventory", [])?;
    {
        let mut stmt = tx.prepare("INSERT INTO inventory (material, quantity) VALUES (?1, ?2)")?;
        for (material, quantity) in rows.iter().filter(|(_, q)| *q > 0) {
            stmt.execute((material, quantity))?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Clear all session data
pub fn clear_session(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM crafting_queue;
        DELETE FROM crafting_history;
        DELETE FROM inventory;
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_queue_round_trip_keeps_order() {
        let conn = conn();
        save_queue(&conn, ["Kula Duda I", "Metal Bagpipe I", "Kula Duda I"]).unwrap();
        assert_eq!(load_queue(&conn).unwrap(), vec!["Kula Duda I", "Metal Bagpipe I", "Kula Duda I"]);

        save_queue(&conn, ["Sectored"]).unwrap();
        assert_eq!(load_queue(&conn).unwrap(), vec!["Sectored"]);
    }

    #[test]
    fn test_history_newest_first() {
        let conn = conn();
        append_history(&conn, "A", 100).unwrap();
        append_history(&conn, "B", 200).unwrap();
        append_history(&conn, "C", 200).unwrap();

        let items: Vec<String> = load_history(&conn, 10).unwrap().into_iter().map(|r| r.item).collect();
        assert_eq!(items, vec!["C", "B", "A"]);
        assert_eq!(load_history(&conn, 1).unwrap()[0].crafted_at, 200);
    }

    #[test]
    fn test_remove_latest_and_prune() {
        let conn = conn();
        for (i, item) in ["A", "B", "C", "D"].iter().enumerate() {
            append_history(&conn, item, i as i64).unwrap();
        }
        assert_eq!(remove_latest_history(&conn).unwrap().as_deref(), Some("D"));
        assert_eq!(prune_history(&conn, 2).unwrap(), 1);

        let items: Vec<String> = load_history(&conn, 10).unwrap().into_iter().map(|r| r.item).collect();
        assert_eq!(items, vec!["C", "B"]);

        save_history(&conn, &[]).unwrap();
        assert_eq!(remove_latest_history(&conn).unwrap(), None);
    }

    #[test]
    fn test_save_history_replaces() {
        let conn = conn();
        append_history(&conn, "old", 1).unwrap();
        let rows = vec![
            HistoryRow { item: "Sectored".to_string(), crafted_at: 10 },
            HistoryRow { item: "Legia Sectored".to_string(), crafted_at: 20 },
        ];
        save_history(&conn, &rows).unwrap();
        let loaded = load_history(&conn, 10).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].item, "Legia Sectored");
    }

    #[test]
    fn test_inventory_skips_zero() {
        let conn = conn();
        save_inventory(
            &conn,
            &[("Iron Ore".to_string(), 3), ("Earth Crystal".to_string(), 0)],
        )
        .unwrap();
        assert_eq!(load_inventory(&conn).unwrap(), vec![("Iron Ore".to_string(), 3)]);

        clear_session(&conn).unwrap();
        assert!(load_inventory(&conn).unwrap().is_empty());
    }
}
