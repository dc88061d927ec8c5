use rusqlite::{Connection, Result};
use std::path::Path;

const CREATE_SLOTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )";

pub fn establish_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute(CREATE_SLOTS_TABLE, [])?;
    Ok(conn)
}

pub fn establish_in_memory_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute(CREATE_SLOTS_TABLE, [])?;
    Ok(conn)
}
