//! Database handle: open, schema creation, default-carrier seeding

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection};

use cotafrete_types::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS carriers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    tax_id TEXT UNIQUE,
    base_fee_percent REAL DEFAULT 0,
    tax_percent REAL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS carrier_contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    carrier_id INTEGER NOT NULL,
    kind TEXT NOT NULL,
    value TEXT NOT NULL,
    person TEXT,
    FOREIGN KEY (carrier_id) REFERENCES carriers (id)
);

CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    supplier TEXT NOT NULL,
    order_number TEXT,
    invoice_value REAL NOT NULL,
    weight_kg REAL,
    volume_count INTEGER,
    cubage_m3 REAL,
    winner_carrier_id INTEGER,
    FOREIGN KEY (winner_carrier_id) REFERENCES carriers (id)
);

CREATE TABLE IF NOT EXISTS quote_carriers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quote_id INTEGER NOT NULL,
    carrier_id INTEGER NOT NULL,
    freight_value REAL NOT NULL,
    selected BOOLEAN DEFAULT FALSE,
    FOREIGN KEY (quote_id) REFERENCES quotes (id),
    FOREIGN KEY (carrier_id) REFERENCES carriers (id)
);

CREATE TABLE IF NOT EXISTS cubage_calculations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    items_json TEXT NOT NULL,
    total_m3 REAL NOT NULL
);
";

/// Handle to the application database file.
///
/// Cheap to clone; every unit of work opens its own connection through
/// [`Db::connect`] and releases it when done.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    /// Open (or create) the database at `path`, creating parent
    /// directories, the schema and the default carrier seed row as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let db = Self { path: path.into() };

        if let Some(parent) = db.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = db.connect()?;
        conn.execute_batch(SCHEMA)?;

        // Seed the default carrier; OR IGNORE keys off the unique tax id
        conn.execute(
            "INSERT OR IGNORE INTO carriers (name, tax_id, base_fee_percent, tax_percent)
             VALUES (?1, ?2, ?3, ?4)",
            params!["Rodocargas", "00.000.000/0000-00", 14.0, 7.0],
        )?;

        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open one connection for one unit of work. The busy timeout covers
    /// transient lock contention; true multi-writer use is unsupported.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(30))?;
        Ok(conn)
    }
}
