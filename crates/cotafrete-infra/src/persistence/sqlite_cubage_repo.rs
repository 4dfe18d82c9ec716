//! SQLite implementation of CubageRepository
//!
//! Fire-and-forget snapshot log: the calculator never reads entries back.

use rusqlite::params;

use cotafrete_domain::model::CubageItem;
use cotafrete_domain::repository::CubageRepository;
use cotafrete_store::Db;
use cotafrete_types::Error;

pub struct SqliteCubageRepository {
    db: Db,
}

impl SqliteCubageRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl CubageRepository for SqliteCubageRepository {
    fn save(&self, items: &[CubageItem], total_m3: f64) -> Result<i64, Error> {
        let items_json = serde_json::to_string(items)?;

        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO cubage_calculations (items_json, total_m3) VALUES (?1, ?2)",
            params![items_json, total_m3],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_snapshot() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("test.db")).unwrap();
        let repo = SqliteCubageRepository::new(db.clone());

        let items = vec![CubageItem {
            quantity: 2.0,
            width: 50.0,
            length: 40.0,
            height: 30.0,
            volume_m3: 0.12,
        }];
        let id = repo.save(&items, 0.12).unwrap();

        let (stored_json, stored_total): (String, f64) = db
            .connect()
            .unwrap()
            .query_row(
                "SELECT items_json, total_m3 FROM cubage_calculations WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(stored_total, 0.12);

        let round_trip: Vec<CubageItem> = serde_json::from_str(&stored_json).unwrap();
        assert_eq!(round_trip.len(), 1);
        assert_eq!(round_trip[0].volume_m3, 0.12);
    }
}
