//! SQLite implementation of CarrierRepository

use rusqlite::{params, OptionalExtension, Transaction};

use cotafrete_domain::model::{Carrier, CarrierContact, ContactKind, NewCarrier};
use cotafrete_domain::repository::CarrierRepository;
use cotafrete_store::Db;
use cotafrete_types::Error;

pub struct SqliteCarrierRepository {
    db: Db,
}

impl SqliteCarrierRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

/// Translate the unique-constraint failure on carriers.tax_id into the
/// distinct duplicate-tax-id error the caller reports
fn map_save_error(err: rusqlite::Error, tax_id: Option<&str>) -> Error {
    if let rusqlite::Error::SqliteFailure(code, Some(message)) = &err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation
            && message.contains("carriers.tax_id")
        {
            return Error::DuplicateTaxId(tax_id.unwrap_or_default().to_string());
        }
    }
    Error::Sqlite(err)
}

fn insert_contacts(
    tx: &Transaction<'_>,
    carrier_id: i64,
    contacts: &[CarrierContact],
) -> Result<(), Error> {
    for contact in contacts {
        tx.execute(
            "INSERT INTO carrier_contacts (carrier_id, kind, value, person)
             VALUES (?1, ?2, ?3, ?4)",
            params![carrier_id, contact.kind.as_str(), contact.value, contact.person],
        )?;
    }
    Ok(())
}

fn carrier_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Carrier> {
    Ok(Carrier {
        id: row.get(0)?,
        name: row.get(1)?,
        tax_id: row.get(2)?,
        base_fee_percent: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
        tax_percent: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
        created_at: row.get(5)?,
    })
}

const CARRIER_COLUMNS: &str = "id, name, tax_id, base_fee_percent, tax_percent, created_at";

impl CarrierRepository for SqliteCarrierRepository {
    fn save(&self, carrier: &NewCarrier) -> Result<i64, Error> {
        carrier.validate()?;

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO carriers (name, tax_id, base_fee_percent, tax_percent)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                carrier.name.trim(),
                carrier.tax_id,
                carrier.base_fee_percent,
                carrier.tax_percent
            ],
        )
        .map_err(|e| map_save_error(e, carrier.tax_id.as_deref()))?;
        let id = tx.last_insert_rowid();

        insert_contacts(&tx, id, &carrier.contacts)?;
        tx.commit()?;
        Ok(id)
    }

    fn update(&self, id: i64, carrier: &NewCarrier) -> Result<(), Error> {
        carrier.validate()?;

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        let affected = tx
            .execute(
                "UPDATE carriers SET name = ?1, tax_id = ?2, base_fee_percent = ?3, tax_percent = ?4
                 WHERE id = ?5",
                params![
                    carrier.name.trim(),
                    carrier.tax_id,
                    carrier.base_fee_percent,
                    carrier.tax_percent,
                    id
                ],
            )
            .map_err(|e| map_save_error(e, carrier.tax_id.as_deref()))?;
        if affected == 0 {
            return Err(Error::CarrierNotFound(id));
        }

        // Replace-all contact strategy, one transaction
        tx.execute("DELETE FROM carrier_contacts WHERE carrier_id = ?1", [id])?;
        insert_contacts(&tx, id, &carrier.contacts)?;

        tx.commit()?;
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), Error> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM carrier_contacts WHERE carrier_id = ?1", [id])?;
        let affected = tx.execute("DELETE FROM carriers WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(Error::CarrierNotFound(id));
        }

        tx.commit()?;
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Carrier>, Error> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CARRIER_COLUMNS} FROM carriers ORDER BY name"
        ))?;
        let carriers = stmt
            .query_map([], carrier_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(carriers)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Carrier>, Error> {
        let conn = self.db.connect()?;
        let carrier = conn
            .query_row(
                &format!("SELECT {CARRIER_COLUMNS} FROM carriers WHERE id = ?1"),
                [id],
                carrier_from_row,
            )
            .optional()?;
        Ok(carrier)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Carrier>, Error> {
        let conn = self.db.connect()?;
        let carrier = conn
            .query_row(
                &format!("SELECT {CARRIER_COLUMNS} FROM carriers WHERE name = ?1 COLLATE NOCASE"),
                [name],
                carrier_from_row,
            )
            .optional()?;
        Ok(carrier)
    }

    fn contacts(&self, carrier_id: i64) -> Result<Vec<CarrierContact>, Error> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(
            "SELECT kind, value, person FROM carrier_contacts WHERE carrier_id = ?1 ORDER BY id",
        )?;
        let contacts = stmt
            .query_map([carrier_id], |row| {
                let kind: String = row.get(0)?;
                let kind = ContactKind::parse(&kind).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        format!("unknown contact kind: {kind}").into(),
                    )
                })?;
                Ok(CarrierContact {
                    kind,
                    value: row.get(1)?,
                    person: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn repo() -> (TempDir, SqliteCarrierRepository) {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("test.db")).unwrap();
        (dir, SqliteCarrierRepository::new(db))
    }

    fn carrier(name: &str, tax_id: Option<&str>) -> NewCarrier {
        NewCarrier {
            name: name.to_string(),
            tax_id: tax_id.map(str::to_string),
            base_fee_percent: 0.0,
            tax_percent: 0.0,
            contacts: vec![
                CarrierContact {
                    kind: ContactKind::Phone,
                    value: "(11) 98765-4321".to_string(),
                    person: Some("Carlos".to_string()),
                },
                CarrierContact {
                    kind: ContactKind::Email,
                    value: "comercial@exemplo.com.br".to_string(),
                    person: None,
                },
            ],
        }
    }

    #[test]
    fn test_default_carrier_is_seeded() {
        let (_dir, repo) = repo();
        let seeded = repo.find_by_name("rodocargas").unwrap().unwrap();
        assert!(seeded.is_default());
        assert_eq!(seeded.base_fee_percent, 14.0);
        assert_eq!(seeded.tax_percent, 7.0);
    }

    #[test]
    fn test_save_and_read_back() {
        let (_dir, repo) = repo();
        let id = repo.save(&carrier("Transporte Azul", Some("11.222.333/0001-44"))).unwrap();

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.name, "Transporte Azul");
        assert_eq!(found.tax_id.as_deref(), Some("11.222.333/0001-44"));

        let contacts = repo.contacts(id).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].kind, ContactKind::Phone);
        assert_eq!(contacts[0].person.as_deref(), Some("Carlos"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let (_dir, repo) = repo();
        let result = repo.save(&carrier("   ", None));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(repo.find_all().unwrap().len(), 1); // seed only
    }

    #[test]
    fn test_duplicate_tax_id_is_a_distinct_error() {
        let (_dir, repo) = repo();
        repo.save(&carrier("Primeira", Some("11.222.333/0001-44"))).unwrap();
        let result = repo.save(&carrier("Segunda", Some("11.222.333/0001-44")));
        match result {
            Err(Error::DuplicateTaxId(tax_id)) => assert_eq!(tax_id, "11.222.333/0001-44"),
            other => panic!("expected DuplicateTaxId, got {other:?}"),
        }
    }

    #[test]
    fn test_update_replaces_contacts() {
        let (_dir, repo) = repo();
        let id = repo.save(&carrier("Transporte Azul", None)).unwrap();

        let mut replacement = carrier("Transporte Azul Ltda", None);
        replacement.contacts = vec![CarrierContact {
            kind: ContactKind::Email,
            value: "novo@exemplo.com.br".to_string(),
            person: None,
        }];
        repo.update(id, &replacement).unwrap();

        assert_eq!(repo.find_by_id(id).unwrap().unwrap().name, "Transporte Azul Ltda");
        let contacts = repo.contacts(id).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].value, "novo@exemplo.com.br");
    }

    #[test]
    fn test_update_missing_carrier() {
        let (_dir, repo) = repo();
        let result = repo.update(999, &carrier("Fantasma", None));
        assert!(matches!(result, Err(Error::CarrierNotFound(999))));
    }

    #[test]
    fn test_delete_removes_carrier_and_contacts() {
        let (_dir, repo) = repo();
        let id = repo.save(&carrier("Descartável", None)).unwrap();

        repo.delete(id).unwrap();

        assert!(repo.find_by_id(id).unwrap().is_none());
        assert!(repo.contacts(id).unwrap().is_empty());
        assert!(matches!(repo.delete(id), Err(Error::CarrierNotFound(_))));
    }

    #[test]
    fn test_find_all_ordered_by_name() {
        let (_dir, repo) = repo();
        repo.save(&carrier("Zeta Cargas", None)).unwrap();
        repo.save(&carrier("Alfa Express", None)).unwrap();

        let names: Vec<String> = repo.find_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Alfa Express", "Rodocargas", "Zeta Cargas"]);
    }
}
