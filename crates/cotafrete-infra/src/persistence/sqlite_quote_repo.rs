//! SQLite implementation of QuoteRepository

use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, OptionalExtension, Transaction};

use cotafrete_domain::model::{
    validate_candidates, CandidateInput, QuoteCandidate, QuoteDetail, QuoteFilter, QuoteHeader,
    QuoteSummary,
};
use cotafrete_domain::repository::QuoteRepository;
use cotafrete_domain::service::percent_of_invoice;
use cotafrete_store::Db;
use cotafrete_types::Error;

pub struct SqliteQuoteRepository {
    db: Db,
}

impl SqliteQuoteRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn insert_candidates(
    tx: &Transaction<'_>,
    quote_id: i64,
    candidates: &[CandidateInput],
) -> Result<(), Error> {
    for candidate in candidates {
        tx.execute(
            "INSERT INTO quote_carriers (quote_id, carrier_id, freight_value, selected)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                quote_id,
                candidate.carrier_id,
                candidate.freight_value,
                candidate.selected
            ],
        )?;
    }
    Ok(())
}

impl QuoteRepository for SqliteQuoteRepository {
    fn save(&self, header: &QuoteHeader, candidates: &[CandidateInput]) -> Result<i64, Error> {
        header.validate()?;
        validate_candidates(candidates)?;

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO quotes
                 (date, supplier, order_number, invoice_value, weight_kg, volume_count,
                  cubage_m3, winner_carrier_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                header.date,
                header.supplier.trim(),
                header.order_number,
                header.invoice_value,
                header.weight_kg,
                header.volume_count,
                header.cubage_m3,
                header.winner_carrier_id
            ],
        )?;
        let id = tx.last_insert_rowid();

        insert_candidates(&tx, id, candidates)?;
        tx.commit()?;
        Ok(id)
    }

    fn update(
        &self,
        id: i64,
        header: &QuoteHeader,
        candidates: &[CandidateInput],
    ) -> Result<(), Error> {
        header.validate()?;
        validate_candidates(candidates)?;

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        let affected = tx.execute(
            "UPDATE quotes SET
                 date = ?1, supplier = ?2, order_number = ?3, invoice_value = ?4,
                 weight_kg = ?5, volume_count = ?6, cubage_m3 = ?7, winner_carrier_id = ?8
             WHERE id = ?9",
            params![
                header.date,
                header.supplier.trim(),
                header.order_number,
                header.invoice_value,
                header.weight_kg,
                header.volume_count,
                header.cubage_m3,
                header.winner_carrier_id,
                id
            ],
        )?;
        if affected == 0 {
            return Err(Error::QuoteNotFound(id));
        }

        // Replace-all candidate strategy, one transaction
        tx.execute("DELETE FROM quote_carriers WHERE quote_id = ?1", [id])?;
        insert_candidates(&tx, id, candidates)?;

        tx.commit()?;
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), Error> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM quote_carriers WHERE quote_id = ?1", [id])?;
        let affected = tx.execute("DELETE FROM quotes WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(Error::QuoteNotFound(id));
        }

        tx.commit()?;
        Ok(())
    }

    fn list(&self, filter: &QuoteFilter) -> Result<Vec<QuoteSummary>, Error> {
        let mut sql = String::from(
            "SELECT q.id, q.date, q.supplier, q.invoice_value, q.weight_kg, q.volume_count,
                    q.cubage_m3, w.name, s.freight_value
             FROM quotes q
             LEFT JOIN carriers w ON q.winner_carrier_id = w.id
             LEFT JOIN quote_carriers s ON s.quote_id = q.id AND s.selected = 1
             WHERE 1=1",
        );
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(from) = filter.date_from {
            sql.push_str(" AND q.date >= ?");
            values.push(Box::new(from));
        }
        if let Some(to) = filter.date_to {
            sql.push_str(" AND q.date <= ?");
            values.push(Box::new(to));
        }
        if let Some(supplier) = filter.supplier_contains.as_deref() {
            let supplier = supplier.trim();
            if !supplier.is_empty() {
                sql.push_str(" AND q.supplier LIKE '%' || ? || '%'");
                values.push(Box::new(supplier.to_string()));
            }
        }
        if let Some(carrier) = filter.carrier_contains.as_deref() {
            let carrier = carrier.trim();
            if !carrier.is_empty() {
                sql.push_str(" AND w.name LIKE '%' || ? || '%'");
                values.push(Box::new(carrier.to_string()));
            }
        }
        sql.push_str(" ORDER BY q.date DESC, q.id DESC");

        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let quotes = stmt
            .query_map(params_from_iter(values.iter().map(|v| v.as_ref())), |row| {
                Ok(QuoteSummary {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    supplier: row.get(2)?,
                    invoice_value: row.get(3)?,
                    weight_kg: row.get(4)?,
                    volume_count: row.get(5)?,
                    cubage_m3: row.get(6)?,
                    winner_name: row.get(7)?,
                    winner_freight: row.get(8)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(quotes)
    }

    fn detail(&self, id: i64) -> Result<Option<QuoteDetail>, Error> {
        let conn = self.db.connect()?;

        let header = conn
            .query_row(
                "SELECT q.date, q.supplier, q.order_number, q.invoice_value, q.weight_kg,
                        q.volume_count, q.cubage_m3, q.winner_carrier_id, w.name
                 FROM quotes q
                 LEFT JOIN carriers w ON q.winner_carrier_id = w.id
                 WHERE q.id = ?1",
                [id],
                |row| {
                    Ok((
                        QuoteHeader {
                            date: row.get(0)?,
                            supplier: row.get(1)?,
                            order_number: row.get(2)?,
                            invoice_value: row.get(3)?,
                            weight_kg: row.get(4)?,
                            volume_count: row.get(5)?,
                            cubage_m3: row.get(6)?,
                            winner_carrier_id: row.get(7)?,
                        },
                        row.get::<_, Option<String>>(8)?,
                    ))
                },
            )
            .optional()?;

        let Some((header, winner_name)) = header else {
            return Ok(None);
        };

        // Cheapest offer first for comparison
        let mut stmt = conn.prepare(
            "SELECT qc.carrier_id, c.name, qc.freight_value, qc.selected
             FROM quote_carriers qc
             JOIN carriers c ON qc.carrier_id = c.id
             WHERE qc.quote_id = ?1
             ORDER BY qc.freight_value",
        )?;
        let invoice_value = header.invoice_value;
        let candidates = stmt
            .query_map([id], |row| {
                let freight_value: f64 = row.get(2)?;
                Ok(QuoteCandidate {
                    carrier_id: row.get(0)?,
                    carrier_name: row.get(1)?,
                    freight_value,
                    selected: row.get(3)?,
                    percent: percent_of_invoice(freight_value, invoice_value),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(QuoteDetail {
            id,
            header,
            winner_name,
            candidates,
        }))
    }
}
