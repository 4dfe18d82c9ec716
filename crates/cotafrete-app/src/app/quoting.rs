//! Session-to-repository glue for the quote workflow

use cotafrete_domain::repository::QuoteRepository;
use cotafrete_types::Result;

use crate::app::quote_session::QuoteSession;

/// Persist a finished session as a new quote
pub fn save_session(repo: &impl QuoteRepository, session: &QuoteSession) -> Result<i64> {
    let (header, candidates) = session.finalize()?;
    repo.save(&header, &candidates)
}

/// Replace an existing quote with the session's state
pub fn update_from_session(
    repo: &impl QuoteRepository,
    id: i64,
    session: &QuoteSession,
) -> Result<()> {
    let (header, candidates) = session.finalize()?;
    repo.update(id, &header, &candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cotafrete_domain::repository::CarrierRepository;
    use cotafrete_infra::persistence::{SqliteCarrierRepository, SqliteQuoteRepository};
    use cotafrete_store::Db;
    use tempfile::tempdir;

    #[test]
    fn test_session_round_trip() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("test.db")).unwrap();
        let carriers = SqliteCarrierRepository::new(db.clone());
        let quotes = SqliteQuoteRepository::new(db);

        let all = carriers.find_all().unwrap();
        let mut session = QuoteSession::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            all.clone(),
        );
        session.supplier = "Fornecedor Alfa".to_string();
        session.set_invoice_value(1000.0);
        session.select_carrier(all[0].id).unwrap();

        let id = save_session(&quotes, &session).unwrap();

        let detail = quotes.detail(id).unwrap().unwrap();
        assert_eq!(detail.header.supplier, "Fornecedor Alfa");
        // Seeded Rodocargas auto fee became the only candidate
        assert_eq!(detail.candidates.len(), 1);
        assert!((detail.candidates[0].freight_value - 149.8).abs() < 1e-9);
        assert!(detail.candidates[0].selected);
    }
}
