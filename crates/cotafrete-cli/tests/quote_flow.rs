//! End-to-end flow over a temporary database:
//! register carriers, build and save a quote, list, edit, export, delete.

use chrono::NaiveDate;
use tempfile::tempdir;

use cotafrete_app::app::{quoting, registry, QuoteSession};
use cotafrete_app::export::export_quote_detail;
use cotafrete_app::repository::{carrier_repo, open_db_at, quote_repo};
use cotafrete_domain::model::{CarrierContact, ContactKind, NewCarrier, QuoteFilter};
use cotafrete_domain::repository::{CarrierRepository, QuoteRepository};
use cotafrete_types::Error;

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

#[test]
fn test_full_quote_workflow() {
    let dir = tempdir().unwrap();
    let db = open_db_at(dir.path().join("cotafrete.db")).unwrap();
    let carriers = carrier_repo(&db);
    let quotes = quote_repo(&db);

    // The default carrier ships with the database
    let rodocargas = carriers.find_by_name("rodocargas").unwrap().unwrap();
    assert!(rodocargas.is_default());

    let azul_id = registry::create_carrier(
        &carriers,
        NewCarrier {
            name: "Transporte Azul".to_string(),
            tax_id: Some("11222333000144".to_string()),
            contacts: vec![CarrierContact {
                kind: ContactKind::Phone,
                value: "11987654321".to_string(),
                person: Some("Carlos".to_string()),
            }],
            ..NewCarrier::default()
        },
    )
    .unwrap();

    // Build a quote: Rodocargas is auto-priced, Azul entered manually
    let mut session = QuoteSession::new(date("2024-03-15"), carriers.find_all().unwrap());
    session.supplier = "Fornecedor Alfa".to_string();
    session.order_number = Some("PED-1001".to_string());
    session.set_invoice_value(1000.0);
    session.set_freight(azul_id, 120.0).unwrap();
    session.select_carrier(azul_id).unwrap();

    let quote_id = quoting::save_session(&quotes, &session).unwrap();

    // Listing joins the winning candidate
    let listed = quotes.list(&QuoteFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].winner_name.as_deref(), Some("Transporte Azul"));
    assert_eq!(listed[0].winner_freight, Some(120.0));

    // Case-insensitive supplier filter
    let filtered = quotes
        .list(&QuoteFilter {
            supplier_contains: Some("alfa".to_string()),
            ..QuoteFilter::default()
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);

    // Detail is ordered cheapest first: Azul (120) before Rodocargas (149.8)
    let detail = quotes.detail(quote_id).unwrap().unwrap();
    assert_eq!(detail.candidates.len(), 2);
    assert_eq!(detail.candidates[0].carrier_name, "Transporte Azul");
    assert!((detail.candidates[1].freight_value - 149.8).abs() < 1e-9);

    // Detail export produces a workbook
    let export_path = dir.path().join("cotacao.xlsx");
    export_quote_detail(&detail, &export_path).unwrap();
    assert!(export_path.metadata().unwrap().len() > 0);

    // Edit: change the invoice value and the winner
    let mut edit = QuoteSession::new(detail.header.date, carriers.find_all().unwrap());
    edit.supplier = detail.header.supplier.clone();
    edit.set_invoice_value(2000.0);
    edit.set_freight(azul_id, 150.0).unwrap();
    edit.select_carrier(rodocargas.id).unwrap();

    quoting::update_from_session(&quotes, quote_id, &edit).unwrap();

    let updated = quotes.detail(quote_id).unwrap().unwrap();
    assert_eq!(updated.header.invoice_value, 2000.0);
    assert_eq!(updated.winner_name.as_deref(), Some("Rodocargas"));
    // Replaced, not merged
    assert_eq!(updated.candidates.len(), 2);

    // The default carrier cannot be removed, others can
    assert!(matches!(
        registry::delete_carrier(&carriers, rodocargas.id),
        Err(Error::ProtectedCarrier(_))
    ));

    // Delete the quote and verify both tables are clean
    quotes.delete(quote_id).unwrap();
    assert!(quotes.detail(quote_id).unwrap().is_none());
    assert!(quotes.list(&QuoteFilter::default()).unwrap().is_empty());
}
