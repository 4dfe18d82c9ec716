//! Carrier registry use cases
//!
//! Thin layer over the repository that normalizes document/contact fields
//! through the shared masks and protects the default carrier from removal.

use cotafrete_domain::model::{ContactKind, NewCarrier};
use cotafrete_domain::repository::CarrierRepository;
use cotafrete_domain::service::format::{format_cnpj, format_phone, is_valid_email};
use cotafrete_types::{Error, Result, ValidationError};

/// Normalize the tax id and contact entries before they are stored.
/// Only the default carrier keeps its fee percentages; everyone else is
/// quoted manually and stores zero.
fn normalize(mut carrier: NewCarrier) -> Result<NewCarrier> {
    carrier.tax_id = carrier
        .tax_id
        .as_deref()
        .map(format_cnpj)
        .filter(|s| !s.is_empty());

    if !cotafrete_domain::model::is_default_carrier(&carrier.name) {
        carrier.base_fee_percent = 0.0;
        carrier.tax_percent = 0.0;
    }

    for contact in &mut carrier.contacts {
        match contact.kind {
            ContactKind::Phone => contact.value = format_phone(&contact.value),
            ContactKind::Email => {
                if !is_valid_email(&contact.value) {
                    return Err(ValidationError::InvalidEmail(contact.value.clone()).into());
                }
            }
        }
    }

    Ok(carrier)
}

pub fn create_carrier(repo: &impl CarrierRepository, carrier: NewCarrier) -> Result<i64> {
    repo.save(&normalize(carrier)?)
}

pub fn update_carrier(repo: &impl CarrierRepository, id: i64, carrier: NewCarrier) -> Result<()> {
    repo.update(id, &normalize(carrier)?)
}

/// Delete a carrier and its contacts. The default carrier is refused here;
/// the repository itself stays permissive.
pub fn delete_carrier(repo: &impl CarrierRepository, id: i64) -> Result<()> {
    let carrier = repo.find_by_id(id)?.ok_or(Error::CarrierNotFound(id))?;
    if carrier.is_default() {
        return Err(Error::ProtectedCarrier(carrier.name));
    }
    repo.delete(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cotafrete_domain::model::CarrierContact;
    use cotafrete_domain::repository::CarrierRepository;
    use cotafrete_infra::persistence::SqliteCarrierRepository;
    use cotafrete_store::Db;
    use tempfile::{tempdir, TempDir};

    fn repo() -> (TempDir, SqliteCarrierRepository) {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("test.db")).unwrap();
        (dir, SqliteCarrierRepository::new(db))
    }

    #[test]
    fn test_create_normalizes_fields() {
        let (_dir, repo) = repo();
        let id = create_carrier(
            &repo,
            NewCarrier {
                name: "Transporte Azul".to_string(),
                tax_id: Some("11222333000144".to_string()),
                base_fee_percent: 10.0, // ignored: not the default carrier
                tax_percent: 5.0,
                contacts: vec![CarrierContact {
                    kind: ContactKind::Phone,
                    value: "11987654321".to_string(),
                    person: None,
                }],
            },
        )
        .unwrap();

        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.tax_id.as_deref(), Some("11.222.333/0001-44"));
        assert_eq!(stored.base_fee_percent, 0.0);
        assert_eq!(stored.tax_percent, 0.0);

        let contacts = repo.contacts(id).unwrap();
        assert_eq!(contacts[0].value, "(11) 98765-4321");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let (_dir, repo) = repo();
        let result = create_carrier(
            &repo,
            NewCarrier {
                name: "Transporte Azul".to_string(),
                contacts: vec![CarrierContact {
                    kind: ContactKind::Email,
                    value: "sem-arroba".to_string(),
                    person: None,
                }],
                ..NewCarrier::default()
            },
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidEmail(_)))
        ));
    }

    #[test]
    fn test_default_carrier_cannot_be_deleted() {
        let (_dir, repo) = repo();
        let seeded = repo.find_by_name("Rodocargas").unwrap().unwrap();
        assert!(matches!(
            delete_carrier(&repo, seeded.id),
            Err(Error::ProtectedCarrier(_))
        ));
        // Still there
        assert!(repo.find_by_id(seeded.id).unwrap().is_some());
    }

    #[test]
    fn test_other_carriers_can_be_deleted() {
        let (_dir, repo) = repo();
        let id = create_carrier(
            &repo,
            NewCarrier {
                name: "Descartável".to_string(),
                ..NewCarrier::default()
            },
        )
        .unwrap();
        delete_carrier(&repo, id).unwrap();
        assert!(repo.find_by_id(id).unwrap().is_none());
    }
}
