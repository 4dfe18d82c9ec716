//! Command handlers

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;

use cotafrete_app::app::{quoting, registry, QuoteSession};
use cotafrete_app::config::Config;
use cotafrete_app::export::{
    detail_export_filename, export_quote_detail, export_quote_list, list_export_filename,
};
use cotafrete_app::repository::{carrier_repo, cubage_repo, open_db, open_db_at, quote_repo};
use cotafrete_domain::model::{
    is_default_carrier, Carrier, CarrierContact, ContactKind, CubageLine, DimensionUnit,
    NewCarrier, QuoteFilter,
};
use cotafrete_domain::repository::{CarrierRepository, CubageRepository, QuoteRepository};
use cotafrete_domain::service::cubage_calculator::compute_cubage;
use cotafrete_domain::service::money::parse_money;
use cotafrete_store::Db;
use cotafrete_types::{Error, OutputFormat, Result};

use crate::cli::{CarrierCommands, Cli, Commands, QuoteCommands};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);
    let db_override = cli.db;

    match cli.command {
        Commands::Carrier { command } => {
            carrier_command(command, &open_database(db_override, &config)?, format)
        }
        Commands::Quote { command } => {
            quote_command(command, &open_database(db_override, &config)?, format)
        }
        Commands::Cubage { boxes, unit, save } => cubage_command(
            &open_database(db_override, &config)?,
            format,
            &boxes,
            unit,
            save,
        ),
        Commands::Config {
            show,
            set_data_dir,
            set_format,
        } => config_command(&mut config, show, set_data_dir, set_format),
    }
}

fn open_database(db_override: Option<PathBuf>, config: &Config) -> Result<Db> {
    match db_override {
        Some(path) => open_db_at(path),
        None => open_db(config),
    }
}

/// Read one line and require a literal "SIM" to go ahead
fn confirm_with_sim(prompt: &str) -> Result<bool> {
    print!("{prompt} ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("SIM"))
}

fn carrier_command(command: CarrierCommands, db: &Db, format: OutputFormat) -> Result<()> {
    let carriers = carrier_repo(db);

    match command {
        CarrierCommands::Add {
            name,
            tax_id,
            base_fee,
            tax,
            phones,
            emails,
            person,
        } => {
            let new_carrier = NewCarrier {
                name,
                tax_id,
                base_fee_percent: base_fee.unwrap_or(0.0),
                tax_percent: tax.unwrap_or(0.0),
                contacts: build_contacts(&phones, &emails, person.as_deref()),
            };
            let id = registry::create_carrier(&carriers, new_carrier)?;
            println!("Carrier #{id} registered");

            let stored = carriers.find_by_id(id)?.ok_or(Error::CarrierNotFound(id))?;
            output::print_carrier_detail(format, &stored, &carriers.contacts(id)?)
        }

        CarrierCommands::List => output::print_carriers(format, &carriers.find_all()?),

        CarrierCommands::Show { id } => {
            let carrier = carriers.find_by_id(id)?.ok_or(Error::CarrierNotFound(id))?;
            output::print_carrier_detail(format, &carrier, &carriers.contacts(id)?)
        }

        CarrierCommands::Update {
            id,
            name,
            tax_id,
            base_fee,
            tax,
            phones,
            emails,
            person,
        } => {
            let current = carriers.find_by_id(id)?.ok_or(Error::CarrierNotFound(id))?;

            // Any contact flag replaces the whole list, as the edit form does
            let contacts = if phones.is_empty() && emails.is_empty() {
                carriers.contacts(id)?
            } else {
                build_contacts(&phones, &emails, person.as_deref())
            };

            let replacement = NewCarrier {
                name: name.unwrap_or(current.name),
                tax_id: tax_id.or(current.tax_id),
                base_fee_percent: base_fee.unwrap_or(current.base_fee_percent),
                tax_percent: tax.unwrap_or(current.tax_percent),
                contacts,
            };
            registry::update_carrier(&carriers, id, replacement)?;
            println!("Carrier #{id} updated");

            let stored = carriers.find_by_id(id)?.ok_or(Error::CarrierNotFound(id))?;
            output::print_carrier_detail(format, &stored, &carriers.contacts(id)?)
        }

        CarrierCommands::Remove { id, yes } => {
            let carrier = carriers.find_by_id(id)?.ok_or(Error::CarrierNotFound(id))?;

            if !yes {
                let prompt = format!(
                    "Type 'SIM' to confirm removing carrier \"{}\" (#{id}):",
                    carrier.name
                );
                if !confirm_with_sim(&prompt)? {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            registry::delete_carrier(&carriers, id)?;
            println!("Carrier #{id} removed");
            Ok(())
        }
    }
}

fn build_contacts(phones: &[String], emails: &[String], person: Option<&str>) -> Vec<CarrierContact> {
    let person = person.map(str::to_string);
    phones
        .iter()
        .map(|value| CarrierContact {
            kind: ContactKind::Phone,
            value: value.clone(),
            person: person.clone(),
        })
        .chain(emails.iter().map(|value| CarrierContact {
            kind: ContactKind::Email,
            value: value.clone(),
            person: person.clone(),
        }))
        .collect()
}

/// Parse one "Name=value" freight argument; the value goes through the
/// shared money parser
fn parse_freight_spec(spec: &str) -> Result<(String, f64)> {
    let Some((name, value)) = spec.split_once('=') else {
        return Err(Error::InvalidArgument(format!(
            "expected \"Carrier=value\", got \"{spec}\""
        )));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "missing carrier name in \"{spec}\""
        )));
    }
    Ok((name.to_string(), parse_money(value)))
}

fn resolve_carrier<'a>(carriers: &'a [Carrier], name: &str) -> Result<&'a Carrier> {
    carriers
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| Error::UnknownCarrierName(name.trim().to_string()))
}

/// Optional numeric field through the money parser; non-positive is "unset"
fn parse_optional_amount(text: Option<&str>) -> Option<f64> {
    text.map(parse_money).filter(|v| *v > 0.0)
}

fn quote_command(command: QuoteCommands, db: &Db, format: OutputFormat) -> Result<()> {
    let carriers = carrier_repo(db);
    let quotes = quote_repo(db);

    match command {
        QuoteCommands::New {
            supplier,
            invoice,
            order,
            weight,
            volumes,
            cubage,
            date,
            freights,
            winner,
        } => {
            let mut session = QuoteSession::new(
                date.unwrap_or_else(|| Local::now().date_naive()),
                carriers.find_all()?,
            );
            session.supplier = supplier;
            session.order_number = order;
            session.set_invoice_value(parse_money(&invoice));
            session.weight_kg = parse_optional_amount(weight.as_deref());
            session.volume_count = volumes;
            session.cubage_m3 = parse_optional_amount(cubage.as_deref());

            for spec in &freights {
                let (name, value) = parse_freight_spec(spec)?;
                let carrier_id = resolve_carrier(session.carriers(), &name)?.id;
                session.set_freight(carrier_id, value)?;
            }
            if let Some(ref name) = winner {
                let carrier_id = resolve_carrier(session.carriers(), name)?.id;
                session.select_carrier(carrier_id)?;
            }

            output::print_session_rows(format, &session.rows(), session.invoice_value())?;

            let id = quoting::save_session(&quotes, &session)?;
            println!("\nQuote #{id} saved");
            Ok(())
        }

        QuoteCommands::List {
            from,
            to,
            supplier,
            carrier,
            export,
            output: output_path,
        } => {
            let filter = QuoteFilter {
                date_from: from,
                date_to: to,
                supplier_contains: supplier,
                carrier_contains: carrier,
            };
            let rows = quotes.list(&filter)?;

            if export {
                let path = output_path.unwrap_or_else(|| {
                    PathBuf::from(list_export_filename(Local::now().naive_local()))
                });
                export_quote_list(&rows, &path)?;
                println!("Exported {} quote(s) to {}", rows.len(), path.display());
                return Ok(());
            }
            output::print_quote_list(format, &rows)
        }

        QuoteCommands::Show {
            id,
            export,
            output: output_path,
        } => {
            let detail = quotes.detail(id)?.ok_or(Error::QuoteNotFound(id))?;

            if export {
                let path = output_path.unwrap_or_else(|| {
                    PathBuf::from(detail_export_filename(id, Local::now().naive_local()))
                });
                export_quote_detail(&detail, &path)?;
                println!("Exported quote #{id} to {}", path.display());
                return Ok(());
            }
            output::print_quote_detail(format, &detail)
        }

        QuoteCommands::Edit {
            id,
            supplier,
            invoice,
            order,
            weight,
            volumes,
            cubage,
            date,
            freights,
            winner,
            no_winner,
        } => {
            let current = quotes.detail(id)?.ok_or(Error::QuoteNotFound(id))?;

            let mut session =
                QuoteSession::new(date.unwrap_or(current.header.date), carriers.find_all()?);
            session.supplier = supplier.unwrap_or(current.header.supplier);
            session.order_number = order.or(current.header.order_number);
            session.set_invoice_value(
                invoice
                    .as_deref()
                    .map(parse_money)
                    .unwrap_or(current.header.invoice_value),
            );
            session.weight_kg = parse_optional_amount(weight.as_deref()).or(current.header.weight_kg);
            session.volume_count = volumes.or(current.header.volume_count);
            session.cubage_m3 = parse_optional_amount(cubage.as_deref()).or(current.header.cubage_m3);

            // Start from the stored candidates; the default carrier's fee
            // is re-derived from the invoice value
            for candidate in &current.candidates {
                if !is_default_carrier(&candidate.carrier_name) {
                    session.set_freight(candidate.carrier_id, candidate.freight_value)?;
                }
            }
            for spec in &freights {
                let (name, value) = parse_freight_spec(spec)?;
                let carrier_id = resolve_carrier(session.carriers(), &name)?.id;
                session.set_freight(carrier_id, value)?;
            }

            if no_winner {
                session.clear_selection();
            } else if let Some(ref name) = winner {
                let carrier_id = resolve_carrier(session.carriers(), name)?.id;
                session.select_carrier(carrier_id)?;
            } else if let Some(winner_id) = current.header.winner_carrier_id {
                // Keep the stored winner unless that carrier is gone
                let _ = session.select_carrier(winner_id);
            }

            quoting::update_from_session(&quotes, id, &session)?;
            println!("Quote #{id} updated");

            let updated = quotes.detail(id)?.ok_or(Error::QuoteNotFound(id))?;
            output::print_quote_detail(format, &updated)
        }

        QuoteCommands::Remove { id, yes } => {
            // Make sure it exists before prompting
            quotes.detail(id)?.ok_or(Error::QuoteNotFound(id))?;

            if !yes {
                let prompt = format!("Type 'SIM' to confirm deleting quote #{id}:");
                if !confirm_with_sim(&prompt)? {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            quotes.delete(id)?;
            println!("Quote #{id} deleted");
            Ok(())
        }
    }
}

fn cubage_command(
    db: &Db,
    format: OutputFormat,
    boxes: &[String],
    unit: DimensionUnit,
    save: bool,
) -> Result<()> {
    let lines = boxes
        .iter()
        .map(|spec| parse_box_spec(spec))
        .collect::<Result<Vec<_>>>()?;

    let (items, total_m3) = compute_cubage(&lines, unit);
    output::print_cubage(format, &items, total_m3)?;

    if save {
        let id = cubage_repo(db).save(&items, total_m3)?;
        println!("Calculation #{id} saved");
    }
    Ok(())
}

/// Parse one "QTYxWIDTHxLENGTHxHEIGHT" box argument. Each part goes
/// through the shared money parser, so "2x50,5x40x30" works.
fn parse_box_spec(spec: &str) -> Result<CubageLine> {
    let parts: Vec<&str> = spec.split('x').collect();
    if parts.len() != 4 {
        return Err(Error::InvalidArgument(format!(
            "expected QTYxWIDTHxLENGTHxHEIGHT, got \"{spec}\""
        )));
    }
    Ok(CubageLine {
        quantity: parse_money(parts[0]),
        width: parse_money(parts[1]),
        length: parse_money(parts[2]),
        height: parse_money(parts[3]),
    })
}

fn config_command(
    config: &mut Config,
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_format: Option<OutputFormat>,
) -> Result<()> {
    let mut changed = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        changed = true;
    }
    if let Some(format) = set_format {
        config.output_format = format;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved\n");
    }

    if show || !changed {
        print!("{config}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_freight_spec() {
        let (name, value) = parse_freight_spec("Transporte Azul=1.234,56").unwrap();
        assert_eq!(name, "Transporte Azul");
        assert!((value - 1234.56).abs() < 1e-9);

        assert!(parse_freight_spec("sem-igual").is_err());
        assert!(parse_freight_spec("=120").is_err());
    }

    #[test]
    fn test_parse_freight_spec_unparsable_value_is_zero() {
        let (_, value) = parse_freight_spec("Azul=abc").unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_parse_box_spec() {
        let line = parse_box_spec("2x50x40x30").unwrap();
        assert_eq!(line.quantity, 2.0);
        assert_eq!(line.height, 30.0);

        let line = parse_box_spec("1x50,5x40x30").unwrap();
        assert!((line.width - 50.5).abs() < 1e-9);

        assert!(parse_box_spec("2x50x40").is_err());
    }
}
