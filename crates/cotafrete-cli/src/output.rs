//! Output formatting module

use cotafrete_app::app::SessionRow;
use cotafrete_domain::model::{Carrier, CarrierContact, CubageItem, QuoteDetail, QuoteSummary};
use cotafrete_domain::service::format::format_percent;
use cotafrete_domain::service::money::format_money;
use cotafrete_types::{OutputFormat, Result};

pub fn print_carriers(format: OutputFormat, carriers: &[Carrier]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(carriers)?);
        return Ok(());
    }

    println!("{:<5} {:<30} {:<20}", "ID", "Name", "Tax id");
    println!("{}", "-".repeat(57));
    for carrier in carriers {
        println!(
            "{:<5} {:<30} {:<20}",
            carrier.id,
            carrier.name,
            carrier.tax_id.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} carrier(s)", carriers.len());
    Ok(())
}

pub fn print_carrier_detail(
    format: OutputFormat,
    carrier: &Carrier,
    contacts: &[CarrierContact],
) -> Result<()> {
    if format == OutputFormat::Json {
        let payload = serde_json::json!({
            "carrier": carrier,
            "contacts": contacts,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\nCarrier #{}", carrier.id);
    println!("================");
    println!("Name:        {}", carrier.name);
    println!("Tax id:      {}", carrier.tax_id.as_deref().unwrap_or("-"));
    if carrier.is_default() {
        println!("Base fee:    {}%", carrier.base_fee_percent);
        println!("ICMS:        {}%", carrier.tax_percent);
        println!("(default carrier, fee computed automatically)");
    }
    if let Some(created_at) = carrier.created_at {
        println!("Registered:  {}", created_at.format("%d/%m/%Y %H:%M"));
    }

    if contacts.is_empty() {
        println!("\nNo contacts");
    } else {
        println!("\nContacts:");
        for contact in contacts {
            let person = contact
                .person
                .as_deref()
                .map(|p| format!(" ({p})"))
                .unwrap_or_default();
            println!("  {:<6} {}{}", contact.kind.as_str(), contact.value, person);
        }
    }
    Ok(())
}

/// Carrier comparison table of a quote being entered
pub fn print_session_rows(
    format: OutputFormat,
    rows: &[SessionRow],
    invoice_value: f64,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!(
        "\n{:<30} {:>15} {:>10}  {}",
        "Carrier", "Freight", "% of NF", "Calculation"
    );
    println!("{}", "-".repeat(80));
    for row in rows {
        let name = if row.auto_priced {
            format!("{} (auto)", row.carrier_name)
        } else {
            row.carrier_name.clone()
        };
        let marker = if row.selected { " *" } else { "" };

        match (row.freight_value, row.percent) {
            (Some(freight), Some(percent)) => {
                let calculation = format!(
                    "({:.2} / {:.2}) x 100 = {:.2}%",
                    freight, invoice_value, percent
                )
                .replace('.', ",");
                println!(
                    "{:<30} {:>15} {:>10}  {}{}",
                    name,
                    format_money(freight),
                    format_percent(percent),
                    calculation,
                    marker
                );
            }
            _ => println!("{:<30} {:>15} {:>10}{}", name, "-", "-", marker),
        }
    }
    Ok(())
}

pub fn print_quote_list(format: OutputFormat, quotes: &[QuoteSummary]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(quotes)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<11} {:<25} {:>15} {:<20} {:>15} {:>9}",
        "ID", "Date", "Supplier", "Invoice", "Carrier", "Freight", "%"
    );
    println!("{}", "-".repeat(105));
    for quote in quotes {
        println!(
            "{:<5} {:<11} {:<25} {:>15} {:<20} {:>15} {:>9}",
            quote.id,
            quote.date.format("%d/%m/%Y"),
            quote.supplier,
            format_money(quote.invoice_value),
            quote.winner_name.as_deref().unwrap_or("Nenhuma"),
            quote
                .winner_freight
                .map(format_money)
                .unwrap_or_else(|| "-".to_string()),
            quote
                .winner_percent()
                .map(format_percent)
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!("\n{} quote(s)", quotes.len());
    Ok(())
}

pub fn print_quote_detail(format: OutputFormat, detail: &QuoteDetail) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(detail)?);
        return Ok(());
    }

    let header = &detail.header;
    println!("\nQuote #{}", detail.id);
    println!("================");
    println!("Date:        {}", header.date.format("%d/%m/%Y"));
    println!("Supplier:    {}", header.supplier);
    println!("Order:       {}", header.order_number.as_deref().unwrap_or("-"));
    println!("Invoice:     {}", format_money(header.invoice_value));
    if let Some(weight) = header.weight_kg {
        println!("Weight:      {} kg", format!("{weight:.3}").replace('.', ","));
    }
    if let Some(volumes) = header.volume_count {
        println!("Volumes:     {volumes}");
    }
    if let Some(cubage) = header.cubage_m3 {
        println!("Cubage:      {} m³", format!("{cubage:.3}").replace('.', ","));
    }
    println!(
        "Winner:      {}",
        detail.winner_name.as_deref().unwrap_or("Nenhuma")
    );

    println!(
        "\n{:<30} {:>15} {:>10} {:>12}",
        "Carrier", "Freight", "% of NF", "Selected"
    );
    println!("{}", "-".repeat(70));
    for candidate in &detail.candidates {
        println!(
            "{:<30} {:>15} {:>10} {:>12}",
            candidate.carrier_name,
            format_money(candidate.freight_value),
            candidate
                .percent
                .map(format_percent)
                .unwrap_or_else(|| "-".to_string()),
            if candidate.selected { "Sim" } else { "-" },
        );
    }
    Ok(())
}

pub fn print_cubage(
    format: OutputFormat,
    items: &[CubageItem],
    total_m3: f64,
) -> Result<()> {
    if format == OutputFormat::Json {
        let payload = serde_json::json!({
            "items": items,
            "total_m3": total_m3,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{:>8} {:>10} {:>10} {:>10} {:>12}",
        "Qty", "Width", "Length", "Height", "Volume (m³)"
    );
    println!("{}", "-".repeat(54));
    for item in items {
        println!(
            "{:>8} {:>10} {:>10} {:>10} {:>12.3}",
            item.quantity, item.width, item.length, item.height, item.volume_m3
        );
    }
    println!("{}", "-".repeat(54));
    println!("{:>40} {:>12.3}", "Total:", total_m3);
    Ok(())
}
