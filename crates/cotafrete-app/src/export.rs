//! Excel export of the quote history and single-quote comparisons

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use cotafrete_domain::model::{QuoteDetail, QuoteSummary};
use cotafrete_types::{Error, Result};

/// Default filename for a filtered history export
pub fn list_export_filename(now: NaiveDateTime) -> String {
    format!("cotacoes_export_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Default filename for a single-quote export
pub fn detail_export_filename(quote_id: i64, now: NaiveDateTime) -> String {
    format!("cotacao_{}_{}.xlsx", quote_id, now.format("%Y%m%d_%H%M%S"))
}

/// Export a filtered quote listing to one worksheet
pub fn export_quote_list(quotes: &[QuoteSummary], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_list_sheet(sheet, quotes)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

/// Export one quote plus its candidate comparison table (cheapest first)
pub fn export_quote_detail(detail: &QuoteDetail, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let quote_sheet = workbook.add_worksheet();
    write_quote_sheet(quote_sheet, detail)?;

    let carriers_sheet = workbook.add_worksheet();
    write_carriers_sheet(carriers_sheet, detail)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_list_sheet(sheet: &mut Worksheet, quotes: &[QuoteSummary]) -> Result<()> {
    sheet
        .set_name("Cotações")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    let headers = [
        "ID",
        "Data",
        "Fornecedor",
        "Valor NF",
        "Peso (kg)",
        "Volumes",
        "Cubagem (m³)",
        "Transportadora Ganhadora",
        "Frete",
        "% do Frete",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, quote) in quotes.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_number(row, 0, quote.id as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, quote.date.format("%d/%m/%Y").to_string())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &quote.supplier)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 3, quote.invoice_value)
            .map_err(|e| Error::Excel(e.to_string()))?;

        if let Some(weight) = quote.weight_kg {
            sheet
                .write_number(row, 4, weight)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        if let Some(volumes) = quote.volume_count {
            sheet
                .write_number(row, 5, volumes as f64)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        if let Some(cubage) = quote.cubage_m3 {
            sheet
                .write_number(row, 6, cubage)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        if let Some(ref winner) = quote.winner_name {
            sheet
                .write_string(row, 7, winner)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        if let Some(freight) = quote.winner_freight {
            sheet
                .write_number(row, 8, freight)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        if let Some(percent) = quote.winner_percent() {
            sheet
                .write_number(row, 9, percent)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_quote_sheet(sheet: &mut Worksheet, detail: &QuoteDetail) -> Result<()> {
    sheet
        .set_name("Cotação")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let header = &detail.header;

    sheet
        .write_string_with_format(0, 0, format!("Cotação #{}", detail.id), &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let mut row = 2;
    let mut write_pair = |r: u32, label: &str, value: String| -> Result<()> {
        sheet
            .write_string(r, 0, label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(r, 1, value)
            .map_err(|e| Error::Excel(e.to_string()))?;
        Ok(())
    };

    write_pair(row, "Data:", header.date.format("%d/%m/%Y").to_string())?;
    row += 1;
    write_pair(row, "Fornecedor:", header.supplier.clone())?;
    row += 1;
    write_pair(
        row,
        "Pedido:",
        header.order_number.clone().unwrap_or_else(|| "-".to_string()),
    )?;
    row += 1;
    write_pair(row, "Valor NF:", format!("{:.2}", header.invoice_value))?;
    row += 1;
    write_pair(
        row,
        "Peso (kg):",
        header.weight_kg.map_or_else(|| "-".to_string(), |w| format!("{w:.3}")),
    )?;
    row += 1;
    write_pair(
        row,
        "Volumes:",
        header.volume_count.map_or_else(|| "-".to_string(), |v| v.to_string()),
    )?;
    row += 1;
    write_pair(
        row,
        "Cubagem (m³):",
        header.cubage_m3.map_or_else(|| "-".to_string(), |c| format!("{c:.3}")),
    )?;
    row += 1;
    write_pair(
        row,
        "Transportadora Ganhadora:",
        detail.winner_name.clone().unwrap_or_else(|| "Nenhuma".to_string()),
    )?;

    Ok(())
}

fn write_carriers_sheet(sheet: &mut Worksheet, detail: &QuoteDetail) -> Result<()> {
    sheet
        .set_name("Transportadoras")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    let headers = ["Transportadora", "Valor Frete", "Selecionada", "% da NF"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, candidate) in detail.candidates.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, &candidate.carrier_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 1, candidate.freight_value)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, if candidate.selected { "Sim" } else { "Não" })
            .map_err(|e| Error::Excel(e.to_string()))?;
        if let Some(percent) = candidate.percent {
            sheet
                .write_number(row, 3, percent)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    Ok(())
}
