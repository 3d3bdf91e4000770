//! Excel export functionality

use std::collections::BTreeMap;
use std::path::Path;

use freight_types::{BatchQuotes, Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export batch quotes to an Excel file with Summary and Details sheets
pub fn export_to_excel(batch: &BatchQuotes, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, batch)?;

    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, batch)?;

    workbook.save(output_path).map_err(excel_err)?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, batch: &BatchQuotes) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0");

    sheet
        .write_string_with_format(0, 0, "Freight Rate Batch Quote", &header_format)
        .map_err(excel_err)?;

    let counts = [
        ("Total Shipments:", batch.total_processed as f64),
        ("Quoted:", batch.successful as f64),
        ("Failed:", batch.failed as f64),
    ];

    sheet.write_string(2, 0, "Quoted At:").map_err(excel_err)?;
    sheet
        .write_string(2, 1, batch.started_at.to_rfc3339())
        .map_err(excel_err)?;

    for (i, (label, value)) in counts.iter().enumerate() {
        let row = 3 + i as u32;
        sheet.write_string(row, 0, *label).map_err(excel_err)?;
        sheet.write_number(row, 1, *value).map_err(excel_err)?;
    }

    sheet.write_string(6, 0, "Grand Total:").map_err(excel_err)?;
    sheet
        .write_number_with_format(6, 1, batch.grand_total(), &money_format)
        .map_err(excel_err)?;

    // Vehicle usage across quoted plans
    sheet
        .write_string_with_format(8, 0, "Vehicle Usage", &header_format)
        .map_err(excel_err)?;

    let mut usage: BTreeMap<&str, u32> = BTreeMap::new();
    for result in batch.entries.iter().filter_map(|e| e.result.as_ref()) {
        for component in &result.vehicles {
            *usage.entry(component.label.as_str()).or_insert(0) += component.count;
        }
    }

    let mut row = 9;
    for (label, count) in &usage {
        sheet.write_string(row, 0, *label).map_err(excel_err)?;
        sheet.write_number(row, 1, *count as f64).map_err(excel_err)?;
        row += 1;
    }

    sheet.set_column_width(0, 24).map_err(excel_err)?;
    sheet.set_column_width(1, 28).map_err(excel_err)?;

    Ok(())
}

fn write_details_sheet(sheet: &mut Worksheet, batch: &BatchQuotes) -> Result<()> {
    sheet.set_name("Details").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0");

    let headers = [
        "Reference",
        "Weight (kg)",
        "Distance (km)",
        "Chosen Weight (kg)",
        "Vehicles",
        "Vehicle Count",
        "Total Price",
        "Error",
    ];

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (row_idx, entry) in batch.entries.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet.write_string(row, 0, &entry.reference).map_err(excel_err)?;
        sheet.write_number(row, 1, entry.weight_kg).map_err(excel_err)?;
        sheet.write_number(row, 2, entry.distance_km).map_err(excel_err)?;

        if let Some(result) = &entry.result {
            sheet
                .write_number(row, 3, result.chosen_weight)
                .map_err(excel_err)?;
            sheet
                .write_string(row, 4, result.summary())
                .map_err(excel_err)?;
            sheet
                .write_number(row, 5, result.vehicle_count() as f64)
                .map_err(excel_err)?;
            sheet
                .write_number_with_format(row, 6, result.total_price, &money_format)
                .map_err(excel_err)?;
        }

        if let Some(error) = &entry.error {
            sheet.write_string(row, 7, error).map_err(excel_err)?;
        }
    }

    sheet.set_column_width(0, 16).map_err(excel_err)?;
    sheet.set_column_width(4, 40).map_err(excel_err)?;
    sheet.set_column_width(7, 50).map_err(excel_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use freight_types::{EngineVehicleComponent, QuoteEntry, WheelseyeEngineResult};
    use tempfile::tempdir;

    fn sample_batch() -> BatchQuotes {
        let mut batch = BatchQuotes::new(Utc::now());
        batch.add(QuoteEntry {
            reference: "LR-1".to_string(),
            weight_kg: 950.0,
            distance_km: 120.0,
            result: Some(WheelseyeEngineResult {
                chosen_weight: 1000.0,
                vehicles: vec![EngineVehicleComponent {
                    vehicle_id: "ace_7ft".to_string(),
                    label: "7 ft Tata Ace".to_string(),
                    length_ft: 7.0,
                    slab_weight_kg: 1000.0,
                    count: 1,
                    price_per_vehicle: 2264.0,
                    total_price: 2264.0,
                }],
                total_price: 2264.0,
            }),
            error: None,
        });
        batch.add(QuoteEntry {
            reference: "LR-2".to_string(),
            weight_kg: 25000.0,
            distance_km: 100.0,
            result: None,
            error: Some("No weight bucket for weight 25000 kg".to_string()),
        });
        batch
    }

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quotes.xlsx");
        export_to_excel(&sample_batch(), &path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let err = export_to_excel(&sample_batch(), Path::new("/nonexistent/dir/quotes.xlsx"))
            .unwrap_err();
        assert!(matches!(err, Error::Excel(_)));
    }
}
