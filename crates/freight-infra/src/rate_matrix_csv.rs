//! Vehicle rate matrix CSV loader
//!
//! Header: `vehicle_id,label,length_ft,slab_weight_kg,<km>,<km>,...`
//! Each remaining column is one distance breakpoint; an empty cell means the
//! vehicle has no price at that breakpoint.

use std::path::Path;

use freight_domain::{BaseVehicle, PriceTable};
use freight_types::{Error, Result};

const FIXED_COLUMNS: [&str; 4] = ["vehicle_id", "label", "length_ft", "slab_weight_kg"];

pub fn load_rate_matrix(path: &Path) -> Result<Vec<BaseVehicle>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_rate_matrix(reader)
}

pub fn parse_rate_matrix(content: &str) -> Result<Vec<BaseVehicle>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    read_rate_matrix(reader)
}

fn read_rate_matrix<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<BaseVehicle>> {
    let headers = reader.headers()?.clone();
    for (idx, name) in FIXED_COLUMNS.iter().enumerate() {
        if headers.get(idx).map(|h| h.to_ascii_lowercase()) != Some(name.to_string()) {
            return Err(Error::Dataset(format!(
                "rate matrix column {} must be '{}'",
                idx + 1,
                name
            )));
        }
    }

    let mut distances = Vec::new();
    for header in headers.iter().skip(FIXED_COLUMNS.len()) {
        let km: u32 = header.parse().map_err(|_| {
            Error::Dataset(format!("rate matrix header '{}' is not a distance in km", header))
        })?;
        distances.push(km);
    }

    let mut vehicles = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        let row = row_idx + 2;
        let field = |i: usize| record.get(i).unwrap_or("");

        let length_ft = parse_number(field(2), row, "length_ft")?;
        let slab_weight_kg = parse_number(field(3), row, "slab_weight_kg")?;

        let mut prices = Vec::new();
        for (offset, km) in distances.iter().enumerate() {
            let cell = field(FIXED_COLUMNS.len() + offset);
            if cell.is_empty() {
                continue;
            }
            prices.push((*km, parse_number(cell, row, &km.to_string())?));
        }

        vehicles.push(BaseVehicle::new(
            field(0),
            field(1),
            length_ft,
            slab_weight_kg,
            PriceTable::new(prices),
        ));
    }
    Ok(vehicles)
}

fn parse_number(value: &str, row: usize, column: &str) -> Result<f64> {
    value.replace(',', "").parse().map_err(|_| {
        Error::Dataset(format!(
            "invalid number in row {}, column {}: '{}'",
            row, column, value
        ))
    })
}
