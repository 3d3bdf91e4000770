//! Shipment list CSV loader for batch quoting
//!
//! Columns: `reference,weight_kg,distance_km` with a header row.

use std::path::Path;

use freight_types::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub reference: String,
    /// Chargeable weight
    pub weight_kg: f64,
    pub distance_km: f64,
}

pub fn load_shipments(path: &Path) -> Result<Vec<Shipment>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_shipments(reader)
}

pub fn parse_shipments(content: &str) -> Result<Vec<Shipment>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    read_shipments(reader)
}

fn read_shipments<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Shipment>> {
    let mut shipments = Vec::new();
    for record in reader.deserialize() {
        shipments.push(record?);
    }
    Ok(shipments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shipments() {
        let content = "reference,weight_kg,distance_km\nLR-001, 950, 120\nLR-002,16000,740.5\n";
        let shipments = parse_shipments(content).unwrap();
        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[0].reference, "LR-001");
        assert_eq!(shipments[0].weight_kg, 950.0);
        assert_eq!(shipments[1].distance_km, 740.5);
    }

    #[test]
    fn test_bad_row_is_an_error() {
        let content = "reference,weight_kg,distance_km\nLR-001,heavy,120\n";
        assert!(matches!(parse_shipments(content), Err(Error::Csv(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_shipments(Path::new("/nonexistent/shipments.csv")),
            Err(Error::FileNotFound(_))
        ));
    }
}
