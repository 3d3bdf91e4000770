//! Pricing dataset files (TOML or JSON)
//!
//! Expected layout (TOML shown, JSON uses the same keys):
//!
//! ```toml
//! container_vehicle_id = "C32"
//!
//! [[vehicles]]
//! vehicle_id = "V10"
//! label = "22 ft Taurus"
//! length_ft = 22.0
//! slab_weight_kg = 10000.0
//! prices = { "100" = 5000.0, "200" = 9000.0 }
//!
//! [[weight_buckets]]
//! min_kg = 9001.0
//! max_kg = 10000.0
//! slab_weight_kg = 10000.0
//!
//! [[combos]]
//! combo_weight_kg = 16000.0
//! options = [[{ vehicle_id = "V10", count = 2 }]]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use freight_domain::{
    BaseVehicle, ComboComponent, ComboOption, ComboRealization, PriceTable, PricingDataset,
    WeightBucket,
};
use freight_types::{Error, Result};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    container_vehicle_id: Option<String>,
    vehicles: Vec<VehicleRow>,
    weight_buckets: Vec<WeightBucket>,
    #[serde(default)]
    combos: Vec<ComboRow>,
}

#[derive(Debug, Deserialize)]
struct VehicleRow {
    vehicle_id: String,
    label: String,
    #[serde(default)]
    length_ft: f64,
    slab_weight_kg: f64,
    /// Distance in km (as a string key) to price
    prices: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct ComboRow {
    combo_weight_kg: f64,
    options: Vec<Vec<ComboComponent>>,
}

/// Load a dataset file, picking the format from the extension
pub fn load_dataset(path: &Path) -> Result<PricingDataset> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let dataset = match extension.as_deref() {
        Some("toml") => parse_dataset_toml(&content)?,
        Some("json") => parse_dataset_json(&content)?,
        other => {
            return Err(Error::Dataset(format!(
                "unsupported dataset format: {}",
                other.unwrap_or("(none)")
            )))
        }
    };

    info!(
        path = %path.display(),
        vehicles = dataset.vehicles().len(),
        combos = dataset.combos().len(),
        "loaded pricing dataset"
    );
    Ok(dataset)
}

pub fn parse_dataset_toml(content: &str) -> Result<PricingDataset> {
    let file: DatasetFile = toml::from_str(content)?;
    build_dataset(file)
}

pub fn parse_dataset_json(content: &str) -> Result<PricingDataset> {
    let file: DatasetFile = serde_json::from_str(content)?;
    build_dataset(file)
}

fn build_dataset(file: DatasetFile) -> Result<PricingDataset> {
    let mut vehicles = Vec::with_capacity(file.vehicles.len());
    for row in file.vehicles {
        let mut entries = Vec::with_capacity(row.prices.len());
        for (key, price) in &row.prices {
            let distance_km = parse_distance_key(key).ok_or_else(|| {
                Error::Dataset(format!(
                    "vehicle {}: invalid distance key '{}'",
                    row.vehicle_id, key
                ))
            })?;
            entries.push((distance_km, *price));
        }
        vehicles.push(BaseVehicle::new(
            row.vehicle_id,
            row.label,
            row.length_ft,
            row.slab_weight_kg,
            PriceTable::new(entries),
        ));
    }

    let combos = file
        .combos
        .into_iter()
        .map(|row| {
            ComboOption::new(
                row.combo_weight_kg,
                row.options
                    .into_iter()
                    .map(|components| ComboRealization { components })
                    .collect(),
            )
        })
        .collect();

    let mut dataset = PricingDataset::new(vehicles, file.weight_buckets, combos);
    if let Some(id) = file.container_vehicle_id {
        dataset = dataset.with_container(id);
    }
    check_dataset(&dataset)?;
    Ok(dataset)
}

/// Reject datasets with fatal issues, log the rest
pub fn check_dataset(dataset: &PricingDataset) -> Result<()> {
    let issues = dataset.validate();
    for issue in issues.iter().filter(|i| !i.is_fatal()) {
        warn!("dataset: {}", issue);
    }
    let fatal: Vec<String> = issues
        .iter()
        .filter(|i| i.is_fatal())
        .map(|i| i.to_string())
        .collect();
    if fatal.is_empty() {
        Ok(())
    } else {
        Err(Error::Dataset(fatal.join("; ")))
    }
}

/// Accepts "100" and "100.0"; rejects fractions and negatives
fn parse_distance_key(key: &str) -> Option<u32> {
    let key = key.trim();
    if let Ok(km) = key.parse::<u32>() {
        return Some(km);
    }
    let value: f64 = key.parse().ok()?;
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
