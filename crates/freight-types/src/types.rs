//! Priced plan types returned by the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item of a priced vehicle plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineVehicleComponent {
    pub vehicle_id: String,
    pub label: String,
    pub length_ft: f64,
    pub slab_weight_kg: f64,
    pub count: u32,
    /// Unit price at the requested distance
    pub price_per_vehicle: f64,
    /// `price_per_vehicle * count`
    pub total_price: f64,
}

/// The vehicle plan chosen for one `(weight, distance)` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelseyeEngineResult {
    /// Slab weight (light path) or combo/container weight (heavy path)
    pub chosen_weight: f64,
    pub vehicles: Vec<EngineVehicleComponent>,
    pub total_price: f64,
}

impl WheelseyeEngineResult {
    /// Total number of physical vehicles in the plan
    pub fn vehicle_count(&self) -> u32 {
        self.vehicles.iter().map(|v| v.count).sum()
    }

    /// Short plan description, e.g. `2x 20ft SXL + 1x 17ft Canter`
    pub fn summary(&self) -> String {
        self.vehicles
            .iter()
            .map(|v| format!("{}x {}", v.count, v.label))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Result of quoting one shipment in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEntry {
    pub reference: String,
    pub weight_kg: f64,
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<WheelseyeEngineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Batch quoting results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuotes {
    pub entries: Vec<QuoteEntry>,
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
}

impl BatchQuotes {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            entries: Vec::new(),
            total_processed: 0,
            successful: 0,
            failed: 0,
            started_at,
        }
    }

    pub fn add(&mut self, entry: QuoteEntry) {
        self.total_processed += 1;
        if entry.result.is_some() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.entries.push(entry);
    }

    /// Sum of all successfully quoted plans
    pub fn grand_total(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref())
            .map(|r| r.total_price)
            .sum()
    }
}
