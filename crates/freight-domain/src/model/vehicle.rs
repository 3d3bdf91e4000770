//! Base vehicle tiers and their distance price tables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price of one vehicle at one tabulated distance breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub distance_km: u32,
    pub price: f64,
}

/// Distance breakpoints and prices for one vehicle, sorted by distance.
///
/// Breakpoints need not be contiguous or evenly spaced. Duplicate distances
/// collapse to the last price given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceTable {
    points: Vec<PricePoint>,
}

impl PriceTable {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let sorted: BTreeMap<u32, f64> = entries.into_iter().collect();
        Self {
            points: sorted
                .into_iter()
                .map(|(distance_km, price)| PricePoint { distance_km, price })
                .collect(),
        }
    }

    /// All breakpoints in ascending distance order
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Price tabulated at exactly `distance_km`, if any
    pub fn exact(&self, distance_km: f64) -> Option<f64> {
        let idx = self.upper_index(distance_km);
        idx.checked_sub(1)
            .map(|i| self.points[i])
            .filter(|p| p.distance_km as f64 == distance_km)
            .map(|p| p.price)
    }

    /// Index of the first breakpoint strictly beyond `distance_km`
    pub(crate) fn upper_index(&self, distance_km: f64) -> usize {
        self.points
            .partition_point(|p| (p.distance_km as f64) <= distance_km)
    }
}

impl From<Vec<PricePoint>> for PriceTable {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points.into_iter().map(|p| (p.distance_km, p.price)))
    }
}

impl From<PriceTable> for Vec<PricePoint> {
    fn from(table: PriceTable) -> Self {
        table.points
    }
}

/// One physical vehicle tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseVehicle {
    pub vehicle_id: String,
    pub label: String,
    /// Informational only
    pub length_ft: f64,
    /// Representative capacity; unique per vehicle and used as a lookup key
    pub slab_weight_kg: f64,
    pub prices: PriceTable,
}

impl BaseVehicle {
    pub fn new(
        vehicle_id: impl Into<String>,
        label: impl Into<String>,
        length_ft: f64,
        slab_weight_kg: f64,
        prices: PriceTable,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            label: label.into(),
            length_ft,
            slab_weight_kg,
            prices,
        }
    }
}
