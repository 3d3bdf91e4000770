//! Immutable pricing dataset
//!
//! Holds the base vehicle table, the weight buckets and the combo list that
//! the engine reads. A dataset is never mutated after construction; callers
//! that need to reload share it behind an `Arc` and swap the whole value.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::{BaseVehicle, ComboOption, WeightBucket};
use crate::service::COMBO_WEIGHT_CEILING_KG;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingDataset {
    vehicles: Vec<BaseVehicle>,
    weight_buckets: Vec<WeightBucket>,
    combos: Vec<ComboOption>,
    #[serde(default)]
    container_vehicle_id: Option<String>,
}

/// Inconsistency found by [`PricingDataset::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetIssue {
    EmptyPriceTable { vehicle_id: String },
    InvalidPrice { vehicle_id: String, distance_km: u32, price: f64 },
    DuplicateVehicleId { vehicle_id: String },
    DuplicateSlabWeight { slab_weight_kg: f64 },
    InvertedBucket { index: usize },
    OverlappingBuckets { first: usize, second: usize },
    BucketWithoutVehicle { index: usize, slab_weight_kg: f64 },
    UnknownComboVehicle { combo_weight_kg: f64, vehicle_id: String },
    ComboWithoutOptions { combo_weight_kg: f64 },
    EmptyComboRealization { combo_weight_kg: f64, option: usize },
    ZeroCountComponent { combo_weight_kg: f64, option: usize, vehicle_id: String },
    ComboAboveCeiling { combo_weight_kg: f64 },
    UnknownContainer { vehicle_id: String },
}

impl DatasetIssue {
    /// Issues that make some requests unpriceable. Oversized combos are
    /// merely never eligible.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DatasetIssue::ComboAboveCeiling { .. })
    }
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetIssue::EmptyPriceTable { vehicle_id } => {
                write!(f, "vehicle {} has an empty price table", vehicle_id)
            }
            DatasetIssue::InvalidPrice {
                vehicle_id,
                distance_km,
                price,
            } => write!(
                f,
                "vehicle {} has invalid price {} at {} km",
                vehicle_id, price, distance_km
            ),
            DatasetIssue::DuplicateVehicleId { vehicle_id } => {
                write!(f, "vehicle id {} is defined more than once", vehicle_id)
            }
            DatasetIssue::DuplicateSlabWeight { slab_weight_kg } => {
                write!(f, "slab weight {} kg is used by more than one vehicle", slab_weight_kg)
            }
            DatasetIssue::InvertedBucket { index } => {
                write!(f, "weight bucket #{} has min greater than max", index)
            }
            DatasetIssue::OverlappingBuckets { first, second } => {
                write!(f, "weight buckets #{} and #{} overlap", first, second)
            }
            DatasetIssue::BucketWithoutVehicle {
                index,
                slab_weight_kg,
            } => write!(
                f,
                "weight bucket #{} maps to slab {} kg which has no vehicle",
                index, slab_weight_kg
            ),
            DatasetIssue::UnknownComboVehicle {
                combo_weight_kg,
                vehicle_id,
            } => write!(
                f,
                "combo {} kg references unknown vehicle {}",
                combo_weight_kg, vehicle_id
            ),
            DatasetIssue::ComboWithoutOptions { combo_weight_kg } => {
                write!(f, "combo {} kg has no options", combo_weight_kg)
            }
            DatasetIssue::EmptyComboRealization {
                combo_weight_kg,
                option,
            } => write!(
                f,
                "combo {} kg option #{} has no vehicles",
                combo_weight_kg, option
            ),
            DatasetIssue::ZeroCountComponent {
                combo_weight_kg,
                option,
                vehicle_id,
            } => write!(
                f,
                "combo {} kg option #{} uses vehicle {} zero times",
                combo_weight_kg, option, vehicle_id
            ),
            DatasetIssue::ComboAboveCeiling { combo_weight_kg } => write!(
                f,
                "combo {} kg exceeds the {} kg combo ceiling and is never eligible",
                combo_weight_kg, COMBO_WEIGHT_CEILING_KG
            ),
            DatasetIssue::UnknownContainer { vehicle_id } => {
                write!(f, "container vehicle {} is not defined", vehicle_id)
            }
        }
    }
}

impl PricingDataset {
    /// Builds a dataset without validating it
    pub fn new(
        vehicles: Vec<BaseVehicle>,
        weight_buckets: Vec<WeightBucket>,
        combos: Vec<ComboOption>,
    ) -> Self {
        Self {
            vehicles,
            weight_buckets,
            combos,
            container_vehicle_id: None,
        }
    }

    /// Designates the base vehicle used as the heavy-path container fallback
    pub fn with_container(mut self, vehicle_id: impl Into<String>) -> Self {
        self.container_vehicle_id = Some(vehicle_id.into());
        self
    }

    pub fn vehicles(&self) -> &[BaseVehicle] {
        &self.vehicles
    }

    /// Buckets in evaluation order
    pub fn weight_buckets(&self) -> &[WeightBucket] {
        &self.weight_buckets
    }

    /// Combos in evaluation order
    pub fn combos(&self) -> &[ComboOption] {
        &self.combos
    }

    pub fn container_vehicle_id(&self) -> Option<&str> {
        self.container_vehicle_id.as_deref()
    }

    pub fn vehicle_by_id(&self, vehicle_id: &str) -> Option<&BaseVehicle> {
        self.vehicles.iter().find(|v| v.vehicle_id == vehicle_id)
    }

    pub fn vehicle_by_slab_weight(&self, slab_weight_kg: f64) -> Option<&BaseVehicle> {
        self.vehicles
            .iter()
            .find(|v| v.slab_weight_kg == slab_weight_kg)
    }

    /// The container row, if one is designated and present
    pub fn container(&self) -> Option<&BaseVehicle> {
        self.container_vehicle_id
            .as_deref()
            .and_then(|id| self.vehicle_by_id(id))
    }

    /// Every distance breakpoint tabulated by any vehicle, ascending
    pub fn distance_slabs(&self) -> Vec<u32> {
        self.vehicles
            .iter()
            .flat_map(|v| v.prices.points().iter().map(|p| p.distance_km))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Checks the cross-references and bucket layout
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();

        let mut seen_ids = HashSet::new();
        let mut seen_slabs: Vec<f64> = Vec::new();
        for vehicle in &self.vehicles {
            if vehicle.prices.is_empty() {
                issues.push(DatasetIssue::EmptyPriceTable {
                    vehicle_id: vehicle.vehicle_id.clone(),
                });
            }
            for point in vehicle.prices.points() {
                if !point.price.is_finite() || point.price < 0.0 {
                    issues.push(DatasetIssue::InvalidPrice {
                        vehicle_id: vehicle.vehicle_id.clone(),
                        distance_km: point.distance_km,
                        price: point.price,
                    });
                }
            }
            if !seen_ids.insert(vehicle.vehicle_id.as_str()) {
                issues.push(DatasetIssue::DuplicateVehicleId {
                    vehicle_id: vehicle.vehicle_id.clone(),
                });
            }
            if seen_slabs.contains(&vehicle.slab_weight_kg) {
                issues.push(DatasetIssue::DuplicateSlabWeight {
                    slab_weight_kg: vehicle.slab_weight_kg,
                });
            } else {
                seen_slabs.push(vehicle.slab_weight_kg);
            }
        }

        for (index, bucket) in self.weight_buckets.iter().enumerate() {
            if bucket.min_kg > bucket.max_kg {
                issues.push(DatasetIssue::InvertedBucket { index });
            }
            if self.vehicle_by_slab_weight(bucket.slab_weight_kg).is_none() {
                issues.push(DatasetIssue::BucketWithoutVehicle {
                    index,
                    slab_weight_kg: bucket.slab_weight_kg,
                });
            }
            for (other, later) in self.weight_buckets.iter().enumerate().skip(index + 1) {
                if bucket.overlaps(later) {
                    issues.push(DatasetIssue::OverlappingBuckets {
                        first: index,
                        second: other,
                    });
                }
            }
        }

        for combo in &self.combos {
            if combo.options.is_empty() {
                issues.push(DatasetIssue::ComboWithoutOptions {
                    combo_weight_kg: combo.combo_weight_kg,
                });
            }
            if combo.combo_weight_kg > COMBO_WEIGHT_CEILING_KG {
                issues.push(DatasetIssue::ComboAboveCeiling {
                    combo_weight_kg: combo.combo_weight_kg,
                });
            }
            for (option, realization) in combo.options.iter().enumerate() {
                if realization.components.is_empty() {
                    issues.push(DatasetIssue::EmptyComboRealization {
                        combo_weight_kg: combo.combo_weight_kg,
                        option,
                    });
                }
                for component in realization.components.iter().filter(|c| c.count == 0) {
                    issues.push(DatasetIssue::ZeroCountComponent {
                        combo_weight_kg: combo.combo_weight_kg,
                        option,
                        vehicle_id: component.vehicle_id.clone(),
                    });
                }
            }
            for vehicle_id in combo.vehicle_ids() {
                if self.vehicle_by_id(vehicle_id).is_none() {
                    issues.push(DatasetIssue::UnknownComboVehicle {
                        combo_weight_kg: combo.combo_weight_kg,
                        vehicle_id: vehicle_id.to_string(),
                    });
                }
            }
        }

        if let Some(id) = &self.container_vehicle_id {
            if self.vehicle_by_id(id).is_none() {
                issues.push(DatasetIssue::UnknownContainer {
                    vehicle_id: id.clone(),
                });
            }
        }

        issues
    }
}
