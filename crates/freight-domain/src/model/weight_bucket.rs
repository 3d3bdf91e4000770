//! Weight bucket definition

use serde::{Deserialize, Serialize};

/// Inclusive weight range that classifies into one slab weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBucket {
    pub min_kg: f64,
    pub max_kg: f64,
    pub slab_weight_kg: f64,
}

impl WeightBucket {
    pub fn new(min_kg: f64, max_kg: f64, slab_weight_kg: f64) -> Self {
        Self {
            min_kg,
            max_kg,
            slab_weight_kg,
        }
    }

    /// Both ends inclusive
    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min_kg && weight_kg <= self.max_kg
    }

    pub fn overlaps(&self, other: &WeightBucket) -> bool {
        self.min_kg <= other.max_kg && other.min_kg <= self.max_kg
    }
}
