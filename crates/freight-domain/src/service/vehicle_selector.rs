//! Cheapest vehicle plan selection
//!
//! Light shipments (slab weight up to [`SINGLE_VEHICLE_MAX_SLAB_KG`]) go on
//! the single base vehicle for their slab. Heavier shipments are quoted as
//! the cheapest of every eligible combo realization and the container
//! fallback.
//!
//! Tie-break: candidates are compared with a strict `<`, so on equal totals
//! the first one evaluated is quoted. Evaluation order is combos as listed in
//! the dataset, realizations as listed within each combo, container last.

use std::sync::Arc;

use freight_types::{EngineError, EngineVehicleComponent, WheelseyeEngineResult};
use tracing::debug;

use super::price_interpolator::price_for_vehicle;
use super::weight_classifier::get_slab_weight;
use crate::model::{BaseVehicle, ComboRealization, PricingDataset};

/// Largest slab weight served by one base vehicle
pub const SINGLE_VEHICLE_MAX_SLAB_KG: f64 = 10_000.0;

/// Combos above this capacity are never eligible
pub const COMBO_WEIGHT_CEILING_KG: f64 = 18_000.0;

/// Where a candidate plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    SingleVehicle,
    Combo { combo: usize, option: usize },
    Container,
}

impl PlanSource {
    pub fn label(&self) -> String {
        match self {
            PlanSource::SingleVehicle => "single".to_string(),
            PlanSource::Combo { combo, option } => format!("combo #{} option #{}", combo, option),
            PlanSource::Container => "container".to_string(),
        }
    }
}

/// One priced plan considered by the selector
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePlan {
    pub source: PlanSource,
    pub plan: WheelseyeEngineResult,
}

/// Prices shipments against one immutable dataset
#[derive(Debug, Clone)]
pub struct VehicleSelector {
    dataset: Arc<PricingDataset>,
}

impl VehicleSelector {
    pub fn new(dataset: Arc<PricingDataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &PricingDataset {
        &self.dataset
    }

    /// Cheapest plan for `chargeable_weight_kg` over `distance_km`
    pub fn compute_wheelseye_price(
        &self,
        chargeable_weight_kg: f64,
        distance_km: f64,
    ) -> Result<WheelseyeEngineResult, EngineError> {
        let candidates = self.candidate_plans(chargeable_weight_kg, distance_km)?;

        let mut best: Option<CandidatePlan> = None;
        for candidate in candidates {
            let better = match &best {
                Some(current) => candidate.plan.total_price < current.plan.total_price,
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }

        let best = best.ok_or(EngineError::NoCandidate {
            weight_kg: chargeable_weight_kg,
            distance_km,
        })?;
        debug!(
            weight_kg = chargeable_weight_kg,
            distance_km,
            source = %best.source.label(),
            total = best.plan.total_price,
            "selected plan"
        );
        Ok(best.plan)
    }

    /// Every plan the selector prices for this request, in evaluation order.
    ///
    /// The light path yields exactly one plan. The heavy path yields one plan
    /// per eligible combo realization followed by the container, and may be
    /// empty when neither exists.
    pub fn candidate_plans(
        &self,
        chargeable_weight_kg: f64,
        distance_km: f64,
    ) -> Result<Vec<CandidatePlan>, EngineError> {
        check_inputs(chargeable_weight_kg, distance_km)?;

        let slab_weight = get_slab_weight(self.dataset.weight_buckets(), chargeable_weight_kg)?;
        debug!(weight_kg = chargeable_weight_kg, slab_weight, "classified weight");

        if slab_weight <= SINGLE_VEHICLE_MAX_SLAB_KG {
            let vehicle = self
                .dataset
                .vehicle_by_slab_weight(slab_weight)
                .ok_or(EngineError::UnknownSlabWeight {
                    slab_weight_kg: slab_weight,
                })?;
            let component = price_component(vehicle, 1, distance_km)?;
            let total_price = component.total_price;
            return Ok(vec![CandidatePlan {
                source: PlanSource::SingleVehicle,
                plan: WheelseyeEngineResult {
                    chosen_weight: slab_weight,
                    vehicles: vec![component],
                    total_price,
                },
            }]);
        }

        let mut candidates = Vec::new();
        for (combo_idx, combo) in self.dataset.combos().iter().enumerate() {
            if !combo.is_eligible(chargeable_weight_kg, COMBO_WEIGHT_CEILING_KG) {
                continue;
            }
            for (option_idx, realization) in combo.options.iter().enumerate() {
                let plan = self.price_realization(combo.combo_weight_kg, realization, distance_km)?;
                debug!(
                    combo_weight = combo.combo_weight_kg,
                    option = option_idx,
                    total = plan.total_price,
                    "priced combo"
                );
                candidates.push(CandidatePlan {
                    source: PlanSource::Combo {
                        combo: combo_idx,
                        option: option_idx,
                    },
                    plan,
                });
            }
        }

        if let Some(container) = self.dataset.container() {
            let component = price_component(container, 1, distance_km)?;
            let total_price = component.total_price;
            debug!(total = total_price, "priced container");
            candidates.push(CandidatePlan {
                source: PlanSource::Container,
                plan: WheelseyeEngineResult {
                    chosen_weight: container.slab_weight_kg,
                    vehicles: vec![component],
                    total_price,
                },
            });
        }

        Ok(candidates)
    }

    fn price_realization(
        &self,
        combo_weight_kg: f64,
        realization: &ComboRealization,
        distance_km: f64,
    ) -> Result<WheelseyeEngineResult, EngineError> {
        let mut vehicles = Vec::with_capacity(realization.components.len());
        for part in &realization.components {
            let vehicle =
                self.dataset
                    .vehicle_by_id(&part.vehicle_id)
                    .ok_or_else(|| EngineError::UnknownVehicle {
                        vehicle_id: part.vehicle_id.clone(),
                    })?;
            vehicles.push(price_component(vehicle, part.count, distance_km)?);
        }
        let total_price = vehicles.iter().map(|v| v.total_price).sum();
        Ok(WheelseyeEngineResult {
            chosen_weight: combo_weight_kg,
            vehicles,
            total_price,
        })
    }
}

fn price_component(
    vehicle: &BaseVehicle,
    count: u32,
    distance_km: f64,
) -> Result<EngineVehicleComponent, EngineError> {
    let price_per_vehicle = price_for_vehicle(vehicle, distance_km)?;
    Ok(EngineVehicleComponent {
        vehicle_id: vehicle.vehicle_id.clone(),
        label: vehicle.label.clone(),
        length_ft: vehicle.length_ft,
        slab_weight_kg: vehicle.slab_weight_kg,
        count,
        price_per_vehicle,
        total_price: price_per_vehicle * count as f64,
    })
}

fn check_inputs(weight_kg: f64, distance_km: f64) -> Result<(), EngineError> {
    if !weight_kg.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "weight must be a finite number, got {}",
            weight_kg
        )));
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "distance must be a non-negative number, got {}",
            distance_km
        )));
    }
    Ok(())
}
