//! Freight pricing domain
//!
//! Dataset model (base vehicles, weight buckets, combos) and the pure pricing
//! engine built on top of it: slab classification, distance interpolation and
//! cheapest-plan selection.

pub mod model;
pub mod service;

pub use model::{
    BaseVehicle, ComboComponent, ComboOption, ComboRealization, DatasetIssue, PricePoint,
    PriceTable, PricingDataset, WeightBucket,
};
pub use service::{
    chargeable_weight_kg, get_slab_weight, price_for_vehicle, volumetric_weight_kg,
    CandidatePlan, PlanSource, VehicleSelector,
};
