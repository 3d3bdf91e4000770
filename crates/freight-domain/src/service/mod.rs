//! Pricing engine services

pub mod chargeable_weight;
pub mod price_interpolator;
pub mod vehicle_selector;
pub mod weight_classifier;

pub use chargeable_weight::{
    chargeable_weight_kg, volumetric_weight_kg, DEFAULT_VOLUMETRIC_DIVISOR,
};
pub use price_interpolator::price_for_vehicle;
pub use vehicle_selector::{
    CandidatePlan, PlanSource, VehicleSelector, COMBO_WEIGHT_CEILING_KG,
    SINGLE_VEHICLE_MAX_SLAB_KG,
};
pub use weight_classifier::{get_slab_weight, MAX_BUCKET_GAP_KG};
