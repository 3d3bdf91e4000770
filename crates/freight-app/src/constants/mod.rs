//! Built-in pricing data

pub mod wheelseye_dataset;

pub use wheelseye_dataset::{
    builtin_dataset, CONTAINER_VEHICLE_ID, DISTANCE_SLABS_KM, WHEELSEYE_DATASET,
};
