//! Domain model types

pub mod combo;
pub mod dataset;
pub mod vehicle;
pub mod weight_bucket;

pub use combo::{ComboComponent, ComboOption, ComboRealization};
pub use dataset::{DatasetIssue, PricingDataset};
pub use vehicle::{BaseVehicle, PricePoint, PriceTable};
pub use weight_bucket::WeightBucket;
