//! File loaders for pricing datasets, rate matrices and shipment lists

pub mod dataset_file;
pub mod rate_matrix_csv;
pub mod shipment_csv;

pub use dataset_file::{check_dataset, load_dataset, parse_dataset_json, parse_dataset_toml};
pub use rate_matrix_csv::{load_rate_matrix, parse_rate_matrix};
pub use shipment_csv::{load_shipments, parse_shipments, Shipment};
