//! Application Layer
//!
//! Orchestrates between the CLI and the domain/infrastructure layers.
//!
//! - `quote_service`: single and batch quoting over a reloadable dataset

pub mod quote_service;

pub use quote_service::{ProgressCallback, QuoteService};
