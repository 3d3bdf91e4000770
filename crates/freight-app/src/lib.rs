//! Application service layer - built-in rates, config, quoting, export

pub mod app;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod export;
