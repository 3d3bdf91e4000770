//! CLI definition using clap

use clap::{Parser, Subcommand};
use freight_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freight-rate")]
#[command(version)]
#[command(about = "Full-truck-load freight quotes from a distance-based rate card")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pricing dataset file (TOML or JSON). Overrides the configured dataset.
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Package dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dims {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

/// Parse `L,W,H` (cm)
pub fn parse_dims(s: &str) -> Result<Dims, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected L,W,H in cm, got '{}'", s));
    }
    let mut values = [0.0; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse::<f64>()
            .map_err(|_| format!("invalid dimension '{}'", part))?;
        if !value.is_finite() || *value < 0.0 {
            return Err(format!("invalid dimension '{}'", part));
        }
    }
    Ok(Dims {
        length_cm: values[0],
        width_cm: values[1],
        height_cm: values[2],
    })
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quote one shipment
    Quote {
        /// Actual weight in kg
        #[arg(long, short = 'w')]
        weight: f64,

        /// Distance in km
        #[arg(long, short = 'd')]
        distance: f64,

        /// Dimensions L,W,H in cm. Volumetric weight is charged when higher.
        #[arg(long, value_parser = parse_dims)]
        dims: Option<Dims>,

        /// Volumetric divisor (cm³ per kg). Uses config value if not specified.
        #[arg(long)]
        divisor: Option<f64>,

        /// List every candidate plan considered
        #[arg(long)]
        explain: bool,
    },

    /// Quote every shipment in a CSV file (reference,weight_kg,distance_km)
    Batch {
        /// Path to shipments CSV
        shipments: PathBuf,

        /// Output file for results (.json or .xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of worker threads. 0 = auto (CPU count). Uses config value if not specified.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
    },

    /// Inspect the active pricing dataset
    Dataset {
        #[command(subcommand)]
        action: DatasetAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set pricing dataset file
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// Use the built-in dataset
        #[arg(long)]
        clear_dataset: bool,

        /// Set rate matrix CSV
        #[arg(long)]
        set_rate_matrix: Option<PathBuf>,

        /// Stop applying a rate matrix
        #[arg(long)]
        clear_rate_matrix: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set volumetric divisor (cm³ per kg)
        #[arg(long)]
        set_divisor: Option<f64>,

        /// Set default batch worker count. 0 = CPU count.
        #[arg(long)]
        set_jobs: Option<usize>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum DatasetAction {
    /// Show vehicles, weight buckets and combos
    Show,
    /// Check the dataset for consistency issues
    Validate,
    /// List distance breakpoints
    Slabs,
}
