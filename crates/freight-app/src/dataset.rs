//! Dataset resolution from config and command-line overrides

use std::path::Path;

use freight_domain::PricingDataset;
use freight_infra::{check_dataset, load_dataset, load_rate_matrix};
use freight_types::Result;
use tracing::info;

use crate::config::Config;
use crate::constants::builtin_dataset;

/// Dataset named by `override_path`, else the configured one, else built-in.
/// A configured rate matrix then replaces the vehicle price tables.
pub fn resolve_dataset(config: &Config, override_path: Option<&Path>) -> Result<PricingDataset> {
    let dataset = match override_path.or(config.dataset_path.as_deref()) {
        Some(path) => load_dataset(path)?,
        None => builtin_dataset(),
    };

    match &config.rate_matrix_path {
        Some(matrix) => apply_rate_matrix(dataset, matrix),
        None => Ok(dataset),
    }
}

/// Rebuild `dataset` with the vehicles of a rate matrix CSV, keeping its
/// buckets, combos and container designation
pub fn apply_rate_matrix(dataset: PricingDataset, matrix_path: &Path) -> Result<PricingDataset> {
    let vehicles = load_rate_matrix(matrix_path)?;
    info!(
        path = %matrix_path.display(),
        vehicles = vehicles.len(),
        "applied rate matrix"
    );

    let mut rebuilt = PricingDataset::new(
        vehicles,
        dataset.weight_buckets().to_vec(),
        dataset.combos().to_vec(),
    );
    if let Some(id) = dataset.container_vehicle_id() {
        rebuilt = rebuilt.with_container(id);
    }
    check_dataset(&rebuilt)?;
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_builtin() {
        let dataset = resolve_dataset(&Config::default(), None).unwrap();
        assert_eq!(dataset, builtin_dataset());
    }

    #[test]
    fn test_override_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.json");
        std::fs::write(
            &path,
            r#"{"vehicles":[{"vehicle_id":"V1","label":"Ace","length_ft":7,"slab_weight_kg":1000,"prices":{"100":2000}}],
                "weight_buckets":[{"min_kg":0,"max_kg":1000,"slab_weight_kg":1000}]}"#,
        )
        .unwrap();
        let config = Config {
            dataset_path: Some(dir.path().join("ignored.toml")),
            ..Config::default()
        };
        let dataset = resolve_dataset(&config, Some(&path)).unwrap();
        assert_eq!(dataset.vehicles().len(), 1);
    }

    #[test]
    fn test_configured_missing_dataset_fails() {
        let config = Config {
            dataset_path: Some("/nonexistent/rates.toml".into()),
            ..Config::default()
        };
        assert!(matches!(resolve_dataset(&config, None), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_rate_matrix_replaces_prices() {
        let dir = tempdir().unwrap();
        let matrix = dir.path().join("matrix.csv");
        let mut csv = String::from("vehicle_id,label,length_ft,slab_weight_kg,100,1000\n");
        for v in builtin_dataset().vehicles() {
            csv.push_str(&format!(
                "{},{},{},{},1000,10000\n",
                v.vehicle_id, v.label, v.length_ft, v.slab_weight_kg
            ));
        }
        std::fs::write(&matrix, csv).unwrap();

        let config = Config {
            rate_matrix_path: Some(matrix),
            ..Config::default()
        };
        let dataset = resolve_dataset(&config, None).unwrap();
        assert_eq!(dataset.distance_slabs(), vec![100, 1000]);
        assert_eq!(dataset.combos().len(), builtin_dataset().combos().len());
        assert!(dataset.container().is_some());
    }

    #[test]
    fn test_rate_matrix_missing_vehicle_is_rejected() {
        let dir = tempdir().unwrap();
        let matrix = dir.path().join("matrix.csv");
        std::fs::write(
            &matrix,
            "vehicle_id,label,length_ft,slab_weight_kg,100\nace_7ft,7 ft Tata Ace,7,1000,2000\n",
        )
        .unwrap();
        let err = apply_rate_matrix(builtin_dataset(), &matrix).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
