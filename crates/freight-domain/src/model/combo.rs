//! Multi-vehicle combo definitions for shipments above single-vehicle capacity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboComponent {
    pub vehicle_id: String,
    pub count: u32,
}

/// One way of realizing a combo, e.g. `2x 10T` or `1x 10T + 1x 6T`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboRealization {
    pub components: Vec<ComboComponent>,
}

impl ComboRealization {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            components: components
                .into_iter()
                .map(|(vehicle_id, count)| ComboComponent {
                    vehicle_id: vehicle_id.into(),
                    count,
                })
                .collect(),
        }
    }
}

/// A combo capacity together with its alternative realizations.
///
/// Realizations are evaluated in list order; on equal prices the earlier one
/// is quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboOption {
    pub combo_weight_kg: f64,
    pub options: Vec<ComboRealization>,
}

impl ComboOption {
    pub fn new(combo_weight_kg: f64, options: Vec<ComboRealization>) -> Self {
        Self {
            combo_weight_kg,
            options,
        }
    }

    /// Whether this combo may carry `chargeable_weight_kg` under `ceiling_kg`
    pub fn is_eligible(&self, chargeable_weight_kg: f64, ceiling_kg: f64) -> bool {
        self.combo_weight_kg >= chargeable_weight_kg && self.combo_weight_kg <= ceiling_kg
    }

    /// Every vehicle id referenced by any realization
    pub fn vehicle_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flat_map(|o| o.components.iter())
            .map(|c| c.vehicle_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_uses_both_bounds() {
        let combo = ComboOption::new(16000.0, vec![ComboRealization::new([("V10", 2)])]);
        assert!(combo.is_eligible(15000.0, 18000.0));
        assert!(combo.is_eligible(16000.0, 18000.0));
        assert!(!combo.is_eligible(16000.5, 18000.0));

        let oversized = ComboOption::new(20000.0, vec![ComboRealization::new([("V10", 2)])]);
        assert!(!oversized.is_eligible(15000.0, 18000.0));
    }

    #[test]
    fn test_vehicle_ids() {
        let combo = ComboOption::new(
            16000.0,
            vec![
                ComboRealization::new([("V10", 2)]),
                ComboRealization::new([("V10", 1), ("V6", 1)]),
            ],
        );
        let ids: Vec<&str> = combo.vehicle_ids().collect();
        assert_eq!(ids, vec!["V10", "V10", "V6"]);
    }
}
