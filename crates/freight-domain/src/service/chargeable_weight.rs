//! Chargeable weight resolution
//!
//! The engine prices a chargeable weight: the larger of the actual weight and
//! the volumetric weight of the consignment, rounded up to a whole kilogram
//! so it lands inside integer-bounded weight buckets.

/// Default volumetric divisor for surface freight (cm³ per kg)
pub const DEFAULT_VOLUMETRIC_DIVISOR: f64 = 5000.0;

/// Volumetric weight in kg from package dimensions in cm
pub fn volumetric_weight_kg(length_cm: f64, width_cm: f64, height_cm: f64, divisor: f64) -> f64 {
    if divisor <= 0.0 {
        return 0.0;
    }
    length_cm * width_cm * height_cm / divisor
}

/// `max(actual, volumetric)` rounded up to the next whole kg
pub fn chargeable_weight_kg(actual_weight_kg: f64, volumetric_weight_kg: f64) -> f64 {
    actual_weight_kg.max(volumetric_weight_kg).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumetric_weight() {
        // 200 x 150 x 100 cm / 5000 = 600 kg
        let w = volumetric_weight_kg(200.0, 150.0, 100.0, DEFAULT_VOLUMETRIC_DIVISOR);
        assert!((w - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_volumetric_weight_custom_divisor() {
        let w = volumetric_weight_kg(100.0, 100.0, 100.0, 4000.0);
        assert!((w - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_positive_divisor_yields_zero() {
        assert_eq!(volumetric_weight_kg(100.0, 100.0, 100.0, 0.0), 0.0);
        assert_eq!(volumetric_weight_kg(100.0, 100.0, 100.0, -5.0), 0.0);
    }

    #[test]
    fn test_chargeable_takes_heavier_and_rounds_up() {
        assert_eq!(chargeable_weight_kg(450.0, 600.0), 600.0);
        assert_eq!(chargeable_weight_kg(9500.0, 1200.0), 9500.0);
        assert_eq!(chargeable_weight_kg(1000.2, 0.0), 1001.0);
    }
}
