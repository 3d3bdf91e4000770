//! Distance pricing for a single vehicle
//!
//! Exact breakpoint hits return the tabulated price. Distances between two
//! breakpoints are interpolated linearly and rounded to the nearest whole
//! currency unit (`f64::round`, so x.5 rounds up for positive prices).
//! Distances outside the table clamp to the nearest breakpoint's price.

use freight_types::EngineError;

use crate::model::{BaseVehicle, PricePoint};

/// Price of one `vehicle` at `distance_km`
pub fn price_for_vehicle(vehicle: &BaseVehicle, distance_km: f64) -> Result<f64, EngineError> {
    if let Some(price) = vehicle.prices.exact(distance_km) {
        return Ok(price);
    }

    let points = vehicle.prices.points();
    if points.is_empty() {
        return Err(EngineError::EmptyPriceTable {
            vehicle_id: vehicle.vehicle_id.clone(),
        });
    }

    let idx = vehicle.prices.upper_index(distance_km);
    let lower = idx.checked_sub(1).map(|i| points[i]);
    let higher = points.get(idx).copied();

    match (lower, higher) {
        (Some(lo), Some(hi)) if lo.distance_km == hi.distance_km => Ok(lo.price),
        (Some(lo), Some(hi)) => Ok(interpolate(lo, hi, distance_km)),
        _ => Ok(nearest(points, distance_km).price),
    }
}

fn interpolate(lo: PricePoint, hi: PricePoint, distance_km: f64) -> f64 {
    let span = (hi.distance_km - lo.distance_km) as f64;
    let unit_rate = (hi.price - lo.price) / span;
    (lo.price + unit_rate * (distance_km - lo.distance_km as f64)).round()
}

fn nearest(points: &[PricePoint], distance_km: f64) -> PricePoint {
    // min_by keeps the first of equally distant points
    *points
        .iter()
        .min_by(|a, b| {
            let da = (a.distance_km as f64 - distance_km).abs();
            let db = (b.distance_km as f64 - distance_km).abs();
            da.total_cmp(&db)
        })
        .unwrap_or(&points[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceTable;
    use proptest::prelude::*;

    fn v10() -> BaseVehicle {
        BaseVehicle::new(
            "V10",
            "10T Truck",
            22.0,
            10000.0,
            PriceTable::new([(100, 5000.0), (200, 9000.0)]),
        )
    }

    fn wide() -> BaseVehicle {
        BaseVehicle::new(
            "V7",
            "19ft",
            19.0,
            7000.0,
            PriceTable::new([(50, 3000.0), (100, 4200.0), (300, 8100.0), (700, 15500.0)]),
        )
    }

    #[test]
    fn test_exact_match_returns_tabulated_price() {
        assert_eq!(price_for_vehicle(&v10(), 100.0).unwrap(), 5000.0);
        assert_eq!(price_for_vehicle(&v10(), 200.0).unwrap(), 9000.0);
        assert_eq!(price_for_vehicle(&wide(), 300.0).unwrap(), 8100.0);
    }

    #[test]
    fn test_exact_match_skips_rounding() {
        let vehicle = BaseVehicle::new("F", "F", 8.0, 1000.0, PriceTable::new([(10, 1234.56)]));
        assert_eq!(price_for_vehicle(&vehicle, 10.0).unwrap(), 1234.56);
    }

    #[test]
    fn test_midpoint_interpolation() {
        // 5000 + (9000 - 5000) / 100 * 50
        assert_eq!(price_for_vehicle(&v10(), 150.0).unwrap(), 7000.0);
    }

    #[test]
    fn test_interpolation_uses_nearest_breakpoints() {
        // between 100 (4200) and 300 (8100): 4200 + 19.5 * 100 = 6150
        assert_eq!(price_for_vehicle(&wide(), 200.0).unwrap(), 6150.0);
        // between 300 (8100) and 700 (15500): 8100 + 18.5 * 100 = 9950
        assert_eq!(price_for_vehicle(&wide(), 400.0).unwrap(), 9950.0);
    }

    #[test]
    fn test_interpolation_rounds_half_up() {
        let vehicle = BaseVehicle::new("R", "R", 8.0, 1000.0, PriceTable::new([(0, 100.0), (2, 101.0)]));
        // 100.5 -> 101
        assert_eq!(price_for_vehicle(&vehicle, 1.0).unwrap(), 101.0);

        let vehicle = BaseVehicle::new("R", "R", 8.0, 1000.0, PriceTable::new([(0, 100.0), (4, 101.0)]));
        // 100.25 -> 100, 100.75 -> 101
        assert_eq!(price_for_vehicle(&vehicle, 1.0).unwrap(), 100.0);
        assert_eq!(price_for_vehicle(&vehicle, 3.0).unwrap(), 101.0);
    }

    #[test]
    fn test_fractional_distance_interpolates() {
        // 5000 + 40 * 0.5 = 5020
        assert_eq!(price_for_vehicle(&v10(), 100.5).unwrap(), 5020.0);
    }

    #[test]
    fn test_clamps_below_table() {
        assert_eq!(price_for_vehicle(&v10(), 20.0).unwrap(), 5000.0);
        assert_eq!(price_for_vehicle(&v10(), 0.0).unwrap(), 5000.0);
    }

    #[test]
    fn test_clamps_above_table() {
        assert_eq!(price_for_vehicle(&v10(), 2500.0).unwrap(), 9000.0);
        assert_eq!(price_for_vehicle(&wide(), 701.0).unwrap(), 15500.0);
    }

    #[test]
    fn test_single_breakpoint_prices_every_distance() {
        let vehicle = BaseVehicle::new("S", "S", 32.0, 20000.0, PriceTable::new([(500, 30000.0)]));
        assert_eq!(price_for_vehicle(&vehicle, 1.0).unwrap(), 30000.0);
        assert_eq!(price_for_vehicle(&vehicle, 500.0).unwrap(), 30000.0);
        assert_eq!(price_for_vehicle(&vehicle, 9000.0).unwrap(), 30000.0);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let vehicle = BaseVehicle::new("E", "Empty", 14.0, 4000.0, PriceTable::default());
        let err = price_for_vehicle(&vehicle, 100.0).unwrap_err();
        assert_eq!(
            err,
            EngineError::EmptyPriceTable {
                vehicle_id: "E".to_string()
            }
        );
    }

    proptest! {
        #[test]
        fn prop_interpolated_price_stays_between_neighbours(d in 50.0f64..700.0) {
            let vehicle = wide();
            let price = price_for_vehicle(&vehicle, d).unwrap();
            let points = vehicle.prices.points();
            let idx = vehicle.prices.upper_index(d);
            let lo = points[idx - 1];
            let hi = points.get(idx).copied().unwrap_or(lo);
            let (min, max) = if lo.price <= hi.price { (lo.price, hi.price) } else { (hi.price, lo.price) };
            prop_assert!(price >= min && price <= max);
        }

        #[test]
        fn prop_outside_table_clamps(d in 0.0f64..50.0, far in 700.0f64..5000.0) {
            let vehicle = wide();
            prop_assert_eq!(price_for_vehicle(&vehicle, d).unwrap(), 3000.0);
            prop_assert_eq!(price_for_vehicle(&vehicle, far).unwrap(), 15500.0);
        }

        #[test]
        fn prop_price_is_monotonic_for_rising_table(a in 50.0f64..700.0, b in 50.0f64..700.0) {
            let vehicle = wide();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(price_for_vehicle(&vehicle, near).unwrap() <= price_for_vehicle(&vehicle, far).unwrap());
        }
    }
}
