//! Built-in Wheelseye rate card
//!
//! Full-truck-load rates (INR) for the standard vehicle tiers at the
//! tabulated distance breakpoints. The 32 ft container is not offered below
//! 100 km, so its table starts there.

use std::sync::{Arc, LazyLock};

use freight_domain::{
    BaseVehicle, ComboOption, ComboRealization, PriceTable, PricingDataset, WeightBucket,
};

/// Distance breakpoints (km) shared by the open-body vehicle tables
pub const DISTANCE_SLABS_KM: [u32; 10] = [50, 100, 200, 300, 500, 750, 1000, 1500, 2000, 2500];

pub const CONTAINER_VEHICLE_ID: &str = "mxl_32ft";

/// Shared built-in dataset
pub static WHEELSEYE_DATASET: LazyLock<Arc<PricingDataset>> =
    LazyLock::new(|| Arc::new(builtin_dataset()));

fn open_body(
    vehicle_id: &str,
    label: &str,
    length_ft: f64,
    slab_weight_kg: f64,
    prices: [f64; 10],
) -> BaseVehicle {
    BaseVehicle::new(
        vehicle_id,
        label,
        length_ft,
        slab_weight_kg,
        PriceTable::new(DISTANCE_SLABS_KM.into_iter().zip(prices)),
    )
}

fn combo(combo_weight_kg: f64, options: &[&[(&str, u32)]]) -> ComboOption {
    ComboOption::new(
        combo_weight_kg,
        options
            .iter()
            .map(|parts| ComboRealization::new(parts.iter().copied()))
            .collect(),
    )
}

/// Build a fresh copy of the built-in dataset
pub fn builtin_dataset() -> PricingDataset {
    let vehicles = vec![
        open_body("ace_7ft", "7 ft Tata Ace", 7.0, 1000.0, [
            1300.0, 1990.0, 3360.0, 4700.0, 7320.0, 10470.0, 13480.0, 19080.0, 24120.0, 28600.0,
        ]),
        open_body("pickup_8ft", "8 ft Pickup", 8.0, 1500.0, [
            1650.0, 2490.0, 4150.0, 5780.0, 8960.0, 12780.0, 16440.0, 23240.0, 29360.0, 34800.0,
        ]),
        open_body("pickup_10ft", "10 ft Pickup", 10.0, 2500.0, [
            2000.0, 2980.0, 4940.0, 6860.0, 10600.0, 15100.0, 19400.0, 27400.0, 34600.0, 41000.0,
        ]),
        open_body("canter_14ft", "14 ft Canter", 14.0, 4000.0, [
            2340.0, 3580.0, 6020.0, 8420.0, 13100.0, 18720.0, 24100.0, 34100.0, 43100.0, 51100.0,
        ]),
        open_body("canter_17ft", "17 ft Canter", 17.0, 5000.0, [
            2690.0, 4180.0, 7100.0, 9980.0, 15600.0, 22350.0, 28800.0, 40800.0, 51600.0, 61200.0,
        ]),
        open_body("eicher_19ft", "19 ft Eicher", 19.0, 7000.0, [
            3290.0, 5070.0, 8580.0, 12040.0, 18780.0, 26880.0, 34620.0, 49020.0, 61980.0, 73500.0,
        ]),
        open_body("sxl_20ft", "20 ft SXL", 20.0, 9000.0, [
            3790.0, 5770.0, 9670.0, 13510.0, 21000.0, 30000.0, 38600.0, 54600.0, 69000.0, 81800.0,
        ]),
        open_body("taurus_22ft", "22 ft Taurus", 22.0, 10000.0, [
            4240.0, 6460.0, 10860.0, 15180.0, 23600.0, 33720.0, 43400.0, 61400.0, 77600.0, 92000.0,
        ]),
        BaseVehicle::new(
            CONTAINER_VEHICLE_ID,
            "32 ft MXL Container",
            32.0,
            20000.0,
            PriceTable::new([
                (100, 14460.0),
                (200, 19820.0),
                (300, 25100.0),
                (500, 35400.0),
                (750, 47780.0),
                (1000, 59600.0),
                (1500, 81600.0),
                (2000, 101400.0),
                (2500, 119000.0),
            ]),
        ),
    ];

    let weight_buckets = vec![
        WeightBucket::new(0.0, 1000.0, 1000.0),
        WeightBucket::new(1001.0, 1500.0, 1500.0),
        WeightBucket::new(1501.0, 2500.0, 2500.0),
        WeightBucket::new(2501.0, 4000.0, 4000.0),
        WeightBucket::new(4001.0, 5000.0, 5000.0),
        WeightBucket::new(5001.0, 7000.0, 7000.0),
        WeightBucket::new(7001.0, 9000.0, 9000.0),
        WeightBucket::new(9001.0, 10000.0, 10000.0),
        WeightBucket::new(10001.0, 20000.0, 20000.0),
    ];

    // Listed order is the tie-break order.
    let combos = vec![
        combo(12000.0, &[
            &[("taurus_22ft", 1), ("pickup_10ft", 1)],
            &[("eicher_19ft", 1), ("canter_17ft", 1)],
        ]),
        combo(14000.0, &[
            &[("eicher_19ft", 2)],
            &[("taurus_22ft", 1), ("canter_14ft", 1)],
        ]),
        combo(16000.0, &[
            &[("sxl_20ft", 1), ("eicher_19ft", 1)],
            &[("taurus_22ft", 1), ("eicher_19ft", 1)],
        ]),
        combo(18000.0, &[
            &[("sxl_20ft", 2)],
            &[("taurus_22ft", 1), ("sxl_20ft", 1)],
            &[("eicher_19ft", 2), ("canter_14ft", 1)],
        ]),
    ];

    PricingDataset::new(vehicles, weight_buckets, combos).with_container(CONTAINER_VEHICLE_ID)
}
