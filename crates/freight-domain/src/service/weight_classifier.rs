//! Chargeable weight to slab weight classification

use freight_types::EngineError;

use crate::model::WeightBucket;

/// Widest gap between a bucket's max and the next bucket's min that still
/// counts as contiguous. Covers integer edges like `0–1000`, `1001–1500`.
pub const MAX_BUCKET_GAP_KG: f64 = 1.0;

/// Slab weight of the first bucket containing `weight_kg`.
///
/// A weight that falls between one bucket's max and the next listed bucket's
/// min, with at most [`MAX_BUCKET_GAP_KG`] between them, belongs to the next
/// bucket. The engine never clamps: a weight outside every bucket is an error.
pub fn get_slab_weight(buckets: &[WeightBucket], weight_kg: f64) -> Result<f64, EngineError> {
    let mut prev_max: Option<f64> = None;
    for bucket in buckets {
        if bucket.contains(weight_kg) || in_gap_below(prev_max, bucket, weight_kg) {
            return Ok(bucket.slab_weight_kg);
        }
        prev_max = Some(bucket.max_kg);
    }
    Err(EngineError::NoWeightBucket { weight_kg })
}

fn in_gap_below(prev_max: Option<f64>, bucket: &WeightBucket, weight_kg: f64) -> bool {
    match prev_max {
        Some(prev) => {
            weight_kg > prev
                && weight_kg < bucket.min_kg
                && bucket.min_kg - prev <= MAX_BUCKET_GAP_KG
                && weight_kg <= bucket.max_kg
        }
        None => false,
    }
}
