//! Quote use cases over a hot-swappable pricing dataset
//!
//! Each quote takes a snapshot (`Arc`) of the current dataset and prices
//! against it without holding the lock. `reload` swaps the whole dataset, so
//! quotes already in flight finish on the dataset they started with.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread;

use chrono::Utc;
use freight_domain::{CandidatePlan, PricingDataset, VehicleSelector};
use freight_infra::Shipment;
use freight_types::{BatchQuotes, EngineError, QuoteEntry, Result, WheelseyeEngineResult};
use tracing::{debug, info};

/// Progress callback invoked after each batch entry with (done, total)
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

pub struct QuoteService {
    dataset: RwLock<Arc<PricingDataset>>,
}

impl QuoteService {
    pub fn new(dataset: Arc<PricingDataset>) -> Self {
        Self {
            dataset: RwLock::new(dataset),
        }
    }

    /// Current dataset snapshot
    pub fn snapshot(&self) -> Arc<PricingDataset> {
        match self.dataset.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the dataset as a whole
    pub fn reload(&self, dataset: PricingDataset) {
        let dataset = Arc::new(dataset);
        match self.dataset.write() {
            Ok(mut guard) => *guard = dataset,
            Err(poisoned) => *poisoned.into_inner() = dataset,
        }
        info!("pricing dataset reloaded");
    }

    fn selector(&self) -> VehicleSelector {
        VehicleSelector::new(self.snapshot())
    }

    pub fn quote(
        &self,
        chargeable_weight_kg: f64,
        distance_km: f64,
    ) -> std::result::Result<WheelseyeEngineResult, EngineError> {
        self.selector()
            .compute_wheelseye_price(chargeable_weight_kg, distance_km)
    }

    /// Every plan considered for the request, in evaluation order
    pub fn candidates(
        &self,
        chargeable_weight_kg: f64,
        distance_km: f64,
    ) -> std::result::Result<Vec<CandidatePlan>, EngineError> {
        self.selector()
            .candidate_plans(chargeable_weight_kg, distance_km)
    }

    /// Quote a shipment list on `jobs` worker threads.
    ///
    /// Entries keep the input order. A failed quote is recorded on its entry
    /// and does not stop the batch.
    pub fn quote_batch(
        &self,
        shipments: &[Shipment],
        jobs: usize,
        progress: Option<ProgressCallback>,
    ) -> Result<BatchQuotes> {
        let started_at = Utc::now();
        let selector = self.selector();
        let total = shipments.len();
        let jobs = jobs.clamp(1, total.max(1));
        info!(shipments = total, jobs, "starting batch quote");

        let next = AtomicUsize::new(0);
        let done = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<QuoteEntry>>> = Mutex::new(vec![None; total]);

        thread::scope(|scope| {
            for _ in 0..jobs {
                scope.spawn(|| loop {
                    let idx = next.fetch_add(1, Ordering::SeqCst);
                    let Some(shipment) = shipments.get(idx) else {
                        break;
                    };
                    let entry = quote_entry(&selector, shipment);
                    store_entry(&slots, idx, entry);
                    let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(cb) = &progress {
                        cb(finished, total);
                    }
                });
            }
        });

        let slots = slots
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut batch = BatchQuotes::new(started_at);
        for entry in slots.into_iter().flatten() {
            batch.add(entry);
        }
        info!(
            successful = batch.successful,
            failed = batch.failed,
            "batch quote finished"
        );
        Ok(batch)
    }
}

/// Writes into the slot even if another worker panicked holding the lock
fn store_entry(slots: &Mutex<Vec<Option<QuoteEntry>>>, idx: usize, entry: QuoteEntry) {
    let mut slots = slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    slots[idx] = Some(entry);
}

fn quote_entry(selector: &VehicleSelector, shipment: &Shipment) -> QuoteEntry {
    let outcome = selector.compute_wheelseye_price(shipment.weight_kg, shipment.distance_km);
    if let Err(e) = &outcome {
        debug!(reference = %shipment.reference, error = %e, "quote failed");
    }
    let (result, error) = match outcome {
        Ok(result) => (Some(result), None),
        Err(e) => (None, Some(e.to_string())),
    };
    QuoteEntry {
        reference: shipment.reference.clone(),
        weight_kg: shipment.weight_kg,
        distance_km: shipment.distance_km,
        result,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{builtin_dataset, WHEELSEYE_DATASET};
    use freight_domain::{BaseVehicle, PriceTable, WeightBucket};

    fn shipment(reference: &str, weight_kg: f64, distance_km: f64) -> Shipment {
        Shipment {
            reference: reference.to_string(),
            weight_kg,
            distance_km,
        }
    }

    fn flat_dataset(price: f64) -> PricingDataset {
        PricingDataset::new(
            vec![BaseVehicle::new(
                "V1",
                "Flat",
                7.0,
                1000.0,
                PriceTable::new([(100, price)]),
            )],
            vec![WeightBucket::new(0.0, 1000.0, 1000.0)],
            vec![],
        )
    }

    #[test]
    fn test_quote_uses_dataset() {
        let service = QuoteService::new(WHEELSEYE_DATASET.clone());
        let result = service.quote(950.0, 120.0).unwrap();
        assert_eq!(result.total_price, 2264.0);
    }

    #[test]
    fn test_candidates_listed_in_order() {
        let service = QuoteService::new(Arc::new(builtin_dataset()));
        let candidates = service.candidates(17000.0, 300.0).unwrap();
        // three 18000 kg options, then the container
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[3].source, freight_domain::PlanSource::Container);
    }

    #[test]
    fn test_reload_swaps_whole_dataset() {
        let service = QuoteService::new(Arc::new(flat_dataset(1000.0)));
        let before = service.snapshot();
        assert_eq!(service.quote(500.0, 100.0).unwrap().total_price, 1000.0);

        service.reload(flat_dataset(2500.0));
        assert_eq!(service.quote(500.0, 100.0).unwrap().total_price, 2500.0);

        // a snapshot taken before the reload still prices against the old data
        let old = VehicleSelector::new(before);
        assert_eq!(old.compute_wheelseye_price(500.0, 100.0).unwrap().total_price, 1000.0);
    }

    #[test]
    fn test_batch_keeps_order_and_records_failures() {
        let service = QuoteService::new(Arc::new(builtin_dataset()));
        let shipments = vec![
            shipment("A", 950.0, 120.0),
            shipment("B", 25000.0, 100.0),
            shipment("C", 11000.0, 100.0),
            shipment("D", 6500.0, 650.0),
        ];
        let batch = service.quote_batch(&shipments, 3, None).unwrap();
        let refs: Vec<&str> = batch.entries.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["A", "B", "C", "D"]);
        assert_eq!(batch.successful, 3);
        assert_eq!(batch.failed, 1);
        assert!(batch.entries[1].error.as_ref().unwrap().contains("25000"));
        assert_eq!(batch.grand_total(), 2264.0 + 9250.0 + 23640.0);
    }

    #[test]
    fn test_batch_progress_reaches_total() {
        let service = QuoteService::new(Arc::new(builtin_dataset()));
        let shipments: Vec<Shipment> = (0..20)
            .map(|i| shipment(&format!("S{}", i), 500.0 + i as f64 * 100.0, 250.0))
            .collect();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_cb = Arc::clone(&seen);
        let cb: ProgressCallback = Box::new(move |done, total| {
            assert!(done <= total);
            seen_cb.fetch_max(done, Ordering::SeqCst);
        });
        let batch = service.quote_batch(&shipments, 4, Some(cb)).unwrap();
        assert_eq!(batch.total_processed, 20);
        assert_eq!(seen.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_batch_quotes_fractional_weights() {
        let service = QuoteService::new(Arc::new(builtin_dataset()));
        let shipments = vec![shipment("A", 1000.5, 300.0), shipment("B", 10000.5, 300.0)];
        let batch = service.quote_batch(&shipments, 2, None).unwrap();
        assert_eq!(batch.failed, 0);
        assert_eq!(batch.grand_total(), 5780.0 + 22020.0);
    }

    #[test]
    fn test_store_entry_survives_poisoned_lock() {
        let slots: Arc<Mutex<Vec<Option<QuoteEntry>>>> = Arc::new(Mutex::new(vec![None; 2]));
        let poisoner = Arc::clone(&slots);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("worker died");
        })
        .join();
        assert!(slots.is_poisoned());

        let selector = VehicleSelector::new(Arc::new(builtin_dataset()));
        store_entry(&slots, 1, quote_entry(&selector, &shipment("late", 950.0, 120.0)));

        let slots = slots.lock().unwrap_or_else(|p| p.into_inner());
        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_ref().unwrap().reference, "late");
    }

    #[test]
    fn test_empty_batch() {
        let service = QuoteService::new(Arc::new(builtin_dataset()));
        let batch = service.quote_batch(&[], 4, None).unwrap();
        assert_eq!(batch.total_processed, 0);
    }

    #[test]
    fn test_concurrent_quotes_match_sequential() {
        let service = Arc::new(QuoteService::new(Arc::new(builtin_dataset())));
        let expected = service.quote(15500.0, 300.0).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || service.quote(15500.0, 300.0).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert_eq!(expected.total_price, 25100.0);
    }
}
