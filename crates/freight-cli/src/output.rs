//! Output formatting module

use freight_domain::{CandidatePlan, DatasetIssue, PricingDataset};
use freight_types::{BatchQuotes, OutputFormat, Result, WheelseyeEngineResult};

/// Weights that went into a quote
pub struct QuoteInput {
    pub actual_weight_kg: f64,
    pub volumetric_weight_kg: Option<f64>,
    pub chargeable_weight_kg: f64,
    pub distance_km: f64,
}

pub fn output_quote(
    output_format: OutputFormat,
    input: &QuoteInput,
    result: &WheelseyeEngineResult,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nQuote");
    println!("=====");
    println!("Actual weight:     {:.0} kg", input.actual_weight_kg);
    if let Some(vol) = input.volumetric_weight_kg {
        println!("Volumetric weight: {:.1} kg", vol);
    }
    println!("Chargeable weight: {:.0} kg", input.chargeable_weight_kg);
    println!("Distance:          {} km", input.distance_km);
    println!("Chosen weight:     {:.0} kg", result.chosen_weight);

    println!("\n--- Vehicles ---");
    print_plan_lines(result);
    println!("----------------");
    println!("Total:             {:.0}", result.total_price);

    Ok(())
}

fn print_plan_lines(result: &WheelseyeEngineResult) {
    for v in &result.vehicles {
        println!(
            "{:>2} x {:<22} @ {:>9.0} = {:>10.0}",
            v.count, v.label, v.price_per_vehicle, v.total_price
        );
    }
}

/// Every candidate in evaluation order, marking the quoted one
pub fn output_candidates(
    output_format: OutputFormat,
    candidates: &[CandidatePlan],
    chosen: &WheelseyeEngineResult,
) -> Result<()> {
    let flags = chosen_flags(candidates, chosen);

    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&candidate_rows(candidates, &flags))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nCandidates");
    println!("==========");
    for (candidate, is_chosen) in candidates.iter().zip(&flags) {
        println!(
            "{} {:<24} {:>7.0} kg  {:>10.0}  {}",
            if *is_chosen { "*" } else { " " },
            candidate.source.label(),
            candidate.plan.chosen_weight,
            candidate.plan.total_price,
            candidate.plan.summary()
        );
    }

    Ok(())
}

/// Marks the first candidate equal to the quoted plan
fn chosen_flags(candidates: &[CandidatePlan], chosen: &WheelseyeEngineResult) -> Vec<bool> {
    let mut marked = false;
    candidates
        .iter()
        .map(|c| {
            let is_chosen = !marked && c.plan == *chosen;
            marked |= is_chosen;
            is_chosen
        })
        .collect()
}

fn candidate_rows(candidates: &[CandidatePlan], flags: &[bool]) -> Vec<serde_json::Value> {
    candidates
        .iter()
        .zip(flags)
        .map(|(c, is_chosen)| {
            serde_json::json!({
                "source": c.source.label(),
                "chosen": is_chosen,
                "plan": c.plan,
            })
        })
        .collect()
}

pub fn output_batch(output_format: OutputFormat, batch: &BatchQuotes) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(batch)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nBatch Quote Complete");
    println!("====================");
    println!("Total:       {}", batch.total_processed);
    println!("Quoted:      {}", batch.successful);
    println!("Failed:      {}", batch.failed);
    println!("Grand total: {:.0}", batch.grand_total());
    println!();

    println!(
        "{:<16} {:>9} {:>9} {:>10}  {}",
        "Reference", "Weight", "Distance", "Price", "Plan"
    );
    println!("{}", "-".repeat(80));
    for entry in &batch.entries {
        match (&entry.result, &entry.error) {
            (Some(result), _) => println!(
                "{:<16} {:>9.0} {:>9} {:>10.0}  {}",
                truncate(&entry.reference, 16),
                entry.weight_kg,
                entry.distance_km,
                result.total_price,
                result.summary()
            ),
            (None, error) => println!(
                "{:<16} {:>9.0} {:>9} {:>10}  {}",
                truncate(&entry.reference, 16),
                entry.weight_kg,
                entry.distance_km,
                "-",
                error.as_deref().unwrap_or("failed")
            ),
        }
    }

    Ok(())
}

pub fn output_dataset(output_format: OutputFormat, dataset: &PricingDataset) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(dataset)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nVehicles");
    println!("========");
    println!(
        "{:<14} {:<22} {:>6} {:>8} {:>7}",
        "ID", "Label", "Length", "Slab kg", "Points"
    );
    for v in dataset.vehicles() {
        let marker = if dataset.container_vehicle_id() == Some(v.vehicle_id.as_str()) {
            " (container)"
        } else {
            ""
        };
        println!(
            "{:<14} {:<22} {:>4.0}ft {:>8.0} {:>7}{}",
            v.vehicle_id,
            truncate(&v.label, 22),
            v.length_ft,
            v.slab_weight_kg,
            v.prices.len(),
            marker
        );
    }

    println!("\nWeight Buckets");
    println!("==============");
    for b in dataset.weight_buckets() {
        println!(
            "{:>8.0} - {:>8.0} kg -> {:.0} kg",
            b.min_kg, b.max_kg, b.slab_weight_kg
        );
    }

    println!("\nCombos");
    println!("======");
    for combo in dataset.combos() {
        println!("{:.0} kg", combo.combo_weight_kg);
        for (i, option) in combo.options.iter().enumerate() {
            let parts: Vec<String> = option
                .components
                .iter()
                .map(|c| format!("{}x {}", c.count, c.vehicle_id))
                .collect();
            println!("  #{} {}", i, parts.join(" + "));
        }
    }

    Ok(())
}

pub fn output_issues(output_format: OutputFormat, issues: &[DatasetIssue]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let rows: Vec<serde_json::Value> = issues
            .iter()
            .map(|i| {
                serde_json::json!({
                    "fatal": i.is_fatal(),
                    "message": i.to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("Dataset OK");
        return Ok(());
    }
    for issue in issues {
        let level = if issue.is_fatal() { "error" } else { "warning" };
        println!("{:<8} {}", level, issue);
    }
    Ok(())
}

pub fn output_slabs(output_format: OutputFormat, slabs: &[u32]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string(slabs)?);
    } else {
        let joined: Vec<String> = slabs.iter().map(|km| km.to_string()).collect();
        println!("{}", joined.join(", "));
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
