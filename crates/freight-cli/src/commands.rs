//! Command handlers

use std::path::{Path, PathBuf};
use std::sync::Arc;

use freight_app::app::{ProgressCallback, QuoteService};
use freight_app::config::Config;
use freight_app::dataset::resolve_dataset;
use freight_app::export::export_to_excel;
use freight_domain::{chargeable_weight_kg, volumetric_weight_kg, PricingDataset};
use freight_infra::load_shipments;
use freight_types::{EngineError, Error, OutputFormat, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::{Cli, Commands, DatasetAction, Dims};
use crate::output::{
    output_batch, output_candidates, output_dataset, output_issues, output_quote, output_slabs,
    QuoteInput,
};

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Quote {
            weight,
            distance,
            dims,
            divisor,
            explain,
        } => {
            let divisor = divisor.unwrap_or(config.volumetric_divisor);
            let dataset = resolve_dataset(&config, cli.dataset.as_deref())?;
            cmd_quote(dataset, *weight, *distance, *dims, divisor, *explain, output_format)
        }

        Commands::Batch {
            shipments,
            output,
            jobs,
        } => {
            let job_count = match jobs {
                Some(0) => num_cpus::get(),
                Some(n) => *n,
                None => config.resolved_jobs(num_cpus::get()),
            };
            let dataset = resolve_dataset(&config, cli.dataset.as_deref())?;
            cmd_batch(
                &cli,
                dataset,
                shipments,
                output.clone(),
                job_count,
                output_format,
            )
        }

        Commands::Dataset { action } => {
            let dataset = resolve_dataset(&config, cli.dataset.as_deref())?;
            cmd_dataset(&dataset, *action, output_format)
        }

        Commands::Config {
            show,
            set_dataset,
            clear_dataset,
            set_rate_matrix,
            clear_rate_matrix,
            set_output,
            set_divisor,
            set_jobs,
            reset,
        } => cmd_config(
            config,
            *show,
            set_dataset.clone(),
            *clear_dataset,
            set_rate_matrix.clone(),
            *clear_rate_matrix,
            *set_output,
            *set_divisor,
            *set_jobs,
            *reset,
        ),
    }
}

fn cmd_quote(
    dataset: PricingDataset,
    weight: f64,
    distance: f64,
    dims: Option<Dims>,
    divisor: f64,
    explain: bool,
    output_format: OutputFormat,
) -> Result<()> {
    if dims.is_some() {
        check_divisor(divisor)?;
    }
    let volumetric = dims.map(|d| volumetric_weight_kg(d.length_cm, d.width_cm, d.height_cm, divisor));
    let chargeable = match volumetric {
        Some(vol) => chargeable_weight_kg(weight, vol),
        None => weight,
    };

    let service = QuoteService::new(Arc::new(dataset));
    let result = service.quote(chargeable, distance)?;

    let input = QuoteInput {
        actual_weight_kg: weight,
        volumetric_weight_kg: volumetric,
        chargeable_weight_kg: chargeable,
        distance_km: distance,
    };

    if explain {
        let candidates = service.candidates(chargeable, distance)?;
        output_candidates(output_format, &candidates, &result)?;
        if output_format == OutputFormat::Json {
            return Ok(());
        }
    }
    output_quote(output_format, &input, &result)
}

fn cmd_batch(
    cli: &Cli,
    dataset: PricingDataset,
    shipments_path: &Path,
    output: Option<PathBuf>,
    jobs: usize,
    output_format: OutputFormat,
) -> Result<()> {
    let shipments = load_shipments(shipments_path)?;
    if shipments.is_empty() {
        return Err(Error::FileNotFound(format!(
            "No shipments found in {}",
            shipments_path.display()
        )));
    }

    if cli.verbose {
        eprintln!(
            "Found {} shipments to quote with {} parallel jobs",
            shipments.len(),
            jobs
        );
    }

    let pb = ProgressBar::new(shipments.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    let progress_pb = pb.clone();
    let progress: ProgressCallback = Box::new(move |done, _total| {
        progress_pb.set_position(done as u64);
    });

    let service = QuoteService::new(Arc::new(dataset));
    let batch = service.quote_batch(&shipments, jobs, Some(progress))?;
    pb.finish_with_message("done");

    match output {
        Some(path) if has_extension(&path, "xlsx") => {
            export_to_excel(&batch, &path)?;
            info!(path = %path.display(), "exported batch quotes");
            println!("Exported to: {}", path.display());
        }
        Some(path) => {
            let content = serde_json::to_string_pretty(&batch)?;
            std::fs::write(&path, content)?;
            println!("Results saved to: {}", path.display());
        }
        None => output_batch(output_format, &batch)?,
    }

    Ok(())
}

fn check_divisor(divisor: f64) -> Result<()> {
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "volumetric divisor must be positive, got {}",
            divisor
        ))
        .into());
    }
    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn cmd_dataset(
    dataset: &PricingDataset,
    action: DatasetAction,
    output_format: OutputFormat,
) -> Result<()> {
    match action {
        DatasetAction::Show => output_dataset(output_format, dataset),
        DatasetAction::Slabs => output_slabs(output_format, &dataset.distance_slabs()),
        DatasetAction::Validate => {
            let issues = dataset.validate();
            output_issues(output_format, &issues)?;
            let fatal = issues.iter().filter(|i| i.is_fatal()).count();
            if fatal > 0 {
                return Err(Error::Dataset(format!("{} fatal issue(s)", fatal)));
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: Config,
    show: bool,
    set_dataset: Option<PathBuf>,
    clear_dataset: bool,
    set_rate_matrix: Option<PathBuf>,
    clear_rate_matrix: bool,
    set_output: Option<OutputFormat>,
    set_divisor: Option<f64>,
    set_jobs: Option<usize>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut modified = false;

    if let Some(path) = set_dataset {
        // fail early on an unreadable or inconsistent file
        freight_infra::load_dataset(&path)?;
        config.dataset_path = Some(path);
        modified = true;
    }

    if clear_dataset {
        config.dataset_path = None;
        modified = true;
    }

    if let Some(path) = set_rate_matrix {
        freight_infra::load_rate_matrix(&path)?;
        config.rate_matrix_path = Some(path);
        modified = true;
    }

    if clear_rate_matrix {
        config.rate_matrix_path = None;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(divisor) = set_divisor {
        check_divisor(divisor)?;
        config.volumetric_divisor = divisor;
        modified = true;
    }

    if let Some(jobs) = set_jobs {
        config.batch_jobs = jobs;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
