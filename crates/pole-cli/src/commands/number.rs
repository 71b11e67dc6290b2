use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pole_assoc::merge_data_blocks;
use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::{EngineConfig, PathVertex, SortStrategy, Warning};
use pole_report::{
    annotate, export_json, export_table, route_summary, timestamped_filename_now,
    AnnotationStyle, ExportFormat, ReportAssembler,
};
use pole_seq::{sequence_fingerprint, sequence_points, SequenceStatus};
use serde::{Deserialize, Serialize};

use crate::drawing::DrawingSnapshot;

/// Report file prefix of numbering runs.
pub const REPORT_PREFIX: &str = "numeracion_postes";

#[derive(Args, Debug)]
pub struct NumberArgs {
    /// JSON drawing snapshot to read poles and route geometry from.
    #[arg(long)]
    pub drawing: PathBuf,
    /// Optional YAML engine configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Ordering strategy (x, y, ref_distance, nearest_neighbor, path_follow).
    #[arg(long)]
    pub strategy: Option<SortStrategy>,
    /// Capture radius around each route vertex.
    #[arg(long)]
    pub radius: Option<f64>,
    /// Drop poles the route never reaches.
    #[arg(long)]
    pub strict: bool,
    /// Reference point `x,y` for the ref_distance strategy.
    #[arg(long, value_parser = parse_vertex)]
    pub reference: Option<PathVertex>,
    /// Layers holding the route; defaults to every non-pole layer.
    #[arg(long = "route-layer", value_name = "LAYER")]
    pub route_layers: Vec<String>,
    /// Layer of data blocks whose prefixed attributes are merged into the poles.
    #[arg(long)]
    pub data_layer: Option<String>,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
    /// Report format.
    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,
}

/// Everything needed to run one numbering pass, also the unit of a batch plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberJob {
    /// Label used in logs and batch summaries.
    #[serde(default = "default_job_name")]
    pub name: String,
    /// Drawing snapshot path.
    pub drawing: PathBuf,
    /// Engine options.
    #[serde(default)]
    pub config: EngineConfig,
    /// Explicit route layers.
    #[serde(default)]
    pub route_layers: Vec<String>,
    /// Optional data-block layer.
    #[serde(default)]
    pub data_layer: Option<String>,
    /// Annotation geometry.
    #[serde(default)]
    pub annotation: AnnotationStyle,
    /// Output directory.
    pub out: PathBuf,
    /// Report format.
    #[serde(default)]
    pub format: ExportFormat,
}

fn default_job_name() -> String {
    "numbering".to_string()
}

/// Result of a numbering pass as written to `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberSummary {
    /// Job label.
    pub name: String,
    /// Strategy that produced the order.
    pub strategy: SortStrategy,
    /// Whether anything was numbered.
    pub status: SequenceStatus,
    /// Poles numbered.
    pub numbered: usize,
    /// Poles dropped by strict mode.
    pub discarded: usize,
    /// Leftovers appended by lenient mode.
    pub appended: usize,
    /// Poles enriched from data blocks.
    pub enriched: usize,
    /// Length of the route through the numbered poles.
    pub route_length: f64,
    /// SHA-256 over the ordered pole ids.
    pub fingerprint: String,
    /// Non-fatal diagnostics.
    pub warnings: Vec<Warning>,
    /// Report file.
    pub report: PathBuf,
    /// Annotation file.
    pub annotations: PathBuf,
}

fn parse_vertex(raw: &str) -> Result<PathVertex, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{raw}'"))?;
    let x = x.trim().parse::<f64>().map_err(|err| err.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|err| err.to_string())?;
    Ok(PathVertex::new(x, y))
}

fn io_error(code: &str, path: &Path, err: impl ToString) -> PoleError {
    PoleError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

impl NumberArgs {
    /// Folds the command-line overrides into a job description.
    pub fn into_job(self) -> Result<NumberJob, PoleError> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|err| io_error("read_failed", path, err))?;
                EngineConfig::from_yaml_str(&raw)?
            }
            None => EngineConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.sort_strategy = strategy;
        }
        if let Some(radius) = self.radius {
            config.search_radius = radius;
        }
        if self.strict {
            config.strict_mode = true;
        }
        if self.reference.is_some() {
            config.reference_point = self.reference;
        }
        Ok(NumberJob {
            name: default_job_name(),
            drawing: self.drawing,
            config,
            route_layers: self.route_layers,
            data_layer: self.data_layer,
            annotation: AnnotationStyle::default(),
            out: self.out,
            format: self.format,
        })
    }
}

pub fn run(args: NumberArgs) -> Result<(), Box<dyn Error>> {
    let job = args.into_job()?;
    let summary = execute(&job)?;
    println!(
        "numbered {} poles ({} discarded) -> {}",
        summary.numbered,
        summary.discarded,
        summary.report.display()
    );
    Ok(())
}

/// Runs one numbering pass and writes the report, annotations and summary.
pub fn execute(job: &NumberJob) -> Result<NumberSummary, PoleError> {
    let config = &job.config;
    config.validate()?;
    let drawing = DrawingSnapshot::load(&job.drawing)?;
    let mut poles = drawing.poles(&config.layer_prefix);

    let enriched = match &job.data_layer {
        Some(layer) => merge_data_blocks(
            &mut poles,
            &drawing.layer(layer)?.blocks,
            config.association_radius,
            &config.attribute_prefix,
        )?,
        None => 0,
    };

    let path_source = drawing.path_source(&job.route_layers, &config.layer_prefix)?;
    let outcome = sequence_points(poles, path_source.as_ref(), config)?;

    fs::create_dir_all(&job.out).map_err(|err| io_error("create_dir", &job.out, err))?;
    let table = ReportAssembler::from_config(config).sequence_report(&outcome.sequence)?;
    let report = job
        .out
        .join(timestamped_filename_now(REPORT_PREFIX, job.format.extension()));
    export_table(&table, job.format, &report)?;

    let annotations = job.out.join("annotations.json");
    export_json(&annotate(&outcome.sequence, &job.annotation), &annotations)?;

    let summary = NumberSummary {
        name: job.name.clone(),
        strategy: outcome.strategy,
        status: outcome.status,
        numbered: outcome.sequence.len(),
        discarded: outcome.discarded_count(),
        appended: outcome.appended,
        enriched,
        route_length: route_summary(&outcome.sequence).length,
        fingerprint: sequence_fingerprint(&outcome.sequence),
        warnings: outcome.warnings,
        report,
        annotations,
    };
    export_json(&summary, &job.out.join("summary.json"))?;
    log::info!(
        "job '{}': {} poles numbered with {:?}",
        summary.name,
        summary.numbered,
        summary.strategy
    );
    Ok(summary)
}
