use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use pole_assoc::{associate_numbers, fuse_associations, ProximityAssociator, SecondaryLayer};
use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::Warning;
use pole_report::{
    export_json, export_table, timestamped_filename_now, ExportFormat, ReportAssembler,
};
use serde::{Deserialize, Serialize};

use crate::drawing::DrawingSnapshot;

#[derive(Args, Debug)]
pub struct AssociateArgs {
    /// JSON drawing snapshot.
    #[arg(long)]
    pub drawing: PathBuf,
    /// Layer whose blocks are the anchors.
    #[arg(long)]
    pub anchors: String,
    /// Text layers matched to every anchor.
    #[arg(long = "layer", value_name = "LAYER")]
    pub layers: Vec<String>,
    /// Layer of integer labels numbering the anchors.
    #[arg(long)]
    pub numbers: Option<String>,
    /// Maximum anchor-to-label distance; unbounded when omitted.
    #[arg(long)]
    pub max_distance: Option<f64>,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
    /// Report format.
    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,
}

/// Result of an association run as written to `association_summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociateSummary {
    /// Anchors read.
    pub anchors: usize,
    /// Anchors with at least one layer matched.
    pub matched: usize,
    /// Anchors carrying a number.
    pub numbered: usize,
    /// Labels skipped while matching.
    pub warnings: Vec<Warning>,
    /// Written report files.
    pub reports: Vec<PathBuf>,
}

pub fn run(args: AssociateArgs) -> Result<(), Box<dyn Error>> {
    let summary = execute(&args)?;
    println!(
        "matched {} of {} anchors, {} numbered",
        summary.matched, summary.anchors, summary.numbered
    );
    Ok(())
}

/// Matches the anchors to every requested layer and writes the reports.
pub fn execute(args: &AssociateArgs) -> Result<AssociateSummary, PoleError> {
    if args.layers.is_empty() && args.numbers.is_none() {
        return Err(PoleError::Configuration(
            ErrorInfo::new("no-layers", "nothing to associate")
                .with_hint("pass --layer and/or --numbers"),
        ));
    }
    let drawing = DrawingSnapshot::load(&args.drawing)?;
    let mut anchors = drawing.layer(&args.anchors)?.blocks.clone();
    let associator = ProximityAssociator::new(args.max_distance)?;

    let layers = args
        .layers
        .iter()
        .map(|name| Ok(SecondaryLayer::text(name.clone(), drawing.layer_points(name)?)))
        .collect::<Result<Vec<_>, PoleError>>()?;
    let outcome = associator.associate(&anchors, &layers)?;
    let mut warnings = outcome.warnings.clone();

    fs::create_dir_all(&args.out).map_err(|err| {
        PoleError::Io(
            ErrorInfo::new("create_dir", err.to_string())
                .with_context("path", args.out.display().to_string()),
        )
    })?;
    let assembler = ReportAssembler::default();
    let extension = args.format.extension();
    let mut reports = Vec::new();

    if !layers.is_empty() {
        let table =
            assembler.association_report(&anchors, &outcome.associations, &args.layers)?;
        let path = args
            .out
            .join(timestamped_filename_now("asociacion_completa", extension));
        export_table(&table, args.format, &path)?;
        reports.push(path);
    }

    let mut numbered = 0;
    if let Some(name) = &args.numbers {
        let labels = SecondaryLayer::integer(name.clone(), drawing.layer_points(name)?);
        let (numbers, mut number_warnings) = associate_numbers(&associator, &anchors, &labels);
        warnings.append(&mut number_warnings);
        numbered = numbers.len();
        let table = assembler.number_report(&numbers)?;
        let path = args.out.join(timestamped_filename_now(
            &format!("asociacion_{}", args.anchors),
            extension,
        ));
        export_table(&table, args.format, &path)?;
        reports.push(path);
    }

    fuse_associations(&mut anchors, &outcome.associations);
    let enriched = args.out.join("anchors.json");
    export_json(&anchors, &enriched)?;
    reports.push(enriched);

    let summary = AssociateSummary {
        anchors: anchors.len(),
        matched: outcome.matched_anchors(),
        numbered,
        warnings,
        reports,
    };
    export_json(&summary, &args.out.join("association_summary.json"))?;
    Ok(summary)
}
