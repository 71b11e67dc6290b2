#![deny(missing_docs)]

//! Report shaping and export for pole numbering runs: column-ordered tables,
//! annotation layout and CSV/JSON files.

mod annotate;
mod assemble;
mod export;
pub mod serde;
mod table;

pub use annotate::{
    annotate, route_summary, Annotation, AnnotationStyle, RouteSummary, DEFAULT_ANNOTATION_LAYER,
};
pub use assemble::{
    ReportAssembler, ASSOCIATION_COLUMNS, FIXED_COLUMNS, PRIORITY_KEYS, SHADOWED_KEY_PREFIX,
};
pub use export::{
    export_csv, export_json, export_table, timestamped_filename, timestamped_filename_now,
    write_csv, ExportFormat,
};
pub use table::{CellValue, ReportTable};
