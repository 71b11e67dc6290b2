use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pole_core::errors::{ErrorInfo, PoleError};
use pole_report::export_json;
use serde::{Deserialize, Serialize};

use crate::commands::number::{self, NumberJob, NumberSummary};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// YAML plan listing the numbering jobs.
    #[arg(long)]
    pub plan: PathBuf,
    /// Stop at the first failing job, overriding the plan.
    #[arg(long)]
    pub stop_on_error: bool,
}

/// Numbering jobs run one after another.
///
/// Relative paths inside jobs are resolved against the plan's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    /// Abort the remaining jobs after a failure.
    #[serde(default)]
    pub stop_on_error: bool,
    /// Where the batch report goes; defaults to `batch_report.json` next to the plan.
    #[serde(default)]
    pub report: Option<PathBuf>,
    /// Jobs in execution order.
    pub jobs: Vec<NumberJob>,
}

impl BatchPlan {
    /// Parses a YAML plan and resolves its relative paths against `base`.
    pub fn from_yaml_str(raw: &str, base: &Path) -> Result<Self, PoleError> {
        let mut plan: BatchPlan = serde_yaml::from_str(raw).map_err(|err| {
            PoleError::Serde(ErrorInfo::new("yaml_deserialize", err.to_string()))
        })?;
        for job in &mut plan.jobs {
            job.drawing = base.join(&job.drawing);
            job.out = base.join(&job.out);
        }
        plan.report = Some(base.join(
            plan.report
                .take()
                .unwrap_or_else(|| PathBuf::from("batch_report.json")),
        ));
        Ok(plan)
    }

    /// Reads a plan file.
    pub fn load(path: &Path) -> Result<Self, PoleError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            PoleError::Io(
                ErrorInfo::new("read_failed", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_yaml_str(&raw, base)
    }
}

/// State of one job after the batch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobState {
    /// Job ran to completion.
    Complete,
    /// Job returned an error.
    Failed,
    /// Job was never started because an earlier one failed.
    Skipped,
}

/// Per-job entry of the batch report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Job label.
    pub name: String,
    /// Final state.
    pub state: JobState,
    /// Error captured for failed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PoleError>,
    /// Summary of completed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<NumberSummary>,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per planned job, in plan order.
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    /// Jobs that ended in `state`.
    pub fn count(&self, state: JobState) -> usize {
        self.jobs.iter().filter(|job| job.state == state).count()
    }
}

pub fn run(args: BatchArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = BatchPlan::load(&args.plan)?;
    plan.stop_on_error |= args.stop_on_error;
    let report = execute(&plan)?;
    println!(
        "batch finished: {} complete, {} failed, {} skipped",
        report.count(JobState::Complete),
        report.count(JobState::Failed),
        report.count(JobState::Skipped)
    );
    if report.count(JobState::Failed) > 0 {
        return Err("one or more batch jobs failed".into());
    }
    Ok(())
}

/// Runs every job of `plan` in order and writes the batch report.
///
/// A failing job is recorded and the loop moves on, unless the plan asks to
/// stop, in which case the remaining jobs are marked skipped.
pub fn execute(plan: &BatchPlan) -> Result<BatchReport, PoleError> {
    let mut jobs = Vec::with_capacity(plan.jobs.len());
    let mut stopped = false;

    for job in &plan.jobs {
        if stopped {
            jobs.push(JobReport {
                name: job.name.clone(),
                state: JobState::Skipped,
                error: None,
                summary: None,
            });
            continue;
        }
        match number::execute(job) {
            Ok(summary) => jobs.push(JobReport {
                name: job.name.clone(),
                state: JobState::Complete,
                error: None,
                summary: Some(summary),
            }),
            Err(err) => {
                log::error!("job '{}' failed: {err}", job.name);
                stopped = plan.stop_on_error;
                jobs.push(JobReport {
                    name: job.name.clone(),
                    state: JobState::Failed,
                    error: Some(err),
                    summary: None,
                });
            }
        }
    }

    let report = BatchReport { jobs };
    if let Some(path) = &plan.report {
        export_json(&report, path)?;
    }
    Ok(report)
}
