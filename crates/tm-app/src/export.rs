//! Speed-distance curve export.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{AppError, AppResult};
use crate::run_service::RunOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidInput(format!(
                "Unknown export format: {}",
                other
            ))),
        }
    }
}

/// One row per boundary point, tagged with its phase.
pub fn points_csv(outcome: &RunOutcome) -> String {
    let mut csv = String::from("phase,speed_kmh,distance_m\n");
    for phase in &outcome.phases {
        for point in phase.points() {
            csv.push_str(&format!(
                "{},{},{}\n",
                phase.kind().id(),
                point.speed_kmh,
                point.distance_m
            ));
        }
    }
    csv
}

pub fn profile_json(outcome: &RunOutcome) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

pub fn render(outcome: &RunOutcome, format: ExportFormat) -> AppResult<String> {
    match format {
        ExportFormat::Csv => Ok(points_csv(outcome)),
        ExportFormat::Json => profile_json(outcome),
    }
}

/// Timestamped file name, e.g. `speed_distance_20261019_083000.csv`.
pub fn default_export_name(stem: &str, format: ExportFormat, now: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        stem,
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn write_export(path: &Path, contents: &str) -> AppResult<()> {
    std::fs::write(path, contents).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
