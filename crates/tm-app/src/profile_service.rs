//! Profile document loading, saving, validation, and introspection.

use std::path::Path;

use tm_config::{DocumentFormat, ProfileDocument};
use tm_profile::{EngineOptions, ParameterSet, PhaseEngine, SegmentTable};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Everything the engine needs, owned.
#[derive(Debug, Clone)]
pub struct ProfileInputs {
    pub name: String,
    pub segments: SegmentTable,
    pub params: ParameterSet,
    pub options: EngineOptions,
}

impl ProfileInputs {
    pub fn engine(&self) -> PhaseEngine<'_> {
        PhaseEngine::with_options(&self.segments, &self.params, self.options)
    }
}

/// A parameter prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRow {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
}

/// Load a profile document from a YAML or JSON file.
pub fn load_document(path: &Path) -> AppResult<ProfileDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::DocumentRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc = match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => tm_config::from_yaml_str(&content)?,
        DocumentFormat::Json => tm_config::from_json_str(&content)?,
    };
    info!(
        path = %path.display(),
        name = %doc.name,
        segments = doc.segments.len(),
        "profile document loaded"
    );
    Ok(doc)
}

/// Save a profile document; the format follows the file extension.
pub fn save_document(path: &Path, doc: &ProfileDocument) -> AppResult<()> {
    tm_config::save_path(path, doc)?;
    Ok(())
}

/// Full check: document structure, segment table, and parameters.
pub fn validate_document(doc: &ProfileDocument) -> AppResult<()> {
    tm_config::validate_document(doc).map_err(|e| AppError::Document(e.to_string()))?;
    load_inputs(doc)?;
    Ok(())
}

/// Build engine inputs from a loaded document.
pub fn load_inputs(doc: &ProfileDocument) -> AppResult<ProfileInputs> {
    let segments = tm_config::load_segments(doc)?;
    let params = tm_config::load_parameters(doc)?;
    for (from, to) in segments.gaps() {
        tracing::warn!(gap_from_kmh = from, gap_to_kmh = to, "segment table has a gap");
    }
    Ok(ProfileInputs {
        name: doc.name.clone(),
        segments,
        params,
        options: doc.options,
    })
}

/// Parameters with display labels and units, in canonical order.
pub fn parameter_rows(params: &ParameterSet) -> Vec<ParameterRow> {
    params
        .iter()
        .map(|(key, value)| {
            let (label, unit) = describe(key);
            ParameterRow {
                key,
                label,
                unit,
                value,
            }
        })
        .collect()
}

fn describe(key: &str) -> (&'static str, &'static str) {
    match key {
        "init_speed_kmh" => ("Initial speed", "km/h"),
        "target_speed_kmh" => ("Acceleration target speed", "km/h"),
        "constant_speed_kmh" => ("Constant speed", "km/h"),
        "constant_time_s" => ("Constant-speed time", "s"),
        "decel_acc_cms2" => ("Deceleration", "cm/s²"),
        "coast_speed_kmh" => ("Coast speed", "km/h"),
        "traction_switch_delay_s" => ("Traction switch delay", "s"),
        "brake_build_time_s" => ("Brake build time", "s"),
        _ => ("", ""),
    }
}
