//! Shared application service layer for trainmotion.
//!
//! This crate provides one interface for command-line and other front ends:
//! loading profile documents, applying parameter overrides, running the
//! phase engine and exporting the speed-distance curve.

pub mod error;
pub mod export;
pub mod profile_service;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use export::{
    ExportFormat, default_export_name, points_csv, profile_json, render, write_export,
};
pub use profile_service::{
    ParameterRow, ProfileInputs, load_document, load_inputs, parameter_rows, save_document,
    validate_document,
};
pub use run_service::{
    RunMode, RunOutcome, RunRequest, apply_overrides, run, run_acceleration, run_all,
};
