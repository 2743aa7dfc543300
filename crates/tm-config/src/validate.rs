//! Document validation logic.

use crate::schema::ProfileDocument;
use tm_profile::params::canonical_key;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Structural checks only. Segment ordering and required parameters are
/// checked when the tables are loaded.
pub fn validate_document(doc: &ProfileDocument) -> Result<(), ValidationError> {
    if doc.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: doc.version,
        });
    }

    if doc.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", doc.name),
            reason: "must not be blank".to_string(),
        });
    }

    for (name, value) in &doc.parameters {
        if canonical_key(name).is_none() {
            return Err(ValidationError::UnknownParameter { name: name.clone() });
        }
        if let Some(v) = value {
            check_not_infinite(v, name)?;
        }
    }

    for (idx, row) in doc.segments.iter().enumerate() {
        let fields = [
            ("speed_low_kmh", row.speed_low_kmh),
            ("speed_high_kmh", row.speed_high_kmh),
            ("acc_cm_s2", row.acc_cm_s2),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                check_not_infinite(&v, &format!("segments[{idx}].{field}"))?;
            }
        }
    }

    Ok(())
}

// NaN is left alone: it marks an empty cell and the row gets dropped on load.
fn check_not_infinite(value: &f64, field: &str) -> Result<(), ValidationError> {
    if value.is_infinite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
