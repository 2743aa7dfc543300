//! Schema migration framework.

use crate::ConfigError;
use crate::schema::ProfileDocument;
use tm_profile::LEGACY_PARAMETER_ALIASES;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut doc: ProfileDocument) -> Result<ProfileDocument, ConfigError> {
    while doc.version < LATEST_VERSION {
        doc = migrate_one_version(doc)?;
    }
    Ok(doc)
}

fn migrate_one_version(doc: ProfileDocument) -> Result<ProfileDocument, ConfigError> {
    match doc.version {
        1 => migrate_v1_to_v2(doc),
        v => Err(ConfigError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 1 kept the spreadsheet's parameter spellings.
fn migrate_v1_to_v2(mut doc: ProfileDocument) -> Result<ProfileDocument, ConfigError> {
    for (alias, canonical) in LEGACY_PARAMETER_ALIASES {
        if let Some(value) = doc.parameters.remove(alias) {
            doc.parameters
                .entry(canonical.to_string())
                .or_insert(value);
        }
    }
    doc.version = 2;
    Ok(doc)
}
