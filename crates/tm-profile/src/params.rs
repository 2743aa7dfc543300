//! The named scalar parameters that drive a profile calculation.

use std::collections::BTreeMap;

use serde::Serialize;
use tm_core::ensure_finite;

use crate::error::{MotionError, MotionResult};

/// Every key a parameter source must provide, in display order.
pub const REQUIRED_PARAMETERS: [&str; 8] = [
    "init_speed_kmh",
    "target_speed_kmh",
    "constant_speed_kmh",
    "constant_time_s",
    "decel_acc_cms2",
    "coast_speed_kmh",
    "traction_switch_delay_s",
    "brake_build_time_s",
];

/// Older key spellings and the canonical key they stand for.
pub const LEGACY_PARAMETER_ALIASES: [(&str, &str); 1] = [("decel_acc_cm_s2", "decel_acc_cms2")];

/// Resolve a key or legacy alias to its canonical spelling.
pub fn canonical_key(name: &str) -> Option<&'static str> {
    REQUIRED_PARAMETERS
        .iter()
        .copied()
        .find(|k| *k == name)
        .or_else(|| {
            LEGACY_PARAMETER_ALIASES
                .iter()
                .find(|(alias, _)| *alias == name)
                .map(|(_, canonical)| *canonical)
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSet {
    /// Acceleration start speed (km/h)
    pub init_speed_kmh: f64,
    /// Acceleration end speed (km/h)
    pub target_speed_kmh: f64,
    /// Cruise speed (km/h)
    pub constant_speed_kmh: f64,
    /// Cruise duration (s)
    pub constant_time_s: f64,
    /// Service brake rate (cm/s², negative)
    pub decel_acc_cms2: f64,
    /// Speed at the end of braking (km/h)
    pub coast_speed_kmh: f64,
    pub traction_switch_delay_s: f64,
    pub brake_build_time_s: f64,
}

impl ParameterSet {
    /// Build from a name → value map.
    ///
    /// Legacy aliases are accepted. Every absent key is reported in a single
    /// `MissingParameter` error, in `REQUIRED_PARAMETERS` order.
    pub fn from_map(values: &BTreeMap<String, f64>) -> MotionResult<Self> {
        let mut resolved: BTreeMap<&'static str, f64> = BTreeMap::new();
        for (name, value) in values {
            if let Some(key) = canonical_key(name) {
                // Canonical spelling wins over an alias.
                if key == name.as_str() || !resolved.contains_key(key) {
                    resolved.insert(key, *value);
                }
            }
        }

        let missing: Vec<String> = REQUIRED_PARAMETERS
            .iter()
            .filter(|k| !resolved.contains_key(*k))
            .map(|k| k.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MotionError::MissingParameter { keys: missing });
        }

        let mut set = Self::zeroed();
        for (key, value) in resolved {
            set.assign(key, value)?;
        }
        Ok(set)
    }

    fn zeroed() -> Self {
        Self {
            init_speed_kmh: 0.0,
            target_speed_kmh: 0.0,
            constant_speed_kmh: 0.0,
            constant_time_s: 0.0,
            decel_acc_cms2: 0.0,
            coast_speed_kmh: 0.0,
            traction_switch_delay_s: 0.0,
            brake_build_time_s: 0.0,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "init_speed_kmh" => Some(&mut self.init_speed_kmh),
            "target_speed_kmh" => Some(&mut self.target_speed_kmh),
            "constant_speed_kmh" => Some(&mut self.constant_speed_kmh),
            "constant_time_s" => Some(&mut self.constant_time_s),
            "decel_acc_cms2" => Some(&mut self.decel_acc_cms2),
            "coast_speed_kmh" => Some(&mut self.coast_speed_kmh),
            "traction_switch_delay_s" => Some(&mut self.traction_switch_delay_s),
            "brake_build_time_s" => Some(&mut self.brake_build_time_s),
            _ => None,
        }
    }

    fn assign(&mut self, key: &'static str, value: f64) -> MotionResult<()> {
        let value = ensure_finite(value, key)?;
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MotionError::invalid_parameter(
                key,
                value,
                "unknown parameter",
            )),
        }
    }

    /// Value of a parameter by canonical name or legacy alias.
    pub fn get(&self, name: &str) -> Option<f64> {
        let key = canonical_key(name)?;
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// `(name, value)` pairs in `REQUIRED_PARAMETERS` order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        let values = [
            self.init_speed_kmh,
            self.target_speed_kmh,
            self.constant_speed_kmh,
            self.constant_time_s,
            self.decel_acc_cms2,
            self.coast_speed_kmh,
            self.traction_switch_delay_s,
            self.brake_build_time_s,
        ];
        REQUIRED_PARAMETERS.into_iter().zip(values)
    }

    /// Copy of this set with one value replaced.
    pub fn with_override(&self, name: &str, value: f64) -> MotionResult<Self> {
        let key = canonical_key(name)
            .ok_or_else(|| MotionError::invalid_parameter(name, value, "unknown parameter"))?;
        let mut next = *self;
        next.assign(key, value)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> BTreeMap<String, f64> {
        [
            ("init_speed_kmh", 0.0),
            ("target_speed_kmh", 100.0),
            ("constant_speed_kmh", 100.0),
            ("constant_time_s", 60.0),
            ("decel_acc_cms2", -83.3),
            ("coast_speed_kmh", 40.0),
            ("traction_switch_delay_s", 2.0),
            ("brake_build_time_s", 1.5),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn loads_all_required_keys() {
        let set = ParameterSet::from_map(&full_map()).unwrap();
        assert_eq!(set.target_speed_kmh, 100.0);
        assert_eq!(set.decel_acc_cms2, -83.3);
        assert_eq!(set.iter().count(), 8);
        assert_eq!(set.get("brake_build_time_s"), Some(1.5));
    }

    #[test]
    fn reports_every_missing_key() {
        let mut map = full_map();
        map.remove("coast_speed_kmh");
        map.remove("init_speed_kmh");
        let err = ParameterSet::from_map(&map).unwrap_err();
        assert_eq!(
            err,
            MotionError::MissingParameter {
                keys: vec!["init_speed_kmh".to_string(), "coast_speed_kmh".to_string()]
            }
        );
        assert!(err.to_string().contains("init_speed_kmh, coast_speed_kmh"));
    }

    #[test]
    fn legacy_alias_is_accepted() {
        let mut map = full_map();
        map.remove("decel_acc_cms2");
        map.insert("decel_acc_cm_s2".to_string(), -50.0);
        let set = ParameterSet::from_map(&map).unwrap();
        assert_eq!(set.decel_acc_cms2, -50.0);
        assert_eq!(set.get("decel_acc_cm_s2"), Some(-50.0));
    }

    #[test]
    fn canonical_key_wins_over_alias() {
        let mut map = full_map();
        map.insert("decel_acc_cm_s2".to_string(), -10.0);
        let set = ParameterSet::from_map(&map).unwrap();
        assert_eq!(set.decel_acc_cms2, -83.3);
    }

    #[test]
    fn unknown_keys_are_ignored_on_load() {
        let mut map = full_map();
        map.insert("notes".to_string(), 1.0);
        assert!(ParameterSet::from_map(&map).is_ok());
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let mut map = full_map();
        map.insert("constant_time_s".to_string(), f64::INFINITY);
        let err = ParameterSet::from_map(&map).unwrap_err();
        assert!(matches!(err, MotionError::InvalidParameter { ref name, .. } if name == "constant_time_s"));
    }

    #[test]
    fn override_returns_new_set() {
        let set = ParameterSet::from_map(&full_map()).unwrap();
        let next = set.with_override("constant_time_s", 30.0).unwrap();
        assert_eq!(next.constant_time_s, 30.0);
        assert_eq!(set.constant_time_s, 60.0);
        assert!(set.with_override("top_speed", 1.0).is_err());
    }
}
