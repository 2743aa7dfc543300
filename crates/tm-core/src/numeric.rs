use crate::TmError;

/// Floating point type used throughout system
pub type Real = f64;

/// Decimal places kept on reported phase durations and distances.
pub const REPORT_DECIMALS: u32 = 3;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TmError::NonFinite { what, value: v })
    }
}

/// Round to `places` decimal places.
///
/// Rounds the exact binary value, so `1.0005` (stored just below the tie)
/// gives `1.0` at three places. Exact ties round to even.
pub fn round_to(v: Real, places: u32) -> Real {
    format!("{:.*}", places as usize, v).parse().unwrap_or(v)
}

/// Round to the reporting precision (3 decimal places).
#[inline]
pub fn round3(v: Real) -> Real {
    round_to(v, REPORT_DECIMALS)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round3_error_is_bounded(v in -1.0e6_f64..1.0e6_f64) {
            prop_assert!((round3(v) - v).abs() <= 0.0005 + 1e-9);
        }
    }
}
