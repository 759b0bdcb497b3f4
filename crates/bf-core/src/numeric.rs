use crate::CoreError;

/// Floating point type used for pressures, frictions and flows.
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing computed flows.
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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`. Frictions are resistances; a negative one would let a
/// passive pipe generate flow.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(CoreError::InvalidArg { what });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_flows() {
        let tol = Tolerances::default();
        assert!(nearly_equal(10.0 / 3.0, 3.333_333_333_333_333_5, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(2.0, 2.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "flow").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn negative_friction_is_rejected() {
        assert_eq!(ensure_non_negative(0.0, "friction"), Ok(0.0));
        assert!(matches!(
            ensure_non_negative(-0.5, "friction"),
            Err(CoreError::InvalidArg { what: "friction" })
        ));
        assert!(ensure_non_negative(Real::INFINITY, "friction").is_err());
    }
}
