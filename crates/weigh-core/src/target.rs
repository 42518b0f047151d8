//! Target weight derived from height.

/// Body-mass index the target weight is computed against, in kg/m².
pub const REFERENCE_BMI: f64 = 23.0;

/// The weight (kg) at which a person of `height_cm` has [`REFERENCE_BMI`].
///
/// Total over positive heights; the caller is responsible for passing a sane
/// value.
pub fn compute_target(height_cm: f64) -> f64 {
  let height_m = height_cm / 100.0;
  REFERENCE_BMI * height_m.powi(2)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn target_for_170_cm() {
    assert!((compute_target(170.0) - 66.47).abs() < 1e-9);
  }

  #[test]
  fn target_matches_formula_across_range() {
    let mut h = 100.0;
    while h <= 250.0 {
      let expected = 23.0 * (h / 100.0) * (h / 100.0);
      assert!(
        (compute_target(h) - expected).abs() < 1e-9,
        "height {h}: {} != {expected}",
        compute_target(h)
      );
      h += 0.7;
    }
  }

  #[test]
  fn target_grows_with_height() {
    assert!(compute_target(181.0) > compute_target(180.9));
  }
}
