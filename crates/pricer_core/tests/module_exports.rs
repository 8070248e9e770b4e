//! Integration tests for module exports and distribution properties.

use approx::assert_relative_eq;
use proptest::prelude::*;

/// Distribution functions are reachable from both the module and its parent.
#[test]
fn test_distribution_exports() {
    use pricer_core::math::distributions;

    assert_eq!(
        distributions::norm_cdf(0.3_f64),
        pricer_core::math::norm_cdf(0.3_f64)
    );
    assert_eq!(
        distributions::norm_pdf(0.3_f64),
        pricer_core::math::norm_pdf(0.3_f64)
    );
}

/// Types are re-exported at `pricer_core::types`.
#[test]
fn test_type_exports() {
    use pricer_core::types::{OptionType, OptionTypeError, PricingError};

    let err: PricingError = "fly".parse::<OptionType>().unwrap_err().into();
    assert!(matches!(err, PricingError::InvalidArgument(_)));
    let _ = OptionTypeError::Unknown(String::new());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_cdf_reflection(x in -12.0_f64..12.0) {
        let sum = pricer_core::math::norm_cdf(x) + pricer_core::math::norm_cdf(-x);
        assert_relative_eq!(sum, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_pdf_non_negative(x in prop::num::f64::NORMAL) {
        prop_assert!(pricer_core::math::norm_pdf(x) >= 0.0);
    }
}
