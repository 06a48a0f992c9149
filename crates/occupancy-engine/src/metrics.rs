//! Scalar occupancy metrics.
//!
//! Every ratio is total: a zero denominator yields 0 rather than an error or NaN.

/// Occupied nights as a percentage of available nights.
pub fn occupancy_rate(on: u32, an: u32) -> f64 {
    if an == 0 {
        return 0.0;
    }
    f64::from(on) / f64::from(an) * 100.0
}

/// Average daily rate: revenue per occupied night.
pub fn adr(revenue: f64, on: u32) -> f64 {
    if on == 0 {
        return 0.0;
    }
    revenue / f64::from(on)
}

/// Revenue per available night.
pub fn revpar(revenue: f64, an: u32) -> f64 {
    if an == 0 {
        return 0.0;
    }
    revenue / f64::from(an)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_denominators_yield_zero() {
        assert_eq!(occupancy_rate(0, 0), 0.0);
        assert_eq!(occupancy_rate(3, 0), 0.0);
        assert_eq!(adr(120.0, 0), 0.0);
        assert_eq!(revpar(120.0, 0), 0.0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(occupancy_rate(1, 4), 25.0);
        assert_eq!(occupancy_rate(4, 4), 100.0);
        assert_eq!(adr(300.0, 4), 75.0);
        assert_eq!(revpar(300.0, 6), 50.0);
    }

    proptest! {
        #[test]
        fn prop_rate_is_bounded(an in 0u32..10_000, frac in 0.0f64..=1.0) {
            let on = (f64::from(an) * frac).floor() as u32;
            let rate = occupancy_rate(on, an);
            prop_assert!((0.0..=100.0).contains(&rate));
        }

        #[test]
        fn prop_ratios_are_finite(revenue in 0.0f64..1e7, on in 0u32..1000, an in 0u32..1000) {
            prop_assert!(adr(revenue, on).is_finite());
            prop_assert!(revpar(revenue, an).is_finite());
        }
    }
}
