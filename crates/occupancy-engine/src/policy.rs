//! Blocked-inventory policy.

use occupancy_common::SiteNight;
use tracing::{debug, instrument};

/// Recompute `an` for every fact under the blocked-inventory setting.
///
/// With `include_blocked` a blocked night still counts as available; without
/// it the night leaves the denominator. Unblocked nights always count. The
/// input is not modified and applying the policy twice equals applying it once.
#[instrument(skip(nights), fields(count = nights.len()))]
pub fn adjust_site_nights_for_blocked_setting(
    nights: &[SiteNight],
    include_blocked: bool,
) -> Vec<SiteNight> {
    let adjusted: Vec<SiteNight> = nights
        .iter()
        .map(|night| SiteNight {
            an: available_indicator(night.is_blocked, include_blocked),
            ..night.clone()
        })
        .collect();

    debug!(
        "Applied blocked policy (include_blocked={}) to {} site-nights",
        include_blocked,
        adjusted.len()
    );
    adjusted
}

const fn available_indicator(is_blocked: bool, include_blocked: bool) -> u32 {
    if include_blocked || !is_blocked {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use occupancy_common::test_utils::{date, fixtures, strategies};
    use proptest::prelude::*;

    #[test]
    fn test_blocked_nights_follow_setting() {
        let site = fixtures::site(1);
        let nights = vec![
            fixtures::blocked(&site, date(2025, 2, 1)),
            fixtures::vacant(&site, date(2025, 2, 2)),
        ];

        let included = adjust_site_nights_for_blocked_setting(&nights, true);
        assert_eq!(included[0].an, 1);
        assert_eq!(included[1].an, 1);

        let excluded = adjust_site_nights_for_blocked_setting(&included, false);
        assert_eq!(excluded[0].an, 0);
        assert_eq!(excluded[1].an, 1);

        // input untouched
        assert_eq!(nights[0].an, 0);
    }

    proptest! {
        #[test]
        fn prop_policy_is_idempotent(
            nights in strategies::site_nights(60),
            include_blocked in any::<bool>(),
        ) {
            let once = adjust_site_nights_for_blocked_setting(&nights, include_blocked);
            let twice = adjust_site_nights_for_blocked_setting(&once, include_blocked);
            prop_assert_eq!(once, twice);
        }
    }
}
