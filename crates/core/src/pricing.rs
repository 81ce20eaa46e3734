//! Dugsi family pricing.
//!
//! Tuition is billed per household, not per child. The rate table gives a
//! shrinking marginal cost per additional child; the fourth child onward is
//! flat.

/// Monthly rate for a household with one enrolled child, in cents.
pub const RATE_ONE_CHILD_CENTS: i64 = 6_500;
/// Monthly rate for two children, in cents.
pub const RATE_TWO_CHILDREN_CENTS: i64 = 12_000;
/// Monthly rate for three children, in cents.
pub const RATE_THREE_CHILDREN_CENTS: i64 = 16_500;
/// Marginal rate for each child beyond the third, in cents.
pub const RATE_ADDITIONAL_CHILD_CENTS: i64 = 3_500;

/// Monthly Dugsi tuition for a family with `children` enrolled children.
///
/// Zero children costs nothing.
pub fn dugsi_monthly_rate_cents(children: u32) -> i64 {
    match children {
        0 => 0,
        1 => RATE_ONE_CHILD_CENTS,
        2 => RATE_TWO_CHILDREN_CENTS,
        3 => RATE_THREE_CHILDREN_CENTS,
        n => RATE_THREE_CHILDREN_CENTS + i64::from(n - 3) * RATE_ADDITIONAL_CHILD_CENTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tiers() {
        assert_eq!(dugsi_monthly_rate_cents(0), 0);
        assert_eq!(dugsi_monthly_rate_cents(1), 6_500);
        assert_eq!(dugsi_monthly_rate_cents(2), 12_000);
        assert_eq!(dugsi_monthly_rate_cents(3), 16_500);
        assert_eq!(dugsi_monthly_rate_cents(4), 20_000);
        assert_eq!(dugsi_monthly_rate_cents(6), 27_000);
    }

    #[test]
    fn total_is_monotonic_in_child_count() {
        for n in 0..10 {
            assert!(dugsi_monthly_rate_cents(n + 1) > dugsi_monthly_rate_cents(n));
        }
    }

    #[test]
    fn marginal_cost_never_increases() {
        let mut prev_marginal = i64::MAX;
        for n in 1..10 {
            let marginal = dugsi_monthly_rate_cents(n) - dugsi_monthly_rate_cents(n - 1);
            assert!(marginal <= prev_marginal);
            prev_marginal = marginal;
        }
    }
}
