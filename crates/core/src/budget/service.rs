//! Budget usage and status calculation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::{BudgetStatus, BudgetUsage};

/// Share of the limit below which a budget turns to `warning`.
pub const WARNING_RATIO: Decimal = dec!(0.2);

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Classifies the remaining amount of a budget.
    ///
    /// `over` once nothing remains, `warning` when at most 20% of the limit
    /// remains, otherwise `safe`.
    #[must_use]
    pub fn classify(limit: i64, remaining: i64) -> BudgetStatus {
        if remaining <= 0 {
            return BudgetStatus::Over;
        }

        if Decimal::from(remaining) <= Decimal::from(limit) * WARNING_RATIO {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Safe
        }
    }

    /// Recomputes usage from the full list of counted expense amounts.
    ///
    /// Non-positive amounts are ignored.
    #[must_use]
    pub fn compute_usage<I>(limit: i64, expense_amounts: I) -> BudgetUsage
    where
        I: IntoIterator<Item = i64>,
    {
        let used = expense_amounts
            .into_iter()
            .filter(|amount| *amount > 0)
            .fold(0i64, i64::saturating_add);
        let remaining = limit.saturating_sub(used);

        BudgetUsage {
            used,
            remaining,
            status: Self::classify(limit, remaining),
        }
    }

    /// Progress of a budget in whole percent, rounded half away from zero and
    /// capped at 999. Zero for a zero limit.
    #[must_use]
    pub fn percent_used(used: i64, limit: i64) -> u32 {
        if limit <= 0 {
            return 0;
        }

        let percent = (Decimal::from(used.max(0)) * Decimal::ONE_HUNDRED / Decimal::from(limit))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .min(dec!(999));
        percent.to_u32().unwrap_or(999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1_000_000, 900_000, BudgetStatus::Warning)]
    #[case(1_000_000, 800_000, BudgetStatus::Warning)]
    #[case(1_000_000, 799_999, BudgetStatus::Safe)]
    #[case(1_000_000, 1_000_000, BudgetStatus::Over)]
    #[case(1_000_000, 1_200_000, BudgetStatus::Over)]
    #[case(1_000_000, 0, BudgetStatus::Safe)]
    fn test_status_thresholds(#[case] limit: i64, #[case] used: i64, #[case] expected: BudgetStatus) {
        let usage = BudgetService::compute_usage(limit, [used]);
        assert_eq!(usage.status, expected);
        assert_eq!(usage.remaining, limit - used);
    }

    #[test]
    fn test_usage_is_full_sum() {
        let usage = BudgetService::compute_usage(500, [100, 250, 0, -3]);

        assert_eq!(usage.used, 350);
        assert_eq!(usage.remaining, 150);
        assert_eq!(usage.status, BudgetStatus::Safe);
    }

    #[test]
    fn test_no_transactions() {
        let usage = BudgetService::compute_usage(500, std::iter::empty());
        assert_eq!(usage.used, 0);
        assert_eq!(usage.remaining, 500);
    }

    #[rstest]
    #[case(900_000, 1_000_000, 90)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(50_000, 100, 999)]
    #[case(10, 0, 0)]
    fn test_percent_used(#[case] used: i64, #[case] limit: i64, #[case] expected: u32) {
        assert_eq!(BudgetService::percent_used(used, limit), expected);
    }
}
