//! Billing periods and the normalizer that makes them comparable
//!
//! A subscription bills weekly, monthly or yearly. To sum and rank
//! subscriptions they are all converted to a monthly equivalent:
//!
//! | period  | monthly equivalent      |
//! |---------|-------------------------|
//! | monthly | amount                  |
//! | yearly  | round(amount / 12)      |
//! | weekly  | round(amount × 52 / 12) |
//!
//! Unrecognized period strings deserialize to [`BillingPeriod::Unknown`] and
//! are treated as monthly, so legacy records never abort an aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

const WEEKS_PER_YEAR: i64 = 52;
const MONTHS_PER_YEAR: i64 = 12;

/// The recurrence unit of a subscription's cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
    /// Any value outside the three known periods
    #[serde(other)]
    Unknown,
}

impl BillingPeriod {
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unknown => "unknown",
        }
    }

    /// Monthly-equivalent cost of `amount` billed once per this period
    pub fn monthly_equivalent(&self, amount: Money) -> Money {
        match self {
            Self::Monthly => amount,
            Self::Yearly => amount.div_round(MONTHS_PER_YEAR),
            Self::Weekly => amount.scale_round(WEEKS_PER_YEAR, MONTHS_PER_YEAR),
            Self::Unknown => {
                tracing::debug!("unknown billing period, treating amount as monthly");
                amount
            }
        }
    }

    /// Annual-equivalent cost; always `monthly_equivalent × 12`
    pub fn annual_equivalent(&self, amount: Money) -> Money {
        self.monthly_equivalent(amount).times(MONTHS_PER_YEAR)
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BillingPeriod {
    type Err = String;

    /// Strict parse for input boundaries; unknown words are rejected here
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "annual" | "year" | "y" => Ok(Self::Yearly),
            other => Err(format!(
                "Invalid billing period '{}': expected weekly, monthly or yearly",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subscription;

    fn m(v: i64) -> Money {
        Money::from_minor(v)
    }

    #[test]
    fn test_monthly_is_identity() {
        for amount in [0, 1, 999, 17_000, 1_234_567] {
            assert_eq!(BillingPeriod::Monthly.monthly_equivalent(m(amount)), m(amount));
        }
    }

    #[test]
    fn test_yearly_rounding() {
        assert_eq!(BillingPeriod::Yearly.monthly_equivalent(m(10_000)), m(833));
        assert_eq!(BillingPeriod::Yearly.monthly_equivalent(m(120_000)), m(10_000));
        // 6 / 12 = 0.5 rounds up
        assert_eq!(BillingPeriod::Yearly.monthly_equivalent(m(6)), m(1));
    }

    #[test]
    fn test_weekly_rounding() {
        assert_eq!(BillingPeriod::Weekly.monthly_equivalent(m(5_000)), m(21_667));
        assert_eq!(BillingPeriod::Weekly.monthly_equivalent(m(0)), m(0));
    }

    #[test]
    fn test_unknown_falls_back_to_monthly() {
        assert_eq!(BillingPeriod::Unknown.monthly_equivalent(m(4_200)), m(4_200));
    }

    #[test]
    fn test_annual_is_twelve_monthly() {
        let periods = [
            BillingPeriod::Weekly,
            BillingPeriod::Monthly,
            BillingPeriod::Yearly,
            BillingPeriod::Unknown,
        ];
        for period in periods {
            for amount in [0, 7, 5_000, 10_000, 99_999] {
                assert_eq!(
                    period.annual_equivalent(m(amount)),
                    period.monthly_equivalent(m(amount)).times(12)
                );
            }
        }
    }

    #[test]
    fn test_large_amounts_stay_non_negative() {
        let ceiling = m(Subscription::MAX_AMOUNT);
        // 10^15 × 52 / 12 = 4333333333333333.33
        assert_eq!(
            BillingPeriod::Weekly.monthly_equivalent(ceiling),
            m(4_333_333_333_333_333)
        );
        assert_eq!(
            BillingPeriod::Weekly.annual_equivalent(ceiling),
            m(51_999_999_999_999_996)
        );

        // Past any accepted amount the normalizer saturates rather than wrapping
        assert_eq!(BillingPeriod::Weekly.monthly_equivalent(m(i64::MAX / 4)), m(i64::MAX));
        assert_eq!(BillingPeriod::Monthly.annual_equivalent(m(i64::MAX / 8)), m(i64::MAX));
        assert_eq!(BillingPeriod::Yearly.monthly_equivalent(m(i64::MAX)), m(768_614_336_404_564_651));
    }

    #[test]
    fn test_deserialize_unrecognized_value() {
        let period: BillingPeriod = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(period, BillingPeriod::Unknown);

        let period: BillingPeriod = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(period, BillingPeriod::Yearly);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("Weekly".parse::<BillingPeriod>().unwrap(), BillingPeriod::Weekly);
        assert_eq!("annual".parse::<BillingPeriod>().unwrap(), BillingPeriod::Yearly);
        assert!("quarterly".parse::<BillingPeriod>().is_err());
    }
}
