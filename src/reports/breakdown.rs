//! Category breakdown
//!
//! Groups personal monthly amounts by category. Subscriptions without a
//! category land in the shared uncategorized bucket. Buckets are ordered by
//! amount, largest first; equal amounts keep first-seen order.

use serde::Serialize;

use crate::models::{CategoryLabel, Money};

/// One category bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdownEntry {
    /// Category UUID, or `uncategorized`
    pub category_id: String,
    pub category_name: String,
    pub color: String,
    /// Sum of personal monthly amounts in this bucket
    pub monthly_amount: Money,
    /// Share of the grand total, rounded to one decimal place
    pub percentage: f64,
    /// Number of subscriptions in this bucket
    pub count: usize,
}

/// Insertion-ordered accumulator for breakdown buckets
#[derive(Debug, Default)]
pub struct BreakdownBuilder {
    buckets: Vec<(CategoryLabel, Money, usize)>,
}

impl BreakdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one subscription's amount to its bucket
    pub fn add(&mut self, label: CategoryLabel, amount: Money) {
        match self.buckets.iter_mut().find(|(l, _, _)| l.key == label.key) {
            Some((_, total, count)) => {
                *total += amount;
                *count += 1;
            }
            None => self.buckets.push((label, amount, 1)),
        }
    }

    /// Sum of every bucket
    pub fn total(&self) -> Money {
        self.buckets.iter().map(|(_, amount, _)| *amount).sum()
    }

    /// Sorted entries with percentages of `total`
    pub fn finish(self, total: Money) -> Vec<CategoryBreakdownEntry> {
        let mut entries: Vec<CategoryBreakdownEntry> = self
            .buckets
            .into_iter()
            .map(|(label, amount, count)| CategoryBreakdownEntry {
                category_id: label.key,
                category_name: label.name,
                color: label.color,
                monthly_amount: amount,
                percentage: percentage_of(amount, total),
                count,
            })
            .collect();

        // sort_by is stable, so ties keep insertion order
        entries.sort_by(|a, b| b.monthly_amount.cmp(&a.monthly_amount));
        entries
    }
}

/// `amount / total` as a percentage rounded to one decimal; 0 when total is not positive
pub fn percentage_of(amount: Money, total: Money) -> f64 {
    if !total.is_positive() {
        return 0.0;
    }
    let tenths = amount.scale_round(1000, total.minor());
    tenths.minor() as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryRef};

    fn video() -> CategoryLabel {
        CategoryLabel::for_category(Some(&CategoryRef::new(
            CategoryId::new(),
            "Video",
            Some("#FF0000".into()),
        )))
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage_of(Money::from_minor(1), Money::from_minor(3)), 33.3);
        assert_eq!(percentage_of(Money::from_minor(2), Money::from_minor(3)), 66.7);
        assert_eq!(percentage_of(Money::from_minor(5), Money::from_minor(5)), 100.0);
        assert_eq!(percentage_of(Money::from_minor(5), Money::zero()), 0.0);
    }

    #[test]
    fn test_groups_and_sorts_descending() {
        let video = video();
        let mut builder = BreakdownBuilder::new();
        builder.add(CategoryLabel::uncategorized(), Money::from_minor(3_000));
        builder.add(video.clone(), Money::from_minor(17_000));
        builder.add(video.clone(), Money::from_minor(10_000));

        let total = builder.total();
        assert_eq!(total.minor(), 30_000);

        let entries = builder.finish(total);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category_name, "Video");
        assert_eq!(entries[0].monthly_amount.minor(), 27_000);
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[0].percentage, 90.0);
        assert_eq!(entries[1].category_id, "uncategorized");
        assert_eq!(entries[1].color, "#9E9E9E");
        assert_eq!(entries[1].percentage, 10.0);
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let mut builder = BreakdownBuilder::new();
        builder.add(CategoryLabel::uncategorized(), Money::zero());
        let entries = builder.finish(Money::zero());
        assert_eq!(entries[0].percentage, 0.0);
        assert_eq!(entries[0].count, 1);
    }

    #[test]
    fn test_empty_builder() {
        let builder = BreakdownBuilder::new();
        assert!(builder.total().is_zero());
        assert!(builder.finish(Money::zero()).is_empty());
    }
}
