//! Grouping and summing of records for the dashboard.
//!
//! Aggregation works on lists that have already been fetched and never fails.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::Record;

/// Whether a term of the derived metric is added or subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    Add,
    Subtract,
}

/// The General entries that make up the derived metric, applied on top of the
/// credits total.
pub(crate) const DERIVED_METRIC_TERMS: [(&str, Sign); 3] = [
    ("הוצאות", Sign::Add),
    ("ציפים", Sign::Subtract),
    ("בד ביט", Sign::Subtract),
];

/// Something that can be grouped by a text label and summed.
pub(crate) trait Summable {
    /// The text the item is grouped by, before trimming.
    fn group_label(&self) -> &str;

    /// The amount, if there is one. Missing amounts count as zero.
    fn amount(&self) -> Option<f64>;
}

impl Summable for Record {
    fn group_label(&self) -> &str {
        &self.label
    }

    fn amount(&self) -> Option<f64> {
        Some(self.amount)
    }
}

/// The sum of the amounts that share a trimmed label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct GroupTotal {
    pub label: String,
    pub total: f64,
}

/// Group `items` by their label with surrounding whitespace removed and sum
/// each group.
///
/// Groups are returned in the order their label first appears.
pub(crate) fn group_totals<T: Summable>(items: &[T]) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut index_by_label: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let label = item.group_label().trim();
        let amount = item.amount().unwrap_or(0.0);

        match index_by_label.get(label) {
            Some(&index) => groups[index].total += amount,
            None => {
                index_by_label.insert(label, groups.len());
                groups.push(GroupTotal {
                    label: label.to_owned(),
                    total: amount,
                });
            }
        }
    }

    groups
}

/// The sum of every amount in `items`.
pub(crate) fn grand_total<T: Summable>(items: &[T]) -> f64 {
    items.iter().map(|item| item.amount().unwrap_or(0.0)).sum()
}

/// The amount of the first item whose label is exactly `label`, or zero.
fn amount_of<T: Summable>(label: &str, items: &[T]) -> f64 {
    items
        .iter()
        .find(|item| item.group_label() == label)
        .and_then(Summable::amount)
        .unwrap_or(0.0)
}

/// The credits total adjusted by the General entries in [DERIVED_METRIC_TERMS].
pub(crate) fn derived_metric<T: Summable>(credits_total: f64, generals: &[T]) -> f64 {
    DERIVED_METRIC_TERMS
        .iter()
        .fold(credits_total, |total, (label, sign)| {
            let amount = amount_of(label, generals);

            match sign {
                Sign::Add => total + amount,
                Sign::Subtract => total - amount,
            }
        })
}

/// Grouped totals and the grand total for one kind of record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct KindSummary {
    pub groups: Vec<GroupTotal>,
    pub total: f64,
}

impl KindSummary {
    fn new<T: Summable>(items: &[T]) -> Self {
        Self {
            groups: group_totals(items),
            total: grand_total(items),
        }
    }
}

/// Every figure shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DashboardSummary {
    pub credits: KindSummary,
    pub pluses: KindSummary,
    pub transactions: KindSummary,
    pub generals: KindSummary,
    pub derived_metric: f64,
}

/// Aggregate the full record lists of each kind.
pub(crate) fn summarize(
    credits: &[Record],
    pluses: &[Record],
    transactions: &[Record],
    generals: &[Record],
) -> DashboardSummary {
    let credits_summary = KindSummary::new(credits);
    let derived_metric = derived_metric(credits_summary.total, generals);

    DashboardSummary {
        credits: credits_summary,
        pluses: KindSummary::new(pluses),
        transactions: KindSummary::new(transactions),
        generals: KindSummary::new(generals),
        derived_metric,
    }
}
