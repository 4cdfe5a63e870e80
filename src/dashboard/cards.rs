//! Card components for the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{DERIVED_METRIC_TERMS, KindSummary, Sign},
    html::{LINK_STYLE, format_currency},
    record::RecordKind,
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Renders the grouped totals of one kind of record with its sum.
pub(super) fn kind_summary_card(kind: RecordKind, summary: &KindSummary) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-2"
            {
                h2 class="text-lg font-semibold" { (kind.plural_title()) }
                a href=(kind.page_view()) class=(LINK_STYLE) { "Manage" }
            }

            @if summary.groups.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No " (kind.collection()) }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for group in &summary.groups {
                        li class="flex justify-between py-1"
                        {
                            span dir="auto" { (group.label) }
                            span { (format_currency(group.total)) }
                        }
                    }
                }
            }

            p class="mt-2 font-semibold text-right"
            {
                "sum: " (format_currency(summary.total))
            }
        }
    }
}

/// Renders the derived metric along with the General entries it is made of.
pub(super) fn derived_metric_card(value: f64) -> Markup {
    let formula = DERIVED_METRIC_TERMS
        .iter()
        .map(|(label, sign)| match sign {
            Sign::Add => format!("+ {label}"),
            Sign::Subtract => format!("− {label}"),
        })
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        div class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold" { "Derived Total" }
            p class="text-3xl font-bold my-2" { (format_currency(value)) }
            p class="text-sm text-gray-500 dark:text-gray-400" dir="auto"
            {
                "Credits " (formula)
            }
        }
    }
}
