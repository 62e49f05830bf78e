//! Aggregation of numeric day values.

mod period_totals;

#[allow(unused_imports)]
pub use period_totals::{
    extract_number,
    format_total,
    month_total,
    summarize_period,
    total,
    year_total,
    PeriodSummary,
};
