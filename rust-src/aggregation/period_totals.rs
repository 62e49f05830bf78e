//! Monthly and yearly totals derived from day values.

use crate::models::{month_prefix, year_prefix, DayValues};


/// Totals for the displayed month and its year.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodSummary {
    pub month_total: f64,
    pub year_total: f64,
    pub month_entries: usize,
    pub year_entries: usize,
}


/// Extract the numeric magnitude of a note.
///
/// Every character other than an ASCII digit, `.` or `-` is dropped and the
/// remainder must parse as a whole. Commas are dropped too, so `"100,50"`
/// reads as `10050`. Leftovers such as `"1.2.3"` or `"5-3"` do not parse.
pub fn extract_number(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    stripped.parse::<f64>().ok().filter(|n| n.is_finite())
}


/// Sum the numeric values of every key accepted by `predicate`.
///
/// Values without a number contribute 0. Iteration follows key order so
/// floating-point results are reproducible.
pub fn total<P>(values: &DayValues, predicate: P) -> f64
where
    P: Fn(&str) -> bool,
{
    values
        .iter()
        .filter(|(key, _)| predicate(key.as_str()))
        .filter_map(|(_, value)| extract_number(value))
        .fold(0.0, |acc, n| acc + n)
}


/// Total of a zero-based month.
pub fn month_total(values: &DayValues, year: i32, month: u32) -> f64 {
    let prefix = month_prefix(year, month);
    total(values, |key| key.starts_with(&prefix))
}


/// Total of a whole year.
pub fn year_total(values: &DayValues, year: i32) -> f64 {
    let prefix = year_prefix(year);
    total(values, |key| key.starts_with(&prefix))
}


/// Month and year totals plus entry counts for a view.
pub fn summarize_period(values: &DayValues, year: i32, month: u32) -> PeriodSummary {
    let month_key = month_prefix(year, month);
    let year_key = year_prefix(year);

    PeriodSummary {
        month_total: total(values, |key| key.starts_with(&month_key)),
        year_total: total(values, |key| key.starts_with(&year_key)),
        month_entries: values.keys().filter(|k| k.starts_with(&month_key)).count(),
        year_entries: values.keys().filter(|k| k.starts_with(&year_key)).count(),
    }
}


/// Format a total the way the calendar shows it: integers without a
/// fractional part, everything else with up to two decimals.
pub fn format_total(value: f64) -> String {
    let text = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    // Negative zero, or a negative value that rounds to it.
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> DayValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("100"), Some(100.0));
        assert_eq!(extract_number("lunch 12.5"), Some(12.5));
        assert_eq!(extract_number("-30 refund"), Some(-30.0));
        assert_eq!(extract_number(".5"), Some(0.5));
        assert_eq!(extract_number("no digits"), None);
        assert_eq!(extract_number("-"), None);
    }

    #[test]
    fn test_extract_number_strips_comma() {
        assert_eq!(extract_number("R$ 100,50 texto"), Some(10050.0));
        assert_eq!(extract_number("1,234.5"), Some(1234.5));
    }

    #[test]
    fn test_extract_number_rejects_ambiguous_leftovers() {
        assert_eq!(extract_number("1.2.3"), None);
        assert_eq!(extract_number("--5"), None);
        assert_eq!(extract_number("10 - 3"), None);
        assert_eq!(extract_number("2024-01-15"), None);
    }

    #[test]
    fn test_total_of_empty_store_is_zero() {
        assert_eq!(total(&DayValues::new(), |_| true), 0.0);
    }

    #[test]
    fn test_empty_total_is_positive_zero() {
        let empty = total(&DayValues::new(), |_| true);
        assert!(!empty.is_sign_negative());
        assert_eq!(format_total(empty), "0");
        assert_eq!(format_total(month_total(&DayValues::new(), 2024, 2)), "0");
        assert_eq!(format_total(-0.0), "0");
        assert_eq!(format_total(-0.001), "0");
    }

    #[test]
    fn test_total_ignores_values_without_digits() {
        let store = values(&[("2024-0-1", "holiday"), ("2024-0-2", "???")]);
        assert_eq!(month_total(&store, 2024, 0), 0.0);
    }

    #[test]
    fn test_single_entry_month_total() {
        let store = values(&[("2024-0-15", "100")]);
        assert_eq!(total(&store, |k| k.starts_with("2024-0")), 100.0);
        assert_eq!(month_total(&store, 2024, 0), 100.0);
    }

    #[test]
    fn test_month_total_does_not_leak_into_later_months() {
        let store = values(&[("2024-1-3", "5"), ("2024-10-3", "7"), ("2024-11-3", "11")]);
        assert_eq!(month_total(&store, 2024, 1), 5.0);
        assert_eq!(month_total(&store, 2024, 10), 7.0);
        assert_eq!(year_total(&store, 2024), 23.0);
    }

    #[test]
    fn test_year_total_excludes_other_years() {
        let store = values(&[("2024-0-1", "10"), ("2023-11-31", "99"), ("20245-0-1", "1")]);
        assert_eq!(year_total(&store, 2024), 10.0);
    }

    #[test]
    fn test_summarize_period() {
        let store = values(&[
            ("2024-0-1", "10"),
            ("2024-0-2", "note"),
            ("2024-3-1", "2.5"),
        ]);
        let summary = summarize_period(&store, 2024, 0);

        assert_eq!(summary.month_total, 10.0);
        assert_eq!(summary.year_total, 12.5);
        assert_eq!(summary.month_entries, 2);
        assert_eq!(summary.year_entries, 3);
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(100.0), "100");
        assert_eq!(format_total(12.5), "12.5");
        assert_eq!(format_total(0.1 + 0.2), "0.3");
        assert_eq!(format_total(-3.0), "-3");
    }
}
