//! Month grid rendering for terminal output.

use crate::aggregation::{format_total, PeriodSummary};
use crate::app::MonthView;
use crate::models::DayValues;


const ORANGE: &str = "\x1b[38;5;208m";
const CYAN: &str = "\x1b[36m";
const TEAL: &str = "\x1b[38;5;30m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

const CELL_WIDTH: usize = 5;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];


struct Palette {
    enabled: bool,
}


impl Palette {
    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}


/// Title of a month view, e.g. `January 2024`.
pub fn month_title(view: MonthView) -> String {
    let name = MONTH_NAMES.get(view.month as usize).copied().unwrap_or("?");
    format!("{name} {}", view.year)
}


/// Render the grid, the month's notes and the totals.
///
/// Days holding a note are marked with `*`; `today` (a day of `view`, if
/// it is on screen) is highlighted when color is enabled and marked with
/// `<` otherwise.
pub fn render_month(
    view: MonthView,
    values: &DayValues,
    summary: &PeriodSummary,
    today: Option<u32>,
    color: bool,
) -> String {
    let palette = Palette { enabled: color };
    let mut out = String::new();

    let title = month_title(view);
    let width = CELL_WIDTH * 7;
    out.push_str(&palette.paint(BOLD, &format!("{title:^width$}")));
    out.push('\n');

    for name in WEEKDAY_NAMES {
        out.push_str(&palette.paint(TEAL, &format!("{name:>4} ")));
    }
    out.push('\n');

    let leading = view.first_weekday() as usize;
    out.push_str(&" ".repeat(leading * CELL_WIDTH));

    let mut column = leading;
    let mut notes = Vec::new();

    for day in 1..=view.days_in_month() {
        let Ok(key) = view.key(day) else { continue };
        let note = values.get(&key.to_string());
        let is_today = today == Some(day);

        let mark = match (note.is_some(), is_today && !color) {
            (true, _) => '*',
            (false, true) => '<',
            (false, false) => ' ',
        };
        let cell = format!("{day:>4}{mark}");
        out.push_str(&if is_today { palette.paint(ORANGE, &cell) } else { cell });

        if let Some(note) = note {
            notes.push((day, note));
        }

        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }

    if !notes.is_empty() {
        out.push('\n');
        for (day, note) in notes {
            out.push_str(&format!("{day:>4}  {}\n", palette.paint(CYAN, note)));
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Month total: {}\n",
        palette.paint(ORANGE, &format_total(summary.month_total))
    ));
    out.push_str(&format!(
        "Year total ({}): {}\n",
        view.year,
        palette.paint(CYAN, &format_total(summary.year_total))
    ));

    out
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::summarize_period;

    fn values(pairs: &[(&str, &str)]) -> DayValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(MonthView { year: 2024, month: 0 }), "January 2024");
        assert_eq!(month_title(MonthView { year: 1999, month: 11 }), "December 1999");
    }

    #[test]
    fn test_render_plain_month() {
        let view = MonthView { year: 2024, month: 1 };
        let store = values(&[("2024-1-14", "100"), ("2024-0-2", "9")]);
        let summary = summarize_period(&store, view.year, view.month);
        let text = render_month(view, &store, &summary, Some(20), false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "February 2024");
        assert!(lines[1].contains("Sun") && lines[1].contains("Sat"));
        // 2024-02-01 is a Thursday: four empty cells first.
        assert!(lines[2].starts_with(&" ".repeat(20)));
        assert!(lines[2].contains("   1 "));
        assert!(text.contains("  14*"));
        assert!(text.contains("  20<"));
        assert!(text.contains("  14  100\n"));
        assert!(text.contains("Month total: 100\n"));
        assert!(text.contains("Year total (2024): 109\n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_colored_highlights_today() {
        let view = MonthView { year: 2024, month: 0 };
        let summary = PeriodSummary::default();
        let text = render_month(view, &DayValues::new(), &summary, Some(15), true);
        assert!(text.contains(&format!("{ORANGE}  15 {RESET}")));
        assert!(text.contains("Month total: "));
    }
}
