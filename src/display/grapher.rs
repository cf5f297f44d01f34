//! Monthly chart rendering
//!
//! Draws one column per month: markers for the month's income and expenses
//! and a filled bar for the running balance at the end of the month. Row
//! bucketing is done in integer cents, scaled by the chart height, so no value
//! is misplaced by rounding.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use colored::Color;

use super::style::{Paint, Style};
use super::text::{left_align, right_align};
use crate::models::{Amount, Totals};

/// Character cells per month column
const SLOT_WIDTH: usize = 3;

/// Legend text width, markers included
const LEGEND_WIDTH: usize = 23;

/// What a chart cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Background,
    Bar,
    In,
    Out,
    Both,
}

impl Cell {
    fn render(self, style: &Style) -> String {
        let (glyph, color) = match self {
            Cell::Background => (" ", None),
            Cell::Bar => (if style.uses_color() { "█" } else { "#" }, Some(Color::BrightBlack)),
            Cell::In => ("+", Some(Color::Green)),
            Cell::Out => ("x", Some(Color::Red)),
            Cell::Both => ("*", Some(Color::BrightYellow)),
        };
        let paint = match color {
            Some(color) => Paint::new().fg(color).bg(color),
            None => Paint::new().bg(Color::Black),
        };
        style.paint(glyph, paint)
    }
}

/// Value range and series of a chart, measured before drawing
#[derive(Debug, Clone)]
struct Chart<'a> {
    months: &'a [Totals],
    /// Balance at the end of each month
    cumulative: Vec<Amount>,
    min: i64,
    span: i64,
    height: usize,
}

impl<'a> Chart<'a> {
    fn measure(months: &'a [Totals], totals: &Totals, height: usize) -> Self {
        let height = height.max(1);

        // Walk back from today's balance, removing each month's net.
        let mut cumulative = vec![Amount::zero(); months.len()];
        let mut balance = totals.net();
        for (slot, month) in cumulative.iter_mut().zip(months).rev() {
            *slot = balance;
            balance -= month.net();
        }

        let mut min = cumulative.first().map_or(0, Amount::cents);
        let mut max = min;
        for (month, total) in months.iter().zip(&cumulative) {
            for value in [total.cents(), month.sum_in.cents(), -month.sum_out.cents()] {
                min = min.min(value);
                max = max.max(value);
            }
        }

        // Leave some room under the lowest value.
        min -= min.abs() / 10;
        if max <= min {
            max = min + 100;
        }

        Self {
            months,
            cumulative,
            min,
            span: max - min,
            height,
        }
    }

    fn max(&self) -> Amount {
        Amount::from_cents(self.min + self.span)
    }

    /// `value - min`, in units of a row's span
    fn scaled(&self, value: i64) -> i128 {
        (i128::from(value) - i128::from(self.min)) * self.height as i128
    }

    fn row_bound(&self, row: usize) -> i128 {
        row as i128 * i128::from(self.span)
    }

    /// Whether `value` lies in `(lower(row), lower(row + 1)]`
    fn in_row(&self, value: i64, row: usize) -> bool {
        let scaled = self.scaled(value);
        scaled > self.row_bound(row) && scaled <= self.row_bound(row + 1)
    }

    fn cell(&self, row: usize, month: usize) -> Cell {
        let totals = &self.months[month];
        let contains_in = self.in_row(totals.sum_in.cents(), row);
        let contains_out = self.in_row(-totals.sum_out.cents(), row);

        match (contains_in, contains_out) {
            (true, true) => Cell::Both,
            (true, false) => Cell::In,
            (false, true) => Cell::Out,
            _ if self.scaled(self.cumulative[month].cents()) > self.row_bound(row) => Cell::Bar,
            _ => Cell::Background,
        }
    }

    /// Vertical axis labels keyed by row
    fn labels(&self) -> BTreeMap<usize, Amount> {
        let count = (self.height / 4).max(2);
        let steps = (count - 1) as i128;
        (0..count)
            .map(|i| {
                let row = i * self.height / (count - 1);
                let offset = i as i128 * i128::from(self.span) / steps;
                let value = i128::from(self.min) + offset;
                (row, Amount::from_cents(value as i64))
            })
            .collect()
    }

    fn label_width(&self) -> usize {
        Amount::from_cents(self.min)
            .display_width()
            .max(self.max().display_width())
            + 2
    }
}

/// Number (1-12) of the month shown in column `index` of `count`, the last
/// column being the month of `today`
pub fn month_number(index: usize, count: usize, today: NaiveDate) -> u32 {
    let back = (count - 1 - index) as i64;
    let month0 = (i64::from(today.month0()) - back).rem_euclid(12);
    month0 as u32 + 1
}

/// Render the chart of `months` (oldest first) ending at the month of `today`
///
/// `totals` are the all-time totals, used to anchor the running balance.
pub fn format_graph(
    months: &[Totals],
    totals: &Totals,
    height: usize,
    today: NaiveDate,
    style: &Style,
) -> String {
    if months.is_empty() {
        return format!("{}\n", style.italic("No month to display"));
    }

    let chart = Chart::measure(months, totals, height);
    let labels = chart.labels();
    let pad = " ".repeat(chart.label_width());
    // Never narrower than the legend, extra columns stay empty.
    let graph_width = ((months.len() + 1) * SLOT_WIDTH).max(LEGEND_WIDTH - 2);
    let vertical = style.vertical();
    let background = Cell::Background.render(style);

    let border = if style.is_bordered() {
        format!("{}+{}+\n", pad, "-".repeat(graph_width + 2))
    } else {
        String::new()
    };

    let mut output = String::from("\n");
    output.push_str(&border);

    for row in (0..=chart.height).rev() {
        let label = labels
            .get(&row)
            .map(|value| value.to_string())
            .unwrap_or_default();
        output.push_str(&style.italic(&right_align(&label, pad.len())));
        output.push_str(vertical);
        output.push_str(&background.repeat(SLOT_WIDTH));

        for x in 1..graph_width {
            let sub = x % SLOT_WIDTH;
            let month = x / SLOT_WIDTH;
            let gap = sub == 0 || (style.is_bordered() && sub == 2);
            if gap || month >= months.len() {
                output.push_str(&background);
            } else {
                output.push_str(&chart.cell(row, month).render(style));
            }
        }

        output.push_str(vertical);
        output.push('\n');
    }

    output.push_str(&border);

    // Month numbers under each column
    output.push_str(&pad);
    output.push_str(vertical);
    output.push_str(&" ".repeat(SLOT_WIDTH));
    for x in 1..graph_width - 1 {
        let month = x / SLOT_WIDTH;
        if month >= months.len() {
            output.push(' ');
        } else if x % SLOT_WIDTH == 1 {
            let number = month_number(month, months.len(), today).to_string();
            output.push_str(&style.bold(&left_align(&number, SLOT_WIDTH)));
        }
    }
    output.push_str(vertical);
    output.push('\n');

    if style.is_bordered() {
        output.push_str(&border);
    } else {
        output.push('\n');
    }

    let legend = format!(
        "{}: total  {}: in  {}: out",
        Cell::Bar.render(style),
        Cell::In.render(style),
        Cell::Out.render(style)
    );
    let spare = (graph_width + 2).saturating_sub(LEGEND_WIDTH);
    let half = " ".repeat(spare / 2);
    output.push_str(&pad);
    output.push_str(vertical);
    output.push_str(&half);
    output.push_str(&legend);
    output.push_str(&half);
    if spare % 2 == 1 {
        output.push(' ');
    }
    output.push_str(vertical);
    output.push('\n');

    output.push_str(&border);
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::text::width;

    fn totals(sum_in: i64, sum_out: i64) -> Totals {
        Totals::new(Amount::from_cents(sum_in), Amount::from_cents(sum_out))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cumulative_walks_back_from_total() {
        let months = [totals(1000, -200), totals(0, -300), totals(500, 0)];
        let all_time = totals(5000, -1000);
        let chart = Chart::measure(&months, &all_time, 10);

        let cumulative: Vec<i64> = chart.cumulative.iter().map(Amount::cents).collect();
        assert_eq!(cumulative, [3800, 3500, 4000]);
    }

    #[test]
    fn test_range_is_padded_below() {
        let months = [totals(1000, -250)];
        let chart = Chart::measure(&months, &totals(1000, -250), 4);
        assert_eq!(chart.min, 225);
        assert_eq!(chart.max().cents(), 1000);

        let months = [totals(0, -1000)];
        let chart = Chart::measure(&months, &totals(0, -1000), 4);
        assert_eq!(chart.min, -1100);
    }

    #[test]
    fn test_flat_range_does_not_collapse() {
        let months = [totals(0, 0), totals(0, 0)];
        let chart = Chart::measure(&months, &Totals::default(), 4);
        assert!(chart.span > 0);
    }

    #[test]
    fn test_cell_classification() {
        let months = [totals(1000, -250)];
        let chart = Chart::measure(&months, &totals(1000, -250), 4);

        assert_eq!(chart.cell(0, 0), Cell::Out);
        assert_eq!(chart.cell(1, 0), Cell::Bar);
        assert_eq!(chart.cell(2, 0), Cell::Bar);
        assert_eq!(chart.cell(3, 0), Cell::In);
        assert_eq!(chart.cell(4, 0), Cell::Background);
    }

    #[test]
    fn test_combined_marker() {
        let months = [totals(500, -500), totals(2000, 0)];
        let chart = Chart::measure(&months, &totals(2500, -500), 8);
        let rows: Vec<Cell> = (0..=8).map(|row| chart.cell(row, 0)).collect();
        assert!(rows.contains(&Cell::Both));
        assert!(!rows.contains(&Cell::In));
        assert!(!rows.contains(&Cell::Out));
    }

    #[test]
    fn test_labels_span_the_range() {
        let months = [totals(1000, -250)];
        let chart = Chart::measure(&months, &totals(1000, -250), 8);
        let labels = chart.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[&0].cents(), 225);
        assert_eq!(labels[&8].cents(), 1000);

        let chart = Chart::measure(&months, &totals(1000, -250), 24);
        let labels = chart.labels();
        assert_eq!(labels.len(), 6);
        assert!(labels.contains_key(&0));
        assert!(labels.contains_key(&24));
    }

    #[test]
    fn test_month_numbers_end_at_today() {
        let today = ymd(2024, 3, 15);
        let numbers: Vec<u32> = (0..4).map(|i| month_number(i, 4, today)).collect();
        assert_eq!(numbers, [12, 1, 2, 3]);

        let numbers: Vec<u32> = (0..14).map(|i| month_number(i, 14, today)).collect();
        assert_eq!(numbers[0], 2);
        assert_eq!(numbers[13], 3);
    }

    #[test]
    fn test_plain_graph_is_aligned() {
        let months = [totals(1000, -250), totals(0, 0), totals(300, -900), totals(0, -10)];
        let output = format_graph(&months, &totals(5000, -2000), 12, ymd(2024, 3, 15), &Style::plain());

        let lines: Vec<&str> = output.lines().filter(|l| !l.is_empty()).collect();
        let expected = width(lines[0]);
        for line in &lines {
            assert_eq!(width(line), expected, "misaligned line: {:?}", line);
        }
        // Top border, 13 rows, border, axis, border, legend, border
        assert_eq!(lines.len(), 19);
        assert!(output.contains("12 1  2  3"));
        assert!(output.contains("#: total  +: in  x: out"));
    }

    #[test]
    fn test_decorated_graph_has_no_borders() {
        colored::control::set_override(true);
        let months = [totals(1000, -250), totals(200, -100)];
        let output = format_graph(&months, &totals(1200, -350), 8, ymd(2024, 3, 15), &Style::decorated());
        assert!(!output.contains('|'));
        assert!(!output.contains("+--"));
        assert!(output.contains("█"));
        assert!(output.contains("\x1b["));
    }

    #[test]
    fn test_empty_graph() {
        let output = format_graph(&[], &Totals::default(), 8, ymd(2024, 3, 15), &Style::plain());
        assert_eq!(output, "No month to display\n");
    }
}
