//! Listing and totals rendering
//!
//! The operation table is rendered in two passes: the layout is measured over
//! the whole selection first, then rows are emitted so that every month block
//! lines up.

use chrono::{Datelike, NaiveDate};
use colored::Color;

use super::style::{Paint, Style};
use super::text::{left_align, right_align, width};
use crate::models::amount::digit_count;
use crate::models::{Operation, Totals};

/// Month names used in block headers
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Narrowest amount column, fits `+123456.78`
const MIN_AMOUNT_WIDTH: usize = 9;

/// Characters of a row that are not index, amount or label:
/// four separators, padding spaces and the `DD/MM/YY` date.
const FIXED_ROW_WIDTH: usize = 18;

const FOOTER_PAINT: Paint = Paint::new().bg(Color::BrightBlack).bold();

/// Render the In / Out / Total summary box
pub fn format_totals(totals: &Totals, leading_newline: bool, style: &Style) -> String {
    let values = [
        totals.sum_in.to_string(),
        totals.sum_out.to_string(),
        totals.net().to_string(),
    ];
    let digits = values.iter().map(|v| width(v)).max().unwrap_or(0);

    let rows = [
        (" In:    ", &values[0], Color::Green),
        (" Out:   ", &values[1], Color::Red),
        (" Total: ", &values[2], Color::White),
    ];

    let vertical = style.vertical();
    let rule = style.rule(digits + 11);

    let mut output = String::new();
    if leading_newline {
        output.push('\n');
    }
    push_rule(&mut output, &rule);
    for (title, value, color) in rows {
        let text = format!("{}{} ", title, right_align(value, digits));
        let paint = Paint::new().fg(color).bg(Color::Black).bold();
        output.push_str(&format!("{}{}{}\n", vertical, style.paint(&text, paint), vertical));
    }
    push_rule(&mut output, &rule);
    output.push('\n');
    output
}

/// Render operations grouped by month with a subtotal under each month
///
/// `total_count` is the size of the whole ledger; `operations` are its last
/// entries, so the first one has index `total_count - operations.len()`.
pub fn format_list(operations: &[Operation], total_count: usize, style: &Style) -> String {
    if operations.is_empty() {
        return format!("{}\n", style.italic("Empty list"));
    }

    let groups = month_groups(operations);
    let layout = ListLayout::measure(operations, &groups, total_count);
    let rule = style.rule(layout.line_width());

    let mut output = String::from("\n ");
    output.push_str(&style.inverse(&format!(
        "Operations: {}/{} entries.",
        operations.len(),
        total_count
    )));

    let mut index = total_count.saturating_sub(operations.len());
    for group in &groups {
        output.push('\n');
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&layout.month_header(operations[group.start].date(), style));

        for operation in &operations[group.start..group.end] {
            output.push('\n');
            output.push_str(&layout.operation_row(operation, index, style));
            index += 1;
        }

        output.push('\n');
        output.push_str(&layout.totals_footer(&group.totals, style));
    }

    output.push('\n');
    output.push_str(&rule);
    output.push('\n');
    output
}

/// Consecutive operations sharing a month number
#[derive(Debug, Clone, PartialEq)]
struct MonthGroup {
    start: usize,
    end: usize,
    totals: Totals,
}

/// Split operations into runs of the same month
///
/// Only the month number is compared, so the input is expected to be in
/// chronological order.
fn month_groups(operations: &[Operation]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for (i, operation) in operations.iter().enumerate() {
        let month = operation.date().month();
        match groups.last_mut() {
            Some(group) if operations[group.start].date().month() == month => {
                group.end = i + 1;
                group.totals.record(operation);
            }
            _ => {
                let mut totals = Totals::default();
                totals.record(operation);
                groups.push(MonthGroup {
                    start: i,
                    end: i + 1,
                    totals,
                });
            }
        }
    }
    groups
}

fn footer_text(totals: &Totals) -> (String, String, String) {
    (
        totals.sum_in.to_string(),
        (-totals.sum_out).to_string(),
        totals.net().to_string(),
    )
}

/// Column widths shared by every row of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListLayout {
    index_width: usize,
    amount_width: usize,
    label_width: usize,
}

impl ListLayout {
    fn measure(operations: &[Operation], groups: &[MonthGroup], total_count: usize) -> Self {
        let index_width = digit_count(total_count as u64);
        let amount_width = operations
            .iter()
            .map(|op| width(&op.amount().format(true)))
            .max()
            .unwrap_or(0)
            .max(MIN_AMOUNT_WIDTH);
        let widest_label = operations
            .iter()
            .map(|op| width(op.label()))
            .max()
            .unwrap_or(0);

        // Widen the label column when a subtotal would not fit in the row.
        let widest_footer = groups
            .iter()
            .map(|g| {
                let (sum_in, sum_out, net) = footer_text(&g.totals);
                width(&sum_in) + width(&sum_out) + width(&net) + 13
            })
            .max()
            .unwrap_or(0);
        let footer_label_width =
            (widest_footer + 2).saturating_sub(index_width + amount_width + FIXED_ROW_WIDTH);

        Self {
            index_width,
            amount_width,
            label_width: widest_label.max(footer_label_width),
        }
    }

    fn line_width(&self) -> usize {
        self.index_width + self.amount_width + self.label_width + FIXED_ROW_WIDTH
    }

    fn inner_rule(&self) -> String {
        format!(
            "+{}+{}+{}+{}+",
            "-".repeat(self.index_width),
            "-".repeat(self.amount_width + 1),
            "-".repeat(10),
            "-".repeat(self.label_width + 2)
        )
    }

    fn month_header(&self, date: NaiveDate, style: &Style) -> String {
        let name = MONTH_NAMES[date.month0() as usize];
        let title = format!("{}{} {}", " ".repeat(self.index_width + 2), name, date.year());
        let title = left_align(&title, self.line_width() - 2);
        let vertical = style.vertical();

        let mut header = format!("{}{}{}", vertical, style.inverse(&title), vertical);
        if style.is_bordered() {
            header.push('\n');
            header.push_str(&self.inner_rule());
        }
        header
    }

    fn totals_footer(&self, totals: &Totals, style: &Style) -> String {
        let (sum_in, sum_out, net) = footer_text(totals);
        let text_width = width(&sum_in) + width(&sum_out) + width(&net) + 13;
        let fill = " ".repeat((self.line_width() - 2).saturating_sub(text_width));

        let text = [
            style.paint("Total: ", FOOTER_PAINT),
            style.paint(&sum_in, FOOTER_PAINT.fg(Color::Green)),
            style.paint(" - ", FOOTER_PAINT),
            style.paint(&sum_out, FOOTER_PAINT.fg(Color::Red)),
            style.paint(&format!(" = {}{}", net, fill), FOOTER_PAINT),
        ]
        .concat();

        let vertical = style.vertical();
        let mut footer = String::new();
        if style.is_bordered() {
            footer.push_str(&self.inner_rule());
            footer.push('\n');
        }
        footer.push_str(&format!("{}{}{}", vertical, text, vertical));
        footer
    }

    fn operation_row(&self, operation: &Operation, index: usize, style: &Style) -> String {
        let vertical = style.vertical();
        let index = right_align(&index.to_string(), self.index_width);
        let amount = right_align(&operation.amount().format(true), self.amount_width);
        let date = operation.date().format("%d/%m/%y").to_string();
        let label = left_align(operation.label(), self.label_width + 1);

        format!(
            "{v}{}{v}{} {v} {} {v} {}{v}",
            style.dim(&index),
            style.bold(&amount),
            date,
            style.italic(&label),
            v = vertical
        )
    }
}

fn push_rule(output: &mut String, rule: &str) {
    if !rule.is_empty() {
        output.push_str(rule);
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn op(cents: i64, label: &str, y: i32, m: u32, d: u32) -> Operation {
        Operation::new(
            Amount::from_cents(cents),
            label,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn sample() -> Vec<Operation> {
        vec![
            op(100_000, "Salary", 2024, 1, 5),
            op(-25_000, "Groceries", 2024, 1, 10),
            op(-1_250, "Café crème", 2024, 2, 2),
        ]
    }

    fn table_lines(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|l| l.starts_with('+') || l.starts_with('|'))
            .collect()
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_list(&[], 0, &Style::plain()), "Empty list\n");
    }

    #[test]
    fn test_plain_list_is_aligned() {
        let output = format_list(&sample(), 3, &Style::plain());
        let lines = table_lines(&output);
        assert!(!lines.is_empty());

        let expected = width(lines[0]);
        for line in &lines {
            assert_eq!(width(line), expected, "misaligned line: {:?}", line);
        }
    }

    #[test]
    fn test_plain_list_content() {
        let output = format_list(&sample(), 3, &Style::plain());
        assert!(output.contains("Operations: 3/3 entries."));
        assert!(output.contains("January 2024"));
        assert!(output.contains("February 2024"));
        assert!(output.contains("|0| +1000.00 | 05/01/24 | Salary"));
        assert!(output.contains("|1|  -250.00 | 10/01/24 | Groceries"));
        assert!(output.contains("Total: 1000.00 - 250.00 = 750.00"));
        assert!(output.contains("Total: 0.00 - 12.50 = -12.50"));
    }

    #[test]
    fn test_indices_continue_from_ledger_size() {
        let ops = sample();
        let output = format_list(&ops[1..], 12, &Style::plain());
        assert!(output.contains("Operations: 2/12 entries."));
        assert!(output.contains("|10|  -250.00 |"));
        assert!(output.contains("|11|   -12.50 |"));
    }

    #[test]
    fn test_short_labels_still_fit_footer() {
        let ops = vec![op(123_456_789, "a", 2024, 1, 1), op(-98_765_432, "b", 2024, 1, 2)];
        let output = format_list(&ops, 2, &Style::plain());
        let lines = table_lines(&output);
        let expected = width(lines[0]);
        assert!(lines.iter().all(|l| width(l) == expected));
    }

    #[test]
    fn test_month_groups_use_month_number() {
        let ops = vec![
            op(-1, "a", 2023, 5, 1),
            op(-1, "b", 2023, 5, 2),
            op(-1, "c", 2023, 6, 1),
            op(-1, "d", 2024, 6, 1),
        ];
        let groups = month_groups(&ops);
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].start, groups[0].end), (0, 2));
        assert_eq!((groups[1].start, groups[1].end), (2, 4));
        assert_eq!(groups[1].totals.sum_out.cents(), -2);
    }

    #[test]
    fn test_decorated_list_has_no_borders() {
        colored::control::set_override(true);
        let output = format_list(&sample(), 3, &Style::decorated());
        assert!(!output.contains('|'));
        assert!(!output.contains("+--"));
        assert!(output.contains("Salary"));
        assert!(output.contains("February"));
        assert!(output.contains("\x1b["));
    }

    #[test]
    fn test_plain_totals_box() {
        let totals = Totals::new(Amount::from_cents(100_000), Amount::from_cents(-25_000));
        let output = format_totals(&totals, false, &Style::plain());
        assert_eq!(
            output,
            "+----------------+\n\
             | In:    1000.00 |\n\
             | Out:   -250.00 |\n\
             | Total:  750.00 |\n\
             +----------------+\n\n"
        );
    }

    #[test]
    fn test_decorated_totals_box() {
        let totals = Totals::new(Amount::from_cents(500), Amount::zero());
        let output = format_totals(&totals, true, &Style::decorated());
        assert!(output.starts_with('\n'));
        assert!(!output.contains('|'));
        assert!(output.contains("5.00"));
    }
}
