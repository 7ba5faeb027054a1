use rust_decimal::prelude::ToPrimitive;

use crate::domain::{Amount, CategoryTotal, DATE_FORMAT, Summary, Transaction, format_amount};

/// One `*` per this many currency units.
pub const BAR_SCALE: i64 = 10;

/// Category labels are padded or cut to this many characters.
pub const LABEL_WIDTH: usize = 15;

/// Longest bar drawn; larger totals are clipped to it.
pub const MAX_BAR_WIDTH: usize = 1000;

/// Render category totals as a horizontal bar chart, one line per category.
///
/// ```text
/// Food           : ****
/// Transport      : *
/// ```
pub fn render_bar_chart(totals: &[CategoryTotal]) -> String {
    totals
        .iter()
        .map(|c| format!("{}: {}", fit_label(&c.category), bar(c.total)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of `*` drawn for a total: `floor(total / 10)`, clamped to
/// `0..=MAX_BAR_WIDTH`.
pub fn bar_length(total: Amount) -> usize {
    (total / Amount::from(BAR_SCALE))
        .floor()
        .clamp(Amount::ZERO, Amount::from(MAX_BAR_WIDTH))
        .to_usize()
        .unwrap_or(0)
}

/// Prefix an amount with a currency symbol: `$4.50`, `$-12.00`.
pub fn format_money(amount: Amount, currency: &str) -> String {
    format!("{}{}", currency, format_amount(amount))
}

pub fn render_summary(summary: &Summary, currency: &str) -> String {
    format!(
        "Total Income: {}\nTotal Expenses: {}\nNet Savings: {}",
        format_money(summary.total_income, currency),
        format_money(summary.total_expenses, currency),
        format_money(summary.net_savings, currency)
    )
}

pub fn render_category_totals(totals: &[CategoryTotal], currency: &str) -> String {
    totals
        .iter()
        .map(|c| format!("{}: {}", c.category, format_money(c.total, currency)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line form of a transaction: `2024-01-05 | Expense | Food | Coffee : $4.50`
pub fn format_transaction(t: &Transaction, currency: &str) -> String {
    format!(
        "{} | {} | {} | {} : {}",
        t.date.format(DATE_FORMAT),
        t.kind,
        t.category,
        t.description,
        format_money(t.amount, currency)
    )
}

fn bar(total: Amount) -> String {
    "*".repeat(bar_length(total))
}

fn fit_label(label: &str) -> String {
    let cut: String = label.chars().take(LABEL_WIDTH).collect();
    format!("{:<width$}", cut, width = LABEL_WIDTH)
}
