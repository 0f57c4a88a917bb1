//! Plain text rendering of the dashboard.

use api_types::expense::Expense;
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use engine::format_currency_code;

use crate::dashboard::ChildDashboard;

pub fn format_date(date: &DateTime<FixedOffset>, timezone: Tz) -> String {
    date.with_timezone(&timezone)
        .format("%d %b %Y, %H:%M")
        .to_string()
}

pub fn expense_line(expense: &Expense, timezone: Tz) -> String {
    format!(
        "#{:<5} {:<19} {:<28} {:>14}  {}",
        expense.id,
        format_date(&expense.date, timezone),
        expense.description,
        format_currency_code(expense.amount, Some(expense.currency.as_str())),
        expense.category.as_str(),
    )
}

pub fn dashboard(dashboard: &ChildDashboard, timezone: Tz) -> String {
    let headline = dashboard.headline();
    let mut lines = vec![
        format!("{}'s Spending", dashboard.child_name()),
        format!("  Total: {}", headline.grand_total_gbp),
        format!("  Cash: {}  Card: {}", headline.cash, headline.card),
    ];
    for line in &headline.per_currency {
        lines.push(format!(
            "  {}: {} (≈ {})",
            line.currency.as_str(),
            line.total,
            line.total_gbp
        ));
    }
    lines.push(String::new());

    let visible = dashboard.visible();
    if dashboard.expenses().is_empty() {
        lines.push("No expenses recorded yet.".to_string());
    } else if visible.is_empty() {
        lines.push("No expenses match the selected filters.".to_string());
    } else {
        lines.extend(visible.into_iter().map(|e| expense_line(e, timezone)));
    }
    lines.join("\n")
}
