use std::io::Write;

use api_types::expense::Expense;
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct Row<'a> {
    id: i32,
    date: String,
    description: &'a str,
    category: &'static str,
    currency: &'static str,
    amount: String,
}

/// Write `expenses` as CSV, dates rendered in `timezone`.
pub fn write_expenses<W: Write>(writer: W, expenses: &[Expense], timezone: Tz) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for expense in expenses {
        csv.serialize(Row {
            id: expense.id,
            date: expense
                .date
                .with_timezone(&timezone)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            description: &expense.description,
            category: expense.category.as_str(),
            currency: expense.currency.as_str(),
            amount: format!("{:.2}", expense.amount),
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use api_types::{Category, Currency};
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn rows_follow_the_ledger() {
        let expenses = vec![Expense {
            id: 7,
            amount: 12.5,
            description: "Tagine, with mint tea".to_string(),
            date: Utc
                .with_ymd_and_hms(2024, 7, 1, 18, 5, 0)
                .unwrap()
                .fixed_offset(),
            child_id: 1,
            category: Category::Card,
            currency: Currency::Mad,
        }];

        let mut out = Vec::new();
        write_expenses(&mut out, &expenses, chrono_tz::Europe::London).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "id,date,description,category,currency,amount\n\
             7,2024-07-01 19:05,\"Tagine, with mint tea\",card,MAD,12.50\n"
        );
    }

    #[test]
    fn empty_ledger_writes_nothing() {
        let mut out = Vec::new();
        write_expenses(&mut out, &[], chrono_tz::Europe::London).unwrap();
        assert!(out.is_empty());
    }
}
