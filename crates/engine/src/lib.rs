//! Holiday spending domain.
//!
//! The engine owns the children and their expenses, validates input and
//! derives the spending totals. Currency formatting and conversion live here
//! too so that every front end renders amounts the same way.

pub use category::Category;
pub use children::Child;
pub use currency::{Currency, GBP_TO_EUR_RATE, MAD_TO_GBP_RATE, convert_to_gbp};
pub use error::EngineError;
pub use expenses::{Expense, ExpensePatch, NewExpense};
pub use format::{format_currency, format_currency_code};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use totals::Totals;

pub mod children;
pub mod expenses;

mod category;
mod currency;
mod error;
mod format;
mod money;
mod ops;
mod totals;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
