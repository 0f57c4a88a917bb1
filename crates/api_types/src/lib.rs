use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Currencies accepted on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Gbp,
    #[default]
    Eur,
    Mad,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Gbp, Currency::Eur, Currency::Mad];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Mad => "MAD",
        }
    }
}

/// How an expense was paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Cash,
    Card,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Cash, Category::Card];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

pub mod child {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Child {
        pub id: i32,
        pub name: String,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i32,
        pub amount: f64,
        pub description: String,
        /// RFC3339 timestamp, UTC.
        pub date: DateTime<FixedOffset>,
        pub child_id: i32,
        pub category: Category,
        pub currency: Currency,
    }

    /// Request body for `POST /expenses`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub child_id: i32,
        pub amount: f64,
        pub description: String,
        /// Accepts RFC3339 with an offset, or a naive timestamp read as UTC.
        #[serde(with = "crate::timestamp")]
        pub date: DateTime<FixedOffset>,
        #[serde(default)]
        pub category: Option<Category>,
        #[serde(default)]
        pub currency: Option<Currency>,
    }

    /// Request body for `PUT /expenses/{id}`. Absent fields are left untouched.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<Category>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub currency: Option<Currency>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "crate::timestamp::option"
        )]
        pub date: Option<DateTime<FixedOffset>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub child_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub status: String,
        pub id: i32,
    }
}

pub mod totals {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct CurrencyTotal {
        pub total: f64,
        /// `total` converted with the fixed rate to GBP.
        #[serde(default)]
        pub total_gbp: f64,
    }

    /// Server-computed spending summary for one child.
    ///
    /// Older servers only sent `total_amount` (and later `total_cash` and
    /// `total_card`), so every field other than `child_id` tolerates being
    /// absent.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TotalsSnapshot {
        pub child_id: i32,
        #[serde(default)]
        pub total_amount: f64,
        #[serde(default)]
        pub total_cash: f64,
        #[serde(default)]
        pub total_card: f64,
        #[serde(default)]
        pub currency_totals: BTreeMap<Currency, CurrencyTotal>,
        #[serde(default)]
        pub grand_total_gbp: f64,
    }
}

pub mod auth {
    use super::*;

    /// Name of the header carrying the admin PIN.
    pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PinStatus {
        pub status: String,
    }
}

/// Timestamp (de)serialization that also accepts naive `YYYY-MM-DDTHH:MM:SS`
/// values, reading them as UTC.
pub mod timestamp {
    use chrono::{DateTime, FixedOffset, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()?;
        Some(naive.and_utc().fixed_offset())
    }

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(
            value: &Option<DateTime<FixedOffset>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                Some(raw) => parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{expense::ExpenseNew, totals::TotalsSnapshot, *};

    #[test]
    fn naive_timestamp_is_read_as_utc() {
        let body = r#"{"amount": 50.0, "description": "Gift", "date": "2023-10-27T10:00:00", "child_id": 1}"#;
        let payload: ExpenseNew = serde_json::from_str(body).unwrap();
        assert_eq!(payload.date.to_rfc3339(), "2023-10-27T10:00:00+00:00");
        assert_eq!(payload.category, None);
        assert_eq!(payload.currency, None);
    }

    #[test]
    fn offset_timestamp_is_kept() {
        let dt = timestamp::parse("2024-01-02T10:00:00+01:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn currency_and_category_wire_names() {
        assert_eq!(serde_json::to_string(&Currency::Mad).unwrap(), "\"MAD\"");
        assert_eq!(serde_json::to_string(&Category::Card).unwrap(), "\"card\"");
        assert_eq!(Currency::default(), Currency::Eur);
    }

    #[test]
    fn legacy_totals_shape_still_decodes() {
        let snapshot: TotalsSnapshot =
            serde_json::from_str(r#"{"child_id": 3, "total_amount": 12.5}"#).unwrap();
        assert_eq!(snapshot.total_amount, 12.5);
        assert!(snapshot.currency_totals.is_empty());
        assert_eq!(snapshot.grand_total_gbp, 0.0);
    }
}
