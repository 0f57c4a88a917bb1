use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Payment category of an expense.
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

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(EngineError::InvalidCategory(format!(
                "unsupported category: {other}"
            ))),
        }
    }
}
