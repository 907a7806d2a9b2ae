use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::workflow::ParseError;

/// Language used for user-facing labels and reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tr => write!(f, "tr"),
            Self::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" | "tr-tr" => Ok(Self::Tr),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(ParseError {
                kind: "locale",
                value: s.to_string(),
            }),
        }
    }
}
