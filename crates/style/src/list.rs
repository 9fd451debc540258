//! Defines enums for CSS List properties.
use crate::parsers::StyleParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum ListStyleType {
    #[default]
    Disc,
    Circle,
    Square,
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    None,
}

impl ListStyleType {
    /// Maps the legacy `type` attribute of `ol`/`ul` onto a marker style.
    /// The ordered-list codes are case-sensitive.
    pub fn from_html_type(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(ListStyleType::Decimal),
            "a" => Some(ListStyleType::LowerAlpha),
            "A" => Some(ListStyleType::UpperAlpha),
            "i" => Some(ListStyleType::LowerRoman),
            "I" => Some(ListStyleType::UpperRoman),
            other => other.parse().ok(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListStyleType::Disc => "disc",
            ListStyleType::Circle => "circle",
            ListStyleType::Square => "square",
            ListStyleType::Decimal => "decimal",
            ListStyleType::LowerAlpha => "lower-alpha",
            ListStyleType::UpperAlpha => "upper-alpha",
            ListStyleType::LowerRoman => "lower-roman",
            ListStyleType::UpperRoman => "upper-roman",
            ListStyleType::None => "none",
        }
    }

    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            ListStyleType::Decimal
                | ListStyleType::LowerAlpha
                | ListStyleType::UpperAlpha
                | ListStyleType::LowerRoman
                | ListStyleType::UpperRoman
        )
    }
}

impl FromStr for ListStyleType {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disc" => Ok(ListStyleType::Disc),
            "circle" => Ok(ListStyleType::Circle),
            "square" => Ok(ListStyleType::Square),
            "decimal" => Ok(ListStyleType::Decimal),
            "lower-alpha" | "lower-latin" => Ok(ListStyleType::LowerAlpha),
            "upper-alpha" | "upper-latin" => Ok(ListStyleType::UpperAlpha),
            "lower-roman" => Ok(ListStyleType::LowerRoman),
            "upper-roman" => Ok(ListStyleType::UpperRoman),
            "none" => Ok(ListStyleType::None),
            _ => Err(StyleParseError::InvalidValue {
                property: "list-style-type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum ListStylePosition {
    Inside,
    #[default]
    Outside,
}

impl FromStr for ListStylePosition {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inside" => Ok(ListStylePosition::Inside),
            "outside" => Ok(ListStylePosition::Outside),
            _ => Err(StyleParseError::InvalidValue {
                property: "list-style-position".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
