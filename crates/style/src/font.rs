use crate::parsers::StyleParseError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[derive(Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
    Black,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= 600
    }
}

impl FromStr for FontWeight {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "thin" => Ok(FontWeight::Thin),
            "light" | "lighter" => Ok(FontWeight::Light),
            "regular" | "normal" => Ok(FontWeight::Regular),
            "medium" => Ok(FontWeight::Medium),
            "bold" | "bolder" => Ok(FontWeight::Bold),
            "black" => Ok(FontWeight::Black),
            other => other
                .parse::<u16>()
                .ok()
                .filter(|n| (1..=1000).contains(n))
                .map(FontWeight::Numeric)
                .ok_or_else(|| StyleParseError::InvalidValue {
                    property: "font-weight".to_string(),
                    value: s.to_string(),
                }),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => s.parse().map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::Numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FromStr for FontStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            "oblique" => Ok(FontStyle::Oblique),
            _ => Err(StyleParseError::InvalidValue {
                property: "font-style".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
