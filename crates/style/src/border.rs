use crate::parsers::StyleParseError;
use quire_types::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl FromStr for BorderStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "hidden" => Ok(BorderStyle::None),
            "solid" => Ok(BorderStyle::Solid),
            "dashed" => Ok(BorderStyle::Dashed),
            "dotted" => Ok(BorderStyle::Dotted),
            "double" => Ok(BorderStyle::Double),
            _ => Err(StyleParseError::InvalidValue {
                property: "border-style".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Border {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

impl Border {
    /// An explicit "no border" value, distinct from an unset border.
    pub fn none() -> Self {
        Self {
            width: 0.0,
            style: BorderStyle::None,
            color: Color::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.style != BorderStyle::None
    }
}
