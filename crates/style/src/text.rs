use crate::parsers::StyleParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

/// How white space inside text runs is handled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
    BreakSpaces,
}

impl WhiteSpace {
    /// Sequences of spaces and tabs collapse into one space.
    pub fn collapses_spaces(self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::Nowrap | WhiteSpace::PreLine)
    }

    /// Segment breaks are kept as forced line breaks.
    pub fn preserves_newlines(self) -> bool {
        !matches!(self, WhiteSpace::Normal | WhiteSpace::Nowrap)
    }
}

/// Case transformation applied to text as it is buffered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

fn invalid(property: &str, value: &str) -> StyleParseError {
    StyleParseError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
    }
}

impl FromStr for TextAlign {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "start" => Ok(TextAlign::Left),
            "right" | "end" => Ok(TextAlign::Right),
            "center" => Ok(TextAlign::Center),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(invalid("text-align", s)),
        }
    }
}

impl FromStr for TextDecoration {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(TextDecoration::None),
            "underline" => Ok(TextDecoration::Underline),
            "line-through" => Ok(TextDecoration::LineThrough),
            _ => Err(invalid("text-decoration", s)),
        }
    }
}

impl FromStr for WhiteSpace {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(WhiteSpace::Normal),
            "nowrap" => Ok(WhiteSpace::Nowrap),
            "pre" => Ok(WhiteSpace::Pre),
            "pre-wrap" => Ok(WhiteSpace::PreWrap),
            "pre-line" => Ok(WhiteSpace::PreLine),
            "break-spaces" => Ok(WhiteSpace::BreakSpaces),
            _ => Err(invalid("white-space", s)),
        }
    }
}

impl FromStr for TextTransform {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(TextTransform::None),
            "uppercase" => Ok(TextTransform::Uppercase),
            "lowercase" => Ok(TextTransform::Lowercase),
            "capitalize" => Ok(TextTransform::Capitalize),
            _ => Err(invalid("text-transform", s)),
        }
    }
}
