//! Defines primitives for size and spacing.
use crate::parsers::{parse_length, parse_shorthand_margins, run_parser};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum Dimension {
    Pt(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Dimension::Pt(v) => {
                0u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Percent(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Auto => {
                2u8.hash(state);
            }
        }
    }
}

impl Eq for Dimension {}

#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Hash for Margins {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.top.to_bits().hash(state);
        self.right.to_bits().hash(state);
        self.bottom.to_bits().hash(state);
        self.left.to_bits().hash(state);
    }
}

impl Eq for Margins {}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn zero() -> Self {
        Self::all(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string like '10pt' or '10pt 20pt' or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Margins, E>
            where
                E: de::Error,
            {
                parse_shorthand_margins(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(value as f32))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    let value: String = map.next_value()?;
                    let length = run_parser(parse_length, &value).map_err(de::Error::custom)?;
                    match key.as_str() {
                        "top" => margins.top = length,
                        "right" => margins.right = length,
                        "bottom" => margins.bottom = length,
                        "left" => margins.left = length,
                        _ => {}
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}
