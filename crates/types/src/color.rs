use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

fn default_one() -> f32 {
    1.0
}

fn is_one(num: &f32) -> bool {
    *num == 1.0
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(skip_serializing_if = "is_one", default = "default_one")]
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0, a: 1.0 }
    }
}

/// The subset of CSS named colors that markup in the wild actually uses.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("maroon", (128, 0, 0)),
    ("navy", (0, 0, 128)),
    ("purple", (128, 0, 128)),
    ("teal", (0, 128, 128)),
    ("olive", (128, 128, 0)),
    ("orange", (255, 165, 0)),
    ("lime", (0, 255, 0)),
    ("aqua", (0, 255, 255)),
    ("fuchsia", (255, 0, 255)),
];

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0.0 }
    }

    /// Looks up a CSS color keyword (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::transparent());
        }
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, (r, g, b))| Self::rgb(*r, *g, *b))
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Err(format!("Color must start with #, got: {}", s));
        };
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16)
                .map_err(|e| format!("Invalid color component '{}': {}", digits, e))
        };

        match hex.len() {
            3 => {
                let r = channel(&hex[0..1].repeat(2))?;
                let g = channel(&hex[1..2].repeat(2))?;
                let b = channel(&hex[2..3].repeat(2))?;
                Ok(Color::rgb(r, g, b))
            }
            6 => {
                let r = channel(&hex[0..2])?;
                let g = channel(&hex[2..4])?;
                let b = channel(&hex[4..6])?;
                Ok(Color::rgb(r, g, b))
            }
            _ => Err(format!("Invalid hex color length: expected 3 or 6, got {}", hex.len())),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8, #[serde(default = "default_one")] a: f32 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => match Self::named(&s) {
                Some(color) => Ok(color),
                None => Self::parse_hex(&s).map_err(de::Error::custom),
            },
            ColorDef::Map { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}
