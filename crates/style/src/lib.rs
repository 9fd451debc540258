pub mod border;
pub mod computed;
pub mod dimension;
pub mod display;
pub mod element;
pub mod flow;
pub mod font;
pub mod list;
pub mod parsers;
pub mod text;

pub use border::{Border, BorderStyle};
pub use computed::ComputedStyles;
pub use dimension::{Dimension, Margins};
pub use display::Display;
pub use element::ElementStyle;
pub use flow::BreakKind;
pub use font::{FontStyle, FontWeight};
pub use list::{ListStylePosition, ListStyleType};
pub use parsers::StyleParseError;
pub use text::{TextAlign, TextDecoration, TextTransform, WhiteSpace};
