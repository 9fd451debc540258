//! Low-level nom parser functions for CSS style values.
//!
//! This module provides composable parser functions for lengths, dimensions,
//! colors and borders, plus `apply_style_property`, which maps a single
//! declaration onto an `ElementStyle`.

use crate::border::{Border, BorderStyle};
use crate::dimension::{Dimension, Margins};
use crate::element::ElementStyle;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{map, map_opt, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use quire_types::Color;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Unsupported property: {0}")]
    UnsupportedProperty(String),
}

/// CSS pixels per point.
pub const PT_PER_PX: f32 = 0.75;

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(space0, inner, space0)
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

// --- Unit & Dimension Parsers ---

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("px"), |_| PT_PER_PX),
        map(tag_no_case("in"), |_| 72.0),
        map(tag_no_case("cm"), |_| 28.35),
        map(tag_no_case("mm"), |_| 2.835),
        map(tag_no_case("pc"), |_| 12.0),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "16px").
/// Unitless values are points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = parse_f32(input)?;
    let (input, unit_multiplier) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit_multiplier.unwrap_or(1.0)))
}

/// Parses a dimension value (length, percentage, or "auto").
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        map(tag_no_case("auto"), |_| Dimension::Auto),
        map(pair(parse_f32, char('%')), |(val, _)| Dimension::Percent(val)),
        map(parse_length, Dimension::Pt),
    ))
    .parse(input)
}

/// Parses an unsigned integer attribute or property value.
pub fn parse_unsigned(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>()).parse(input)
}

fn length_list(input: &str) -> IResult<&str, Vec<f32>> {
    separated_list1(space1, parse_length).parse(input)
}

/// Parses CSS shorthand margins (1, 2, 3 or 4 values).
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleParseError> {
    let parts = run_parser(length_list, input)?;
    match parts.as_slice() {
        [all] => Ok(Margins::all(*all)),
        [y, x] => Ok(Margins {
            top: *y,
            right: *x,
            bottom: *y,
            left: *x,
        }),
        [top, x, bottom] => Ok(Margins {
            top: *top,
            right: *x,
            bottom: *bottom,
            left: *x,
        }),
        [top, right, bottom, left] => Ok(Margins {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        _ => Err(StyleParseError::Parse(format!(
            "Invalid number of values for margin/padding shorthand: got {}, expected 1 to 4.",
            parts.len()
        ))),
    }
}

// --- Color & Border Parsers ---

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    preceded(
        char('#'),
        alt((
            map_res(take_while_m_n(6, 6, is_hex_digit), |hex: &str| {
                Color::parse_hex(&format!("#{}", hex))
            }),
            map_res(take_while_m_n(3, 3, is_hex_digit), |hex: &str| {
                Color::parse_hex(&format!("#{}", hex))
            }),
        )),
    )
    .parse(input)
}

fn color_channel(input: &str) -> IResult<&str, u8> {
    ws(map_res(digit1, |s: &str| s.parse::<u8>())).parse(input)
}

fn rgb_color(input: &str) -> IResult<&str, Color> {
    let (input, _) = alt((tag_no_case("rgba("), tag_no_case("rgb("))).parse(input)?;
    let (input, r) = color_channel(input)?;
    let (input, _) = char(',').parse(input)?;
    let (input, g) = color_channel(input)?;
    let (input, _) = char(',').parse(input)?;
    let (input, b) = color_channel(input)?;
    let (input, a) = opt(preceded(char(','), ws(parse_f32))).parse(input)?;
    let (input, _) = char(')').parse(input)?;
    Ok((input, Color { r, g, b, a: a.unwrap_or(1.0) }))
}

fn named_color(input: &str) -> IResult<&str, Color> {
    map_opt(
        take_while_m_n(1, 32, |c: char| c.is_ascii_alphabetic()),
        Color::named,
    )
    .parse(input)
}

/// Parses a color: `#rgb`, `#rrggbb`, `rgb()`/`rgba()` or a keyword.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((hex_color, rgb_color, named_color)).parse(input)
}

/// Parses a border style keyword.
pub fn parse_border_style(input: &str) -> IResult<&str, BorderStyle> {
    alt((
        map(tag_no_case("solid"), |_| BorderStyle::Solid),
        map(tag_no_case("dashed"), |_| BorderStyle::Dashed),
        map(tag_no_case("dotted"), |_| BorderStyle::Dotted),
        map(tag_no_case("double"), |_| BorderStyle::Double),
        map(alt((tag_no_case("none"), tag_no_case("hidden"))), |_| BorderStyle::None),
    ))
    .parse(input)
}

/// Parses a CSS border shorthand. The width, style and color components may
/// appear in any order and each is optional (`none` alone is valid).
pub fn parse_border(input: &str) -> Result<Border, StyleParseError> {
    let mut border = Border {
        width: 1.0,
        ..Border::default()
    };
    let mut seen_style = false;
    for token in input.split_whitespace() {
        if let Ok(style) = run_parser(parse_border_style, token) {
            border.style = style;
            seen_style = true;
        } else if let Ok(width) = run_parser(parse_length, token) {
            border.width = width;
        } else if let Ok(color) = run_parser(parse_color, token) {
            border.color = color;
        } else {
            return Err(StyleParseError::InvalidValue {
                property: "border".to_string(),
                value: input.to_string(),
            });
        }
    }
    if !seen_style || border.style == BorderStyle::None {
        return Ok(Border::none());
    }
    Ok(border)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

/// Splits a `name: value; ...` declaration block into lowercased names and
/// trimmed values. `!important` markers are dropped; declarations without a
/// colon are skipped.
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(name, value)| {
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            (name.trim().to_ascii_lowercase(), value.to_string())
        })
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
        .collect()
}

// --- High-level Style Application Functions ---

fn side_mut(margins: &mut Option<Margins>) -> &mut Margins {
    margins.get_or_insert_with(Default::default)
}

/// Applies a single parsed style property to an `ElementStyle` struct.
///
/// Properties that steer tree construction rather than presentation
/// (`display`, `white-space`, ...) are not part of `ElementStyle` and yield
/// `UnsupportedProperty`, which callers are expected to skip quietly.
pub fn apply_style_property(
    style: &mut ElementStyle,
    name: &str,
    value: &str,
) -> Result<(), StyleParseError> {
    match name {
        "font-family" => {
            style.font_family = Some(value.trim_matches(|c| c == '"' || c == '\'').to_string())
        }
        "font-size" => style.font_size = Some(run_parser(parse_length, value)?),
        "font-weight" => style.font_weight = Some(value.parse()?),
        "font-style" => style.font_style = Some(value.parse()?),
        "line-height" => style.line_height = Some(run_parser(parse_length, value)?),
        "text-align" => style.text_align = Some(value.parse()?),
        "text-decoration" | "text-decoration-line" => style.text_decoration = Some(value.parse()?),
        "color" => style.color = Some(run_parser(parse_color, value)?),
        "background-color" | "background" => {
            style.background_color = Some(run_parser(parse_color, value)?)
        }
        "border" => style.border = Some(parse_border(value)?),
        "border-top" => style.border_top = Some(parse_border(value)?),
        "border-right" => style.border_right = Some(parse_border(value)?),
        "border-bottom" => style.border_bottom = Some(parse_border(value)?),
        "border-left" => style.border_left = Some(parse_border(value)?),
        "margin" => style.margin = Some(parse_shorthand_margins(value)?),
        "margin-top" => side_mut(&mut style.margin).top = run_parser(parse_length, value)?,
        "margin-right" => side_mut(&mut style.margin).right = run_parser(parse_length, value)?,
        "margin-bottom" => side_mut(&mut style.margin).bottom = run_parser(parse_length, value)?,
        "margin-left" => side_mut(&mut style.margin).left = run_parser(parse_length, value)?,
        "padding" => style.padding = Some(parse_shorthand_margins(value)?),
        "padding-top" => side_mut(&mut style.padding).top = run_parser(parse_length, value)?,
        "padding-right" => side_mut(&mut style.padding).right = run_parser(parse_length, value)?,
        "padding-bottom" => side_mut(&mut style.padding).bottom = run_parser(parse_length, value)?,
        "padding-left" => side_mut(&mut style.padding).left = run_parser(parse_length, value)?,
        "width" => style.width = Some(run_parser(parse_dimension, value)?),
        "height" => style.height = Some(run_parser(parse_dimension, value)?),
        "list-style-type" => style.list_style_type = Some(value.parse()?),
        "list-style-position" => style.list_style_position = Some(value.parse()?),
        other => return Err(StyleParseError::UnsupportedProperty(other.to_string())),
    };
    Ok(())
}
