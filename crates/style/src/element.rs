//! The concrete, typed properties a style applier writes onto a layout node.

use crate::border::Border;
use crate::dimension::{Dimension, Margins};
use crate::font::{FontStyle, FontWeight};
use crate::list::{ListStylePosition, ListStyleType};
use crate::text::{TextAlign, TextDecoration};
use quire_types::Color;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    // Font & Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,

    // Box Model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,

    // List Properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_type: Option<ListStyleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_position: Option<ListStylePosition>,
}

macro_rules! for_each_property {
    ($apply:ident) => {
        $apply!(
            font_family,
            font_size,
            font_weight,
            font_style,
            line_height,
            text_align,
            color,
            text_decoration,
            background_color,
            border,
            border_top,
            border_right,
            border_bottom,
            border_left,
            margin,
            padding,
            width,
            height,
            list_style_type,
            list_style_position
        )
    };
}

impl ElementStyle {
    /// Copies every property that is unset here from `other`. Properties that
    /// are already set win, which is how column styles reach their cells and
    /// how span styles reach the leaves of nested spans.
    pub fn inherit_missing_from(&mut self, other: &ElementStyle) {
        macro_rules! fill {
            ($($field:ident),*) => {
                $(
                    if self.$field.is_none() {
                        self.$field = other.$field.clone();
                    }
                )*
            };
        }
        for_each_property!(fill);
    }

    /// Overwrites properties with every property that is set in `other`.
    pub fn merge_from(&mut self, other: &ElementStyle) {
        macro_rules! overwrite {
            ($($field:ident),*) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            };
        }
        for_each_property!(overwrite);
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }
}
