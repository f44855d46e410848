//! Recognized presentation settings and their defaults.
//!
//! Settings are stored as an opaque JSON object so unknown keys survive a
//! round trip through the editor. The renderer resolves the recognized keys
//! into [`ResolvedSettings`], falling back to defaults for anything missing
//! or malformed.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Keys
   -------------------------------------------------------------------------- */

pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_SUCCESS_MESSAGE: &str = "successMessage";
pub const KEY_BUTTON_TEXT: &str = "buttonText";
pub const KEY_BUTTON_COLOR: &str = "buttonColor";
pub const KEY_BUTTON_TEXT_COLOR: &str = "buttonTextColor";
pub const KEY_BACKGROUND_COLOR: &str = "backgroundColor";
pub const KEY_TEXT_COLOR: &str = "textColor";
pub const KEY_TEXT_ALIGN: &str = "textAlign";
pub const KEY_BORDER_RADIUS: &str = "borderRadius";
pub const KEY_MAX_WIDTH: &str = "maxWidth";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_FONT_FAMILY: &str = "fontFamily";
pub const KEY_PADDING: &str = "padding";

/* --------------------------------------------------------------------------
   Defaults
   -------------------------------------------------------------------------- */

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Submission Successful!";
pub const DEFAULT_BUTTON_TEXT: &str = "Submit";
pub const DEFAULT_BUTTON_COLOR: &str = "#111827";
pub const DEFAULT_BUTTON_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#111827";
pub const DEFAULT_BORDER_RADIUS: u32 = 8;
pub const DEFAULT_MAX_WIDTH: u32 = 600;
pub const DEFAULT_FONT_SIZE: u32 = 14;
pub const DEFAULT_FONT_FAMILY: &str = "inherit";
pub const DEFAULT_PADDING: u32 = 24;

/// Upper bound for any pixel setting.
pub const MAX_PIXELS: u32 = 4000;

/// Characters allowed in colour and font values interpolated into inline CSS.
static CSS_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[#A-Za-z0-9(),.%'" -]{1,100}$"#).expect("valid regex"));

/// Horizontal alignment of the form's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Settings with every recognized key resolved to a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub description: String,
    pub success_message: String,
    pub button_text: String,
    pub button_color: String,
    pub button_text_color: String,
    pub background_color: String,
    pub text_color: String,
    pub text_align: TextAlign,
    pub border_radius: u32,
    pub max_width: u32,
    pub font_size: u32,
    pub font_family: String,
    pub padding: u32,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            description: String::new(),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            button_color: DEFAULT_BUTTON_COLOR.to_string(),
            button_text_color: DEFAULT_BUTTON_TEXT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            text_align: TextAlign::default(),
            border_radius: DEFAULT_BORDER_RADIUS,
            max_width: DEFAULT_MAX_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            padding: DEFAULT_PADDING,
        }
    }
}

impl ResolvedSettings {
    /// Resolve recognized keys from a stored settings object.
    ///
    /// Never fails: anything missing, of the wrong type, or unsafe to place
    /// in inline CSS falls back to its default.
    pub fn from_value(raw: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = raw.as_object() else {
            return defaults;
        };

        let text = |key: &str, fallback: String| -> String {
            match obj.get(key).and_then(Value::as_str) {
                Some(s) if !s.trim().is_empty() => s.to_string(),
                _ => fallback,
            }
        };
        let css = |key: &str, fallback: String| -> String {
            match obj.get(key).and_then(Value::as_str) {
                Some(s) if is_safe_css_value(s) => s.trim().to_string(),
                _ => fallback,
            }
        };
        let pixels = |key: &str, fallback: u32| -> u32 {
            obj.get(key).and_then(parse_pixels).unwrap_or(fallback)
        };

        Self {
            description: obj
                .get(KEY_DESCRIPTION)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            success_message: text(KEY_SUCCESS_MESSAGE, defaults.success_message),
            button_text: text(KEY_BUTTON_TEXT, defaults.button_text),
            button_color: css(KEY_BUTTON_COLOR, defaults.button_color),
            button_text_color: css(KEY_BUTTON_TEXT_COLOR, defaults.button_text_color),
            background_color: css(KEY_BACKGROUND_COLOR, defaults.background_color),
            text_color: css(KEY_TEXT_COLOR, defaults.text_color),
            text_align: obj
                .get(KEY_TEXT_ALIGN)
                .and_then(Value::as_str)
                .and_then(TextAlign::parse)
                .unwrap_or(defaults.text_align),
            border_radius: pixels(KEY_BORDER_RADIUS, defaults.border_radius),
            max_width: pixels(KEY_MAX_WIDTH, defaults.max_width),
            font_size: pixels(KEY_FONT_SIZE, defaults.font_size),
            font_family: css(KEY_FONT_FAMILY, defaults.font_family),
            padding: pixels(KEY_PADDING, defaults.padding),
        }
    }

    /// Inline style for the outer form container.
    pub fn container_style(&self) -> String {
        format!(
            "max-width:{}px;background:{};padding:{}px;border-radius:{}px;text-align:{};\
             color:{};font-family:{};font-size:{}px;margin:20px auto;",
            self.max_width,
            self.background_color,
            self.padding,
            self.border_radius,
            self.text_align.as_str(),
            self.text_color,
            self.font_family,
            self.font_size,
        )
    }

    /// Inline style for the submit button.
    pub fn button_style(&self) -> String {
        format!(
            "width:100%;background:{};color:{};padding:12px;border:none;\
             border-radius:{}px;font-weight:bold;cursor:pointer;",
            self.button_color, self.button_text_color, self.border_radius,
        )
    }
}

/// Check the recognized keys of a settings object submitted by the editor.
///
/// Only structurally wrong values are rejected; unknown keys pass through.
pub fn validate_settings(raw: &Value) -> Result<(), CoreError> {
    let Some(obj) = raw.as_object() else {
        return Err(CoreError::InvalidPayload(
            "settings must be a JSON object".to_string(),
        ));
    };

    if let Some(align) = obj.get(KEY_TEXT_ALIGN) {
        if align.as_str().and_then(TextAlign::parse).is_none() {
            return Err(CoreError::InvalidPayload(format!(
                "Invalid {KEY_TEXT_ALIGN}: must be one of left, center, right"
            )));
        }
    }

    for key in [KEY_BORDER_RADIUS, KEY_MAX_WIDTH, KEY_FONT_SIZE, KEY_PADDING] {
        if let Some(value) = obj.get(key) {
            if parse_pixels(value).is_none() {
                return Err(CoreError::InvalidPayload(format!(
                    "Invalid {key}: must be a number of pixels between 0 and {MAX_PIXELS}"
                )));
            }
        }
    }

    Ok(())
}

/// Accept pixel values as numbers, numeric strings, or `"12px"`.
fn parse_pixels(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches("px").trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !(0.0..=f64::from(MAX_PIXELS)).contains(&n) {
        return None;
    }
    Some(n.round() as u32)
}

fn is_safe_css_value(raw: &str) -> bool {
    CSS_VALUE.is_match(raw.trim())
}
