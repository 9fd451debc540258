use crate::error::TransformError;
use serde::{Deserialize, Serialize};

/// Settings of a single transformation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    /// Hand each finished top-level block to the document sink as soon as
    /// it is produced instead of returning everything at the end.
    pub immediate_flush: bool,
    /// Language of the document when the markup does not declare one.
    pub default_lang: Option<String>,
    /// Record accessible structure roles on the nodes.
    pub tagged: bool,
    /// Prefix for relative resource references.
    pub base_uri: Option<String>,
    pub form_fields: FormFieldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFieldConfig {
    /// Name given to form controls that do not declare one.
    pub unnamed_prefix: String,
}

impl Default for FormFieldConfig {
    fn default() -> Self {
        Self {
            unnamed_prefix: "field".to_string(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            immediate_flush: false,
            default_lang: None,
            tagged: true,
            base_uri: None,
            form_fields: FormFieldConfig::default(),
        }
    }
}

impl TransformConfig {
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves a resource reference against `base_uri`. Absolute
    /// references (with a scheme or a leading `/`) are returned unchanged.
    pub fn resolve_uri(&self, reference: &str) -> String {
        let reference = reference.trim();
        let is_absolute = reference.starts_with('/')
            || reference.starts_with("data:")
            || reference.contains("://");
        match &self.base_uri {
            Some(base) if !is_absolute && !base.is_empty() => {
                if base.ends_with('/') {
                    format!("{}{}", base, reference)
                } else {
                    format!("{}/{}", base, reference)
                }
            }
            _ => reference.to_string(),
        }
    }
}
