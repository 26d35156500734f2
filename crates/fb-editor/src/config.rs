use serde::{Deserialize, Serialize};

/// Configuration for [`TreeControl`](crate::control::TreeControl).
///
/// Every field has a default, so a partial JSON object is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Class applied to the selected element. Default: `"selected"`.
    pub highlight_class: String,

    /// Level of the root when the control builds its own tree. Default: 0.
    pub base_level: u32,

    /// Drive the floating ghost overlay during drags. Default: **true**.
    pub ghost: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            highlight_class: "selected".to_string(),
            base_level: 0,
            ghost: true,
        }
    }
}

impl ControlConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    /// Returns the `serde_json` error if the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
