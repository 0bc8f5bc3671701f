//! Diagram configuration
//!
//! One immutable [`DiagramConfig`] is handed by reference to every generator.
//! It deserializes from JSON with every key optional, so a config document
//! only needs to name what it overrides:
//!
//! ```
//! use modscope::core::DiagramConfig;
//!
//! let config = DiagramConfig::from_json(r#"{ "show_log_attributes": true }"#).unwrap();
//! assert!(config.show_log_attributes);
//! assert!(config.show_relations);
//! ```

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// Options recognised by the class and package generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Package boxes list the models each module declares
    pub show_internal: bool,
    /// Package label uses the module's short description instead of its name
    pub show_descriptive_name: bool,
    /// Fields declared by other modules are rolled up into a single line
    pub show_only_own_attrs: bool,
    /// Render the audit fields (`create_date`, `write_date`, `create_uid`, `write_uid`)
    pub show_log_attributes: bool,
    /// Render non-default model declaration options
    pub show_model_config_options: bool,
    pub show_model_attributes: bool,
    pub show_model_methods: bool,
    /// Render the optional attribute feature tags (`required`/`readonly` always show)
    pub show_attribute_features: bool,
    pub show_relations: bool,
    /// `state='…'` tag in package labels
    pub show_package_status: bool,
    /// Summary/author note inside package boxes
    pub show_main_description: bool,

    pub module_application_stereotype: String,
    pub module_module_stereotype: String,

    pub color_application_package: String,
    pub color_module_package: String,
    pub color_package_self: String,
    pub color_class_self: String,
    pub color_normal_model_icon: String,
    pub color_transient_model_icon: String,
    pub color_abstract_model_icon: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            show_internal: false,
            show_descriptive_name: false,
            show_only_own_attrs: true,
            show_log_attributes: false,
            show_model_config_options: true,
            show_model_attributes: true,
            show_model_methods: true,
            show_attribute_features: true,
            show_relations: true,
            show_package_status: true,
            show_main_description: false,
            module_application_stereotype: "application".to_string(),
            module_module_stereotype: "module".to_string(),
            color_application_package: "#Silver".to_string(),
            color_module_package: "#White".to_string(),
            color_package_self: "#Yellow".to_string(),
            color_class_self: "#Yellow".to_string(),
            color_normal_model_icon: "Darkorange".to_string(),
            color_transient_model_icon: "SteelBlue".to_string(),
            color_abstract_model_icon: "Gray".to_string(),
        }
    }
}

impl DiagramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a (partial) JSON config document
    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        serde_json::from_str(input).map_err(|e| DiagramError::config_error(e.to_string()))
    }
}
