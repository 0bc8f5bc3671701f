//! Class diagram plugin
//!
//! Renders the models of one module as PlantUML classes with their options,
//! attributes, methods and relations.

mod attributes;
mod generator;
mod methods;
mod naming;
mod options;
mod relations;

pub use attributes::{attribute, feature_tags, HIDDEN_FIELDS, LOG_FIELDS};
pub use generator::{ClassDiagramGenerator, NOT_INSTALLED_NOTE, NO_MODELS_NOTE};
pub use methods::API_DECORATORS;
pub use naming::{camel_case, class_name, ModelStereotype};
pub use relations::default_join_name;
