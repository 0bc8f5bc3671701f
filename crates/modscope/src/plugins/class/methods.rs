//! Method lines

use crate::core::creole::italic;
use crate::core::{Method, MethodSpec, Model, Param, PlantUml, Visibility};

/// Decorator names rendered as italic method tags
pub const API_DECORATORS: &[&str] = &[
    "multi",
    "one",
    "model",
    "model_cr",
    "model_cr_context",
    "cr",
    "cr_context",
    "cr_uid",
    "cr_uid_context",
    "cr_uid_id",
    "cr_uid_id_context",
    "cr_uid_ids",
    "cr_uid_ids_context",
    "cr_uid_records",
    "cr_uid_records_context",
    "v8",
    "model_create_multi",
    "depends",
    "onchange",
    "constrains",
    "returns",
];

/// Methods `subject` defines on `model` that are new or override an ancestor
///
/// A framework base method is kept only when it is flagged as overriding.
pub fn visible_methods<'m>(model: &'m Model, subject: &str, framework: &[String]) -> Vec<&'m Method> {
    model
        .methods
        .iter()
        .filter(|m| m.defined_by(subject, model))
        .filter(|m| m.overrides || !framework.contains(&m.name))
        .collect()
}

pub fn method_line(method: &Method) -> MethodSpec {
    let mut tags = Vec::new();
    if method.overrides {
        tags.push(italic("override"));
    }
    for decorator in &method.decorators {
        if API_DECORATORS.contains(&decorator.as_str()) {
            tags.push(italic(decorator));
        }
    }
    MethodSpec::new(method.name.clone())
        .with_visibility(Visibility::from_name(&method.name))
        .with_params(method.params.iter().cloned().map(Param::Raw).collect())
        .with_tags(tags)
}

/// Write the `--` section and one line per visible method
pub fn write_methods(uml: &mut PlantUml, model: &Model, subject: &str, framework: &[String]) -> usize {
    let methods = visible_methods(model, subject, framework);
    if !methods.is_empty() {
        uml.add_section("--", None);
    }
    for method in &methods {
        uml.add_method(&method_line(method));
    }
    methods.len()
}
