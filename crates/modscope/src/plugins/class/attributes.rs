//! Attribute lines and feature tags

use crate::core::creole::{bold, italic};
use crate::core::{AttributeSpec, DiagramConfig, Field, FieldFeatures, FieldKind, Model, PlantUml, Visibility};

use super::naming::type_name;

/// Framework bookkeeping fields, never rendered
pub const HIDDEN_FIELDS: [&str; 2] = ["__last_update", "display_name"];

/// Audit fields, rendered only with `show_log_attributes`
pub const LOG_FIELDS: [&str; 4] = ["create_date", "write_date", "create_uid", "write_uid"];

/// Tags in fixed precedence; `required` and `readonly` ignore `show_attribute_features`
pub fn feature_tags(features: &FieldFeatures, config: &DiagramConfig) -> Vec<String> {
    let mut tags = Vec::new();
    if features.required {
        tags.push("required".to_string());
    }
    if features.readonly {
        tags.push("readonly".to_string());
    }
    if !config.show_attribute_features {
        return tags;
    }

    if let Some(operator) = &features.group_operator {
        tags.push(format!("//group//='{}'", operator));
    }
    if let Some(related) = &features.related {
        tags.push(format!("//related//='{}'", related.join(".")));
        if features.store {
            tags.push(italic("store"));
        }
        if features.copy {
            tags.push(italic("copy"));
        }
    } else if features.compute.is_some() || features.company_dependent {
        if features.compute.is_some() {
            tags.push(italic("compute"));
        }
        if features.company_dependent {
            tags.push(italic("property"));
        }
        if features.store {
            tags.push(italic("store"));
        }
        if features.copy {
            tags.push(italic("copy"));
        }
        if features.inverse.is_some() {
            tags.push(italic("inverse"));
        } else if !features.readonly {
            tags.push(italic("readonly"));
        }
        if features.search.is_some() {
            tags.push(italic("search"));
        }
    }

    if features.groups.is_some() {
        tags.push(italic("groups"));
    }
    if features.states {
        tags.push(italic("states"));
    }
    if features.index {
        tags.push(italic("index"));
    }
    if features.domain.is_some() {
        tags.push("domain".to_string());
    }
    if features.translate {
        tags.push("translate".to_string());
    }
    if features.manual {
        tags.push("manual".to_string());
    }
    if features.auto_join {
        tags.push("autojoin".to_string());
    }
    if features.callable_default {
        tags.push("default".to_string());
    }
    tags
}

/// Bold type label: `**Char**(64)`, `**ResPartner**`, `**SaleOrderLine**[]`
pub fn attribute_type(field: &Field) -> String {
    let relation = field.relation.as_deref();
    match (field.kind(), relation) {
        (FieldKind::Many2one, Some(target)) => type_name(target),
        (FieldKind::One2many | FieldKind::Many2many, Some(target)) => {
            format!("{}[]", type_name(target))
        }
        _ => {
            let label = bold(field.field_type.label());
            match field.size {
                Some(size) if field.field_type.is_sized() => format!("{}({})", label, size),
                _ => label,
            }
        }
    }
}

pub fn attribute(field: &Field, config: &DiagramConfig) -> AttributeSpec {
    let mut tags = feature_tags(&field.features, config);
    if field.kind() == FieldKind::Many2many {
        tags.push(italic("many2many"));
    }
    AttributeSpec::new(field.name.clone())
        .with_visibility(Visibility::Public)
        .with_type(attribute_type(field))
        .with_tags(tags)
}

/// Whether `name` is suppressed regardless of ownership
pub fn is_excluded(name: &str, config: &DiagramConfig) -> bool {
    HIDDEN_FIELDS.contains(&name) || (!config.show_log_attributes && LOG_FIELDS.contains(&name))
}

/// Write the attribute lines of `model` as declared by `subject`
///
/// Returns how many foreign fields were rolled up.
pub fn write_attributes(uml: &mut PlantUml, model: &Model, subject: &str, config: &DiagramConfig) -> usize {
    let mut inherited = 0;
    for field in &model.fields {
        if is_excluded(&field.name, config) {
            continue;
        }
        if config.show_only_own_attrs && !field.declared_by(subject, model) {
            inherited += 1;
            continue;
        }
        if field.features.delegate {
            continue;
        }
        uml.add_attribute(&attribute(field, config));
    }
    if inherited > 0 {
        uml.add_raw_attribute(&format!("//...and {} others inherited attr.//", inherited));
    }
    inherited
}
