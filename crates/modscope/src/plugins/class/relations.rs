//! Relation lines between class blocks
//!
//! Unresolvable targets never abort the build: the relation is skipped, a
//! warning is logged and an unresolved-reference diagnostic is recorded.

use std::collections::HashSet;

use tracing::{error, warn};

use crate::core::{
    model_alias, produce_alias, AttributeSpec, ClassSpec, Diagnostic, Field, FieldKind, Link,
    MetadataSource, Model, OnDelete, Visibility,
};

use super::attributes::LOG_FIELDS;
use super::generator::ClassDiagramGenerator;
use super::naming::{camel_case, type_name};

/// Icon of synthetic join table classes
const TABLE_ICON: char = 'T';

/// Default join table of a many-to-many relation between two tables
///
/// Returns the name and whether both tables are the same, in which case the
/// name is ambiguous for the two directions of the relation.
pub fn default_join_name(table1: &str, table2: &str) -> (String, bool) {
    let (first, second) = if table1 <= table2 {
        (table1, table2)
    } else {
        (table2, table1)
    };
    (format!("{}_{}_rel", first, second), first == second)
}

impl<'a, S: MetadataSource> ClassDiagramGenerator<'a, S> {
    pub(super) fn produce_relations(&mut self) {
        let subject = self.subject();
        let models = self.index.models_of(&subject.name).to_vec();
        let mut related = HashSet::new();
        for model in models {
            if !related.insert(self.own_alias(model)) {
                continue;
            }
            self.produce_inherit_relations(model);
            self.produce_delegation_relations(model);
            self.produce_associations(model);
            self.produce_many2many_associations(model);
        }
    }

    fn own_alias(&self, model: &Model) -> String {
        model_alias(&self.subject().name, &model.name)
    }

    fn unresolved(&mut self, model: &Model, field: Option<&str>, message: String) {
        let mut diagnostic = Diagnostic::unresolved(message).on_model(model.name.clone());
        if let Some(field) = field {
            diagnostic = diagnostic.on_field(field);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Same-name bases are extensions resolved past the subject; others are prototypes
    fn produce_inherit_relations(&mut self, model: &'a Model) {
        let own = self.own_alias(model);
        for base in &model.inherit {
            let extension = *base == model.name;
            let Some((module, target)) = self.index.resolve(base, !extension) else {
                warn!(model = %model.name, base = %base, extension, "Base model not found");
                self.unresolved(model, None, format!("base model {} not found", base));
                continue;
            };
            self.ensure_external(module, target);
            let alias = model_alias(&module.name, &target.name);
            if extension {
                self.uml.add_implementation(&own, &alias, Some("<<extend>>"));
            } else {
                self.uml.add_inherit(&own, &alias);
            }
        }
    }

    fn produce_delegation_relations(&mut self, model: &'a Model) {
        let own = self.own_alias(model);
        for delegation in &model.inherits {
            let Some((module, target)) = self.index.resolve(&delegation.model, true) else {
                warn!(model = %model.name, target = %delegation.model, "Delegation target not found");
                self.unresolved(
                    model,
                    Some(&delegation.field),
                    format!("delegation target {} not found", delegation.model),
                );
                continue;
            };
            self.ensure_external(module, target);
            let alias = model_alias(&module.name, &target.name);
            self.uml.add_delegation(&own, &alias, &delegation.field);
        }
    }

    fn is_rendered_field(&self, model: &Model, field: &Field) -> bool {
        let subject = self.subject();
        if !self.config.show_log_attributes && LOG_FIELDS.contains(&field.name.as_str()) {
            return false;
        }
        !(self.config.show_only_own_attrs && !field.declared_by(&subject.name, model))
    }

    fn produce_associations(&mut self, model: &'a Model) {
        let subject = self.subject();
        let own = self.own_alias(model);
        for field in &model.fields {
            let kind = field.kind();
            if !matches!(kind, FieldKind::Many2one | FieldKind::One2many) {
                continue;
            }
            if !self.is_rendered_field(model, field) || field.features.delegate {
                continue;
            }
            let Some(relation) = field.relation.as_deref() else {
                warn!(model = %model.name, field = %field.name, "Relational field without target");
                self.unresolved(model, Some(&field.name), "relational field without target".to_string());
                continue;
            };
            let Some((module, target)) = self.index.resolve(relation, true) else {
                warn!(model = %model.name, field = %field.name, target = relation, "Association target not found");
                self.unresolved(model, Some(&field.name), format!("target model {} not found", relation));
                continue;
            };
            self.ensure_external(module, target);
            let alias = model_alias(&module.name, &target.name);

            let (alias1, alias2, inverse) = match kind {
                FieldKind::Many2one => {
                    let inverse = target
                        .fields
                        .iter()
                        .find(|f| {
                            f.kind() == FieldKind::One2many
                                && f.inverse_name.as_deref() == Some(field.name.as_str())
                                && f.relation.as_deref() == Some(model.name.as_str())
                        })
                        .map(|f| f.name.clone());
                    (own.clone(), alias, inverse)
                }
                // One-to-many inside the subject mirrors a many-to-one drawn from the other side
                _ if module.name == subject.name => continue,
                _ => (alias, own.clone(), field.inverse_name.clone()),
            };

            let mut link = Link::new()
                .with_cards(
                    inverse
                        .as_ref()
                        .map(|name| format!("{} *", name))
                        .unwrap_or_else(|| "*".to_string()),
                    format!("{} 1", field.name),
                )
                .directed(inverse.is_some());
            if field.on_delete == Some(OnDelete::Restrict) {
                link = link.with_name("<<restrict>>");
            }

            if field.on_delete.is_some_and(|policy| policy.is_owning()) {
                self.uml.add_composition(&alias1, &alias2, &link);
            } else {
                self.uml.add_aggregation(&alias1, &alias2, &link);
            }
        }
    }

    fn produce_many2many_associations(&mut self, model: &'a Model) {
        let subject = self.subject();
        let own = self.own_alias(model);
        for field in &model.fields {
            if field.kind() != FieldKind::Many2many {
                continue;
            }
            if self.config.show_only_own_attrs && !field.declared_by(&subject.name, model) {
                continue;
            }
            let Some(relation) = field.relation.as_deref() else {
                warn!(model = %model.name, field = %field.name, "Many2many field without target");
                self.unresolved(model, Some(&field.name), "relational field without target".to_string());
                continue;
            };
            let Some((module, target)) = self.index.resolve(relation, true) else {
                warn!(model = %model.name, field = %field.name, target = relation, "Many2many target not found");
                self.unresolved(model, Some(&field.name), format!("target model {} not found", relation));
                continue;
            };
            if module.name != subject.name {
                self.ensure_external(module, target);
            }
            let target_alias = model_alias(&module.name, &target.name);

            let join = match &field.relation_table {
                Some(table) => table.clone(),
                None => {
                    let (name, collision) = default_join_name(&model.table(), &target.table());
                    if collision {
                        error!(model = %model.name, field = %field.name, join = %name, "Ambiguous default many2many relation");
                        self.diagnostics.push(
                            Diagnostic::anomaly(format!("default join table {} is ambiguous", name))
                                .on_model(model.name.clone())
                                .on_field(field.name.clone()),
                        );
                    }
                    name
                }
            };
            let column1 = field
                .column1
                .clone()
                .unwrap_or_else(|| format!("{}_id", model.table()));
            let column2 = field
                .column2
                .clone()
                .unwrap_or_else(|| format!("{}_id", target.table()));

            let link = Link::new().with_cards("*", "*");
            if let Some((join_module, join_model)) = self.index.resolve(&join, true) {
                self.ensure_external(join_module, join_model);
                let join_alias = model_alias(&join_module.name, &join_model.name);
                self.uml
                    .add_association_class(&own, &target_alias, &join_alias, &link);
                continue;
            }

            let join_alias = produce_alias(&format!("{}_{}", subject.name, join));
            if self.marks.insert(join_alias.clone()) {
                self.uml
                    .begin_class(
                        &ClassSpec::new(camel_case(&join))
                            .with_alias(join_alias.clone())
                            .with_stereotype("table")
                            .with_icon(TABLE_ICON),
                    )
                    .add_attribute(
                        &AttributeSpec::new(column1)
                            .with_visibility(Visibility::Public)
                            .with_type(type_name(&model.name)),
                    )
                    .add_attribute(
                        &AttributeSpec::new(column2)
                            .with_visibility(Visibility::Public)
                            .with_type(type_name(&target.name)),
                    )
                    .end_class();
                self.uml
                    .add_association_class(&own, &target_alias, &join_alias, &link);
            }
        }
    }
}
