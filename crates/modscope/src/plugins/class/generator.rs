//! Class diagram generator
//!
//! Renders every model the subject module declares as a class block, then the
//! relations between them in a fixed order: inheritance, delegation,
//! many-to-one/one-to-many associations and finally many-to-many associations.
//! Models from other modules that a relation points at are materialised once
//! as skeletal external classes, right before the first relation line that
//! needs them.

use std::collections::HashSet;

use tracing::{debug, info, span, Level};

use crate::core::{
    model_alias, produce_alias, ClassSpec, DependencyIndex, Diagnostic, Diagnostics,
    DiagramConfig, DiagramFrame, DiagramGenerator, DiagramKind, MetadataSource, Model, Module,
    ModuleState, PlantUml,
};

use super::attributes::write_attributes;
use super::methods::write_methods;
use super::naming::{class_name, ModelStereotype};
use super::options::{emits_name, write_options};

pub const NOT_INSTALLED_NOTE: &str = "Module not installed. Please install it first.";
pub const NO_MODELS_NOTE: &str = "No models detected in module.";

/// Class diagram of the models declared by one module
pub struct ClassDiagramGenerator<'a, S: MetadataSource> {
    pub(super) source: &'a S,
    pub(super) config: &'a DiagramConfig,
    pub(super) index: DependencyIndex<'a>,
    pub(super) frame: DiagramFrame,
    pub(super) uml: PlantUml,
    pub(super) marks: HashSet<String>,
    pub(super) diagnostics: Diagnostics,
    output: Option<String>,
}

impl<'a, S: MetadataSource> ClassDiagramGenerator<'a, S> {
    /// Index the dependency graph of `subject`; nothing is rendered yet
    pub fn new(source: &'a S, subject: &'a Module, config: &'a DiagramConfig) -> Self {
        Self {
            source,
            config,
            index: DependencyIndex::build(source, subject),
            frame: DiagramFrame::bare(),
            uml: PlantUml::new(),
            marks: HashSet::new(),
            diagnostics: Diagnostics::new(),
            output: None,
        }
    }

    pub fn with_frame(mut self, frame: DiagramFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn subject(&self) -> &'a Module {
        self.index.subject()
    }

    pub fn index(&self) -> &DependencyIndex<'a> {
        &self.index
    }

    fn build(&mut self) -> String {
        let subject = self.subject();
        let build_span = span!(Level::INFO, "class_diagram", module = %subject.name);
        let _enter = build_span.enter();

        self.uml = self.frame.document();
        self.uml.begin_uml();
        for missing in self.index.missing_dependencies() {
            self.diagnostics.push(
                Diagnostic::unresolved(format!("dependency {} of the graph is unknown", missing)),
            );
        }
        self.check_requirements();

        let classes_span = span!(Level::DEBUG, "classes");
        let classes_enter = classes_span.enter();
        self.produce_classes();
        drop(classes_enter);

        if self.config.show_relations {
            let relations_span = span!(Level::DEBUG, "relations");
            let _relations_enter = relations_span.enter();
            self.produce_relations();
        }

        self.uml.end_uml();
        info!(
            classes = self.marks.len(),
            diagnostics = self.diagnostics.len(),
            "Class diagram generated"
        );
        std::mem::take(&mut self.uml).into_output()
    }

    fn check_requirements(&mut self) {
        let subject = self.subject();
        let alias = produce_alias(&subject.name);
        if subject.state == ModuleState::Uninstalled {
            self.uml
                .add_floating_note(NOT_INSTALLED_NOTE, &format!("{}_not_installed", alias));
        }
        if self.index.models_of(&subject.name).is_empty() {
            self.uml
                .add_floating_note(NO_MODELS_NOTE, &format!("{}_no_models", alias));
        }
    }

    fn produce_classes(&mut self) {
        let subject = self.subject();
        let models = self.index.models_of(&subject.name).to_vec();
        for model in models {
            if self.marks.insert(model_alias(&subject.name, &model.name)) {
                let owner = self.index.resolve_module(&model.name, true);
                self.produce_class(model, owner, false);
            }
        }
    }

    /// One class block; `external` renders the skeleton only
    pub(super) fn produce_class(&mut self, model: &'a Model, owner: &'a Module, external: bool) {
        let subject = self.subject();
        let kind = model.kind();
        let stereotype = ModelStereotype::of(kind, self.config);
        let original = !external && (!self.config.show_model_config_options || !emits_name(model));
        let name = class_name(
            &model.name,
            kind,
            original,
            external.then_some(owner.name.as_str()),
        );
        debug!(model = %model.name, owner = %owner.name, external, "Rendering class");

        let mut spec = ClassSpec::new(name)
            .with_alias(model_alias(&owner.name, &model.name))
            .with_icon(stereotype.icon)
            .with_icon_color(stereotype.icon_color)
            .with_stereotype(stereotype.stereotype);
        if owner.name == subject.name {
            spec = spec.with_color(self.config.color_class_self.clone());
        }
        self.uml.begin_class(&spec);

        if !external {
            if self.config.show_model_config_options {
                write_options(&mut self.uml, model);
            }
            if self.config.show_model_attributes {
                write_attributes(&mut self.uml, model, &subject.name, self.config);
            }
            if self.config.show_model_methods {
                let framework = self.source.framework_methods(kind);
                write_methods(&mut self.uml, model, &subject.name, framework);
            }
        }
        self.uml.end_class();
    }

    /// Render `model` as an external skeleton unless its alias is already marked
    pub(super) fn ensure_external(&mut self, owner: &'a Module, model: &'a Model) {
        if self.marks.insert(model_alias(&owner.name, &model.name)) {
            self.produce_class(model, owner, true);
        }
    }
}

impl<'a, S: MetadataSource> DiagramGenerator for ClassDiagramGenerator<'a, S> {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Class
    }

    fn generate(&mut self) -> &str {
        if self.output.is_none() {
            let text = self.build();
            self.output = Some(text);
        }
        self.output.as_deref().unwrap_or_default()
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, FieldType, Method, Snapshot};

    fn generate(snapshot: &Snapshot, module: &str, config: &DiagramConfig) -> String {
        let subject = snapshot.module(module).unwrap();
        let mut generator = ClassDiagramGenerator::new(snapshot, subject, config);
        generator.generate().to_string()
    }

    #[test]
    fn test_single_class_block() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("a"))
            .with_model(
                Model::new("a.b")
                    .with_module("a")
                    .with_field(Field::new("x", FieldType::Integer).required()),
            );
        let output = generate(&snapshot, "a", &DiagramConfig::default());
        assert_eq!(
            output,
            "@startuml\n\
             class \"AB\" as a_a_b <<(M, Darkorange) model>> #Yellow {\n\
             \t_name = 'a.b'\n\
             \t==\n\
             \t+ x: **Integer** {required}\n\
             \t}\n\
             hide empty members\n\
             @enduml"
        );
    }

    #[test]
    fn test_hidden_options_show_original_name() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("a"))
            .with_model(Model::new("a.b").with_module("a"));
        let config = DiagramConfig {
            show_model_config_options: false,
            ..DiagramConfig::default()
        };
        let output = generate(&snapshot, "a", &config);
        assert!(output.contains("class \"AB\\n{name='a.b'}\" as a_a_b"));
        assert!(!output.contains("_name ="));
    }

    #[test]
    fn test_abstract_and_transient_stereotypes() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("a"))
            .with_model(Model::new("a.mixin").with_module("a").abstract_model().transient())
            .with_model(Model::new("a.wizard").with_module("a").transient());
        let output = generate(&snapshot, "a", &DiagramConfig::default());
        assert!(output.contains("class \"//AMixin//\" as a_a_mixin <<(A, Gray) abstract>> #Yellow {"));
        assert!(output.contains("class \"AWizard\" as a_a_wizard <<(W, SteelBlue) transient>> #Yellow {"));
    }

    #[test]
    fn test_requirement_notes() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("empty").with_state(ModuleState::Uninstalled));
        let output = generate(&snapshot, "empty", &DiagramConfig::default());
        assert!(output.contains(&format!("note \"{}\" as empty_not_installed\n", NOT_INSTALLED_NOTE)));
        assert!(output.contains(&format!("note \"{}\" as empty_no_models\n", NO_MODELS_NOTE)));
        assert!(!output.contains("class "));
    }

    #[test]
    fn test_methods_section() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("a"))
            .with_model(
                Model::new("a.b")
                    .with_module("a")
                    .with_method(Method::new("create").with_params(&["self", "vals"]))
                    .with_method(Method::new("action_done").with_params(&["self"])),
            );
        let output = generate(&snapshot, "a", &DiagramConfig::default());
        assert!(output.contains("\t--\n\t+ action_done(self)\n"));
        assert!(!output.contains("create("));
    }

    #[test]
    fn test_generate_is_cached() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("a"))
            .with_model(Model::new("a.b").with_module("a"));
        let config = DiagramConfig::default();
        let subject = snapshot.module("a").unwrap();
        let mut generator = ClassDiagramGenerator::new(&snapshot, subject, &config);
        let first = generator.generate().to_string();
        let second = generator.generate().to_string();
        assert_eq!(first, second);
        assert_eq!(first.matches("class ").count(), 1);
        assert_eq!(generator.kind(), DiagramKind::Class);
    }

    #[test]
    fn test_duplicate_model_rendered_once() {
        let snapshot = Snapshot::new()
            .with_module(Module::new("a"))
            .with_model(Model::new("a.b").with_module("a"))
            .with_model(Model::new("a.b").with_module("a"));
        let output = generate(&snapshot, "a", &DiagramConfig::default());
        assert_eq!(output.matches("as a_a_b ").count(), 1);
    }

    #[test]
    fn test_duplicate_model_related_once() {
        let order = || {
            Model::new("sale.order").with_module("sale").with_field(
                Field::new("partner_id", FieldType::Many2one).with_relation("res.partner"),
            )
        };
        let snapshot = Snapshot::new()
            .with_module(Module::new("base"))
            .with_module(Module::new("sale").with_dependency("base"))
            .with_model(Model::new("res.partner").with_module("base"))
            .with_model(order())
            .with_model(order());
        let output = generate(&snapshot, "sale", &DiagramConfig::default());
        assert_eq!(output.matches("as sale_sale_order ").count(), 1);
        assert_eq!(
            output.matches("\"partner_id 1\" base_res_partner").count(),
            1
        );
    }
}
