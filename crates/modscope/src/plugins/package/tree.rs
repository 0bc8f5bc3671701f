//! Depth-first walk over the module dependency graph
//!
//! Both package diagrams share this walker. Each module becomes one package
//! box, emitted the first time the walk reaches it; the arrow to a neighbour
//! is written after the neighbour's whole subtree, so a box always precedes
//! every arrow that touches it. Cycles terminate on the visited set.

use std::collections::HashSet;

use tracing::{debug, info, span, warn, Level};

use crate::core::{
    model_alias, produce_alias, ClassSpec, Diagnostic, Diagnostics, DiagramConfig, DiagramFrame,
    MetadataSource, Module, PackageSpec, PlantUml,
};
use crate::plugins::class::camel_case;

use super::label::{description_note, package_color, package_label, package_stereotype};

/// Which edges the walk follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From a module to the modules it depends on
    Forward,
    /// From a module to the modules that depend on it
    Inverse,
}

pub(super) struct PackageTree<'a, S: MetadataSource> {
    source: &'a S,
    subject: &'a Module,
    config: &'a DiagramConfig,
    direction: Direction,
    pub(super) frame: DiagramFrame,
    uml: PlantUml,
    visited: HashSet<String>,
    marks: HashSet<String>,
    pub(super) diagnostics: Diagnostics,
    output: Option<String>,
}

impl<'a, S: MetadataSource> PackageTree<'a, S> {
    pub(super) fn new(
        source: &'a S,
        subject: &'a Module,
        config: &'a DiagramConfig,
        direction: Direction,
    ) -> Self {
        Self {
            source,
            subject,
            config,
            direction,
            frame: DiagramFrame::bare(),
            uml: PlantUml::new(),
            visited: HashSet::new(),
            marks: HashSet::new(),
            diagnostics: Diagnostics::new(),
            output: None,
        }
    }

    pub(super) fn subject(&self) -> &'a Module {
        self.subject
    }

    pub(super) fn generate(&mut self) -> &str {
        if self.output.is_none() {
            let text = self.build();
            self.output = Some(text);
        }
        self.output.as_deref().unwrap_or_default()
    }

    fn build(&mut self) -> String {
        let build_span = span!(
            Level::INFO,
            "package_diagram",
            module = %self.subject.name,
            direction = ?self.direction
        );
        let _enter = build_span.enter();

        self.uml = self.frame.document();
        self.uml.begin_uml();
        let subject = self.subject;
        self.produce_dependency(subject);
        self.uml.end_uml();

        info!(
            packages = self.visited.len(),
            diagnostics = self.diagnostics.len(),
            "Package diagram generated"
        );
        std::mem::take(&mut self.uml).into_output()
    }

    fn produce_dependency(&mut self, module: &'a Module) {
        if !self.visited.insert(module.name.clone()) {
            return;
        }
        self.produce_package(module);
        let alias = produce_alias(&module.name);
        let source = self.source;

        match self.direction {
            Direction::Forward => {
                for name in &module.dependencies {
                    let Some(dependency) = source.module(name) else {
                        warn!(module = %module.name, dependency = %name, "Unknown dependency skipped");
                        self.diagnostics.push(Diagnostic::unresolved(format!(
                            "module {} depends on unknown module {}",
                            module.name, name
                        )));
                        continue;
                    };
                    self.produce_dependency(dependency);
                    self.uml.add_dependency(&alias, &produce_alias(&dependency.name));
                }
            }
            Direction::Inverse => {
                for dependent in source.dependents(&module.name) {
                    self.produce_dependency(dependent);
                    self.uml.add_dependency(&produce_alias(&dependent.name), &alias);
                }
            }
        }
    }

    fn produce_package(&mut self, module: &'a Module) {
        debug!(module = %module.name, "Rendering package");
        let alias = produce_alias(&module.name);
        let color = if module.name == self.subject.name {
            self.config.color_package_self.as_str()
        } else {
            package_color(module, self.config)
        };
        let spec = PackageSpec::new(package_label(module, self.config))
            .with_alias(alias.clone())
            .with_stereotype(package_stereotype(module, self.config))
            .with_color(color);
        self.uml.begin_package(&spec);

        if self.config.show_main_description {
            self.uml
                .add_floating_note(&description_note(module), &format!("description_{}", alias));
        }
        if self.config.show_internal {
            for model in self.source.models_of(&module.name) {
                let class_alias = model_alias(&module.name, &model.name);
                if self.marks.insert(class_alias.clone()) {
                    let class = ClassSpec::new(camel_case(&model.name)).with_alias(class_alias);
                    self.uml.begin_class(&class).end_class();
                }
            }
        }
        self.uml.end_package();
    }
}
